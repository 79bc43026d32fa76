use std::sync::Arc;

use carelead_contact::{ContactStore, ContactSubmission, MemoryStore, SubmitContactInput};

pub fn input(name: impl Into<String>) -> SubmitContactInput {
    let name = name.into();

    SubmitContactInput {
        first_name: Some(name.to_owned()),
        last_name: Some("Tester".to_owned()),
        email: Some(format!("{name}@carelead.localhost")),
        phone_number: Some("555-0100".to_owned()),
        subject: Some("Medicare supplement quote".to_owned()),
        message: Some("Please call me back".to_owned()),
        inquiry_type: Some("Insurance".to_owned()),
    }
}

#[allow(dead_code)]
pub fn memory_store() -> Arc<dyn ContactStore> {
    Arc::new(MemoryStore::new())
}

#[allow(dead_code)]
pub async fn submit_all(
    store: &dyn ContactStore,
    names: impl IntoIterator<Item = impl Into<String>>,
) -> anyhow::Result<Vec<ContactSubmission>> {
    let mut submissions = vec![];
    for name in names.into_iter() {
        submissions.push(carelead_contact::submit(store, input(name)).await?);
    }

    Ok(submissions)
}
