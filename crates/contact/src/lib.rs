mod error;
mod query;
mod store;
mod submission;
mod types;

pub use error::*;
pub use query::*;
pub use store::*;
pub use submission::*;
pub use types::*;

use chrono::Utc;

/// Validates `input` and records it in `store`.
///
/// The returned record carries the stored `New` status; delivery tagging is
/// left to the caller.
pub async fn submit(
    store: &dyn ContactStore,
    input: SubmitContactInput,
) -> Result<ContactSubmission> {
    let submission = input.into_submission(Utc::now())?;

    store.append(submission.clone()).await?;

    tracing::info!(
        id = %submission.id,
        contact_number = %submission.contact_number,
        inquiry_type = %submission.inquiry_type,
        "contact submission recorded"
    );

    Ok(submission)
}

/// Local read path: filter and page the stored collection.
pub async fn list(store: &dyn ContactStore, query: &ListQuery) -> Result<Page> {
    let submissions = store.list().await?;

    Ok(query.apply(submissions))
}
