use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{ContactStore, ContactSubmission};

#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Vec<ContactSubmission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(submissions: Vec<ContactSubmission>) -> Self {
        Self {
            data: RwLock::new(submissions),
        }
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn list(&self) -> crate::Result<Vec<ContactSubmission>> {
        Ok(self.data.read().await.clone())
    }

    async fn append(&self, submission: ContactSubmission) -> crate::Result<()> {
        self.data.write().await.insert(0, submission);
        Ok(())
    }
}
