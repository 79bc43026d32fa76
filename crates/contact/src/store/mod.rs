//! Persistence of contact submissions.
//!
//! - `MemoryStore`: process-local list, also used as a test double.
//! - `FileStore`: whole-file JSON storage that degrades to memory on any
//!   filesystem failure.

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use async_trait::async_trait;

use crate::ContactSubmission;

#[async_trait]
pub trait ContactStore: Send + Sync + 'static {
    /// Every stored submission, newest first.
    async fn list(&self) -> crate::Result<Vec<ContactSubmission>>;

    /// Inserts at the head of the collection and persists it.
    async fn append(&self, submission: ContactSubmission) -> crate::Result<()>;

    /// Where records currently live: `"file"` or `"memory"`.
    fn mode(&self) -> &'static str {
        "memory"
    }
}
