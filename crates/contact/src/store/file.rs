use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{ContactStore, ContactSubmission};

pub const CONTACTS_FILE: &str = "contacts.json";

/// JSON array on disk, rewritten whole on every append.
///
/// The first filesystem failure moves the store to memory for the rest of
/// the process. Appends are serialized inside one process only; separate
/// processes sharing the file are last-writer-wins.
pub struct FileStore {
    path: PathBuf,
    fallback: Mutex<Option<Vec<ContactSubmission>>>,
    degraded: AtomicBool,
}

impl FileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::with_path(data_dir.as_ref().join(CONTACTS_FILE))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fallback: Mutex::new(None),
            degraded: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    async fn ensure_file(&self) -> crate::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                tokio::fs::create_dir_all(parent).await?;
            }
            _ => {}
        }

        if !tokio::fs::try_exists(&self.path).await? {
            tokio::fs::write(&self.path, b"[]").await?;
            tracing::debug!(path = %self.path.display(), "created contact store file");
        }

        Ok(())
    }

    async fn read_file(&self) -> crate::Result<Vec<ContactSubmission>> {
        self.ensure_file().await?;

        let content = tokio::fs::read_to_string(&self.path).await?;

        serde_json::from_str(&content).map_err(|e| crate::Error::Storage(e.to_string()))
    }

    /// Sibling file the new content is written to before replacing `path`.
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn write_file(&self, submissions: &[ContactSubmission]) -> crate::Result<()> {
        let content = serde_json::to_vec_pretty(submissions)?;
        let staging = self.staging_path();

        tokio::fs::write(&staging, content).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        Ok(())
    }

    fn degrade(
        &self,
        fallback: &mut Option<Vec<ContactSubmission>>,
        submissions: Vec<ContactSubmission>,
        error: crate::Error,
    ) {
        tracing::warn!(
            path = %self.path.display(),
            error = %error,
            "contact store file unavailable, keeping submissions in memory"
        );

        *fallback = Some(submissions);
        self.degraded.store(true, Ordering::Release);
    }
}

#[async_trait]
impl ContactStore for FileStore {
    async fn list(&self) -> crate::Result<Vec<ContactSubmission>> {
        let mut fallback = self.fallback.lock().await;

        if let Some(submissions) = fallback.as_ref() {
            return Ok(submissions.clone());
        }

        match self.read_file().await {
            Ok(submissions) => Ok(submissions),
            Err(e) => {
                self.degrade(&mut fallback, Vec::new(), e);
                Ok(Vec::new())
            }
        }
    }

    async fn append(&self, submission: ContactSubmission) -> crate::Result<()> {
        let mut fallback = self.fallback.lock().await;

        if let Some(submissions) = fallback.as_mut() {
            submissions.insert(0, submission);
            return Ok(());
        }

        let mut submissions = match self.read_file().await {
            Ok(submissions) => submissions,
            Err(e) => {
                self.degrade(&mut fallback, vec![submission], e);
                return Ok(());
            }
        };

        submissions.insert(0, submission);

        if let Err(e) = self.write_file(&submissions).await {
            self.degrade(&mut fallback, submissions, e);
        }

        Ok(())
    }

    fn mode(&self) -> &'static str {
        if self.is_degraded() { "memory" } else { "file" }
    }
}
