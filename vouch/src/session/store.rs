//! Session storage backends.
//!
//! [`SessionStore`] is the durability boundary: `save` followed by `load`
//! with the same id must reconstruct the session exactly. Whether that
//! survives a process restart is the backend's choice: [`MemoryStore`] does
//! not, [`FileStore`] does.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::session::Session;

/// Async trait for session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a session by id. Returns `None` if absent.
    async fn load(&self, id: &str) -> Result<Option<Session>>;

    /// Save a session (idempotent full overwrite).
    async fn save(&self, session: &Session) -> Result<()>;

    /// Delete a session. Deleting an absent id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;

    /// List all stored session ids.
    async fn list_ids(&self) -> Result<Vec<String>>;
}

/// A shared, reference-counted store for use across tasks.
pub type SharedStore = Arc<dyn SessionStore>;

/// In-memory session storage. Fast, not persistent across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemoryStore {
    /// Create a new in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        Ok(self.sessions.read().await.keys().cloned().collect())
    }
}

/// File-based session storage: one pretty-printed JSON file per session.
#[derive(Debug)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn session_path(&self, id: &str) -> PathBuf {
        // Sanitize the id for use as a filename.
        let safe_id = id.replace([':', '/', '\\'], "_");
        self.base_path.join(format!("{safe_id}.json"))
    }

    async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load(&self, id: &str) -> Result<Option<Session>> {
        let path = self.session_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&path).await?;
        let session: Session = serde_json::from_str(&content)?;
        debug!(id = %id, "loaded session from file");
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.ensure_dir().await?;

        let path = self.session_path(&session.id);
        let content = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&path, content).await?;
        debug!(id = %session.id, messages = session.history.len(), "saved session");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = self.session_path(id);
        if path.exists() {
            tokio::fs::remove_file(&path).await?;
            debug!(id = %id, "deleted session file");
        }
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        self.ensure_dir().await?;

        let mut ids = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem()
            {
                ids.push(stem.to_string_lossy().into_owned());
            }
        }

        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approval::PendingAction;
    use crate::message::Message;
    use serde_json::json;

    fn suspended_session() -> Session {
        let mut session = Session::new("test:123");
        session.push(Message::user("write 'hi' to out.txt"));
        session.pending = Some(PendingAction {
            tool_name: "write_file".into(),
            arguments: json!({"filename": "out.txt", "content": "hi"}),
            position: 0,
        });
        session
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let session = suspended_session();

        store.save(&session).await.unwrap();
        let loaded = store.load("test:123").await.unwrap().unwrap();
        assert_eq!(loaded.history, session.history);
        assert_eq!(loaded.pending, session.pending);

        assert_eq!(store.list_ids().await.unwrap().len(), 1);

        store.delete("test:123").await.unwrap();
        assert!(store.load("test:123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let session = suspended_session();

        store.save(&session).await.unwrap();

        // A fresh store over the same directory sees the same state, which
        // is what cross-process resumption relies on.
        let reopened = FileStore::new(dir.path());
        let loaded = reopened.load("test:123").await.unwrap().unwrap();
        assert_eq!(loaded.history, session.history);
        assert_eq!(loaded.pending, session.pending);

        reopened.delete("test:123").await.unwrap();
        assert!(reopened.load("test:123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_is_idempotent_overwrite() {
        let store = MemoryStore::new();
        let mut session = suspended_session();
        store.save(&session).await.unwrap();

        session.pending = None;
        session.push(Message::assistant("done"));
        store.save(&session).await.unwrap();

        let loaded = store.load("test:123").await.unwrap().unwrap();
        assert!(loaded.pending.is_none());
        assert_eq!(loaded.history.len(), 2);
    }

    #[tokio::test]
    async fn test_load_absent_is_none() {
        let store = MemoryStore::new();
        assert!(store.load("nope").await.unwrap().is_none());
    }
}
