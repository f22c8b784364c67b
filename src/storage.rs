/// Session persistence on top of an async key-value store

use crate::config::{DARK_MODE_KEY, SESSIONS_KEY};
use crate::error::Result;
use crate::error::SessionError;
use crate::tab_data::Session;
use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;

/// Async key-value storage scoped to the extension (chrome.storage.local)
#[async_trait(?Send)]
pub trait KeyValueStore {
    /// Read a key; `None` if it was never written
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// In-memory session list, written through to storage on every mutation.
///
/// Each mutation rewrites the whole `sessions` key. The in-memory list is
/// only replaced once the write succeeds, so a failed write leaves it as
/// it was before the call.
pub struct SessionStore<S> {
    backend: S,
    sessions: RefCell<Vec<Session>>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        SessionStore {
            backend,
            sessions: RefCell::new(Vec::new()),
        }
    }

    /// Snapshot of the current list in storage order
    pub fn sessions(&self) -> Vec<Session> {
        self.sessions.borrow().clone()
    }

    pub fn get(&self, timestamp: i64) -> Option<Session> {
        self.sessions
            .borrow()
            .iter()
            .find(|s| s.timestamp == timestamp)
            .cloned()
    }

    pub async fn load_all(&self) -> Result<Vec<Session>> {
        let sessions: Vec<Session> = match self.backend.get(SESSIONS_KEY).await? {
            Some(Value::Null) | None => Vec::new(),
            Some(value) => serde_json::from_value(value)?,
        };

        log::debug!("Loaded {} sessions", sessions.len());
        *self.sessions.borrow_mut() = sessions.clone();
        Ok(sessions)
    }

    pub async fn save_all(&self, sessions: Vec<Session>) -> Result<()> {
        let value = serde_json::to_value(&sessions)?;
        self.backend.set(SESSIONS_KEY, value).await?;
        *self.sessions.borrow_mut() = sessions;
        Ok(())
    }

    pub async fn append(&self, session: Session) -> Result<()> {
        let mut sessions = self.sessions();
        sessions.push(session);
        self.save_all(sessions).await
    }

    /// Remove the first session with `timestamp`. Returns `false` if none matched.
    pub async fn remove_by_timestamp(&self, timestamp: i64) -> Result<bool> {
        let mut sessions = self.sessions();
        let Some(pos) = sessions.iter().position(|s| s.timestamp == timestamp) else {
            return Ok(false);
        };

        sessions.remove(pos);
        self.save_all(sessions).await?;
        Ok(true)
    }

    /// Replace the name of the session with `timestamp`. Returns `false` if none matched.
    pub async fn rename_by_timestamp(&self, timestamp: i64, new_name: &str) -> Result<bool> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(SessionError::EmptyName);
        }

        let mut sessions = self.sessions();
        let Some(session) = sessions.iter_mut().find(|s| s.timestamp == timestamp) else {
            return Ok(false);
        };

        session.name = new_name.to_string();
        self.save_all(sessions).await?;
        Ok(true)
    }

    pub async fn load_dark_mode(&self) -> Result<bool> {
        match self.backend.get(DARK_MODE_KEY).await? {
            Some(Value::Bool(enabled)) => Ok(enabled),
            _ => Ok(false),
        }
    }

    pub async fn save_dark_mode(&self, enabled: bool) -> Result<()> {
        self.backend.set(DARK_MODE_KEY, Value::Bool(enabled)).await
    }
}
