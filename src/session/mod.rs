//! Session store for the login token and signed-in user.
//!
//! The single source of truth for authentication state. Pages never read the
//! persisted file directly; they go through this store, and a token clear
//! anywhere is observable by every subscriber so dependent views can redirect
//! to login immediately.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::errors::AppError;
use crate::models::User;

/// A logged-in session as persisted to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Process-wide session store backed by a JSON file.
pub struct SessionStore {
    path: PathBuf,
    state: Mutex<Option<Session>>,
    tx: watch::Sender<bool>,
}

impl SessionStore {
    /// Open the store, restoring any persisted session.
    ///
    /// An unreadable or corrupt session file is treated as logged-out rather
    /// than an error; the user can always log in again.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("Discarding unreadable session file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let (tx, _) = watch::channel(state.is_some());

        Ok(Self {
            path,
            state: Mutex::new(state),
            tx,
        })
    }

    /// The current bearer token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .as_ref()
            .map(|s| s.token.clone())
    }

    /// The signed-in user, if logged in.
    pub fn user(&self) -> Option<User> {
        self.state.lock().unwrap().as_ref().map(|s| s.user.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.lock().unwrap().is_some()
    }

    /// Store a new session (login or re-login) and persist it.
    pub fn set(&self, session: Session) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&session)?)?;

        *self.state.lock().unwrap() = Some(session);
        self.tx.send_replace(true);
        tracing::info!("Session stored at {:?}", self.path);
        Ok(())
    }

    /// End the session: forget the token and remove the persisted file.
    pub fn clear(&self) -> Result<(), AppError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        *self.state.lock().unwrap() = None;
        self.tx.send_replace(false);
        tracing::info!("Session cleared");
        Ok(())
    }

    /// Subscribe to login-state transitions. The received value is whether a
    /// session is currently present; views redirect to login on `false`.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn sample_session() -> Session {
        Session {
            token: "tok-123".to_string(),
            user: User {
                id: "u1".to_string(),
                name: "Admin".to_string(),
                email: "admin@example.com".to_string(),
            },
        }
    }

    #[test]
    fn test_open_without_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json")).unwrap();

        assert!(!store.is_logged_in());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_set_persists_and_reopen_restores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/session.json");

        let store = SessionStore::open(&path).unwrap();
        store.set(sample_session()).unwrap();
        assert_eq!(store.token().as_deref(), Some("tok-123"));

        let reopened = SessionStore::open(&path).unwrap();
        assert!(reopened.is_logged_in());
        assert_eq!(reopened.user().unwrap().email, "admin@example.com");
    }

    #[test]
    fn test_clear_removes_file_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open(&path).unwrap();
        store.set(sample_session()).unwrap();

        let rx = store.subscribe();
        assert!(*rx.borrow());

        store.clear().unwrap();
        assert!(!*rx.borrow());
        assert!(!path.exists());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_corrupt_file_is_treated_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = SessionStore::open(&path).unwrap();
        assert!(!store.is_logged_in());
    }
}
