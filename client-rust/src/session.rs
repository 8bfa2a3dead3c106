use crate::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};
use tokio::sync::watch;

/// Proof of admin authentication held on this device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub authenticated: bool,
}

impl Session {
    #[must_use]
    pub fn authenticated(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            authenticated: true,
        }
    }

    /// A session counts only with both the flag and a non-empty token.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.authenticated && self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// Single-slot local persistence for the session, so a restart does not
/// force a new login.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> ClientResult<Option<Session>>;
    fn save(&self, session: &Session) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// Stores the session as a JSON file.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> ClientResult<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(ClientError::Storage(format!(
                    "Failed to read {}: {error}",
                    self.path.display()
                )))
            }
        };
        serde_json::from_str(&raw).map(Some).map_err(|error| {
            ClientError::Storage(format!("Corrupt session file {}: {error}", self.path.display()))
        })
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| {
                ClientError::Storage(format!("Failed to create {}: {error}", parent.display()))
            })?;
        }
        let raw = serde_json::to_string(session)
            .map_err(|error| ClientError::Storage(format!("Failed to encode session: {error}")))?;
        fs::write(&self.path, raw).map_err(|error| {
            ClientError::Storage(format!("Failed to write {}: {error}", self.path.display()))
        })
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ClientError::Storage(format!(
                "Failed to remove {}: {error}",
                self.path.display()
            ))),
        }
    }
}

/// Keeps the session in process memory only.
#[derive(Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> ClientResult<Option<Session>> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

/// Owned session state shared by the client adapter and the route guard.
///
/// Cloning is cheap; all clones observe the same session. Changes are
/// broadcast to [`SessionStore::subscribe`] receivers.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<Session>>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Start signed out, persisting future changes to `storage`.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            state: Arc::new(state),
            storage,
        }
    }

    /// Rebuild the session left in `storage` by a previous run. A missing,
    /// unreadable or incomplete slot starts signed out.
    pub fn restore(storage: Arc<dyn SessionStorage>) -> Self {
        let store = Self::new(storage);
        match store.storage.load() {
            Ok(Some(session)) if session.is_valid() => {
                tracing::debug!("restored persisted admin session");
                store.state.send_replace(session);
            }
            Ok(_) => {}
            Err(error) => tracing::warn!(%error, "could not restore persisted session"),
        }
        store
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStorage::new()))
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_valid()
    }

    /// The bearer credential to attach, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        let session = self.state.borrow();
        if session.is_valid() {
            session.token.clone()
        } else {
            None
        }
    }

    /// Record a successful login.
    pub fn establish(&self, token: impl Into<String>) {
        let session = Session::authenticated(token);
        if let Err(error) = self.storage.save(&session) {
            tracing::warn!(%error, "session established but not persisted");
        }
        self.state.send_replace(session);
    }

    /// Forget the session. Never fails; a storage error is only logged.
    pub fn logout(&self) {
        if let Err(error) = self.storage.clear() {
            tracing::warn!(%error, "failed to clear persisted session");
        }
        let previous = self.state.send_replace(Session::default());
        if previous.authenticated {
            tracing::debug!("admin session cleared");
        }
    }

    /// Observe session changes. The receiver starts at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn establish_and_logout_toggle_authentication() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);

        store.establish("abc");
        assert!(store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("abc"));

        store.logout();
        assert!(!store.is_authenticated());
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn session_survives_restore_from_shared_storage() {
        let storage: Arc<dyn SessionStorage> = Arc::new(MemorySessionStorage::new());
        SessionStore::new(storage.clone()).establish("persisted");

        let reloaded = SessionStore::restore(storage.clone());
        assert_eq!(reloaded.token().as_deref(), Some("persisted"));

        reloaded.logout();
        assert!(!SessionStore::restore(storage).is_authenticated());
    }

    #[test]
    fn file_storage_round_trips_and_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("admin").join("session.json"));
        assert_eq!(storage.load().unwrap(), None);

        storage.save(&Session::authenticated("tok")).unwrap();
        assert_eq!(
            storage.load().unwrap(),
            Some(Session::authenticated("tok"))
        );

        storage.clear().unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn corrupt_file_restores_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::restore(Arc::new(FileSessionStorage::new(path)));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn subscribers_see_changes() {
        let store = SessionStore::in_memory();
        let mut receiver = store.subscribe();
        assert!(!receiver.borrow_and_update().authenticated);

        store.establish("t");
        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().authenticated);
    }
}
