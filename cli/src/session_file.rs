//! File-backed session storage.
//!
//! The session lives as JSON at `~/.roster/session`, mirroring the wire
//! shape `{token, expires_at}` with an ISO-8601 expiry. A missing file means
//! signed out; an unreadable one surfaces as an error the gate treats as
//! signed out.

use std::fs;
use std::io;
use std::path::PathBuf;

use roster_business::{Session, SessionStore};

/// Session store persisting to a JSON file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at the default location, `~/.roster/session`.
    pub fn open_default() -> io::Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "could not find home directory"))?;
        Ok(Self::at(home.join(".roster").join("session")))
    }

    /// Store at an explicit path. Used by tests.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> io::Result<Option<Session>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let session = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(session))
    }

    fn save(&mut self, session: &Session) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }

    fn clear(&mut self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roster_business::{Access, DeniedReason, SessionGate};

    fn store_in(dir: &tempfile::TempDir) -> FileSessionStore {
        FileSessionStore::at(dir.path().join("session"))
    }

    #[test]
    fn test_load_missing_file_is_signed_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);

        let session = Session::issue("QpwL5tke4Pnpja7X4", Utc::now());
        store.save(&session).expect("save");

        assert_eq!(store.load().expect("load"), Some(session));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = FileSessionStore::at(dir.path().join("nested").join("session"));

        store
            .save(&Session::issue("tok", Utc::now()))
            .expect("save");
        assert!(store.path().exists());
    }

    #[test]
    fn test_clear_removes_file_and_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);

        store
            .save(&Session::issue("tok", Utc::now()))
            .expect("save");
        store.clear().expect("first clear");
        assert!(!store.path().exists());
        store.clear().expect("second clear");
    }

    #[test]
    fn test_corrupt_file_counts_as_signed_out_at_the_gate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(&dir);
        fs::write(store.path(), "not json").expect("write");

        assert!(store.load().is_err());
        assert_eq!(
            SessionGate::check(&store, Utc::now()),
            Access::Denied(DeniedReason::NotSignedIn)
        );
    }

    #[test]
    fn test_stored_expiry_is_iso8601() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);

        let now = "2024-06-01T12:00:00Z".parse().expect("valid instant");
        store.save(&Session::issue("tok", now)).expect("save");

        let raw = fs::read_to_string(store.path()).expect("read");
        assert!(raw.contains("2024-06-06T12:00:00Z"));
    }
}
