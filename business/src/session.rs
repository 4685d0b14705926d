//! Session persistence and gating.
//!
//! A session is an opaque token issued by the remote service plus a locally
//! computed expiry. It is persisted through the [`SessionStore`] trait so the
//! storage backend is injectable: the CLI uses a file under the home
//! directory, tests use [`MemorySessionStore`].
//!
//! The gate is the only component allowed to decide whether protected
//! operations may run. It is checked once per protected command, not on
//! every state change, and it never clears stored state itself — that is
//! the logout path's job.

use chrono::{DateTime, Duration, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

/// How long a freshly issued token stays valid.
pub const SESSION_VALIDITY_DAYS: i64 = 5;

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token issued by the remote service.
    pub token: String,
    /// Instant after which the token is no longer honored locally.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Build a session issued at `now`, expiring after the fixed validity
    /// window.
    pub fn issue(token: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at: now + Duration::days(SESSION_VALIDITY_DAYS),
        }
    }

    /// A session expires the instant its expiry is reached.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Durable storage for the session credential.
pub trait SessionStore {
    /// Read the stored session, `None` when signed out.
    fn load(&self) -> std::io::Result<Option<Session>>;

    /// Persist the session, replacing any previous one.
    fn save(&mut self, session: &Session) -> std::io::Result<()>;

    /// Remove the stored session. Removing an absent session is fine.
    fn clear(&mut self) -> std::io::Result<()>;
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Option<Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> std::io::Result<Option<Session>> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &Session) -> std::io::Result<()> {
        self.session = Some(session.clone());
        Ok(())
    }

    fn clear(&mut self) -> std::io::Result<()> {
        self.session = None;
        Ok(())
    }
}

/// Why the gate refused entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeniedReason {
    /// No stored credential at all.
    NotSignedIn,
    /// A credential exists but its expiry has passed.
    Expired,
}

impl DeniedReason {
    /// The notification text shown before redirecting to login.
    pub fn message(self) -> &'static str {
        match self {
            Self::NotSignedIn => "Please login first",
            Self::Expired => "Token expired. Please login again",
        }
    }
}

/// Outcome of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted(Session),
    Denied(DeniedReason),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

/// Decides whether protected operations may run.
pub struct SessionGate;

impl SessionGate {
    /// Read the stored session and decide. Pure apart from the store read:
    /// an expired credential is reported but not cleared here.
    pub fn check(store: &dyn SessionStore, now: DateTime<Utc>) -> Access {
        match store.load() {
            Ok(Some(session)) if session.is_expired(now) => {
                Access::Denied(DeniedReason::Expired)
            }
            Ok(Some(session)) => Access::Granted(session),
            Ok(None) => Access::Denied(DeniedReason::NotSignedIn),
            Err(e) => {
                // An unreadable store is indistinguishable from signed-out.
                warn!("failed to read session store: {e}");
                Access::Denied(DeniedReason::NotSignedIn)
            }
        }
    }
}
