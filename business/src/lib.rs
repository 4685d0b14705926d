//! Session and data-synchronization core for the roster client.
//!
//! This crate holds everything that is not terminal IO:
//! - session persistence and gating ([`session`])
//! - authentication against the remote directory service ([`auth`])
//! - the locally cached mirror of the remote user collection ([`users`])
//!
//! The binary crate (`roster-cli`) is intentionally "dumb": it reads state,
//! renders it, and calls the functions defined here.

pub mod auth;
pub mod config;
pub mod http;
pub mod session;
pub mod users;

pub use auth::{AuthError, LoginRequest, login, logout};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use http::{ApiError, GENERIC_ERROR_MESSAGE, Http, Response};
pub use session::{
    Access, DeniedReason, MemorySessionStore, SESSION_VALIDITY_DAYS, Session, SessionGate,
    SessionStore,
};
pub use users::{
    ActionError, DirectoryCache, DirectoryEntry, EntryAction, EntryPatch, ListPageResponse,
    LoadPhase, PAGE_SIZE, PageView, PanelState, delete_entry, derive, edit_entry, load_all,
};
