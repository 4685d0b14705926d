//! Authentication against the remote directory service.
//!
//! `login` exchanges credentials for a token and persists it together with a
//! locally computed expiry; `logout` unconditionally clears the stored
//! credential. Neither call validates credential *format* — that is the
//! front-end's job before it gets here.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::http::{ApiError, Http};
use crate::session::{Session, SessionStore};

/// Credentials sent to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
struct LoginResponse {
    token: String,
}

/// What can go wrong while signing in.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to persist session: {0}")]
    Store(#[from] std::io::Error),
}

impl AuthError {
    /// The message to surface to the operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::Store(e) => format!("failed to persist session: {e}"),
        }
    }
}

/// POST `/login`, then persist the issued token with its expiry.
///
/// Nothing is persisted on any failure path: the store is only touched once
/// the remote has accepted the credentials and the response decoded.
pub async fn login(
    http: &Http,
    config: &ApiConfig,
    store: &mut dyn SessionStore,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<Session, AuthError> {
    let url = format!("{}/login", config.api_url());
    let request = LoginRequest {
        email: email.to_owned(),
        password: password.to_owned(),
    };

    let response = http.post_json(&url, &request).await?;
    if !response.is_success() {
        let e = response.into_rejection();
        info!("login rejected: {e}");
        return Err(e.into());
    }

    let LoginResponse { token } = response.json()?;
    let session = Session::issue(token, now);
    store.save(&session)?;

    info!("logged in, session valid until {}", session.expires_at);
    Ok(session)
}

/// Clear the stored credential. Idempotent: logging out while signed out is
/// a no-op.
pub fn logout(store: &mut dyn SessionStore) -> std::io::Result<()> {
    store.clear()?;
    info!("logged out");
    Ok(())
}
