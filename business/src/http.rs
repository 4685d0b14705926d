//! Thin HTTP layer over reqwest.
//!
//! Every remote call in this crate goes through [`Http`] and comes back as a
//! uniform [`Response`] (status + raw body), so the call sites can apply one
//! shared policy for turning non-2xx statuses and transport failures into an
//! [`ApiError`] the UI layer can show directly.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Fallback shown when the remote gives us nothing better.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Error taxonomy for remote calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Transport(String),

    /// The remote answered with a non-success status. `message` carries the
    /// structured `{"error": ...}` payload when the remote sent one.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The remote answered 2xx but the body did not decode.
    #[error("failed to decode server response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The human-readable message to surface: the remote's own error text
    /// when present, the generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Transport(_) | Self::Rejected { .. } | Self::Decode(_) => {
                GENERIC_ERROR_MESSAGE.to_owned()
            }
        }
    }
}

/// Error payload the directory service attaches to rejections.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

/// A response reduced to what call sites need.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Attempt to deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Turn a non-success response into [`ApiError::Rejected`], extracting
    /// the structured error message when the body carries one.
    pub fn into_rejection(self) -> ApiError {
        let message = serde_json::from_slice::<ErrorPayload>(&self.body)
            .ok()
            .map(|payload| payload.error);
        ApiError::Rejected {
            status: self.status,
            message,
        }
    }
}

/// HTTP client shared across the session.
#[derive(Debug, Clone, Default)]
pub struct Http {
    client: reqwest::Client,
}

impl Http {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, url: &str) -> Result<Response, ApiError> {
        self.execute(self.client.get(url)).await
    }

    pub async fn post_json<T: serde::Serialize>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        self.execute(self.client.post(url).json(body)).await
    }

    pub async fn put_json<T: serde::Serialize>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        self.execute(self.client.put(url).json(body)).await
    }

    pub async fn delete(&self, url: &str) -> Result<Response, ApiError> {
        self.execute(self.client.delete(url)).await
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .to_vec();

        Ok(Response { status, body })
    }
}
