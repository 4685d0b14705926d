//! Typed calls against the `/users` endpoints.
//!
//! One function per endpoint; each checks the status, converts rejections
//! into [`ApiError`] with the remote's structured message when present, and
//! decodes the body it actually needs.

use crate::config::ApiConfig;
use crate::http::{ApiError, Http};

use super::{EntryPatch, ListPageResponse};

/// GET `/users?page=N`
pub async fn list_page(
    http: &Http,
    config: &ApiConfig,
    page: u32,
) -> Result<ListPageResponse, ApiError> {
    let url = format!("{}/users?page={page}", config.api_url());

    let response = http.get(&url).await?;
    if !response.is_success() {
        return Err(response.into_rejection());
    }

    response.json()
}

/// PUT `/users/{id}`
///
/// The remote echoes fields back but is not required to echo the exact
/// patch, so success is judged by status alone and the body discarded; the
/// caller applies the local patch to the cache itself.
pub async fn update_entry(
    http: &Http,
    config: &ApiConfig,
    id: u64,
    patch: &EntryPatch,
) -> Result<(), ApiError> {
    let url = format!("{}/users/{id}", config.api_url());

    let response = http.put_json(&url, patch).await?;
    if !response.is_success() {
        return Err(response.into_rejection());
    }

    Ok(())
}

/// DELETE `/users/{id}` — empty body on success.
pub async fn delete_entry(http: &Http, config: &ApiConfig, id: u64) -> Result<(), ApiError> {
    let url = format!("{}/users/{id}", config.api_url());

    let response = http.delete(&url).await?;
    if !response.is_success() {
        return Err(response.into_rejection());
    }

    Ok(())
}
