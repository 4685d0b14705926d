//! CLI workflow tests using mock servers.
//!
//! These tests don't spawn the actual binary; they exercise the same
//! business workflows the commands compose — gate, login, load, derive,
//! mutate — against wiremock endpoints.

use chrono::{DateTime, Duration, Utc};
use roster_business::{
    Access, ApiConfig, DeniedReason, DirectoryCache, EntryAction, Http, MemorySessionStore,
    PanelState, Session, SessionGate, delete_entry, derive, edit_entry, load_all, login,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test context for CLI workflow tests.
struct CliTestContext {
    mock_server: MockServer,
    http: Http,
    config: ApiConfig,
    store: MemorySessionStore,
}

impl CliTestContext {
    /// Create a new test context with a fresh mock server.
    async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = ApiConfig::new(mock_server.uri());

        Self {
            mock_server,
            http: Http::new(),
            config,
            store: MemorySessionStore::new(),
        }
    }

    /// Mock the login endpoint to succeed with `token`.
    async fn mock_login(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
            .mount(&self.mock_server)
            .await;
    }

    /// Mock the two-page users listing the hosted service serves.
    async fn mock_directory(&self) {
        let page1: Vec<serde_json::Value> = (1..=6)
            .map(|id| {
                json!({
                    "id": id,
                    "email": format!("user{id}@reqres.in"),
                    "first_name": format!("First{id}"),
                    "last_name": format!("Last{id}"),
                    "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg"),
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1, "per_page": 6, "total": 7, "total_pages": 2, "data": page1,
            })))
            .mount(&self.mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 2, "per_page": 6, "total": 7, "total_pages": 2, "data": [{
                    "id": 7,
                    "email": "ann.avery@reqres.in",
                    "first_name": "Ann",
                    "last_name": "Avery",
                    "avatar": "https://reqres.in/img/faces/7-image.jpg",
                }],
            })))
            .mount(&self.mock_server)
            .await;
    }

    async fn sign_in(&mut self, now: DateTime<Utc>) -> Session {
        login(
            &self.http,
            &self.config,
            &mut self.store,
            "eve.holt@reqres.in",
            "cityslicka",
            now,
        )
        .await
        .expect("login should succeed")
    }
}

fn now() -> DateTime<Utc> {
    "2024-06-01T12:00:00Z".parse().expect("valid instant")
}

#[tokio::test]
async fn signed_out_then_login_then_list_workflow() {
    let mut ctx = CliTestContext::new().await;

    // Gate refuses before login — the command would drop into the login
    // prompt here.
    assert_eq!(
        SessionGate::check(&ctx.store, now()),
        Access::Denied(DeniedReason::NotSignedIn)
    );

    ctx.mock_login("QpwL5tke4Pnpja7X4").await;
    ctx.mock_directory().await;
    ctx.sign_in(now()).await;

    // Gate now grants, and the list workflow sees all seven entries.
    assert!(SessionGate::check(&ctx.store, now()).is_granted());

    let mut cache = DirectoryCache::new();
    load_all(&ctx.http, &ctx.config, &mut cache)
        .await
        .expect("load should succeed");

    let first_page = derive(cache.snapshot(), "", 1);
    assert_eq!(first_page.entries.len(), 6);
    assert!(first_page.has_next);

    let second_page = derive(cache.snapshot(), "", 2);
    assert_eq!(second_page.entries.len(), 1);
    assert_eq!(second_page.entries[0].full_name(), "Ann Avery");
    assert!(!second_page.has_next);
}

#[tokio::test]
async fn expired_session_denies_and_relogin_replaces_it() {
    let mut ctx = CliTestContext::new().await;
    ctx.mock_login("fresh-token").await;

    // A session issued six days ago is past its five-day window.
    let stale = ctx.sign_in(now() - Duration::days(6)).await;
    assert_eq!(
        SessionGate::check(&ctx.store, now()),
        Access::Denied(DeniedReason::Expired)
    );

    // Logging in again replaces the stale credential.
    let fresh = ctx.sign_in(now()).await;
    assert_ne!(stale.expires_at, fresh.expires_at);
    assert_eq!(SessionGate::check(&ctx.store, now()), Access::Granted(fresh));
}

#[tokio::test]
async fn search_workflow_matches_by_name_across_pages() {
    let mut ctx = CliTestContext::new().await;
    ctx.mock_login("tok").await;
    ctx.mock_directory().await;
    ctx.sign_in(now()).await;

    let mut cache = DirectoryCache::new();
    load_all(&ctx.http, &ctx.config, &mut cache)
        .await
        .expect("load should succeed");

    // "ann" only matches the entry that came from remote page 2; the local
    // view pages over the filtered result, not the remote pages.
    let view = derive(cache.snapshot(), "ann", 1);
    assert_eq!(view.matching, 1);
    assert_eq!(view.entries[0].id, 7);
    assert!(!view.has_next);
    assert!(!view.has_previous);
}

#[tokio::test]
async fn edit_then_delete_workflow_keeps_cache_consistent() {
    let mut ctx = CliTestContext::new().await;
    ctx.mock_login("tok").await;
    ctx.mock_directory().await;
    ctx.sign_in(now()).await;

    let mut cache = DirectoryCache::new();
    load_all(&ctx.http, &ctx.config, &mut cache)
        .await
        .expect("load should succeed");
    assert_eq!(cache.len(), 7);

    Mock::given(method("PUT"))
        .and(path("/api/users/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updatedAt": "2024-06-01T12:00:00.000Z",
        })))
        .mount(&ctx.mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&ctx.mock_server)
        .await;

    // Edit entry 3 through the dialog state.
    let mut panel = PanelState::new();
    panel.start_action(EntryAction::Edit(3), cache.snapshot());
    panel.edit_first_name = "Renamed".to_owned();
    let patch = panel.edit_patch();
    edit_entry(&ctx.http, &ctx.config, &mut cache, &mut panel, 3, patch)
        .await
        .expect("edit should succeed");

    assert_eq!(cache.len(), 7);
    assert_eq!(cache.get(3).expect("entry 3").first_name, "Renamed");
    assert_eq!(panel.current_action, EntryAction::None);

    // Then delete entry 7 through a fresh dialog.
    panel.start_action(EntryAction::Delete(7), cache.snapshot());
    delete_entry(&ctx.http, &ctx.config, &mut cache, &mut panel)
        .await
        .expect("delete should succeed");

    assert_eq!(cache.len(), 6);
    assert!(cache.get(7).is_none());

    // The derived view reflects both mutations.
    let view = derive(cache.snapshot(), "", 1);
    assert_eq!(view.matching, 6);
    assert!(!view.has_next);
}
