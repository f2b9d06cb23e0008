//! Router tests for the store selector.
//!
//! These drive the full middleware stack with in-memory sessions and an
//! in-memory store directory.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{
        Request, StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
    response::Response,
};
use tower::ServiceExt;

use store_selector_core::{Store, StoreId};

use crate::db::InMemoryStoreDirectory;
use crate::middleware::session::SESSION_COOKIE_NAME;
use crate::services::store_select::NOT_ENOUGH_STORES_MESSAGE;
use crate::state::AppState;
use crate::test_support::{test_app, test_config, test_state};

fn three_stores() -> InMemoryStoreDirectory {
    InMemoryStoreDirectory::new(vec![
        Store::new(StoreId::new(3), "Downtown"),
        Store::new(StoreId::new(7), "Harbor"),
        Store::new(StoreId::new(9), "Airport"),
    ])
}

fn app(directory: InMemoryStoreDirectory) -> Router {
    test_app(test_state(directory))
}

async fn get(app: Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let resp = get(app(three_stores()), "/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");

    let resp = get(app(three_stores()), "/health/ready", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Select page
// ============================================================================

#[tokio::test]
async fn test_select_page_preselects_first_store() {
    let resp = get(app(three_stores()), "/stores/select", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CACHE_CONTROL], "no-store");

    let html = body_text(resp).await;
    assert!(html.contains(r#"<option value="3" selected>Downtown</option>"#));
    assert!(html.contains(r#"<option value="7">Harbor</option>"#));
    assert!(html.contains(r#"<option value="9">Airport</option>"#));
    assert!(html.contains("Switch!"));
    assert!(!html.contains(NOT_ENOUGH_STORES_MESSAGE));
}

#[tokio::test]
async fn test_select_page_starts_anonymous_session() {
    let resp = get(app(three_stores()), "/stores/select", None).await;
    let cookies = set_cookies(&resp);
    assert!(
        cookies
            .iter()
            .any(|c| c.starts_with(&format!("{SESSION_COOKIE_NAME}="))),
        "{cookies:?}"
    );
}

#[tokio::test]
async fn test_select_page_preselects_cookie_store() {
    let resp = get(app(three_stores()), "/stores/select", Some("store_id=7")).await;
    let html = body_text(resp).await;

    assert!(html.contains(r#"<option value="7" selected>Harbor</option>"#));
    assert!(html.contains(r#"<option value="3">Downtown</option>"#));
    assert!(html.contains("From cookie: Harbor (id: 7)"));
    assert!(html.contains("Resolved: Harbor (id: 7)"));
}

#[tokio::test]
async fn test_select_page_unknown_cookie_uses_default_store() {
    let directory = three_stores().with_default(StoreId::new(9));
    let resp = get(app(directory), "/stores/select", Some("store_id=404")).await;
    let html = body_text(resp).await;

    assert!(html.contains(r#"<option value="9" selected>Airport</option>"#));
    assert!(!html.contains("From cookie:"));
    assert!(html.contains("Resolved: Airport (id: 9)"));
}

#[tokio::test]
async fn test_select_page_with_single_store_offers_no_choice() {
    let directory = InMemoryStoreDirectory::new(vec![Store::new(StoreId::new(1), "Only")]);
    let resp = get(app(directory), "/stores/select", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains(NOT_ENOUGH_STORES_MESSAGE));
    assert!(!html.contains("<select"));
    assert!(!html.contains("Switch!"));
}

#[tokio::test]
async fn test_select_page_with_no_stores_still_renders() {
    let resp = get(app(InMemoryStoreDirectory::default()), "/stores/select", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains(NOT_ENOUGH_STORES_MESSAGE));
}

// ============================================================================
// Submit
// ============================================================================

#[tokio::test]
async fn test_submit_sets_cookie_and_redirects() {
    let resp = post_form(app(three_stores()), "/stores/select", "store_id=7").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/stores/select");

    let cookies = set_cookies(&resp);
    let selection = cookies
        .iter()
        .find(|c| c.starts_with("store_id="))
        .unwrap();
    assert!(selection.starts_with("store_id=7"));
    assert!(selection.contains("Path=/"));
    assert!(selection.contains("HttpOnly"));
}

#[tokio::test]
async fn test_submit_redirects_to_local_destination_only() {
    let resp = post_form(
        app(three_stores()),
        "/stores/select",
        "store_id=3&destination=%2Fproducts%2Ftea",
    )
    .await;
    assert_eq!(resp.headers()[LOCATION], "/products/tea");

    let resp = post_form(
        app(three_stores()),
        "/stores/select",
        "store_id=3&destination=https%3A%2F%2Fevil.example",
    )
    .await;
    assert_eq!(resp.headers()[LOCATION], "/stores/select");
}

#[tokio::test]
async fn test_submit_unknown_store_is_bad_request() {
    let resp = post_form(app(three_stores()), "/stores/select", "store_id=404").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookies(&resp).iter().all(|c| !c.starts_with("store_id=")));

    let resp = post_form(app(three_stores()), "/stores/select", "store_id=nope").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_without_store_id_is_bad_request() {
    let resp = post_form(app(three_stores()), "/stores/select", "destination=%2F").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookies(&resp).iter().all(|c| !c.starts_with("store_id=")));
}

#[tokio::test]
async fn test_submitted_store_is_resolved_on_next_request() {
    let app = app(three_stores());

    let resp = post_form(app.clone(), "/stores/select", "store_id=7").await;
    let selection = set_cookies(&resp)
        .into_iter()
        .find(|c| c.starts_with("store_id="))
        .unwrap();
    // The browser sends back only the name=value pair.
    let pair = selection.split(';').next().unwrap().to_owned();

    let resp = get(app, "/api/stores/current", Some(&pair)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["store"]["id"], 7);
    assert_eq!(json["store"]["name"], "Harbor");
}

// ============================================================================
// Blocks
// ============================================================================

#[tokio::test]
async fn test_block_renders_form_fragment() {
    let resp = get(app(three_stores()), "/blocks/store_selection", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CACHE_CONTROL], "no-store");

    let html = body_text(resp).await;
    assert!(html.starts_with("<form"));
    assert!(!html.contains("<html"));
    assert!(html.contains(r#"name="store_id""#));
}

#[tokio::test]
async fn test_block_empty_without_access_content() {
    let mut config = test_config();
    config.anonymous_permissions.clear();
    let app = test_app(AppState::new(config, Arc::new(three_stores())));

    let resp = get(app, "/blocks/store_selection", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.is_empty());
}

#[tokio::test]
async fn test_unknown_block_is_not_found() {
    let resp = get(app(three_stores()), "/blocks/nope", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// API
// ============================================================================

#[tokio::test]
async fn test_api_lists_stores_in_insertion_order() {
    let resp = get(app(three_stores()), "/api/stores", None).await;
    let json = body_json(resp).await;
    let ids: Vec<_> = json["stores"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 7, 9]);
}

#[tokio::test]
async fn test_api_current_unknown_cookie_without_default_is_null() {
    let resp = get(app(three_stores()), "/api/stores/current", Some("store_id=404")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await["store"].is_null());
}

#[tokio::test]
async fn test_api_current_uses_configured_chain_order() {
    let mut config = test_config();
    config.resolvers = vec![
        crate::config::ResolverKind::Default,
        crate::config::ResolverKind::Cookie,
    ];
    let directory = three_stores().with_default(StoreId::new(3));
    let app = test_app(AppState::new(config, Arc::new(directory)));

    let resp = get(app, "/api/stores/current", Some("store_id=7")).await;
    assert_eq!(body_json(resp).await["store"]["id"], 3);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let resp = get(app(three_stores()), "/health", None).await;
    assert!(resp.headers().contains_key("x-request-id"));
}
