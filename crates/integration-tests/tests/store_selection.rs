//! End-to-end store switching against a running server.
//!
//! These tests require:
//! - A running `PostgreSQL` database with at least two stores
//! - The storefront running (cargo run -p store-selector-storefront)

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use reqwest::StatusCode;

use store_selector_integration_tests::{base_url, browser, current_store, list_stores};

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_health() {
    let client = browser().unwrap();
    let resp = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to reach server");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_select_page_lists_every_store() {
    let client = browser().unwrap();
    let stores = list_stores(&client).await.unwrap();

    let body = client
        .get(format!("{}/stores/select", base_url()))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    for store in &stores {
        assert!(
            body.contains(&format!(r#"value="{}""#, store.id)),
            "missing option for {store}"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_switch_store_persists_across_requests() {
    let client = browser().unwrap();
    let stores = list_stores(&client).await.unwrap();
    assert!(stores.len() >= 2, "need at least two stores to switch");

    // Pick the last store so it differs from the first-store fallback.
    let target = stores.last().unwrap();

    let resp = client
        .post(format!("{}/stores/select", base_url()))
        .form(&[("store_id", target.id.to_string())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let current = current_store(&client).await.unwrap();
    assert_eq!(current.as_ref().map(|s| s.id), Some(target.id));

    let body = client
        .get(format!("{}/stores/select", base_url()))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(&format!("From cookie: {target}")));
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_switch_to_unknown_store_is_rejected() {
    let client = browser().unwrap();
    let stores = list_stores(&client).await.unwrap();
    let unknown = stores.iter().map(|s| s.id.as_i32()).max().unwrap_or(0) + 1000;

    let resp = client
        .post(format!("{}/stores/select", base_url()))
        .form(&[("store_id", unknown.to_string())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
