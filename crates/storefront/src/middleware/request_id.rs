//! Request ID middleware for request tracing and correlation.
//!
//! Accepts an upstream `x-request-id` (load balancer, CDN) when it looks sane,
//! otherwise generates a UUID v4. The ID is recorded on the current span,
//! tagged on the Sentry scope and echoed in the response.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID accepted verbatim.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| is_acceptable(id))
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Upstream IDs end up in logs, so only short token-like values are kept.
fn is_acceptable(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, middleware, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(request_id_middleware))
    }

    #[tokio::test]
    async fn test_upstream_id_echoed() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, "cf-1234")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.headers()[REQUEST_ID_HEADER], "cf-1234");
    }

    #[tokio::test]
    async fn test_generated_when_missing_or_unacceptable() {
        for upstream in [None, Some("has spaces in it"), Some("")] {
            let mut builder = Request::builder().uri("/");
            if let Some(value) = upstream {
                builder = builder.header(REQUEST_ID_HEADER, value);
            }
            let resp = app()
                .oneshot(builder.body(Body::empty()).unwrap())
                .await
                .unwrap();

            let id = resp.headers()[REQUEST_ID_HEADER].to_str().unwrap();
            assert!(Uuid::parse_str(id).is_ok(), "{upstream:?} -> {id}");
        }
    }

    #[test]
    fn test_is_acceptable() {
        assert!(is_acceptable("abc-123_x.y"));
        assert!(!is_acceptable(&"a".repeat(MAX_REQUEST_ID_LEN + 1)));
        assert!(!is_acceptable("line\nbreak"));
    }
}
