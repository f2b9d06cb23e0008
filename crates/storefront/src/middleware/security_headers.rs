//! Security headers middleware.
//!
//! Every response from the selector is either a form page, a form fragment
//! or a small JSON document, so one restrictive header set covers them all.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Content Security Policy. The form posts only to this origin.
const CSP: &str = "default-src 'none'; \
                   style-src 'self'; \
                   img-src 'self'; \
                   base-uri 'self'; \
                   form-action 'self'; \
                   frame-ancestors 'none'";

/// Headers applied to every response, overwriting handler values.
const FIXED_HEADERS: [(HeaderName, &str); 4] = [
    (X_FRAME_OPTIONS, "DENY"),
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (REFERRER_POLICY, "same-origin"),
    (CONTENT_SECURITY_POLICY, CSP),
];

/// Add security headers to all responses.
///
/// `Cache-Control: no-store` is only a default: handlers that set their own
/// cache policy keep it. Store selection output must always reflect the live
/// cookie, so in practice nothing here is cacheable.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for (name, value) in FIXED_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    headers
        .entry(CACHE_CONTROL)
        .or_insert(HeaderValue::from_static("no-store"));

    response
}
