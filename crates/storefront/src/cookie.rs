//! Selection cookie encoding.
//!
//! The selection cookie carries a single positive store ID. Anything else
//! (missing, empty, zero, garbage) reads as "no selection".

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use store_selector_core::StoreId;

use crate::config::CookieConfig;

/// Read the selected store ID from the request's `Cookie` headers.
///
/// The first cookie with a matching name wins; user agents send the most
/// specific path first.
#[must_use]
pub fn read_store_id(headers: &HeaderMap, name: &str) -> Option<StoreId> {
    let raw = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)?;

    match StoreId::parse(raw.value()) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(cookie = name, error = %e, "Ignoring unusable selection cookie");
            None
        }
    }
}

/// Build the selection cookie for a store.
#[must_use]
pub fn selection_cookie(config: &CookieConfig, id: StoreId) -> Cookie<'static> {
    Cookie::build((config.name.clone(), id.to_string()))
        .path("/")
        .max_age(Duration::days(config.max_age_days))
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(config.secure)
        .build()
}

/// Render a cookie as a `Set-Cookie` header value.
///
/// Returns `None` if the cookie cannot be represented as a header, which only
/// happens for names or values containing control characters.
#[must_use]
pub fn set_cookie_header(cookie: &Cookie<'_>) -> Option<HeaderValue> {
    HeaderValue::from_str(&cookie.to_string()).ok()
}
