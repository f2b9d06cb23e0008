//! HTTP middleware stack for the store selector.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the span)
//! 4. Security headers
//! 5. Session layer (tower-sessions)
//!
//! [`Visitor`] is an extractor rather than a layer: it builds the
//! request-scoped context inside handlers.

pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod visitor;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use visitor::Visitor;
