//! HTTP surface modules (router, handlers, middleware).

/// Cross-origin policy and middleware.
pub mod cors;
/// Directory service handlers.
pub mod directory;
/// Error body helpers and status mapping.
pub mod errors;
/// Health probe endpoint.
pub mod health;
/// Membership service handlers.
pub mod membership;
/// Router construction and server host.
pub mod router;
