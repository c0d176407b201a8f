#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! HTTP API for the school directory and enrollment services.
//!
//! Serves Connect-style unary endpoints (`POST`, JSON bodies) plus a plain
//! health probe. Handlers are pure translation layers over the
//! [`SchoolStore`] trait so the transport can be tested without a warehouse.

pub mod http;
pub mod models;
mod state;
pub mod store;

pub use http::cors::CorsPolicy;
pub use http::router::ApiServer;
pub use store::{SchoolStore, SharedStore};
