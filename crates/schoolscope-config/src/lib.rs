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

//! Environment-derived runtime configuration.
//!
//! Layout: `model.rs` (typed configuration values), `loader.rs` (environment
//! variable resolution with documented defaults). Resolution never fails:
//! absent or malformed values degrade to their defaults so startup stays
//! non-fatal on misconfiguration.

pub mod loader;
pub mod model;

pub use model::{AppConfig, Environment, WarehouseConfig};
