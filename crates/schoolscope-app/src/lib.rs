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

//! Schoolscope application bootstrap wiring.
//!
//! Layout: `bootstrap.rs` (configuration, logging, warehouse, and server
//! wiring), `error.rs` (application error taxonomy).

/// Application bootstrap and environment loading.
pub mod bootstrap;
/// Application-level error taxonomy.
pub mod error;

pub use bootstrap::run_app;
pub use error::{AppError, AppResult};
