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

//! Read-only data access layer for the school data warehouse.
//!
//! Layout: `store.rs` (pooled connection + typed fetch primitives),
//! `search.rs` (free-text token-AND query construction), `models.rs`
//! (response-shaped row projections), `error.rs` (error taxonomy). The
//! static statement templates under `sql/` are compiled into the binary and
//! injected at store construction.

pub mod error;
pub mod models;
pub mod search;
pub mod store;

pub use error::{DataError, Result as DataResult};
pub use models::{Enrollment, School, SchoolSearch};
pub use search::{SEARCH_RESULT_CAP, SearchParameter, SearchQuery, SearchTerm};
pub use store::{QueryTemplates, Warehouse};
