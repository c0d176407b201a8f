//! Storage facade the HTTP handlers depend on.

use std::sync::Arc;

use async_trait::async_trait;
use schoolscope_data::{DataResult, Enrollment, School, SchoolSearch, SearchTerm, Warehouse};

/// Read-only view of the warehouse used by the request handlers.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Free-text school search restricted to current-year rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying query fails.
    async fn search_schools(&self, term: &SearchTerm) -> DataResult<Vec<SchoolSearch>>;

    /// Directory detail for one school and year.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying query fails.
    async fn get_school(&self, ncessch: &str, school_year: &str) -> DataResult<Option<School>>;

    /// Per-year enrollment history for one school, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying query fails.
    async fn enrollment_history(&self, ncessch: &str) -> DataResult<Vec<Enrollment>>;

    /// Enrollment summary for one school and year.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying query fails.
    async fn enrollment_summary(
        &self,
        ncessch: &str,
        school_year: &str,
    ) -> DataResult<Option<Enrollment>>;

    /// Liveness probe against the backing warehouse.
    ///
    /// # Errors
    ///
    /// Returns an error if the warehouse is unreachable.
    async fn ping(&self) -> DataResult<()>;
}

/// Shared handle to the store used as router state.
pub type SharedStore = Arc<dyn SchoolStore>;

#[async_trait]
impl SchoolStore for Warehouse {
    async fn search_schools(&self, term: &SearchTerm) -> DataResult<Vec<SchoolSearch>> {
        Self::search_schools(self, term).await
    }

    async fn get_school(&self, ncessch: &str, school_year: &str) -> DataResult<Option<School>> {
        Self::get_school(self, ncessch, school_year).await
    }

    async fn enrollment_history(&self, ncessch: &str) -> DataResult<Vec<Enrollment>> {
        Self::enrollment_history(self, ncessch).await
    }

    async fn enrollment_summary(
        &self,
        ncessch: &str,
        school_year: &str,
    ) -> DataResult<Option<Enrollment>> {
        Self::enrollment_summary(self, ncessch, school_year).await
    }

    async fn ping(&self) -> DataResult<()> {
        Self::ping(self).await
    }
}
