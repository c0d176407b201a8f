//! Pooled warehouse access and the read-only query surface.

use std::time::Duration;

use schoolscope_config::{Environment, WarehouseConfig};
use sqlx::postgres::{PgArguments, PgConnectOptions, PgPoolOptions, PgRow, PgSslMode};
use sqlx::query::QueryAs;
use sqlx::{Connection, FromRow, PgPool, Postgres};
use tracing::{error, warn};

use crate::error::{DataError, Result};
use crate::models::{Enrollment, School, SchoolSearch};
use crate::search::{SearchQuery, SearchTerm};

const POOL_MAX_CONNECTIONS: u32 = 25;
const POOL_MIN_CONNECTIONS: u32 = 5;
const POOL_MAX_LIFETIME: Duration = Duration::from_secs(300);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Static statement templates compiled into the binary.
///
/// Injected at store construction so tests can substitute their own texts.
#[derive(Debug, Clone, Copy)]
pub struct QueryTemplates {
    /// Single-school directory lookup by identifier and year.
    pub get_school: &'static str,
    /// Per-year enrollment history for one school.
    pub historical_enrollment: &'static str,
    /// Single-year enrollment summary for one school.
    pub enrollment_summary: &'static str,
}

impl Default for QueryTemplates {
    fn default() -> Self {
        Self {
            get_school: include_str!("../sql/get_school.sql"),
            historical_enrollment: include_str!("../sql/historical_enrollment.sql"),
            enrollment_summary: include_str!("../sql/enrollment_summary.sql"),
        }
    }
}

/// Database-backed repository for the school data warehouse.
#[derive(Clone)]
pub struct Warehouse {
    pool: PgPool,
    templates: QueryTemplates,
}

impl Warehouse {
    /// Connect to the warehouse and verify it is reachable.
    ///
    /// The liveness ping is part of construction: a store that cannot reach
    /// the warehouse is never handed out.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Connect`] when the pool cannot be established,
    /// [`DataError::Ping`] when the liveness probe fails, and
    /// [`DataError::PingTimeout`] when the probe does not complete in time.
    pub async fn connect(
        config: &WarehouseConfig,
        environment: Environment,
        templates: QueryTemplates,
    ) -> Result<Self> {
        if config.tls && environment.is_development() {
            warn!(
                host = %config.host,
                "warehouse TLS certificate verification relaxed for development"
            );
        }
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.username)
            .password(&config.password)
            .ssl_mode(ssl_mode(config.tls, environment));
        let pool = PgPoolOptions::new()
            .max_connections(POOL_MAX_CONNECTIONS)
            .min_connections(POOL_MIN_CONNECTIONS)
            .max_lifetime(POOL_MAX_LIFETIME)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|source| DataError::Connect { source })?;

        let warehouse = Self { pool, templates };
        match tokio::time::timeout(PING_TIMEOUT, warehouse.ping()).await {
            Ok(outcome) => outcome.map(|()| warehouse),
            Err(_) => Err(DataError::PingTimeout {
                timeout: PING_TIMEOUT,
            }),
        }
    }

    /// Round-trip a liveness probe through the pool.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Ping`] when no connection can be acquired or the
    /// probe fails; the underlying warehouse diagnostic is logged here.
    pub async fn ping(&self) -> Result<()> {
        let probe = async {
            let mut conn = self.pool.acquire().await?;
            conn.ping().await
        };
        probe.await.map_err(|source| {
            log_warehouse_error("ping", &source);
            DataError::Ping { source }
        })
    }

    /// Free-text school search restricted to current-year directory rows.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] when the query cannot be executed.
    pub async fn search_schools(&self, term: &SearchTerm) -> Result<Vec<SchoolSearch>> {
        let query = SearchQuery::for_term(term);
        let mut statement = sqlx::query_as::<Postgres, SchoolSearch>(query.statement());
        for parameter in query.parameters() {
            statement = statement.bind(parameter.pattern.clone());
        }
        self.fetch_all("search_schools", statement).await
    }

    /// Directory detail for one school and year.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] when the query cannot be executed.
    pub async fn get_school(&self, ncessch: &str, school_year: &str) -> Result<Option<School>> {
        let statement = sqlx::query_as::<Postgres, School>(self.templates.get_school)
            .bind(ncessch)
            .bind(school_year);
        self.fetch_optional("get_school", statement).await
    }

    /// Per-year enrollment history for one school, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] when the query cannot be executed.
    pub async fn enrollment_history(&self, ncessch: &str) -> Result<Vec<Enrollment>> {
        let statement =
            sqlx::query_as::<Postgres, Enrollment>(self.templates.historical_enrollment)
                .bind(ncessch);
        self.fetch_all("enrollment_history", statement).await
    }

    /// Enrollment summary for one school and year.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::QueryFailed`] when the query cannot be executed.
    pub async fn enrollment_summary(
        &self,
        ncessch: &str,
        school_year: &str,
    ) -> Result<Option<Enrollment>> {
        let statement = sqlx::query_as::<Postgres, Enrollment>(self.templates.enrollment_summary)
            .bind(ncessch)
            .bind(school_year);
        self.fetch_optional("enrollment_summary", statement).await
    }

    async fn fetch_all<'q, T>(
        &self,
        operation: &'static str,
        statement: QueryAs<'q, Postgres, T, PgArguments>,
    ) -> Result<Vec<T>>
    where
        T: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        statement
            .fetch_all(&self.pool)
            .await
            .map_err(|source| DataError::query_failed(operation, source))
    }

    async fn fetch_optional<'q, T>(
        &self,
        operation: &'static str,
        statement: QueryAs<'q, Postgres, T, PgArguments>,
    ) -> Result<Option<T>>
    where
        T: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        statement
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| DataError::query_failed(operation, source))
    }
}

/// Certificate verification is only relaxed in development, and that path
/// logs a warning at connect time.
const fn ssl_mode(tls: bool, environment: Environment) -> PgSslMode {
    if !tls {
        PgSslMode::Disable
    } else if environment.is_development() {
        PgSslMode::Require
    } else {
        PgSslMode::VerifyFull
    }
}

fn log_warehouse_error(operation: &'static str, error: &sqlx::Error) {
    if let sqlx::Error::Database(db) = error {
        error!(
            operation,
            code = db.code().as_deref().unwrap_or("unknown"),
            message = %db.message(),
            "warehouse error"
        );
    } else {
        error!(operation, error = %error, "warehouse error");
    }
}
