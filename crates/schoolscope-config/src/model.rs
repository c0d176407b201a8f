//! Typed configuration models.

use serde::Serialize;

/// Deployment environment the process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development; TLS verification may be relaxed, verbose logging.
    #[default]
    Development,
    /// Pre-production deployment.
    Staging,
    /// Production deployment; JSON logs, strict TLS.
    Production,
}

impl Environment {
    /// Parse an environment name, degrading unknown values to development.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            _ => Self::Development,
        }
    }

    /// Whether this is a local development environment.
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Canonical lowercase name of the environment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

/// Connection parameters for the analytical warehouse.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    /// Warehouse hostname.
    pub host: String,
    /// Warehouse port.
    pub port: u16,
    /// Database name.
    pub database: String,
    /// Database user.
    pub username: String,
    /// Database password. The default is a placeholder and must be
    /// overridden in every real deployment.
    pub password: String,
    /// Whether to connect over TLS (minimum TLS 1.2).
    pub tls: bool,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the API listener binds to.
    pub port: u16,
    /// Warehouse connection parameters.
    pub warehouse: WarehouseConfig,
    /// Origins allowed by the cross-origin policy. A literal `*` entry
    /// allows any origin.
    pub cors_allowed_origins: Vec<String>,
    /// Deployment environment name.
    pub environment: Environment,
}
