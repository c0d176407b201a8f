//! Environment variable resolution with documented defaults.
//!
//! Every recognized variable has a default; malformed values fall back to
//! that default rather than erroring, so resolution cannot fail. Parsing is
//! split into pure value-level helpers so tests never mutate the process
//! environment.

use crate::model::{AppConfig, Environment, WarehouseConfig};

/// Default API listener port (`PORT`).
pub const DEFAULT_PORT: u16 = 8080;
/// Default warehouse endpoint (`DATABASE_HOST`, `host[:port]` form).
pub const DEFAULT_DATABASE_HOST: &str = "localhost:9000";
/// Default warehouse database name (`DATABASE_NAME`).
pub const DEFAULT_DATABASE_NAME: &str = "default";
/// Default warehouse user (`DATABASE_USERNAME`).
pub const DEFAULT_DATABASE_USERNAME: &str = "default";
/// Default warehouse password (`DATABASE_PASSWORD`); placeholder only.
pub const DEFAULT_DATABASE_PASSWORD: &str = "change_me";
/// Default allowed origin list (`CORS_ALLOWED_ORIGINS`).
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:5173";

const DEFAULT_DATABASE_PORT: u16 = 9000;

impl AppConfig {
    /// Resolve the full configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Empty values are treated the same as unset ones.
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let (host, port) = parse_endpoint(get("DATABASE_HOST").as_deref());
        Self {
            port: parse_port(get("PORT").as_deref(), DEFAULT_PORT),
            warehouse: WarehouseConfig {
                host,
                port,
                database: get("DATABASE_NAME")
                    .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
                username: get("DATABASE_USERNAME")
                    .unwrap_or_else(|| DEFAULT_DATABASE_USERNAME.to_string()),
                password: get("DATABASE_PASSWORD")
                    .unwrap_or_else(|| DEFAULT_DATABASE_PASSWORD.to_string()),
                tls: parse_bool(get("DATABASE_TLS").as_deref(), false),
            },
            cors_allowed_origins: parse_list(
                get("CORS_ALLOWED_ORIGINS").as_deref(),
                DEFAULT_CORS_ALLOWED_ORIGIN,
            ),
            environment: Environment::parse(get("ENV").as_deref().unwrap_or_default()),
        }
    }
}

/// Parse a port number, falling back to `default` on malformed input.
#[must_use]
pub fn parse_port(value: Option<&str>, default: u16) -> u16 {
    value
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean flag, falling back to `default` on unparsable input.
#[must_use]
pub fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "t" | "true" | "yes" | "on" => true,
            "0" | "f" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}

/// Split a comma-separated list, falling back to a single default entry.
#[must_use]
pub fn parse_list(value: Option<&str>, default: &str) -> Vec<String> {
    value.map_or_else(
        || vec![default.to_string()],
        |raw| raw.split(',').map(str::to_string).collect(),
    )
}

/// Split a `host[:port]` endpoint; a missing or malformed port falls back
/// to the warehouse default. A colon in the would-be host part marks a bare
/// IPv6 literal, which is kept whole with the default port rather than
/// being split at its last group.
#[must_use]
pub fn parse_endpoint(value: Option<&str>) -> (String, u16) {
    let raw = value.unwrap_or(DEFAULT_DATABASE_HOST);
    match raw.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && !host.contains(':') => (
            host.to_string(),
            port.parse().unwrap_or(DEFAULT_DATABASE_PORT),
        ),
        _ => (raw.to_string(), DEFAULT_DATABASE_PORT),
    }
}
