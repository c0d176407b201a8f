//! Application bootstrap: configuration, logging, warehouse, and server
//! wiring.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use schoolscope_api::{ApiServer, CorsPolicy, SharedStore};
use schoolscope_config::{AppConfig, Environment};
use schoolscope_data::{QueryTemplates, Warehouse};
use schoolscope_telemetry::{LogFormat, LoggingConfig, init_logging};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Drain window for in-flight requests after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Entry point for the application boot sequence.
///
/// Configuration resolution cannot fail; an unreachable warehouse is fatal
/// and aborts startup before the listener binds.
///
/// # Errors
///
/// Returns an error if logging setup, the warehouse connection, or the API
/// server fails.
pub async fn run_app() -> AppResult<()> {
    let config = AppConfig::from_env();

    init_logging(&logging_config(config.environment))
        .map_err(|err| AppError::telemetry("init_logging", err))?;

    info!(
        environment = config.environment.as_str(),
        port = config.port,
        warehouse_host = %config.warehouse.host,
        "starting schoolscope api"
    );

    let warehouse = Warehouse::connect(
        &config.warehouse,
        config.environment,
        QueryTemplates::default(),
    )
    .await
    .map_err(|err| AppError::data("warehouse.connect", err))?;
    let store: SharedStore = Arc::new(warehouse);

    let cors = CorsPolicy::new(config.cors_allowed_origins);
    let server = ApiServer::new(store, cors);

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), config.port);
    server
        .serve(addr, SHUTDOWN_GRACE)
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))
}

const fn logging_config(environment: Environment) -> LoggingConfig<'static> {
    if environment.is_development() {
        LoggingConfig {
            level: "debug",
            format: LogFormat::Pretty,
        }
    } else {
        LoggingConfig {
            level: "info",
            format: LogFormat::Json,
        }
    }
}
