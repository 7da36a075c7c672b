//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! pretty console layer (development) or a JSON layer (containers). JSON lines
//! carry consistent fields for log shipping:
//! - `timestamp`: ISO 8601 timestamp
//! - `level`: Log level (trace, debug, info, warn, error)
//! - `target`: Emitting module (e.g. `qn_04_transport::application::service`)
//! - `fields`: Structured context (`source`, `destination`, `attempt`, ...)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Handle proving the global subscriber was installed.
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    /// Service name the subscriber was installed for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

/// Install the global subscriber.
///
/// Fails with [`TelemetryError::SubscriberInit`] if a subscriber is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<StructuredLogger, TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    if !config.console_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    }

    tracing::debug!(
        service = %config.full_service_name(),
        json_logs = config.json_logs,
        "Structured logging initialized"
    );

    Ok(StructuredLogger {
        service_name: config.full_service_name(),
    })
}

/// Helper to create structured log entries with consistent formatting.
///
/// Every entry carries a `layer` field so output from different layers can
/// be filtered apart.
#[macro_export]
macro_rules! log_event {
    (info, $layer:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            layer = $layer,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $layer:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            layer = $layer,
            $($($field)*,)?
            $msg
        )
    };

    (error, $layer:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            layer = $layer,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $layer:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            layer = $layer,
            $($($field)*,)?
            $msg
        )
    };
}
