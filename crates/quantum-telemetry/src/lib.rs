//! # Quantum Telemetry
//!
//! Logging bootstrap shared by the Quantum-Net layers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quantum_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_layer("04", "transport");
//!     let _guard = init_telemetry(config).expect("Failed to init telemetry");
//!
//!     // Spans and events are now collected
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `quantum-net` | Service name in logs |
//! | `QN_LOG_LEVEL` | `info` | Log level filter |
//! | `QN_LAYER_ID` | `00` | Layer identifier |
//! | `QN_JSON_LOGS` | `false` | JSON output |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, StructuredLogger};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed, or installation failed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The log filter could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for a layer.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let logger = logging::init_logging(&config)?;

    Ok(TelemetryGuard { logger })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    logger: StructuredLogger,
}

impl TelemetryGuard {
    /// Service name the guard was created for.
    pub fn service_name(&self) -> &str {
        self.logger.service_name()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.logger.service_name(), "Shutting down telemetry...");
    }
}

/// Convenience macro for creating a span with layer context.
///
/// # Example
///
/// ```rust,ignore
/// use quantum_telemetry::layer_span;
///
/// async fn teleport() {
///     let span = layer_span!("teleport", layer = "qn-04", source = 1, destination = 4);
///     // attach with `tracing::Instrument::instrument`
/// }
/// ```
#[macro_export]
macro_rules! layer_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let _first = init_telemetry(TelemetryConfig::for_testing());

        // Only one global subscriber can exist per process.
        let second = init_telemetry(TelemetryConfig::for_testing());
        assert!(matches!(second, Err(TelemetryError::SubscriberInit(_))));
    }

    #[test]
    fn test_layer_macros_expand() {
        let span = layer_span!("teleport", layer = "qn-04", source = 1, destination = 4);
        let _entered = span.enter();

        crate::log_event!(info, "qn-04", "[qn-04] event with fields", hops = 3);
        crate::log_event!(warn, "qn-04", "[qn-04] event without fields");
        crate::log_event!(debug, "qn-04", "[qn-04] debug event", draw = 0.5);
        crate::log_event!(error, "qn-04", "[qn-04] error event", error = %"boom");
    }
}
