//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for the logging stack.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Layer identifier (01 physical .. 04 transport)
    pub layer_id: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output (for development)
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "quantum-net".to_string(),
            layer_id: "00".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: quantum-net)
    /// - `QN_LAYER_ID`: Layer ID (default: 00)
    /// - `QN_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `QN_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `QN_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "quantum-net".to_string()),

            layer_id: env::var("QN_LAYER_ID").unwrap_or_else(|_| "00".to_string()),

            log_level: env::var("QN_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("QN_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: env::var("QN_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),
        }
    }

    /// Create configuration for a specific layer.
    pub fn for_layer(layer_id: &str, layer_name: &str) -> Self {
        let mut config = Self::from_env();
        config.layer_id = layer_id.to_string();
        config.service_name = format!("qn-{}-{}", layer_id, layer_name);
        config
    }

    /// Quiet configuration for test binaries.
    pub fn for_testing() -> Self {
        Self {
            log_level: "debug".to_string(),
            ..Self::default()
        }
    }

    /// Get the full service name including layer.
    pub fn full_service_name(&self) -> String {
        if self.layer_id == "00" {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.layer_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "quantum-net");
        assert_eq!(config.log_level, "info");
        assert!(config.console_output);
    }

    #[test]
    fn test_for_layer() {
        let config = TelemetryConfig::for_layer("04", "transport");
        assert_eq!(config.layer_id, "04");
        assert_eq!(config.service_name, "qn-04-transport");
    }

    #[test]
    fn test_full_service_name() {
        let mut config = TelemetryConfig::default();
        assert_eq!(config.full_service_name(), "quantum-net");

        config.layer_id = "03".to_string();
        assert_eq!(config.full_service_name(), "quantum-net-03");
    }
}
