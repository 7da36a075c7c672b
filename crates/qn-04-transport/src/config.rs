//! # Transport Configuration
//!
//! Configuration for the Transport Layer service.

use crate::domain::TransportError;
use serde::{Deserialize, Serialize};
use std::env;

/// Default ceiling on full-batch passes for a bulk transmission request.
pub const DEFAULT_MAX_TRANSMISSION_ATTEMPTS: u32 = 2;

/// Transport layer configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Maximum full-batch passes per bulk transmission request.
    pub max_transmission_attempts: u32,

    /// Maximum qubits in one bulk request (anti-DoS).
    pub max_batch_size: usize,

    /// Initial ledger capacity.
    pub ledger_capacity_hint: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_transmission_attempts: DEFAULT_MAX_TRANSMISSION_ATTEMPTS,
            max_batch_size: 1024,
            ledger_capacity_hint: 256,
        }
    }
}

impl TransportConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            max_transmission_attempts: DEFAULT_MAX_TRANSMISSION_ATTEMPTS,
            max_batch_size: 16,
            ledger_capacity_hint: 8,
        }
    }

    /// Load from environment variables, falling back to defaults.
    ///
    /// - `QN_TRANSPORT_MAX_ATTEMPTS`: attempt ceiling (default: 2)
    /// - `QN_TRANSPORT_MAX_BATCH`: batch ceiling (default: 1024)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_transmission_attempts: env::var("QN_TRANSPORT_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_transmission_attempts),

            max_batch_size: env::var("QN_TRANSPORT_MAX_BATCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_batch_size),

            ledger_capacity_hint: defaults.ledger_capacity_hint,
        }
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.max_transmission_attempts == 0 {
            return Err(TransportError::Config(
                "max_transmission_attempts must be at least 1".to_string(),
            ));
        }

        if self.max_batch_size == 0 {
            return Err(TransportError::Config(
                "max_batch_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.max_transmission_attempts, 2);
        assert_eq!(config.max_batch_size, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_config() {
        let config = TransportConfig::for_testing();
        assert_eq!(config.max_transmission_attempts, 2);
        assert_eq!(config.max_batch_size, 16);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = TransportConfig {
            max_transmission_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TransportError::Config(_))));
    }

    #[test]
    fn test_zero_batch_rejected() {
        let config = TransportConfig {
            max_batch_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_deserializes() {
        let config: TransportConfig = serde_json::from_str(
            r#"{"max_transmission_attempts":3,"max_batch_size":8,"ledger_capacity_hint":4}"#,
        )
        .unwrap();
        assert_eq!(config.max_transmission_attempts, 3);
    }
}
