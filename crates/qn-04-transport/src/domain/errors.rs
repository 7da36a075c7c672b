//! # Domain Errors
//!
//! Error types for the Transport Layer.

use shared_types::{Edge, HostId};
use thiserror::Error;

/// Transport layer error types.
///
/// Every variant is non-fatal: the boolean API logs it and returns `false`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The route provider found no valid path.
    #[error("No valid route from {from} to {to}")]
    RouteUnavailable {
        /// Requesting endpoint
        from: HostId,
        /// Target endpoint
        to: HostId,
    },

    /// An edge on the route has no EPR pair available.
    #[error("No EPR pair available on edge {edge}")]
    ResourceExhausted {
        /// The empty edge
        edge: Edge,
    },

    /// No EPR pair exists on any hop of the route, so no route fidelity can
    /// be aggregated.
    #[error("No EPR pairs along the route from {from} to {to}")]
    NoRouteResources {
        /// Requesting endpoint
        from: HostId,
        /// Target endpoint
        to: HostId,
    },

    /// A host memory has no qubit to offer.
    #[error("Host {host} has no qubit in memory")]
    InsufficientMemory {
        /// The empty host
        host: HostId,
    },

    /// The host is not part of the network.
    #[error("Unknown host: {0}")]
    UnknownHost(HostId),

    /// Every transmission attempt failed.
    #[error("Transmission failed after {attempts} attempt(s): {last_error}")]
    TransmissionFailed {
        /// Attempts made
        attempts: u32,
        /// Failure of the final attempt
        last_error: Box<TransportError>,
    },

    /// Batch size exceeded limits (anti-DoS).
    #[error("Batch size exceeded: {size} > {max}")]
    BatchTooLarge {
        /// Requested qubits
        size: usize,
        /// Configured maximum
        max: usize,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_unavailable_error() {
        let err = TransportError::RouteUnavailable {
            from: HostId(1),
            to: HostId(4),
        };
        assert_eq!(err.to_string(), "No valid route from 1 to 4");
    }

    #[test]
    fn test_resource_exhausted_error() {
        let err = TransportError::ResourceExhausted {
            edge: Edge::new(HostId(3), HostId(2)),
        };
        assert_eq!(err.to_string(), "No EPR pair available on edge 2-3");
    }

    #[test]
    fn test_transmission_failed_wraps_last_error() {
        let err = TransportError::TransmissionFailed {
            attempts: 2,
            last_error: Box::new(TransportError::InsufficientMemory { host: HostId(7) }),
        };
        assert_eq!(
            err.to_string(),
            "Transmission failed after 2 attempt(s): Host 7 has no qubit in memory"
        );
    }
}
