//! # Error Types
//!
//! Validation errors raised when constructing shared primitives.

use thiserror::Error;

/// Errors produced by the shared primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SharedTypesError {
    /// Fidelity outside the closed unit interval, or not a number.
    #[error("Fidelity out of range: {0} not within [0, 1]")]
    FidelityOutOfRange(f64),

    /// A route needs at least a source and a destination.
    #[error("Route too short: {len} node(s), need at least 2")]
    RouteTooShort { len: usize },

    /// A route visited the same node twice.
    #[error("Route is not a simple path: node {node} repeats")]
    RouteNotSimple { node: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fidelity_error_display() {
        let err = SharedTypesError::FidelityOutOfRange(1.5);
        assert_eq!(err.to_string(), "Fidelity out of range: 1.5 not within [0, 1]");
    }

    #[test]
    fn test_route_error_display() {
        let err = SharedTypesError::RouteTooShort { len: 1 };
        assert!(err.to_string().contains("1 node(s)"));
    }
}
