//! # Core Domain Entities
//!
//! Defines the primitives exchanged between the layers of the simulator.
//!
//! ## Clusters
//!
//! - **Topology**: `HostId`, `Edge`, `Route`
//! - **Quantum Resources**: `Fidelity`, `Qubit`, `QubitState`, `EprPair`

use crate::errors::SharedTypesError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// CLUSTER A: TOPOLOGY
// =============================================================================

/// Identifier of a host (network node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostId(pub u32);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for HostId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// An undirected link between two adjacent nodes.
///
/// Normalised on construction so `Edge::new(a, b) == Edge::new(b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    low: HostId,
    high: HostId,
}

impl Edge {
    /// Create a normalised edge.
    pub fn new(a: HostId, b: HostId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both endpoints, smaller id first.
    pub fn endpoints(&self) -> (HostId, HostId) {
        (self.low, self.high)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// An ordered simple path from source to destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route(Vec<HostId>);

impl Route {
    /// Build a route, rejecting paths shorter than two nodes or with repeats.
    pub fn new(nodes: Vec<HostId>) -> Result<Self, SharedTypesError> {
        if nodes.len() < 2 {
            return Err(SharedTypesError::RouteTooShort { len: nodes.len() });
        }

        let mut seen = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !seen.insert(*node) {
                return Err(SharedTypesError::RouteNotSimple { node: node.0 });
            }
        }

        Ok(Self(nodes))
    }

    /// First node of the path.
    pub fn source(&self) -> HostId {
        self.0[0]
    }

    /// Last node of the path.
    pub fn destination(&self) -> HostId {
        self.0[self.0.len() - 1]
    }

    /// All nodes, in order.
    pub fn nodes(&self) -> &[HostId] {
        &self.0
    }

    /// Consecutive node pairs, in travel order.
    pub fn hops(&self) -> impl Iterator<Item = (HostId, HostId)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Number of hops (`len - 1`).
    pub fn hop_count(&self) -> usize {
        self.0.len() - 1
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", parts.join(" -> "))
    }
}

// =============================================================================
// CLUSTER B: QUANTUM RESOURCES
// =============================================================================

/// How close a simulated state is to ideal. Always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Fidelity(f64);

impl Fidelity {
    /// A perfect state.
    pub const PERFECT: Fidelity = Fidelity(1.0);

    /// Validate and wrap a raw value.
    pub fn new(value: f64) -> Result<Self, SharedTypesError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SharedTypesError::FidelityOutOfRange(value))
        }
    }

    /// Raw value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Fidelity {
    type Error = SharedTypesError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fidelity> for f64 {
    fn from(fidelity: Fidelity) -> Self {
        fidelity.0
    }
}

/// Unique identifier of a qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u64);

/// A qubit held in a host memory.
///
/// Deliberately neither `Clone` nor `Copy`: a qubit lives in exactly one
/// memory (or in flight) at a time. Use [`Qubit::state`] for a read-only copy.
#[derive(Debug, PartialEq)]
pub struct Qubit {
    id: QubitId,
    fidelity: Fidelity,
}

impl Qubit {
    /// Create a qubit with the given fidelity.
    pub fn new(id: QubitId, fidelity: Fidelity) -> Self {
        Self { id, fidelity }
    }

    /// Qubit identifier.
    pub fn id(&self) -> QubitId {
        self.id
    }

    /// Current fidelity of the qubit.
    pub fn current_fidelity(&self) -> Fidelity {
        self.fidelity
    }

    /// Immutable snapshot for records and observers.
    pub fn state(&self) -> QubitState {
        QubitState {
            id: self.id,
            fidelity: self.fidelity,
        }
    }
}

/// Point-in-time view of a qubit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QubitState {
    /// Qubit identifier.
    pub id: QubitId,
    /// Fidelity at the time of the snapshot.
    pub fidelity: Fidelity,
}

/// Unique identifier of an EPR pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EprId(pub u64);

/// An entangled pair shared across one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EprPair {
    /// Pair identifier.
    pub id: EprId,
    /// Current fidelity of the pair.
    pub fidelity: Fidelity,
}

impl EprPair {
    /// Create a pair with the given fidelity.
    pub fn new(id: EprId, fidelity: Fidelity) -> Self {
        Self { id, fidelity }
    }

    /// Current fidelity of the pair.
    pub fn current_fidelity(&self) -> Fidelity {
        self.fidelity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(ids: &[u32]) -> Result<Route, SharedTypesError> {
        Route::new(ids.iter().copied().map(HostId).collect())
    }

    #[test]
    fn test_edge_is_unordered() {
        assert_eq!(Edge::new(HostId(1), HostId(2)), Edge::new(HostId(2), HostId(1)));
        assert_eq!(Edge::new(HostId(7), HostId(3)).endpoints(), (HostId(3), HostId(7)));
    }

    #[test]
    fn test_route_hops() {
        let r = route(&[0, 1, 2, 3]).unwrap();
        let hops: Vec<_> = r.hops().collect();

        assert_eq!(r.hop_count(), 3);
        assert_eq!(hops[0], (HostId(0), HostId(1)));
        assert_eq!(hops[2], (HostId(2), HostId(3)));
        assert_eq!(r.source(), HostId(0));
        assert_eq!(r.destination(), HostId(3));
    }

    #[test]
    fn test_route_too_short() {
        assert_eq!(route(&[4]), Err(SharedTypesError::RouteTooShort { len: 1 }));
        assert!(route(&[]).is_err());
    }

    #[test]
    fn test_route_must_be_simple() {
        assert_eq!(
            route(&[0, 1, 0]),
            Err(SharedTypesError::RouteNotSimple { node: 0 })
        );
    }

    #[test]
    fn test_route_display() {
        assert_eq!(route(&[1, 5, 9]).unwrap().to_string(), "1 -> 5 -> 9");
    }

    #[test]
    fn test_fidelity_bounds() {
        assert!(Fidelity::new(0.0).is_ok());
        assert!(Fidelity::new(1.0).is_ok());
        assert!(Fidelity::new(-0.01).is_err());
        assert!(Fidelity::new(1.01).is_err());
        assert!(Fidelity::new(f64::NAN).is_err());
    }

    #[test]
    fn test_fidelity_serde_rejects_out_of_range() {
        let ok: Fidelity = serde_json::from_str("0.25").unwrap();
        assert_eq!(ok.value(), 0.25);
        assert!(serde_json::from_str::<Fidelity>("2.0").is_err());
    }

    #[test]
    fn test_qubit_state_snapshot() {
        let q = Qubit::new(QubitId(9), Fidelity::new(0.8).unwrap());
        let state = q.state();
        assert_eq!(state.id, QubitId(9));
        assert_eq!(state.fidelity, q.current_fidelity());
    }
}
