//! # Domain Entities
//!
//! Records appended to the transmission ledger.

use serde::{Deserialize, Serialize};
use shared_types::{HostId, QubitState, Route};

/// One qubit's share of a successful bulk transmission request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransmissionRecord {
    /// Route reserved for the qubit.
    pub route: Route,
    /// Sending endpoint.
    pub source: HostId,
    /// Receiving endpoint.
    pub destination: HostId,
}

impl TransmissionRecord {
    /// Create a record for one routed qubit.
    pub fn new(route: Route, source: HostId, destination: HostId) -> Self {
        Self {
            route,
            source,
            destination,
        }
    }
}

/// Full account of one teleportation attempt that got past its preconditions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeleportationRecord {
    /// Sending endpoint.
    pub source: HostId,
    /// Receiving endpoint.
    pub destination: HostId,
    /// Route the EPR resources were drawn from.
    pub route: Route,
    /// Fidelity of the qubit taken from the source memory.
    pub fidelity_source: f64,
    /// Fidelity of the qubit taken from the destination memory.
    pub fidelity_destination: f64,
    /// Mean fidelity of every EPR pair along the route.
    pub fidelity_route: f64,
    /// Success probability computed from the three fidelities.
    pub success_probability: f64,
    /// The qubit taken from the source memory.
    pub source_qubit: QubitState,
    /// The qubit taken from the destination memory.
    pub destination_qubit: QubitState,
    /// EPR pairs actually removed during release.
    pub pairs_consumed: usize,
    /// Realized outcome.
    pub success: bool,
}

/// A single ledger line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEntry {
    /// From a bulk transmission request.
    Transmission(TransmissionRecord),
    /// From a teleportation attempt.
    Teleportation(TeleportationRecord),
}

impl LedgerEntry {
    /// Sending endpoint of the underlying record.
    pub fn source(&self) -> HostId {
        match self {
            LedgerEntry::Transmission(r) => r.source,
            LedgerEntry::Teleportation(r) => r.source,
        }
    }

    /// Receiving endpoint of the underlying record.
    pub fn destination(&self) -> HostId {
        match self {
            LedgerEntry::Transmission(r) => r.destination,
            LedgerEntry::Teleportation(r) => r.destination,
        }
    }

    /// Route of the underlying record.
    pub fn route(&self) -> &Route {
        match self {
            LedgerEntry::Transmission(r) => &r.route,
            LedgerEntry::Teleportation(r) => &r.route,
        }
    }

    /// Teleportation record, if this entry holds one.
    pub fn as_teleportation(&self) -> Option<&TeleportationRecord> {
        match self {
            LedgerEntry::Teleportation(r) => Some(r),
            LedgerEntry::Transmission(_) => None,
        }
    }
}

impl From<TransmissionRecord> for LedgerEntry {
    fn from(record: TransmissionRecord) -> Self {
        LedgerEntry::Transmission(record)
    }
}

impl From<TeleportationRecord> for LedgerEntry {
    fn from(record: TeleportationRecord) -> Self {
        LedgerEntry::Teleportation(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Route {
        Route::new(vec![HostId(0), HostId(1), HostId(2)]).unwrap()
    }

    #[test]
    fn test_entry_accessors() {
        let entry = LedgerEntry::from(TransmissionRecord::new(route(), HostId(0), HostId(2)));

        assert_eq!(entry.source(), HostId(0));
        assert_eq!(entry.destination(), HostId(2));
        assert_eq!(entry.route().hop_count(), 2);
        assert!(entry.as_teleportation().is_none());
    }

    #[test]
    fn test_entry_serializes_with_kind_tag() {
        let entry = LedgerEntry::from(TransmissionRecord::new(route(), HostId(0), HostId(2)));
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["kind"], "transmission");
        assert_eq!(json["source"], 0);
        assert_eq!(json["route"], serde_json::json!([0, 1, 2]));
    }
}
