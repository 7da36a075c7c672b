//! # Inbound Ports
//!
//! API trait for the Transport Layer.

use crate::domain::{LedgerEntry, TeleportationRecord, TransmissionRecord, TransportError};
use async_trait::async_trait;
use shared_types::HostId;

/// Primary Transport Layer API
#[async_trait]
pub trait TransportLayerApi: Send + Sync {
    /// Reserve one route per qubit for `count` qubits from `source` to
    /// `destination`, retrying the whole batch up to the configured ceiling.
    ///
    /// Returns the records appended to the ledger. Nothing is appended on
    /// failure and no EPR pair is consumed either way.
    async fn try_request_transmission(
        &self,
        source: HostId,
        destination: HostId,
        count: usize,
    ) -> Result<Vec<TransmissionRecord>, TransportError>;

    /// Boolean form of [`try_request_transmission`](Self::try_request_transmission).
    async fn request_transmission(&self, source: HostId, destination: HostId, count: usize) -> bool;

    /// Teleport one qubit from `source` to `destination`.
    ///
    /// `Err` means a precondition failed and nothing changed. `Ok` carries the
    /// realized outcome in `record.success`.
    async fn try_teleport(
        &self,
        source: HostId,
        destination: HostId,
    ) -> Result<TeleportationRecord, TransportError>;

    /// Boolean form of [`try_teleport`](Self::try_teleport).
    async fn teleport(&self, source: HostId, destination: HostId) -> bool;

    /// Every ledger entry, in append order.
    fn transmitted_qubits(&self) -> Vec<LedgerEntry>;

    /// Same sequence as [`transmitted_qubits`](Self::transmitted_qubits).
    fn teleported_qubits(&self) -> Vec<LedgerEntry>;
}
