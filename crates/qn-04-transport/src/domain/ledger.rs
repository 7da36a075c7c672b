//! # Transmission Ledger
//!
//! Append-only record of every transmission and teleportation outcome.
//! Owned by the transport service; observers only get copies.

use super::entities::{LedgerEntry, TeleportationRecord};
use parking_lot::RwLock;

/// Append-only ledger shared between the coordinator and the engine.
#[derive(Debug, Default)]
pub struct TransmissionLedger {
    entries: RwLock<Vec<LedgerEntry>>,
}

impl TransmissionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty ledger with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Append one entry.
    pub fn append(&self, entry: impl Into<LedgerEntry>) {
        self.entries.write().push(entry.into());
    }

    /// Append a batch atomically; readers see all of it or none of it.
    pub fn append_all<I>(&self, entries: I)
    where
        I: IntoIterator,
        I::Item: Into<LedgerEntry>,
    {
        let mut guard = self.entries.write();
        guard.extend(entries.into_iter().map(Into::into));
    }

    /// Every entry, in append order.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.entries.read().clone()
    }

    /// Same sequence as [`entries`](Self::entries).
    pub fn transmitted_qubits(&self) -> Vec<LedgerEntry> {
        self.entries()
    }

    /// Same sequence as [`entries`](Self::entries).
    pub fn teleported_qubits(&self) -> Vec<LedgerEntry> {
        self.entries()
    }

    /// Only the teleportation records, in append order.
    pub fn teleportations(&self) -> Vec<TeleportationRecord> {
        self.entries
            .read()
            .iter()
            .filter_map(|e| e.as_teleportation().cloned())
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Export as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.entries.read())
    }
}
