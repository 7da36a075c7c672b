//! # QN-04 Transport Layer
//!
//! End-to-end qubit delivery between two hosts over the EPR pairs the lower
//! layers keep pooled on each edge.
//!
//! **Layer ID:** 04  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - **Bulk transmission**: reserve one route per qubit and verify every hop
//!   has an EPR pair, retrying the whole batch up to a ceiling (default 2)
//! - **Teleportation**: move one qubit across a route, succeeding with
//!   probability `f_s·f_d·f_r + (1−f_s)·(1−f_d)·(1−f_r)` and consuming one
//!   EPR pair per hop whatever the outcome
//! - **Ledger**: append-only record of every completed request
//!
//! ## Guarantees
//!
//! | Property | Description |
//! |----------|-------------|
//! | All-or-nothing batches | A failed bulk attempt appends nothing |
//! | Non-destructive checks | Bulk feasibility never consumes a pair |
//! | Qubit conservation | Failure returns both qubits; success destroys only the destination's original |
//! | Fail-fast preconditions | Missing route, qubit or pairs change nothing |
//!
//! ## Module Structure
//!
//! ```text
//! qn-04-transport/
//! ├── domain/          # Records, ledger, errors, invariants
//! ├── algorithms/      # Fidelity model, transmission coordinator, teleportation engine
//! ├── ports/           # API trait (inbound) + lower-layer traits (outbound)
//! ├── adapters/        # In-memory network, BFS routing, random sources
//! ├── application/     # TransportService orchestrating everything
//! └── config.rs        # TransportConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use algorithms::{
    aggregate_route_fidelity, draw_succeeds, success_probability, TeleportationEngine,
    TransmissionCoordinator, TransmissionRequest,
};
pub use application::TransportService;
pub use config::{TransportConfig, DEFAULT_MAX_TRANSMISSION_ATTEMPTS};
pub use domain::{
    invariant_epr_consumption, invariant_probability_bounds, invariant_qubit_conservation,
    LedgerEntry, TeleportationRecord, TransmissionLedger, TransmissionRecord, TransportError,
};
pub use ports::{
    EprResourceAccessor, HostMemory, MockRouteProvider, RandomSource, RouteProvider,
    TransportLayerApi,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
