//! # Domain Module
//!
//! Core domain types for the Transport Layer.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod ledger;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use ledger::TransmissionLedger;
