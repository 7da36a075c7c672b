//! # Shared Types Crate
//!
//! This crate contains the primitives every layer of the quantum-network
//! simulator agrees on: host identifiers, fidelities, qubits, EPR pairs,
//! edges and routes.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-layer types are defined here.
//! - **Validated Construction**: A `Fidelity` is always within `[0, 1]` and a
//!   `Route` always has at least two nodes.
//! - **Move Semantics**: Qubits and EPR pairs are not `Copy`; they change
//!   owner by value so a resource can never sit in two places at once.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
