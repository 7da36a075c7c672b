//! # Algorithms Module
//!
//! Transport layer protocols: fidelity model, bulk transmission coordinator
//! and teleportation engine.

pub mod fidelity;
pub mod teleportation;
pub mod transmission;

pub use fidelity::{aggregate_route_fidelity, draw_succeeds, success_probability};
pub use teleportation::TeleportationEngine;
pub use transmission::{TransmissionCoordinator, TransmissionRequest};
