//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports, standing in for the
//! network, link and physical layers.

mod network;
mod random;
mod routing;

pub use network::InMemoryQuantumNetwork;
pub use random::{FixedRandomSource, SeededRandomSource, ThreadRandomSource};
pub use routing::ShortestRouteProvider;
