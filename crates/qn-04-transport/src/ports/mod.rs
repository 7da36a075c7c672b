//! Ports module for the Transport Layer
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::TransportLayerApi;
pub use outbound::{EprResourceAccessor, HostMemory, MockRouteProvider, RandomSource, RouteProvider};
