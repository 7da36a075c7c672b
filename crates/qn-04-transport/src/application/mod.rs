//! # Application Layer
//!
//! Service orchestration.

pub mod service;

pub use service::TransportService;
