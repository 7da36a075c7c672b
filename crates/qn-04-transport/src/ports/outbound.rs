//! # Outbound Ports
//!
//! Traits for the lower layers the transport layer consumes: the network
//! layer's route provider, the link layer's EPR pools, host memories, and a
//! source of randomness for outcome draws.

use crate::domain::TransportError;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{EprPair, HostId, Qubit, Route};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Route provider - outbound port (network layer).
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// A single valid path from `source` to `destination`, or `None`.
    ///
    /// Validity criteria belong to the provider.
    async fn find_route(&self, source: HostId, destination: HostId) -> Option<Route>;
}

/// EPR resource accessor - outbound port (link layer).
#[async_trait]
pub trait EprResourceAccessor: Send + Sync {
    /// Pairs currently pooled on the edge between `a` and `b`.
    ///
    /// Non-destructive: the pool is left untouched.
    async fn pairs_on_edge(&self, a: HostId, b: HostId) -> Vec<EprPair>;

    /// Remove and return one pair from the edge's pool.
    ///
    /// Fails with `ResourceExhausted` when the pool is empty.
    async fn consume_pair(&self, a: HostId, b: HostId) -> Result<EprPair, TransportError>;
}

/// Host memory - outbound port.
///
/// Each host owns an ordered queue of qubits.
#[async_trait]
pub trait HostMemory: Send + Sync {
    /// Number of qubits held by `host`.
    async fn memory_len(&self, host: HostId) -> Result<usize, TransportError>;

    /// Remove the oldest qubit.
    async fn pop_front(&self, host: HostId) -> Result<Qubit, TransportError>;

    /// Remove the newest qubit.
    async fn pop_back(&self, host: HostId) -> Result<Qubit, TransportError>;

    /// Append a qubit at the back.
    async fn push(&self, host: HostId, qubit: Qubit) -> Result<(), TransportError>;
}

/// Uniform randomness for teleportation outcome draws.
pub trait RandomSource: Send + Sync {
    /// A value uniformly distributed over `[0, 1]`.
    fn uniform(&self) -> f64;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Scripted route provider that counts calls.
///
/// Answers from its script first, then falls back to a fixed answer.
#[derive(Debug, Default)]
pub struct MockRouteProvider {
    script: Mutex<VecDeque<Option<Route>>>,
    fallback: Option<Route>,
    calls: AtomicUsize,
}

impl MockRouteProvider {
    /// Always answer with `route`.
    pub fn always(route: Route) -> Self {
        Self {
            fallback: Some(route),
            ..Default::default()
        }
    }

    /// Never find a route.
    pub fn never() -> Self {
        Self::default()
    }

    /// Answer from `script` in order, then with `fallback`.
    pub fn scripted(script: Vec<Option<Route>>, fallback: Option<Route>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `find_route` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for MockRouteProvider {
    async fn find_route(&self, _source: HostId, _destination: HostId) -> Option<Route> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.script.lock().pop_front() {
            Some(answer) => answer,
            None => self.fallback.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Route {
        Route::new(vec![HostId(0), HostId(1)]).unwrap()
    }

    #[tokio::test]
    async fn test_mock_never_counts_calls() {
        let provider = MockRouteProvider::never();
        assert!(provider.find_route(HostId(0), HostId(1)).await.is_none());
        assert!(provider.find_route(HostId(0), HostId(1)).await.is_none());
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_script_then_fallback() {
        let provider = MockRouteProvider::scripted(vec![None, Some(route())], None);

        assert!(provider.find_route(HostId(0), HostId(1)).await.is_none());
        assert_eq!(provider.find_route(HostId(0), HostId(1)).await, Some(route()));
        assert!(provider.find_route(HostId(0), HostId(1)).await.is_none());
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_mock_always() {
        let provider = MockRouteProvider::always(route());
        assert_eq!(provider.find_route(HostId(5), HostId(6)).await, Some(route()));
    }
}
