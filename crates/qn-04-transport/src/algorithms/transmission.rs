//! # Transmission Coordinator
//!
//! Multi-attempt route and resource acquisition for bulk requests.
//!
//! Each attempt asks for one route per qubit and then checks that every hop
//! of every route has at least one EPR pair pooled. The check never consumes
//! a pair. Any failure discards the whole attempt; the batch is retried as a
//! unit up to the attempt ceiling.

use crate::domain::{TransmissionRecord, TransportError};
use crate::ports::outbound::{EprResourceAccessor, RouteProvider};
use shared_types::{Edge, HostId, Route};
use tracing::{debug, warn};

/// A bulk transmission request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransmissionRequest {
    /// Sending endpoint.
    pub source: HostId,
    /// Receiving endpoint.
    pub destination: HostId,
    /// Qubits to route.
    pub count: usize,
}

/// Coordinates one bulk request against the lower layers.
pub struct TransmissionCoordinator<'a> {
    routes: &'a dyn RouteProvider,
    eprs: &'a dyn EprResourceAccessor,
    max_attempts: u32,
}

impl<'a> TransmissionCoordinator<'a> {
    /// Create a coordinator that makes at most `max_attempts` batch passes.
    pub fn new(
        routes: &'a dyn RouteProvider,
        eprs: &'a dyn EprResourceAccessor,
        max_attempts: u32,
    ) -> Self {
        Self {
            routes,
            eprs,
            max_attempts,
        }
    }

    /// Run the retry loop.
    ///
    /// On success returns one record per route, in acquisition order. On
    /// failure returns `TransmissionFailed` wrapping the last attempt's error.
    pub async fn run(
        &self,
        request: TransmissionRequest,
    ) -> Result<Vec<TransmissionRecord>, TransportError> {
        let mut last_error = TransportError::RouteUnavailable {
            from: request.source,
            to: request.destination,
        };

        for attempt in 1..=self.max_attempts {
            match self.attempt(request).await {
                Ok(routes) => {
                    debug!(
                        attempt,
                        routes = routes.len(),
                        "[qn-04] Transmission batch feasible"
                    );
                    return Ok(routes
                        .into_iter()
                        .map(|route| {
                            TransmissionRecord::new(route, request.source, request.destination)
                        })
                        .collect());
                }
                Err(e) => {
                    warn!(
                        attempt,
                        source = %request.source,
                        destination = %request.destination,
                        error = %e,
                        "[qn-04] Transmission attempt failed"
                    );
                    last_error = e;
                }
            }
        }

        Err(TransportError::TransmissionFailed {
            attempts: self.max_attempts,
            last_error: Box::new(last_error),
        })
    }

    /// One full batch pass: acquire every route, then check every hop.
    async fn attempt(&self, request: TransmissionRequest) -> Result<Vec<Route>, TransportError> {
        let routes = self.acquire_routes(request).await?;
        self.check_resources(&routes).await?;
        Ok(routes)
    }

    /// Request `count` routes, stopping at the first missing one.
    async fn acquire_routes(
        &self,
        request: TransmissionRequest,
    ) -> Result<Vec<Route>, TransportError> {
        let mut routes = Vec::with_capacity(request.count);

        for _ in 0..request.count {
            let route = self
                .routes
                .find_route(request.source, request.destination)
                .await
                .ok_or(TransportError::RouteUnavailable {
                    from: request.source,
                    to: request.destination,
                })?;
            routes.push(route);
        }

        Ok(routes)
    }

    /// Every hop of every route needs a non-empty pool. Read-only.
    async fn check_resources(&self, routes: &[Route]) -> Result<(), TransportError> {
        for route in routes {
            for (a, b) in route.hops() {
                if self.eprs.pairs_on_edge(a, b).await.is_empty() {
                    return Err(TransportError::ResourceExhausted {
                        edge: Edge::new(a, b),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryQuantumNetwork;
    use crate::ports::outbound::MockRouteProvider;
    use shared_types::Fidelity;

    fn route(ids: &[u32]) -> Route {
        Route::new(ids.iter().copied().map(HostId).collect()).unwrap()
    }

    fn request(count: usize) -> TransmissionRequest {
        TransmissionRequest {
            source: HostId(0),
            destination: HostId(2),
            count,
        }
    }

    fn provisioned_line() -> InMemoryQuantumNetwork {
        let net = InMemoryQuantumNetwork::line(3);
        net.add_epr_pairs(HostId(0), HostId(1), &[Fidelity::PERFECT]);
        net.add_epr_pairs(HostId(1), HostId(2), &[Fidelity::PERFECT]);
        net
    }

    #[tokio::test]
    async fn test_success_yields_one_record_per_qubit() {
        let net = provisioned_line();
        let provider = MockRouteProvider::always(route(&[0, 1, 2]));
        let coordinator = TransmissionCoordinator::new(&provider, &net, 2);

        let records = coordinator.run(request(3)).await.unwrap();

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.source == HostId(0)));
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_check_does_not_consume_pairs() {
        let net = provisioned_line();
        let provider = MockRouteProvider::always(route(&[0, 1, 2]));
        let coordinator = TransmissionCoordinator::new(&provider, &net, 2);

        coordinator.run(request(4)).await.unwrap();

        assert_eq!(net.epr_count(HostId(0), HostId(1)), 1);
        assert_eq!(net.epr_count(HostId(1), HostId(2)), 1);
    }

    #[tokio::test]
    async fn test_always_failing_provider_stops_at_ceiling() {
        let net = provisioned_line();
        let provider = MockRouteProvider::never();
        let coordinator = TransmissionCoordinator::new(&provider, &net, 2);

        let result = coordinator.run(request(3)).await;

        // First missing route aborts each attempt: one call per attempt.
        assert_eq!(provider.calls(), 2);
        match result {
            Err(TransportError::TransmissionFailed {
                attempts,
                last_error,
            }) => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last_error, TransportError::RouteUnavailable { .. }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_second_attempt_can_succeed() {
        let net = provisioned_line();
        // Attempt 1: route, route, missing. Attempt 2: fallback answers.
        let provider = MockRouteProvider::scripted(
            vec![Some(route(&[0, 1, 2])), Some(route(&[0, 1, 2])), None],
            Some(route(&[0, 1, 2])),
        );
        let coordinator = TransmissionCoordinator::new(&provider, &net, 2);

        let records = coordinator.run(request(3)).await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(provider.calls(), 6);
    }

    #[tokio::test]
    async fn test_empty_hop_aborts_every_attempt() {
        let net = InMemoryQuantumNetwork::line(3);
        net.add_epr_pairs(HostId(0), HostId(1), &[Fidelity::PERFECT]);
        let provider = MockRouteProvider::always(route(&[0, 1, 2]));
        let coordinator = TransmissionCoordinator::new(&provider, &net, 2);

        let result = coordinator.run(request(2)).await;

        match result {
            Err(TransportError::TransmissionFailed { last_error, .. }) => {
                assert_eq!(
                    *last_error,
                    TransportError::ResourceExhausted {
                        edge: Edge::new(HostId(1), HostId(2))
                    }
                );
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(provider.calls(), 4);
    }
}
