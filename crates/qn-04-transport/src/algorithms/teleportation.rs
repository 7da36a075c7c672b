//! # Teleportation Engine
//!
//! Single-qubit teleportation over the EPR pairs of one route.
//!
//! ## Protocol
//!
//! 1. Acquire a route (fail fast, no side effects)
//! 2. Both memories must hold a qubit (fail fast, no side effects)
//! 3. Survey EPR fidelities along the route; empty survey fails fast
//! 4. Pop the source's FRONT qubit and the destination's BACK qubit
//! 5. `P = f_s·f_d·f_r + (1−f_s)·(1−f_d)·(1−f_r)`
//! 6. Draw `u` uniform in `[0, 1]`; success iff `u ≤ P`
//! 7. Success: source qubit joins the destination memory and the
//!    destination's original qubit is destroyed. Failure: both qubits go
//!    back to their own memories (appended, original positions are lost)
//! 8. Consume one EPR pair from every hop, whatever the outcome
//!
//! Once step 4 has run the protocol always completes; it never aborts with
//! qubits in flight.

use super::fidelity::{aggregate_route_fidelity, draw_succeeds, success_probability};
use crate::domain::{invariant_probability_bounds, TeleportationRecord, TransportError};
use crate::ports::outbound::{EprResourceAccessor, HostMemory, RandomSource, RouteProvider};
use shared_types::{Fidelity, HostId, Qubit, Route};
use tracing::{debug, error, warn};

/// Runs the teleportation protocol against the lower layers.
pub struct TeleportationEngine<'a> {
    routes: &'a dyn RouteProvider,
    eprs: &'a dyn EprResourceAccessor,
    memory: &'a dyn HostMemory,
    rng: &'a dyn RandomSource,
}

impl<'a> TeleportationEngine<'a> {
    /// Create an engine over the given collaborators.
    pub fn new(
        routes: &'a dyn RouteProvider,
        eprs: &'a dyn EprResourceAccessor,
        memory: &'a dyn HostMemory,
        rng: &'a dyn RandomSource,
    ) -> Self {
        Self {
            routes,
            eprs,
            memory,
            rng,
        }
    }

    /// Teleport one qubit from `source` to `destination`.
    ///
    /// `Err` is only returned before any qubit leaves its memory.
    pub async fn teleport(
        &self,
        source: HostId,
        destination: HostId,
    ) -> Result<TeleportationRecord, TransportError> {
        // 1. Route acquisition
        let route = self.acquire_route(source, destination).await?;

        // 2. Memory preconditions
        self.require_qubit(source).await?;
        self.require_qubit(destination).await?;

        // 3. EPR survey (read-only)
        let fidelities = self.survey_route(&route).await;
        let f_route = aggregate_route_fidelity(&fidelities).ok_or(
            TransportError::NoRouteResources {
                from: source,
                to: destination,
            },
        )?;

        // 4. Qubit acquisition: front of source, back of destination
        let (source_qubit, destination_qubit) = self.take_qubits(source, destination).await?;

        let f_source = source_qubit.current_fidelity().value();
        let f_destination = destination_qubit.current_fidelity().value();

        // 5. Success probability
        let probability = success_probability(f_source, f_destination, f_route);
        debug_assert!(invariant_probability_bounds(probability));

        // 6. Outcome draw
        let draw = self.rng.uniform();
        let success = draw_succeeds(draw, probability);

        debug!(
            %source,
            %destination,
            f_source,
            f_destination,
            f_route,
            probability,
            draw,
            success,
            "[qn-04] Teleportation outcome drawn"
        );

        let source_state = source_qubit.state();
        let destination_state = destination_qubit.state();

        // 7. Memory update
        self.settle_qubits(source, destination, source_qubit, destination_qubit, success)
            .await;

        // 8. Resource release
        let pairs_consumed = self.release_pairs(&route).await;

        Ok(TeleportationRecord {
            source,
            destination,
            route,
            fidelity_source: f_source,
            fidelity_destination: f_destination,
            fidelity_route: f_route,
            success_probability: probability,
            source_qubit: source_state,
            destination_qubit: destination_state,
            pairs_consumed,
            success,
        })
    }

    async fn acquire_route(
        &self,
        source: HostId,
        destination: HostId,
    ) -> Result<Route, TransportError> {
        self.routes
            .find_route(source, destination)
            .await
            .ok_or(TransportError::RouteUnavailable {
                from: source,
                to: destination,
            })
    }

    async fn require_qubit(&self, host: HostId) -> Result<(), TransportError> {
        if self.memory.memory_len(host).await? < 1 {
            return Err(TransportError::InsufficientMemory { host });
        }
        Ok(())
    }

    /// Every pair fidelity on every hop, as one flat list.
    async fn survey_route(&self, route: &Route) -> Vec<Fidelity> {
        let mut fidelities = Vec::new();
        for (a, b) in route.hops() {
            let pairs = self.eprs.pairs_on_edge(a, b).await;
            fidelities.extend(pairs.iter().map(|p| p.current_fidelity()));
        }
        fidelities
    }

    async fn take_qubits(
        &self,
        source: HostId,
        destination: HostId,
    ) -> Result<(Qubit, Qubit), TransportError> {
        let source_qubit = self.memory.pop_front(source).await?;

        match self.memory.pop_back(destination).await {
            Ok(destination_qubit) => Ok((source_qubit, destination_qubit)),
            Err(e) => {
                // Memory changed under us; hand the source qubit back.
                self.return_qubit(source, source_qubit).await;
                Err(e)
            }
        }
    }

    async fn settle_qubits(
        &self,
        source: HostId,
        destination: HostId,
        source_qubit: Qubit,
        destination_qubit: Qubit,
        success: bool,
    ) {
        if success {
            // The destination's original qubit is consumed by the protocol
            // and never returned.
            self.return_qubit(destination, source_qubit).await;
        } else {
            self.return_qubit(source, source_qubit).await;
            self.return_qubit(destination, destination_qubit).await;
        }
    }

    async fn return_qubit(&self, host: HostId, qubit: Qubit) {
        let id = qubit.id();
        if let Err(e) = self.memory.push(host, qubit).await {
            error!(%host, qubit = id.0, error = %e, "[qn-04] Failed to store qubit");
        }
    }

    /// Remove one pair per hop. Returns how many were actually removed.
    async fn release_pairs(&self, route: &Route) -> usize {
        let mut consumed = 0;
        for (a, b) in route.hops() {
            match self.eprs.consume_pair(a, b).await {
                Ok(pair) => {
                    debug!(%a, %b, epr = pair.id.0, "[qn-04] EPR pair consumed");
                    consumed += 1;
                }
                Err(e) => {
                    warn!(%a, %b, error = %e, "[qn-04] No EPR pair left to release on hop");
                }
            }
        }
        consumed
    }
}
