//! # Transport Service
//!
//! Application service implementing `TransportLayerApi`.
//!
//! Owns the configuration, the ledger and the protocol lock. Every request
//! runs under the lock, so a feasibility check or a teleportation sees the
//! EPR pools and memories exactly as it leaves them for the next caller.

use async_trait::async_trait;
use quantum_telemetry::{layer_span, log_event};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Instrument;

use crate::algorithms::{TeleportationEngine, TransmissionCoordinator, TransmissionRequest};
use crate::config::TransportConfig;
use crate::domain::{
    LedgerEntry, TeleportationRecord, TransmissionLedger, TransmissionRecord, TransportError,
};
use crate::ports::inbound::TransportLayerApi;
use crate::ports::outbound::{EprResourceAccessor, HostMemory, RandomSource, RouteProvider};
use shared_types::HostId;

const LAYER: &str = "qn-04";

/// Transport Service - orchestrates bulk transmission and teleportation.
pub struct TransportService<R, E, M, G>
where
    R: RouteProvider,
    E: EprResourceAccessor,
    M: HostMemory,
    G: RandomSource,
{
    config: TransportConfig,
    routes: Arc<R>,
    eprs: Arc<E>,
    memory: Arc<M>,
    rng: Arc<G>,
    ledger: TransmissionLedger,
    /// Single-writer arbitration over pools and memories.
    protocol_lock: Mutex<()>,
}

impl<R, E, M, G> TransportService<R, E, M, G>
where
    R: RouteProvider,
    E: EprResourceAccessor,
    M: HostMemory,
    G: RandomSource,
{
    /// Create a new transport service.
    ///
    /// Fails if `config` does not validate.
    pub fn new(
        config: TransportConfig,
        routes: Arc<R>,
        eprs: Arc<E>,
        memory: Arc<M>,
        rng: Arc<G>,
    ) -> Result<Self, TransportError> {
        config.validate()?;

        Ok(Self {
            ledger: TransmissionLedger::with_capacity(config.ledger_capacity_hint),
            config,
            routes,
            eprs,
            memory,
            rng,
            protocol_lock: Mutex::new(()),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// The ledger, for observers that want the typed views.
    pub fn ledger(&self) -> &TransmissionLedger {
        &self.ledger
    }

    /// A zero-qubit request is valid and trivially feasible.
    fn validate_request(&self, count: usize) -> Result<(), TransportError> {
        if count > self.config.max_batch_size {
            return Err(TransportError::BatchTooLarge {
                size: count,
                max: self.config.max_batch_size,
            });
        }

        Ok(())
    }

    async fn transmit(
        &self,
        source: HostId,
        destination: HostId,
        count: usize,
    ) -> Result<Vec<TransmissionRecord>, TransportError> {
        // 1. Validate input
        self.validate_request(count)?;

        // 2. Feasibility under the protocol lock
        let _guard = self.protocol_lock.lock().await;
        let coordinator = TransmissionCoordinator::new(
            self.routes.as_ref(),
            self.eprs.as_ref(),
            self.config.max_transmission_attempts,
        );
        let records = coordinator
            .run(TransmissionRequest {
                source,
                destination,
                count,
            })
            .await?;

        // 3. Commit the whole batch
        self.ledger.append_all(records.iter().cloned());

        log_event!(
            info,
            LAYER,
            "[qn-04] Transmission request completed",
            %source,
            %destination,
            qubits = count
        );

        Ok(records)
    }

    async fn run_teleport(
        &self,
        source: HostId,
        destination: HostId,
    ) -> Result<TeleportationRecord, TransportError> {
        let _guard = self.protocol_lock.lock().await;
        let engine = TeleportationEngine::new(
            self.routes.as_ref(),
            self.eprs.as_ref(),
            self.memory.as_ref(),
            self.rng.as_ref(),
        );
        let record = engine.teleport(source, destination).await?;

        self.ledger.append(record.clone());

        log_event!(
            info,
            LAYER,
            "[qn-04] Teleportation completed",
            route = %record.route,
            success_probability = record.success_probability,
            success = record.success
        );

        Ok(record)
    }
}

impl<R, E, M, G> fmt::Display for TransportService<R, E, M, G>
where
    R: RouteProvider,
    E: EprResourceAccessor,
    M: HostMemory,
    G: RandomSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transport Layer")
    }
}

#[async_trait]
impl<R, E, M, G> TransportLayerApi for TransportService<R, E, M, G>
where
    R: RouteProvider + 'static,
    E: EprResourceAccessor + 'static,
    M: HostMemory + 'static,
    G: RandomSource + 'static,
{
    async fn try_request_transmission(
        &self,
        source: HostId,
        destination: HostId,
        count: usize,
    ) -> Result<Vec<TransmissionRecord>, TransportError> {
        let span = layer_span!("request_transmission", layer = LAYER, %source, %destination, count);
        self.transmit(source, destination, count)
            .instrument(span)
            .await
    }

    async fn request_transmission(&self, source: HostId, destination: HostId, count: usize) -> bool {
        match self.try_request_transmission(source, destination, count).await {
            Ok(_) => true,
            Err(e) => {
                log_event!(
                    warn,
                    LAYER,
                    "[qn-04] Transmission request failed",
                    %source,
                    %destination,
                    qubits = count,
                    error = %e
                );
                false
            }
        }
    }

    async fn try_teleport(
        &self,
        source: HostId,
        destination: HostId,
    ) -> Result<TeleportationRecord, TransportError> {
        let span = layer_span!("teleport", layer = LAYER, %source, %destination);
        self.run_teleport(source, destination).instrument(span).await
    }

    async fn teleport(&self, source: HostId, destination: HostId) -> bool {
        match self.try_teleport(source, destination).await {
            Ok(record) => record.success,
            Err(e) => {
                log_event!(
                    warn,
                    LAYER,
                    "[qn-04] Teleportation not attempted",
                    %source,
                    %destination,
                    error = %e
                );
                false
            }
        }
    }

    fn transmitted_qubits(&self) -> Vec<LedgerEntry> {
        self.ledger.transmitted_qubits()
    }

    fn teleported_qubits(&self) -> Vec<LedgerEntry> {
        self.ledger.teleported_qubits()
    }
}
