//! In-Memory Quantum Network Adapter
//!
//! Implements `HostMemory` and `EprResourceAccessor` over a process-local
//! topology. Stands in for the link and physical layers in tests and
//! simulations.

use crate::domain::TransportError;
use crate::ports::outbound::{EprResourceAccessor, HostMemory};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Edge, EprId, EprPair, Fidelity, HostId, Qubit, QubitId};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// In-memory network: host memories, links and per-edge EPR pools.
#[derive(Debug, Default)]
pub struct InMemoryQuantumNetwork {
    /// Qubit queue per host.
    memories: RwLock<HashMap<HostId, VecDeque<Qubit>>>,
    /// Adjacency per host, sorted for deterministic traversal.
    links: RwLock<HashMap<HostId, BTreeSet<HostId>>>,
    /// EPR pool per edge, oldest first.
    pools: RwLock<HashMap<Edge, VecDeque<EprPair>>>,
    next_qubit_id: AtomicU64,
    next_epr_id: AtomicU64,
}

impl InMemoryQuantumNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hosts `0..n` linked in a line, no qubits and no pairs.
    pub fn line(n: u32) -> Self {
        let net = Self::new();
        for id in 0..n {
            net.add_host(HostId(id));
        }
        for id in 1..n {
            net.add_link(HostId(id - 1), HostId(id));
        }
        net
    }

    /// Register a host with an empty memory. No-op if already known.
    pub fn add_host(&self, host: HostId) {
        self.memories.write().entry(host).or_default();
        self.links.write().entry(host).or_default();
    }

    /// Link two hosts, registering either if unknown.
    pub fn add_link(&self, a: HostId, b: HostId) {
        self.add_host(a);
        self.add_host(b);

        let mut links = self.links.write();
        links.entry(a).or_default().insert(b);
        links.entry(b).or_default().insert(a);
    }

    /// Pool new EPR pairs on the edge `a`-`b`, linking the hosts if needed.
    pub fn add_epr_pairs(&self, a: HostId, b: HostId, fidelities: &[Fidelity]) -> Vec<EprId> {
        self.add_link(a, b);

        let mut pools = self.pools.write();
        let pool = pools.entry(Edge::new(a, b)).or_default();
        fidelities
            .iter()
            .map(|fidelity| {
                let id = EprId(self.next_epr_id.fetch_add(1, Ordering::Relaxed));
                pool.push_back(EprPair::new(id, *fidelity));
                id
            })
            .collect()
    }

    /// Append fresh qubits to a host's memory, registering the host if needed.
    pub fn load_qubits(&self, host: HostId, fidelities: &[Fidelity]) -> Vec<QubitId> {
        self.add_host(host);

        let mut memories = self.memories.write();
        let memory = memories.entry(host).or_default();
        fidelities
            .iter()
            .map(|fidelity| {
                let id = QubitId(self.next_qubit_id.fetch_add(1, Ordering::Relaxed));
                memory.push_back(Qubit::new(id, *fidelity));
                id
            })
            .collect()
    }

    /// Whether the host is registered.
    pub fn contains_host(&self, host: HostId) -> bool {
        self.memories.read().contains_key(&host)
    }

    /// Whether `a` and `b` are directly linked.
    pub fn has_link(&self, a: HostId, b: HostId) -> bool {
        self.links
            .read()
            .get(&a)
            .is_some_and(|neighbors| neighbors.contains(&b))
    }

    /// Neighbours of a host, in ascending id order.
    pub fn neighbors(&self, host: HostId) -> Vec<HostId> {
        self.links
            .read()
            .get(&host)
            .map(|n| n.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Pairs pooled on the edge `a`-`b`.
    pub fn epr_count(&self, a: HostId, b: HostId) -> usize {
        self.pools
            .read()
            .get(&Edge::new(a, b))
            .map_or(0, VecDeque::len)
    }

    /// Pairs pooled across the whole network.
    pub fn total_epr_count(&self) -> usize {
        self.pools.read().values().map(VecDeque::len).sum()
    }

    /// Qubit fidelities of a host's memory, front to back.
    pub fn memory_snapshot(&self, host: HostId) -> Vec<f64> {
        self.memories
            .read()
            .get(&host)
            .map(|m| m.iter().map(|q| q.current_fidelity().value()).collect())
            .unwrap_or_default()
    }

    /// Qubit ids of a host's memory, front to back.
    pub fn memory_ids(&self, host: HostId) -> Vec<QubitId> {
        self.memories
            .read()
            .get(&host)
            .map(|m| m.iter().map(Qubit::id).collect())
            .unwrap_or_default()
    }

    fn pop_with(
        &self,
        host: HostId,
        pop: impl FnOnce(&mut VecDeque<Qubit>) -> Option<Qubit>,
    ) -> Result<Qubit, TransportError> {
        let mut memories = self.memories.write();
        let memory = memories
            .get_mut(&host)
            .ok_or(TransportError::UnknownHost(host))?;
        pop(memory).ok_or(TransportError::InsufficientMemory { host })
    }
}

#[async_trait]
impl HostMemory for InMemoryQuantumNetwork {
    async fn memory_len(&self, host: HostId) -> Result<usize, TransportError> {
        self.memories
            .read()
            .get(&host)
            .map(VecDeque::len)
            .ok_or(TransportError::UnknownHost(host))
    }

    async fn pop_front(&self, host: HostId) -> Result<Qubit, TransportError> {
        self.pop_with(host, VecDeque::pop_front)
    }

    async fn pop_back(&self, host: HostId) -> Result<Qubit, TransportError> {
        self.pop_with(host, VecDeque::pop_back)
    }

    async fn push(&self, host: HostId, qubit: Qubit) -> Result<(), TransportError> {
        let mut memories = self.memories.write();
        let memory = memories
            .get_mut(&host)
            .ok_or(TransportError::UnknownHost(host))?;
        memory.push_back(qubit);
        Ok(())
    }
}

#[async_trait]
impl EprResourceAccessor for InMemoryQuantumNetwork {
    async fn pairs_on_edge(&self, a: HostId, b: HostId) -> Vec<EprPair> {
        self.pools
            .read()
            .get(&Edge::new(a, b))
            .map(|pool| pool.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn consume_pair(&self, a: HostId, b: HostId) -> Result<EprPair, TransportError> {
        let edge = Edge::new(a, b);
        let pair = self
            .pools
            .write()
            .get_mut(&edge)
            .and_then(VecDeque::pop_front)
            .ok_or(TransportError::ResourceExhausted { edge })?;

        debug!("[qn-04] Removed EPR pair {} from edge {}", pair.id.0, edge);
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(v: f64) -> Fidelity {
        Fidelity::new(v).unwrap()
    }

    #[test]
    fn test_line_topology() {
        let net = InMemoryQuantumNetwork::line(4);

        assert!(net.has_link(HostId(0), HostId(1)));
        assert!(net.has_link(HostId(2), HostId(1)));
        assert!(!net.has_link(HostId(0), HostId(2)));
        assert_eq!(net.neighbors(HostId(1)), vec![HostId(0), HostId(2)]);
    }

    #[tokio::test]
    async fn test_pairs_on_edge_is_non_destructive() {
        let net = InMemoryQuantumNetwork::line(2);
        net.add_epr_pairs(HostId(0), HostId(1), &[f(0.9), f(0.8)]);

        let pairs = net.pairs_on_edge(HostId(1), HostId(0)).await;

        assert_eq!(pairs.len(), 2);
        assert_eq!(net.epr_count(HostId(0), HostId(1)), 2);
    }

    #[tokio::test]
    async fn test_consume_pair_until_exhausted() {
        let net = InMemoryQuantumNetwork::line(2);
        let ids = net.add_epr_pairs(HostId(0), HostId(1), &[f(0.9)]);

        let pair = net.consume_pair(HostId(0), HostId(1)).await.unwrap();
        assert_eq!(pair.id, ids[0]);

        let result = net.consume_pair(HostId(0), HostId(1)).await;
        assert_eq!(
            result,
            Err(TransportError::ResourceExhausted {
                edge: Edge::new(HostId(0), HostId(1))
            })
        );
    }

    #[tokio::test]
    async fn test_memory_pop_order() {
        let net = InMemoryQuantumNetwork::new();
        net.load_qubits(HostId(5), &[f(0.1), f(0.2), f(0.3)]);

        assert_eq!(net.pop_front(HostId(5)).await.unwrap().current_fidelity(), f(0.1));
        assert_eq!(net.pop_back(HostId(5)).await.unwrap().current_fidelity(), f(0.3));
        assert_eq!(net.memory_len(HostId(5)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_memory_errors() {
        let net = InMemoryQuantumNetwork::new();
        net.add_host(HostId(1));

        assert_eq!(
            net.pop_front(HostId(1)).await,
            Err(TransportError::InsufficientMemory { host: HostId(1) })
        );
        assert_eq!(
            net.memory_len(HostId(9)).await,
            Err(TransportError::UnknownHost(HostId(9)))
        );

        let stray = Qubit::new(QubitId(99), f(0.5));
        assert!(net.push(HostId(9), stray).await.is_err());
    }

    #[tokio::test]
    async fn test_push_appends() {
        let net = InMemoryQuantumNetwork::new();
        net.load_qubits(HostId(0), &[f(0.1)]);

        net.push(HostId(0), Qubit::new(QubitId(42), f(0.7)))
            .await
            .unwrap();

        assert_eq!(net.memory_snapshot(HostId(0)), vec![0.1, 0.7]);
        assert_eq!(net.memory_ids(HostId(0))[1], QubitId(42));
    }
}
