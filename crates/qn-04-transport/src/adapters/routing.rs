//! Shortest Route Adapter
//!
//! Implements `RouteProvider` with a breadth-first search over the
//! in-memory topology, standing in for the network layer.

use super::network::InMemoryQuantumNetwork;
use crate::ports::outbound::RouteProvider;
use async_trait::async_trait;
use shared_types::{HostId, Route};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// Fewest-hop route provider.
///
/// A route is valid when both endpoints are known, they differ, and every
/// hop follows a topology link. EPR availability is not considered here.
pub struct ShortestRouteProvider {
    network: Arc<InMemoryQuantumNetwork>,
}

impl ShortestRouteProvider {
    /// Create a provider over `network`'s topology.
    pub fn new(network: Arc<InMemoryQuantumNetwork>) -> Self {
        Self { network }
    }

    /// BFS from `source`; neighbours are visited in ascending id order so
    /// ties resolve deterministically.
    fn shortest_path(&self, source: HostId, destination: HostId) -> Option<Vec<HostId>> {
        let mut parents: HashMap<HostId, HostId> = HashMap::new();
        let mut queue = VecDeque::from([source]);
        parents.insert(source, source);

        while let Some(node) = queue.pop_front() {
            if node == destination {
                let mut path = vec![destination];
                let mut current = destination;
                while current != source {
                    current = parents[&current];
                    path.push(current);
                }
                path.reverse();
                return Some(path);
            }

            for next in self.network.neighbors(node) {
                if let std::collections::hash_map::Entry::Vacant(e) = parents.entry(next) {
                    e.insert(node);
                    queue.push_back(next);
                }
            }
        }

        None
    }
}

#[async_trait]
impl RouteProvider for ShortestRouteProvider {
    async fn find_route(&self, source: HostId, destination: HostId) -> Option<Route> {
        if source == destination
            || !self.network.contains_host(source)
            || !self.network.contains_host(destination)
        {
            debug!("[qn-04] No valid route between {} and {}", source, destination);
            return None;
        }

        let path = self.shortest_path(source, destination)?;
        Route::new(path).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_line_route() {
        let net = Arc::new(InMemoryQuantumNetwork::line(4));
        let provider = ShortestRouteProvider::new(Arc::clone(&net));

        let route = provider.find_route(HostId(0), HostId(3)).await.unwrap();

        assert_eq!(route.nodes(), &[HostId(0), HostId(1), HostId(2), HostId(3)]);
    }

    #[tokio::test]
    async fn test_prefers_fewest_hops() {
        // 0-1-2-3 plus a shortcut 0-3
        let net = Arc::new(InMemoryQuantumNetwork::line(4));
        net.add_link(HostId(0), HostId(3));
        let provider = ShortestRouteProvider::new(Arc::clone(&net));

        let route = provider.find_route(HostId(0), HostId(3)).await.unwrap();

        assert_eq!(route.hop_count(), 1);
    }

    #[tokio::test]
    async fn test_disconnected_hosts_have_no_route() {
        let net = Arc::new(InMemoryQuantumNetwork::line(2));
        net.add_host(HostId(7));
        let provider = ShortestRouteProvider::new(Arc::clone(&net));

        assert!(provider.find_route(HostId(0), HostId(7)).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_or_identical_endpoints() {
        let net = Arc::new(InMemoryQuantumNetwork::line(2));
        let provider = ShortestRouteProvider::new(Arc::clone(&net));

        assert!(provider.find_route(HostId(0), HostId(0)).await.is_none());
        assert!(provider.find_route(HostId(0), HostId(42)).await.is_none());
    }
}
