use serde::Serialize;

use crate::engine::RoutingTables;
use crate::error::RoutingError;
use crate::types::{Cost, NodeId};

/// One reachable destination in a node's forwarding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForwardingEntry {
    pub destination: NodeId,
    pub next_hop: NodeId,
    pub cost: Cost,
}

/// The forwarding table of a single node, destinations ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardingTable {
    pub node: NodeId,
    pub entries: Vec<ForwardingEntry>,
}

impl ForwardingTable {
    pub fn entry(&self, destination: NodeId) -> Option<&ForwardingEntry> {
        self.entries
            .binary_search_by_key(&destination, |e| e.destination)
            .ok()
            .map(|idx| &self.entries[idx])
    }
}

impl RoutingTables {
    /// Reachable destinations of `node`, always including `(node, node, 0)`.
    pub fn forwarding_table(&self, node: NodeId) -> Result<ForwardingTable, RoutingError> {
        self.check(node)?;
        let mut entries = Vec::new();
        for index in 1..=self.max_nodes() as usize {
            let destination = NodeId::from_index(index);
            if let (Some(cost), Some(next_hop)) = (
                self.distance(node, destination)?,
                self.next_hop(node, destination)?,
            ) {
                entries.push(ForwardingEntry {
                    destination,
                    next_hop,
                    cost,
                });
            }
        }
        Ok(ForwardingTable { node, entries })
    }

    /// Forwarding tables of every node in ascending order.
    pub fn forwarding_tables(&self) -> Vec<ForwardingTable> {
        (1..=self.max_nodes() as usize)
            .map(NodeId::from_index)
            .filter_map(|node| self.forwarding_table(node).ok())
            .collect()
    }
}
