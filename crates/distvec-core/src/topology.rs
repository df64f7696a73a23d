use serde::Serialize;
use tracing::debug;

use crate::error::RoutingError;
use crate::types::{Cost, Link, NodeId};

/// One entry in a node's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Adjacency {
    /// The node on the other end of the link.
    pub neighbor: NodeId,
    /// Current link cost, or `None` once the link has been withdrawn.
    pub cost: Option<Cost>,
}

impl Adjacency {
    pub fn is_active(&self) -> bool {
        self.cost.is_some()
    }
}

/// Undirected weighted graph over node ids `1..=max_nodes`.
///
/// Every link is stored in both endpoints' adjacency lists with the same
/// cost. Row 0 of the backing storage is reserved and always empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    max_nodes: u32,
    pub(crate) adjacency: Vec<Vec<Adjacency>>,
}

impl Topology {
    /// Build a topology sized to the largest node id among `links`.
    pub fn build<I>(links: I) -> Result<Self, RoutingError>
    where
        I: IntoIterator<Item = Link>,
    {
        let links: Vec<Link> = links.into_iter().collect();
        let max_nodes = links
            .iter()
            .flat_map(|link| [link.a.get(), link.b.get()])
            .max()
            .ok_or(RoutingError::EmptyTopology)?;
        Self::with_max_nodes(max_nodes, links)
    }

    /// Build a topology with an explicit node count. Nodes without links
    /// are isolated.
    pub fn with_max_nodes<I>(max_nodes: u32, links: I) -> Result<Self, RoutingError>
    where
        I: IntoIterator<Item = Link>,
    {
        let mut topology = Self {
            max_nodes,
            adjacency: vec![Vec::new(); max_nodes as usize + 1],
        };

        let mut count = 0usize;
        for link in links {
            topology.check(link.a)?;
            topology.check(link.b)?;
            if link.a == link.b {
                return Err(RoutingError::SelfLoop { node: link.a });
            }
            topology.check_cost(link.a, link.b, link.cost)?;
            topology.adjacency[link.a.index()].push(Adjacency {
                neighbor: link.b,
                cost: Some(link.cost),
            });
            topology.adjacency[link.b.index()].push(Adjacency {
                neighbor: link.a,
                cost: Some(link.cost),
            });
            count += 1;
        }

        debug!(max_nodes, links = count, "built topology");
        Ok(topology)
    }

    /// Largest node id; fixed for the lifetime of the topology.
    pub fn max_nodes(&self) -> u32 {
        self.max_nodes
    }

    /// All node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (1..=self.max_nodes as usize).map(NodeId::from_index)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.get() <= self.max_nodes
    }

    /// Adjacency list of `node`, including withdrawn links.
    pub fn neighbors(&self, node: NodeId) -> Result<&[Adjacency], RoutingError> {
        self.check(node)?;
        Ok(&self.adjacency[node.index()])
    }

    /// Cost of the first link entry from `a` to `b`; `None` when missing or withdrawn.
    pub fn link_cost(&self, a: NodeId, b: NodeId) -> Result<Option<Cost>, RoutingError> {
        self.check(b)?;
        Ok(self
            .neighbors(a)?
            .iter()
            .find(|adj| adj.neighbor == b)
            .and_then(|adj| adj.cost))
    }

    /// Every active link once, with `a < b`, in adjacency order.
    pub fn links(&self) -> Vec<Link> {
        self.nodes()
            .flat_map(move |node| {
                self.adjacency[node.index()]
                    .iter()
                    .filter(move |adj| node < adj.neighbor)
                    .filter_map(move |adj| adj.cost.map(|cost| Link::new(node, adj.neighbor, cost)))
            })
            .collect()
    }

    /// Largest link cost this topology accepts.
    ///
    /// Keeps `2 * max_nodes * cost + 1` within [`Cost`], so the derived
    /// unreachable sentinel stays above every simple path cost.
    pub fn cost_limit(&self) -> Cost {
        (Cost::MAX - 1) / (2 * Cost::from(self.max_nodes.max(1)))
    }

    /// Largest cost among active links, or 0 when every link is withdrawn.
    pub fn max_active_cost(&self) -> Cost {
        self.adjacency
            .iter()
            .flatten()
            .filter_map(|adj| adj.cost)
            .max()
            .unwrap_or(0)
    }

    /// Active links of the node at matrix index `index`, as `(neighbor index, cost)`.
    pub(crate) fn active_neighbors(&self, index: usize) -> impl Iterator<Item = (usize, Cost)> + '_ {
        self.adjacency[index]
            .iter()
            .filter_map(|adj| adj.cost.map(|cost| (adj.neighbor.index(), cost)))
    }

    pub(crate) fn check_cost(&self, a: NodeId, b: NodeId, cost: Cost) -> Result<(), RoutingError> {
        let limit = self.cost_limit();
        if cost > limit {
            return Err(RoutingError::CostTooLarge { a, b, cost, limit });
        }
        Ok(())
    }

    pub(crate) fn check(&self, node: NodeId) -> Result<(), RoutingError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(RoutingError::UnknownNode {
                node,
                max_nodes: self.max_nodes,
            })
        }
    }
}
