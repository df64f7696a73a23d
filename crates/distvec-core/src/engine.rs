use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::RoutingError;
use crate::topology::Topology;
use crate::types::{Cost, NodeId};

/// Lower bound on the derived pass limit for very small topologies.
const MIN_PASS_LIMIT: usize = 64;

/// Configuration for the distance-vector engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cost that stands for "unreachable". When unset, or smaller than the
    /// bound derived from the topology, `2 * max_nodes * max_link_cost + 1`
    /// is used instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infinity: Option<Cost>,
    /// Maximum number of relaxation passes before giving up. Defaults to
    /// `(max_nodes + 1)^2`, never less than 64.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_passes: Option<usize>,
}

/// Converged distance and next-hop matrices for every node pair.
///
/// Both matrices are flat `(max_nodes + 1)^2` arenas indexed by node id;
/// row and column 0 are reserved and never read.
#[derive(Debug, Clone)]
pub struct RoutingTables {
    max_nodes: u32,
    width: usize,
    infinity: Cost,
    dist: Vec<Cost>,
    next_hop: Vec<Option<NodeId>>,
    passes: usize,
}

impl PartialEq for RoutingTables {
    fn eq(&self, other: &Self) -> bool {
        self.max_nodes == other.max_nodes
            && self.infinity == other.infinity
            && self.dist == other.dist
            && self.next_hop == other.next_hop
    }
}

impl Eq for RoutingTables {}

impl RoutingTables {
    /// Direct-neighbor state: every node knows only itself and its active links.
    fn reset(topology: &Topology, infinity: Cost) -> Self {
        let max_nodes = topology.max_nodes();
        let width = max_nodes as usize + 1;
        let mut tables = Self {
            max_nodes,
            width,
            infinity,
            dist: vec![infinity; width * width],
            next_hop: vec![None; width * width],
            passes: 0,
        };

        for i in 1..width {
            let ii = tables.cell(i, i);
            tables.dist[ii] = 0;
            tables.next_hop[ii] = Some(NodeId::from_index(i));
            // Parallel links: the last one listed wins.
            for (neighbor, cost) in topology.active_neighbors(i) {
                if cost >= infinity {
                    continue;
                }
                let cell = tables.cell(i, neighbor);
                tables.dist[cell] = cost;
                tables.next_hop[cell] = Some(NodeId::from_index(neighbor));
            }
        }
        tables
    }

    fn cell(&self, from: usize, to: usize) -> usize {
        from * self.width + to
    }

    pub fn max_nodes(&self) -> u32 {
        self.max_nodes
    }

    /// The unreachable sentinel these tables were computed with.
    pub fn infinity(&self) -> Cost {
        self.infinity
    }

    /// Number of relaxation passes it took to reach the fixed point.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.get() <= self.max_nodes
    }

    /// Cost of the cheapest known path, or `None` when `to` is unreachable.
    pub fn distance(&self, from: NodeId, to: NodeId) -> Result<Option<Cost>, RoutingError> {
        self.check(from)?;
        self.check(to)?;
        let cost = self.dist[self.cell(from.index(), to.index())];
        Ok((cost < self.infinity).then_some(cost))
    }

    /// Neighbor of `from` to forward through toward `to`, or `None` when unreachable.
    pub fn next_hop(&self, from: NodeId, to: NodeId) -> Result<Option<NodeId>, RoutingError> {
        self.check(from)?;
        self.check(to)?;
        Ok(self.next_hop[self.cell(from.index(), to.index())])
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

    /// One pass over every `(node, neighbor, destination)` triple.
    /// Returns `true` if any entry changed.
    fn relax_pass(&mut self, topology: &Topology) -> bool {
        let mut changed = false;
        for i in 1..self.width {
            for (neighbor, _) in topology.active_neighbors(i) {
                let to_neighbor = self.dist[self.cell(i, neighbor)];
                if to_neighbor >= self.infinity {
                    continue;
                }
                let via = self.next_hop[self.cell(i, neighbor)];

                for j in 1..self.width {
                    if j == i {
                        continue;
                    }
                    let beyond = self.dist[self.cell(neighbor, j)];
                    let candidate = to_neighbor.saturating_add(beyond);
                    if candidate >= self.infinity {
                        continue;
                    }

                    let ij = self.cell(i, j);
                    let current = self.dist[ij];
                    let shorter = candidate < current;
                    let tie_to_lower_hop = candidate == current
                        && matches!((via, self.next_hop[ij]), (Some(v), Some(h)) if v < h);

                    if shorter || tie_to_lower_hop {
                        trace!(from = i, to = j, through = neighbor, cost = candidate, "relaxed");
                        self.dist[ij] = candidate;
                        self.next_hop[ij] = via;
                        changed = true;
                    }
                }
            }
        }
        changed
    }
}

/// Computes routing tables by neighbor-restricted Bellman-Ford relaxation.
///
/// Each node only improves its vector through the vectors of its direct
/// neighbors, as a distributed distance-vector protocol would. Equal-cost
/// alternatives are broken toward the lower next-hop id.
#[derive(Debug, Clone, Default)]
pub struct DistanceVectorEngine {
    config: EngineConfig,
}

impl DistanceVectorEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rebuild both matrices from scratch and relax them to a fixed point.
    pub fn converge(&self, topology: &Topology) -> Result<RoutingTables, RoutingError> {
        let infinity = self.infinity_for(topology);
        let limit = self.pass_limit(topology);
        let mut tables = RoutingTables::reset(topology, infinity);

        loop {
            if tables.passes >= limit {
                return Err(RoutingError::ConvergenceLimit { passes: limit });
            }
            tables.passes += 1;
            if !tables.relax_pass(topology) {
                break;
            }
        }

        debug!(
            max_nodes = tables.max_nodes,
            infinity,
            passes = tables.passes,
            "routing tables converged"
        );
        Ok(tables)
    }

    /// The unreachable sentinel used for `topology`.
    pub fn infinity_for(&self, topology: &Topology) -> Cost {
        let derived = Cost::from(topology.max_nodes())
            .saturating_mul(topology.max_active_cost())
            .saturating_mul(2)
            .saturating_add(1);
        match self.config.infinity {
            Some(configured) if configured >= derived => configured,
            Some(configured) => {
                debug!(configured, derived, "configured infinity below path bound, raising");
                derived
            }
            None => derived,
        }
    }

    fn pass_limit(&self, topology: &Topology) -> usize {
        self.config.max_passes.unwrap_or_else(|| {
            let width = topology.max_nodes() as usize + 1;
            width.saturating_mul(width).max(MIN_PASS_LIMIT)
        })
    }
}
