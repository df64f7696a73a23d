use serde::Serialize;

use crate::engine::RoutingTables;
use crate::error::RoutingError;
use crate::types::{Cost, NodeId};

/// A forwarding path reconstructed from converged tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub source: NodeId,
    pub destination: NodeId,
    /// Total path cost.
    pub cost: Cost,
    /// Nodes that forward the message, starting at the source. The
    /// destination itself is not included.
    hops: Vec<NodeId>,
}

impl Route {
    pub fn hops(&self) -> &[NodeId] {
        &self.hops
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }
}

/// Result of tracing a message through the forwarding tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TraceOutcome {
    Delivered(Route),
    /// The tables hold no finite cost for the pair.
    Unreachable,
    /// A finite cost exists but the next-hop chain ends or cycles at `at`.
    Broken { at: NodeId },
}

impl TraceOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Delivered(route) => Some(route),
            _ => None,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

/// Follow next hops from `source` until `destination` is reached.
///
/// A chain that hits an undefined next hop, or runs longer than the node
/// count, is reported as [`TraceOutcome::Broken`] instead of looping.
pub fn trace(
    tables: &RoutingTables,
    source: NodeId,
    destination: NodeId,
) -> Result<TraceOutcome, RoutingError> {
    let Some(cost) = tables.distance(source, destination)? else {
        return Ok(TraceOutcome::Unreachable);
    };

    let limit = tables.max_nodes() as usize;
    let mut hops = Vec::new();
    let mut current = source;
    while current != destination {
        if hops.len() >= limit {
            return Ok(TraceOutcome::Broken { at: current });
        }
        hops.push(current);
        match tables.next_hop(current, destination)? {
            Some(next) => current = next,
            None => return Ok(TraceOutcome::Broken { at: current }),
        }
    }

    Ok(TraceOutcome::Delivered(Route {
        source,
        destination,
        cost,
        hops,
    }))
}
