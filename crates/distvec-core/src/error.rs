use crate::types::{Cost, NodeId};

/// Errors that can occur while building, mutating or converging a topology.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("invalid node id {id}: node ids start at 1")]
    InvalidNodeId { id: i64 },

    #[error("node {node} is outside the topology (max node id {max_nodes})")]
    UnknownNode { node: NodeId, max_nodes: u32 },

    #[error("self-loop on node {node} is not a valid link")]
    SelfLoop { node: NodeId },

    #[error("negative cost {cost} on link {a}-{b}")]
    NegativeCost { a: NodeId, b: NodeId, cost: i64 },

    #[error("{source_name}:{line}: {reason}")]
    Parse {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error("cost {cost} on link {a}-{b} exceeds the limit {limit} for this topology")]
    CostTooLarge {
        a: NodeId,
        b: NodeId,
        cost: Cost,
        limit: Cost,
    },

    #[error("topology contains no links")]
    EmptyTopology,

    #[error("relaxation did not reach a fixed point within {passes} passes")]
    ConvergenceLimit { passes: usize },
}
