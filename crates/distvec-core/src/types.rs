use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// Cost of a link or of a whole path. Costs are non-negative integers.
pub type Cost = u64;

/// Raw cost value in a change record that withdraws the link.
pub const REMOVAL_SENTINEL: i64 = -999;

/// Identifier of a router in the simulated network.
///
/// Valid identifiers start at 1; 0 is reserved and never names a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a node identifier, rejecting the reserved id 0.
    pub fn new(id: u32) -> Result<Self, RoutingError> {
        if id == 0 {
            return Err(RoutingError::InvalidNodeId { id: 0 });
        }
        Ok(Self(id))
    }

    /// Create a node identifier from a raw signed value as found in input files.
    pub fn from_raw(raw: i64) -> Result<Self, RoutingError> {
        match u32::try_from(raw) {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(RoutingError::InvalidNodeId { id: raw }),
        }
    }

    /// The numeric identifier.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Row/column of this node in the dense matrices.
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Inverse of [`NodeId::index`]. Callers only pass indices `>= 1`.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index > 0, "index 0 is reserved");
        Self(index as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An undirected weighted link as it appears in topology input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
    pub cost: Cost,
}

impl Link {
    pub fn new(a: NodeId, b: NodeId, cost: Cost) -> Self {
        Self { a, b, cost }
    }
}

/// The new cost carried by a topology change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostUpdate {
    /// Overwrite the cost, inserting the link if it does not exist yet.
    Set(Cost),
    /// Withdraw the link. The adjacency entry is kept but disabled.
    Remove,
}

impl CostUpdate {
    /// Interpret a raw cost from a change record; [`REMOVAL_SENTINEL`] means removal.
    pub fn from_raw(a: NodeId, b: NodeId, raw: i64) -> Result<Self, RoutingError> {
        if raw == REMOVAL_SENTINEL {
            return Ok(Self::Remove);
        }
        Cost::try_from(raw)
            .map(Self::Set)
            .map_err(|_| RoutingError::NegativeCost { a, b, cost: raw })
    }
}

impl fmt::Display for CostUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(cost) => write!(f, "{cost}"),
            Self::Remove => f.write_str("remove"),
        }
    }
}

/// A single edge edit replayed against the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub a: NodeId,
    pub b: NodeId,
    pub update: CostUpdate,
}

impl Change {
    pub fn new(a: NodeId, b: NodeId, update: CostUpdate) -> Self {
        Self { a, b, update }
    }
}

/// A message to be forwarded from `src` to `dest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub src: NodeId,
    pub dest: NodeId,
    pub text: String,
}
