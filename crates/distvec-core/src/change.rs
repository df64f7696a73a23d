use serde::Serialize;
use tracing::debug;

use crate::error::RoutingError;
use crate::topology::{Adjacency, Topology};
use crate::types::{Change, CostUpdate, NodeId};

/// What a single change did to the topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeEffect {
    /// An existing link got a new cost (re-enabling it if it was withdrawn).
    Updated,
    /// A new link was added between two previously unconnected nodes.
    Inserted,
    /// An existing link was withdrawn.
    Disabled,
    /// Removal of a link that never existed; nothing changed.
    Unchanged,
}

impl Topology {
    /// Apply one edge edit in place, keeping both adjacency lists in step.
    ///
    /// The caller must reconverge the routing tables afterwards.
    pub fn apply_change(&mut self, change: &Change) -> Result<ChangeEffect, RoutingError> {
        self.check(change.a)?;
        self.check(change.b)?;
        if change.a == change.b {
            return Err(RoutingError::SelfLoop { node: change.a });
        }
        if let CostUpdate::Set(cost) = change.update {
            self.check_cost(change.a, change.b, cost)?;
        }

        let forward = self.apply_half(change.a, change.b, change.update);
        let backward = self.apply_half(change.b, change.a, change.update);
        debug_assert_eq!(forward, backward, "adjacency lists out of sync");

        debug!(
            a = %change.a,
            b = %change.b,
            update = %change.update,
            effect = ?forward,
            "applied topology change"
        );
        Ok(forward)
    }

    fn apply_half(&mut self, from: NodeId, to: NodeId, update: CostUpdate) -> ChangeEffect {
        let list = &mut self.adjacency[from.index()];
        if let Some(adj) = list.iter_mut().find(|adj| adj.neighbor == to) {
            return match update {
                CostUpdate::Remove => {
                    adj.cost = None;
                    ChangeEffect::Disabled
                }
                CostUpdate::Set(cost) => {
                    adj.cost = Some(cost);
                    ChangeEffect::Updated
                }
            };
        }

        match update {
            CostUpdate::Set(cost) => {
                list.push(Adjacency {
                    neighbor: to,
                    cost: Some(cost),
                });
                ChangeEffect::Inserted
            }
            CostUpdate::Remove => ChangeEffect::Unchanged,
        }
    }
}
