use serde::Serialize;
use tracing::{info, info_span, warn};

use crate::change::ChangeEffect;
use crate::engine::{DistanceVectorEngine, EngineConfig, RoutingTables};
use crate::error::RoutingError;
use crate::route::{trace, TraceOutcome};
use crate::table::ForwardingTable;
use crate::topology::Topology;
use crate::types::{Change, Message};

/// A queued message and how it fared against one set of tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    pub message: Message,
    pub outcome: TraceOutcome,
}

/// Snapshot of the network after one convergence.
///
/// Epoch 0 is the initial convergence; epoch `k` follows the `k`-th change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Epoch {
    pub index: usize,
    /// The change that triggered this epoch, `None` for the initial one.
    pub change: Option<Change>,
    /// What the change did, `None` for the initial epoch or a rejected change.
    pub effect: Option<ChangeEffect>,
    /// Why the change was skipped, if it was.
    pub rejected: Option<String>,
    pub tables: Vec<ForwardingTable>,
    pub deliveries: Vec<Delivery>,
}

/// Centralized simulation of a distance-vector network.
///
/// Owns the topology, the current routing tables and the queued messages.
/// Changes are applied strictly one at a time, each followed by a full
/// reconvergence.
pub struct Simulation {
    topology: Topology,
    messages: Vec<Message>,
    engine: DistanceVectorEngine,
    tables: RoutingTables,
    epoch: usize,
}

impl Simulation {
    /// Build the simulation and perform the initial convergence.
    pub fn new(
        topology: Topology,
        messages: Vec<Message>,
        config: EngineConfig,
    ) -> Result<Self, RoutingError> {
        let engine = DistanceVectorEngine::new(config);
        let tables = engine.converge(&topology)?;
        info!(
            max_nodes = topology.max_nodes(),
            messages = messages.len(),
            passes = tables.passes(),
            "initial convergence complete"
        );
        Ok(Self {
            topology,
            messages,
            engine,
            tables,
            epoch: 0,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn tables(&self) -> &RoutingTables {
        &self.tables
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Snapshot of the current epoch without changing anything.
    pub fn snapshot(&self) -> Epoch {
        self.epoch_record(None, None, None)
    }

    /// Apply one change, reconverge and answer every queued message.
    ///
    /// A change naming a node outside the topology, a self-loop, or a cost
    /// above [`Topology::cost_limit`] is skipped with a warning; the epoch is
    /// still produced against the unchanged tables. If reconvergence fails
    /// the error is returned and the simulation keeps its previous topology,
    /// tables and epoch.
    pub fn step(&mut self, change: Change) -> Result<Epoch, RoutingError> {
        let index = self.epoch + 1;
        let span = info_span!("epoch", index);
        let _guard = span.enter();

        let mut topology = self.topology.clone();
        match topology.apply_change(&change) {
            Ok(effect) => {
                let tables = self.engine.converge(&topology)?;
                info!(
                    a = %change.a,
                    b = %change.b,
                    update = %change.update,
                    effect = ?effect,
                    passes = tables.passes(),
                    "reconverged after change"
                );
                self.topology = topology;
                self.tables = tables;
                self.epoch = index;
                Ok(self.epoch_record(Some(change), Some(effect), None))
            }
            Err(err) => {
                warn!(a = %change.a, b = %change.b, error = %err, "skipping change");
                self.epoch = index;
                Ok(self.epoch_record(Some(change), None, Some(err.to_string())))
            }
        }
    }

    /// Replay `changes` in order. The returned epochs start with the current
    /// snapshot followed by one epoch per change.
    pub fn run<I>(&mut self, changes: I) -> Result<Vec<Epoch>, RoutingError>
    where
        I: IntoIterator<Item = Change>,
    {
        let mut epochs = vec![self.snapshot()];
        for change in changes {
            epochs.push(self.step(change)?);
        }
        Ok(epochs)
    }

    fn epoch_record(
        &self,
        change: Option<Change>,
        effect: Option<ChangeEffect>,
        rejected: Option<String>,
    ) -> Epoch {
        Epoch {
            index: self.epoch,
            change,
            effect,
            rejected,
            tables: self.tables.forwarding_tables(),
            deliveries: self.deliver(),
        }
    }

    fn deliver(&self) -> Vec<Delivery> {
        self.messages
            .iter()
            .map(|message| {
                let outcome = trace(&self.tables, message.src, message.dest).unwrap_or_else(|err| {
                    warn!(src = %message.src, dest = %message.dest, error = %err, "message names unknown node");
                    TraceOutcome::Unreachable
                });
                Delivery {
                    message: message.clone(),
                    outcome,
                }
            })
            .collect()
    }
}
