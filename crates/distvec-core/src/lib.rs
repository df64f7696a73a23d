//! Distvec Core — distance-vector routing over a static node set.
//!
//! This crate provides:
//! - [`Topology`] — symmetric adjacency lists over node ids `1..=max_nodes`,
//!   mutated in place by [`Topology::apply_change`].
//! - [`DistanceVectorEngine`] — neighbor-restricted Bellman-Ford relaxation
//!   producing dense distance and next-hop [`RoutingTables`].
//! - [`trace`] — reconstructs forwarding paths from converged tables.
//! - [`Simulation`] — replays topology changes in order and re-answers the
//!   queued messages after every reconvergence.
//! - [`input`] and [`report`] — the line-oriented text formats.

pub mod change;
pub mod engine;
pub mod error;
pub mod input;
pub mod report;
pub mod route;
pub mod simulation;
pub mod table;
pub mod topology;
pub mod types;

// Re-exports for convenience.
pub use change::ChangeEffect;
pub use engine::{DistanceVectorEngine, EngineConfig, RoutingTables};
pub use error::RoutingError;
pub use route::{trace, Route, TraceOutcome};
pub use simulation::{Delivery, Epoch, Simulation};
pub use table::{ForwardingEntry, ForwardingTable};
pub use topology::{Adjacency, Topology};
pub use types::{Change, Cost, CostUpdate, Link, Message, NodeId, REMOVAL_SENTINEL};
