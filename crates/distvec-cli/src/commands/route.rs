//! `distvec route` — Trace the forwarding path between two nodes.

use std::path::PathBuf;

use clap::Args;
use distvec_core::{trace, DistanceVectorEngine, NodeId, TraceOutcome};

use super::load_topology;
use crate::config::DistvecConfig;

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Topology file: `<node> <node> <cost>` per line.
    pub topology: PathBuf,

    /// Source node id.
    pub src: u32,

    /// Destination node id.
    pub dest: u32,
}

pub fn run(args: &RouteArgs, config: &DistvecConfig) -> anyhow::Result<()> {
    let topology = load_topology(&args.topology)?;
    let tables = DistanceVectorEngine::new(config.engine.clone()).converge(&topology)?;
    let src = NodeId::new(args.src)?;
    let dest = NodeId::new(args.dest)?;

    println!("{}", describe(&trace(&tables, src, dest)?, src, dest));
    Ok(())
}

fn describe(outcome: &TraceOutcome, src: NodeId, dest: NodeId) -> String {
    match outcome {
        TraceOutcome::Delivered(route) => {
            let path: Vec<String> = route
                .hops()
                .iter()
                .chain(std::iter::once(&dest))
                .map(|hop| hop.to_string())
                .collect();
            format!("{src} -> {dest}: cost {} via {}", route.cost, path.join(" -> "))
        }
        TraceOutcome::Unreachable => format!("{src} -> {dest}: unreachable"),
        TraceOutcome::Broken { at } => {
            format!("{src} -> {dest}: forwarding tables inconsistent at node {at}")
        }
    }
}
