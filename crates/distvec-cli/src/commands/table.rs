//! `distvec table` — Print converged forwarding tables for a topology.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use distvec_core::{report, DistanceVectorEngine, NodeId};

use super::load_topology;
use crate::config::DistvecConfig;

#[derive(Args, Debug)]
pub struct TableArgs {
    /// Topology file: `<node> <node> <cost>` per line.
    pub topology: PathBuf,

    /// Only print the table of this node.
    #[arg(short, long)]
    pub node: Option<u32>,
}

pub fn run(args: &TableArgs, config: &DistvecConfig) -> anyhow::Result<()> {
    let topology = load_topology(&args.topology)?;
    let tables = DistanceVectorEngine::new(config.engine.clone()).converge(&topology)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.node {
        Some(id) => {
            let table = tables.forwarding_table(NodeId::new(id)?)?;
            report::write_table(&mut out, &table)?;
        }
        None => {
            for table in tables.forwarding_tables() {
                report::write_table(&mut out, &table)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
