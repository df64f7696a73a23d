//! `distvec simulate` — Converge, answer messages, and replay topology changes.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use distvec_core::{report, Epoch, Simulation};

use super::{load_changes, load_messages, load_topology};
use crate::config::{DistvecConfig, OutputFormat};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Topology file: `<node> <node> <cost>` per line.
    pub topology: PathBuf,

    /// Message file: `<src> <dest> <text>` per line.
    pub messages: PathBuf,

    /// Changes file: `<node> <node> <cost>` per line, `-999` removes the link.
    pub changes: PathBuf,

    /// Report file; `-` writes to stdout. Overrides the config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format. Overrides the config.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

pub fn run(args: &SimulateArgs, mut config: DistvecConfig) -> anyhow::Result<()> {
    if let Some(ref output) = args.output {
        config.output.path = output.clone();
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    let topology = load_topology(&args.topology)?;
    let messages = load_messages(&args.messages)?;
    let changes = load_changes(&args.changes)?;

    tracing::info!(
        topology = %args.topology.display(),
        messages = messages.len(),
        changes = changes.len(),
        "starting simulation"
    );

    let mut simulation = Simulation::new(topology, messages, config.engine.clone())?;
    let epochs = simulation.run(changes)?;

    if config.writes_to_stdout() {
        let stdout = io::stdout();
        write_report(&mut stdout.lock(), &epochs, config.output.format)?;
    } else {
        let path = &config.output.path;
        let file = File::create(path)
            .with_context(|| format!("could not create output file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_report(&mut writer, &epochs, config.output.format)?;
        writer.flush()?;
        tracing::info!(path = %path.display(), epochs = epochs.len(), "wrote report");
    }
    Ok(())
}

fn write_report<W: Write>(out: &mut W, epochs: &[Epoch], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => report::write_epochs(out, epochs)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, epochs)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
