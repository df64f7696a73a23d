pub mod init;
pub mod route;
pub mod simulate;
pub mod table;

use std::path::Path;

use anyhow::Context;
use distvec_core::{input, Change, Message, Topology};

/// Read and parse a topology file. Any failure here is fatal.
pub fn load_topology(path: &Path) -> anyhow::Result<Topology> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not open topology file {}", path.display()))?;
    let links = input::parse_topology(&text, &path.display().to_string())?;
    let topology = Topology::build(links)
        .with_context(|| format!("invalid topology in {}", path.display()))?;
    Ok(topology)
}

pub fn load_messages(path: &Path) -> anyhow::Result<Vec<Message>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not open message file {}", path.display()))?;
    Ok(input::parse_messages(&text, &path.display().to_string())?)
}

pub fn load_changes(path: &Path) -> anyhow::Result<Vec<Change>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not open changes file {}", path.display()))?;
    Ok(input::parse_changes(&text, &path.display().to_string())?)
}
