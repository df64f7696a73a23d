//! `distvec init` — Write a default configuration file.

use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

const DEFAULT_CONFIG: &str = r#"# Distvec Configuration

[engine]
# Cost treated as unreachable. Derived from the topology when unset
# (2 * max_node_id * max_link_cost + 1); smaller values are raised to that bound.
# infinity = 1000000
# Relaxation passes allowed before a run is aborted.
# max_passes = 10000

[output]
# Report file; "-" writes to stdout.
path = "output.txt"
# "text" or "json"
format = "text"

[logging]
level = "info"
format = "text"
"#;

/// Write the default config to `config` (the global `--config` path),
/// resolved against `args.dir` when relative.
pub fn run(args: &InitArgs, config: &Path) -> anyhow::Result<()> {
    let config_path = args.dir.join(config);

    if config_path.exists() {
        anyhow::bail!("configuration file already exists at {}", config_path.display());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    println!("Initialized distvec configuration at {}", config_path.display());
    println!("Run 'distvec simulate <topology> <messages> <changes>' to start a simulation.");
    Ok(())
}
