use std::path::PathBuf;

use clap::Parser;

/// A terminal playlist player.
#[derive(Debug, Parser)]
#[command(name = "spindle", version, about)]
pub struct Cli {
    /// Directory to scan when the config lists no tracks.
    pub dir: Option<PathBuf>,

    /// Config file to use instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    pub dump_config: bool,
}
