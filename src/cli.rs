use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Kanban and Scrum boards for your projects, stored in one local JSON file.
/// Storage defaults to ~/.wb/projects.json, or $WB_HOME, or --data-dir.
#[derive(Parser)]
#[command(name = "wb", version, about = "Workspace boards CLI")]
pub struct Cli {
    /// Directory holding projects.json and config.toml.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Project id to operate on. May be omitted when only one project exists.
    #[arg(long, short = 'p', global = true)]
    pub project: Option<String>,

    /// Log engine and store activity to stderr.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
