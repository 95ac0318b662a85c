//! # wb - Workspace Boards CLI
//!
//! Kanban and Scrum boards for local projects, driven from the command line or
//! an interactive terminal board.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a Kanban project from the "software" template
//! wb project new "Website Redesign" --template software
//!
//! # Add a task to a column and move it along
//! wb task add <column-id> "Draft landing page copy" --assignee Ana
//! wb task move <task-id> <from-column> <to-column>
//!
//! # Scrum: backlog, sprints, points
//! wb project new "Mobile App" --kind scrum
//! wb -p mobile_app backlog "Login screen"
//! wb -p mobile_app sprint new
//! wb -p mobile_app points <task-id> 5
//!
//! # Interactive board
//! wb ui
//! ```
//!
//! Data lives in `~/.wb/projects.json` (override with `$WB_HOME` or
//! `--data-dir`); every project is kept in that single document, which is
//! rewritten on each change. Settings are read from `config.toml` in the
//! same directory.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use workspace_boards::config::{resolve_data_dir, Config};
use workspace_boards::store::JsonProjectStore;

pub mod cli;
pub mod cmd;
pub mod tui {
    pub mod board;
    pub mod colors;
    pub mod input;
    pub mod run;
}

use cli::Cli;
use cmd::{run_command, Commands, Session};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, matches!(cli.command, Commands::Ui));

    let data_dir = resolve_data_dir(cli.data_dir.clone());
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("Failed to create data directory {}: {}", data_dir.display(), e);
        std::process::exit(1);
    }

    let config = match Config::load(&data_dir.join("config.toml")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let session = Session {
        store: JsonProjectStore::in_dir(&data_dir),
        config,
        project: cli.project,
    };

    if let Err(e) = run_command(&session, cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `WB_LOG` (falling back to `RUST_LOG`, then `warn`).
/// The board view owns the terminal, so nothing is logged while it runs.
fn init_tracing(verbose: bool, interactive: bool) {
    if interactive {
        return;
    }
    let filter = if verbose {
        EnvFilter::new("workspace_boards=debug,wb=debug")
    } else {
        EnvFilter::try_from_env("WB_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
