//! Command-line interface.

pub mod commands;
pub mod output;
pub mod time;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::errors::{DeleteError, LoadError, SaveError};

pub use commands::drill::DrillArgs;
pub use commands::session::SessionArgs;

#[derive(Parser, Debug)]
#[command(name = "noteprompter")]
#[command(about = "Drill library and practice log for the note prompter", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of .noteprompter/
    #[arg(short, long, global = true, env = "NOTEPROMPTER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage saved drills
    Drill(DrillArgs),
    /// Record practice sessions and report practice time
    Session(SessionArgs),
}

/// Print `err` to stderr (as JSON when requested) and exit.
///
/// Missing drills exit with status 2, everything else with 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let not_found = err.chain().any(|cause| {
        cause.downcast_ref::<LoadError>().is_some_and(LoadError::is_not_found)
            || matches!(cause.downcast_ref::<SaveError>(), Some(SaveError::NotFound(_)))
            || matches!(cause.downcast_ref::<DeleteError>(), Some(DeleteError::NotFound(_)))
    });

    if json_mode {
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }

    std::process::exit(if not_found { 2 } else { 1 });
}
