pub mod application;
pub mod contest;

pub use application::ApplicationCommand;
pub use contest::ContestCommand;

use clap::Subcommand;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::error::Result;
use crate::state::{QueryResult, RecordStore};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage contests
    #[command(subcommand)]
    Contest(ContestCommand),

    /// Submit and manage contest applications
    #[command(subcommand)]
    Application(ApplicationCommand),

    /// Dump both collections as one JSON document
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Delete every contest and application
    Reset {
        /// Required; the wipe cannot be undone
        #[arg(long)]
        yes: bool,
    },

    /// Serve the JSON API for the club dashboard
    Serve {
        /// Overrides HTTP_PORT
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
}

/// Rendered `{ data, error }` envelope for stdout
#[derive(Debug)]
pub struct CommandOutput {
    pub body: String,
    pub success: bool,
}

impl CommandOutput {
    pub fn from_result<T: Serialize>(result: Result<T>) -> anyhow::Result<Self> {
        let envelope = QueryResult::from(result);
        let success = envelope.is_ok();
        Ok(Self {
            body: serde_json::to_string_pretty(&envelope)?,
            success,
        })
    }
}

/// Run any command other than `serve`
pub fn run(store: &mut RecordStore, command: Command) -> anyhow::Result<CommandOutput> {
    match command {
        Command::Contest(cmd) => contest::run(store, cmd),
        Command::Application(cmd) => application::run(store, cmd),
        Command::Export { output } => export(store, output),
        Command::Reset { yes } => reset(store, yes),
        Command::Serve { .. } => Err(anyhow::anyhow!("serve is handled by the server runtime")),
    }
}

fn export(store: &RecordStore, output: Option<PathBuf>) -> anyhow::Result<CommandOutput> {
    let Some(path) = output else {
        return CommandOutput::from_result(store.snapshot());
    };

    match store.export() {
        Ok(bytes) => {
            std::fs::write(&path, &bytes)?;
            info!("Exported {} bytes to {}", bytes.len(), path.display());
            CommandOutput::from_result(Ok(path.display().to_string()))
        }
        Err(e) => CommandOutput::from_result::<()>(Err(e)),
    }
}

fn reset(store: &mut RecordStore, confirmed: bool) -> anyhow::Result<CommandOutput> {
    if !confirmed {
        anyhow::bail!("reset deletes all records; pass --yes to confirm");
    }
    CommandOutput::from_result(store.clear())
}
