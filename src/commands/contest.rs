use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::info;

use super::CommandOutput;
use crate::models::{ContestEdit, ContestStatus, NewContest};
use crate::state::RecordStore;

/// Contest management for club admins
#[derive(Subcommand, Debug)]
pub enum ContestCommand {
    /// Create a contest
    Create(CreateContestArgs),

    /// List contests, newest first
    List {
        /// Only contests with status Open
        #[arg(long)]
        open: bool,
    },

    /// Show a single contest
    Show { id: String },

    /// Change descriptive fields of a contest
    Edit(EditContestArgs),

    /// Set a contest's status (Draft, Open, Closed)
    Status { id: String, status: ContestStatus },

    /// Delete a contest and all of its applications
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct CreateContestArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long, default_value = "")]
    pub prize_pool: String,
    #[arg(long, default_value = "")]
    pub duration: String,
    #[arg(long, default_value_t = 1)]
    pub max_team_size: u32,
    /// ISO date (2025-10-01) or RFC 3339 date-time
    #[arg(long, default_value = "")]
    pub deadline: String,
    #[arg(long, default_value = "Draft")]
    pub status: ContestStatus,
    #[arg(long, default_value = "")]
    pub created_by: String,
}

impl From<CreateContestArgs> for NewContest {
    fn from(args: CreateContestArgs) -> Self {
        NewContest {
            title: args.title,
            description: args.description,
            category: args.category,
            prize_pool: args.prize_pool,
            duration: args.duration,
            max_team_size: args.max_team_size,
            deadline: args.deadline,
            status: args.status,
            created_by: args.created_by,
        }
    }
}

#[derive(Args, Debug)]
pub struct EditContestArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub prize_pool: Option<String>,
    #[arg(long)]
    pub duration: Option<String>,
    #[arg(long)]
    pub max_team_size: Option<u32>,
    #[arg(long)]
    pub deadline: Option<String>,
}

impl EditContestArgs {
    fn into_parts(self) -> (String, ContestEdit) {
        let edit = ContestEdit {
            title: self.title,
            description: self.description,
            category: self.category,
            prize_pool: self.prize_pool,
            duration: self.duration,
            max_team_size: self.max_team_size,
            deadline: self.deadline,
        };
        (self.id, edit)
    }
}

/// Response for a delete, mirroring what the dashboard receives
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}

pub fn run(store: &mut RecordStore, command: ContestCommand) -> anyhow::Result<CommandOutput> {
    let output = match command {
        ContestCommand::Create(args) => {
            CommandOutput::from_result(store.create_contest(args.into()))?
        }
        ContestCommand::List { open } => {
            let contests = if open {
                store.list_open_contests()
            } else {
                store.list_contests()
            };
            if let Ok(list) = &contests {
                info!("Listing {} contest(s)", list.len());
            }
            CommandOutput::from_result(contests)?
        }
        ContestCommand::Show { id } => CommandOutput::from_result(store.get_contest(&id))?,
        ContestCommand::Edit(args) => {
            let (id, edit) = args.into_parts();
            CommandOutput::from_result(store.update_contest(&id, edit))?
        }
        ContestCommand::Status { id, status } => {
            CommandOutput::from_result(store.update_contest_status(&id, status))?
        }
        ContestCommand::Delete { id } => {
            CommandOutput::from_result(store.delete_contest(&id).map(|id| Deleted { id }))?
        }
    };

    Ok(output)
}
