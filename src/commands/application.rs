use clap::{Args, Subcommand};

use super::CommandOutput;
use crate::models::{ApplicationEdit, ApplicationStatus, NewApplication};
use crate::state::RecordStore;

/// Member applications to contests
#[derive(Subcommand, Debug)]
pub enum ApplicationCommand {
    /// Submit an application (one per user and contest)
    Submit(SubmitArgs),

    /// List applications, optionally filtered
    List {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        contest_id: Option<String>,
    },

    /// Look up a user's application to a contest
    Find { user_id: String, contest_id: String },

    /// Update links or team members on your own application
    Edit(EditArgs),

    /// Approve or reject a pending application
    Review {
        id: String,
        status: ApplicationStatus,
    },
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub contest_id: String,
    #[arg(long)]
    pub user_id: String,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long)]
    pub project_name: String,
    #[arg(long, default_value = "")]
    pub project_description: String,
    #[arg(long, default_value = "")]
    pub tech_stack: String,
    #[arg(long)]
    pub github_link: Option<String>,
    #[arg(long)]
    pub demo_link: Option<String>,
    #[arg(long)]
    pub team_members: Option<String>,
}

impl From<SubmitArgs> for NewApplication {
    fn from(args: SubmitArgs) -> Self {
        NewApplication {
            contest_id: args.contest_id,
            user_id: args.user_id,
            applicant_name: args.name,
            applicant_email: args.email,
            project_name: args.project_name,
            project_description: args.project_description,
            tech_stack: args.tech_stack,
            github_link: args.github_link,
            demo_link: args.demo_link,
            team_members: args.team_members,
        }
    }
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,
    /// The member making the change; must own the application
    #[arg(long)]
    pub user_id: String,
    /// Pass an empty string to clear
    #[arg(long)]
    pub github_link: Option<String>,
    #[arg(long)]
    pub demo_link: Option<String>,
    #[arg(long)]
    pub team_members: Option<String>,
}

pub fn run(store: &mut RecordStore, command: ApplicationCommand) -> anyhow::Result<CommandOutput> {
    let output = match command {
        ApplicationCommand::Submit(args) => {
            CommandOutput::from_result(store.create_application(args.into()))?
        }
        ApplicationCommand::List {
            user_id,
            contest_id,
        } => CommandOutput::from_result(
            store.filter_applications(user_id.as_deref(), contest_id.as_deref()),
        )?,
        ApplicationCommand::Find {
            user_id,
            contest_id,
        } => CommandOutput::from_result(store.find_existing_application(&user_id, &contest_id))?,
        ApplicationCommand::Edit(args) => {
            let edit = ApplicationEdit {
                github_link: args.github_link,
                demo_link: args.demo_link,
                team_members: args.team_members,
            };
            CommandOutput::from_result(store.edit_application(&args.id, &args.user_id, edit))?
        }
        ApplicationCommand::Review { id, status } => {
            CommandOutput::from_result(store.review_application(&id, status))?
        }
    };

    Ok(output)
}
