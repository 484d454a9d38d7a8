use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{generate_id, next_timestamp};
use crate::error::StoreError;

/// A member's submission to a contest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestApplication {
    pub id: String,

    /// Not checked against existing contests
    pub contest_id: String,
    pub user_id: String,

    /// Copied from the member profile at submission time
    pub applicant_name: String,
    pub applicant_email: String,

    pub project_name: String,
    pub project_description: String,
    pub tech_stack: String,

    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub demo_link: Option<String>,
    #[serde(default)]
    pub team_members: Option<String>,

    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContestApplication {
    pub fn from_new(new: NewApplication) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            contest_id: new.contest_id,
            user_id: new.user_id,
            applicant_name: new.applicant_name,
            applicant_email: new.applicant_email,
            project_name: new.project_name,
            project_description: new.project_description,
            tech_stack: new.tech_stack,
            github_link: non_empty(new.github_link),
            demo_link: non_empty(new.demo_link),
            team_members: non_empty(new.team_members),
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn matches(&self, user_id: &str, contest_id: &str) -> bool {
        self.user_id == user_id && self.contest_id == contest_id
    }

    /// Apply a member edit. An empty string clears the field.
    pub fn apply_edit(&mut self, edit: ApplicationEdit) {
        if let Some(link) = edit.github_link {
            self.github_link = non_empty(Some(link));
        }
        if let Some(link) = edit.demo_link {
            self.demo_link = non_empty(Some(link));
        }
        if let Some(members) = edit.team_members {
            self.team_members = non_empty(Some(members));
        }
        self.updated_at = next_timestamp(self.updated_at);
    }

    /// Record an admin decision. Only pending applications can be decided.
    pub fn review(&mut self, status: ApplicationStatus) -> crate::error::Result<()> {
        if !self.status.can_transition_to(status) {
            return Err(StoreError::InvalidStatusTransition {
                id: self.id.clone(),
                from: self.status.to_string(),
                to: status.to_string(),
            });
        }

        self.status = status;
        self.updated_at = next_timestamp(self.updated_at);
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fields a member submits on the application form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
    pub contest_id: String,
    pub user_id: String,
    #[serde(default)]
    pub applicant_name: String,
    #[serde(default)]
    pub applicant_email: String,
    pub project_name: String,
    #[serde(default)]
    pub project_description: String,
    #[serde(default)]
    pub tech_stack: String,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub demo_link: Option<String>,
    #[serde(default)]
    pub team_members: Option<String>,
}

/// Fields a member may change after submitting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationEdit {
    pub github_link: Option<String>,
    pub demo_link: Option<String>,
    pub team_members: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// `Pending -> {Approved, Rejected}`; both outcomes are terminal
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (ApplicationStatus::Pending, ApplicationStatus::Approved)
                | (ApplicationStatus::Pending, ApplicationStatus::Rejected)
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

/// Accepts any casing, matching the command-line parser
impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for ApplicationStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "approved" => Ok(ApplicationStatus::Approved),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(StoreError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}
