use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{generate_id, next_timestamp};
use crate::error::StoreError;

/// A club-run competition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,

    /// Display text, e.g. "₹10,000 + swag"
    pub prize_pool: String,

    /// Display text, e.g. "48 hours"
    pub duration: String,

    /// Advisory; applications are not checked against it
    pub max_team_size: u32,

    /// ISO date or date-time; advisory
    pub deadline: String,

    pub status: ContestStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contest {
    /// Build a stored contest from submitted fields
    pub fn from_new(new: NewContest) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            title: new.title,
            description: new.description,
            category: new.category,
            prize_pool: new.prize_pool,
            duration: new.duration,
            max_team_size: new.max_team_size,
            deadline: new.deadline,
            status: new.status,
            created_by: new.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: ContestStatus) {
        self.status = status;
        self.touch();
    }

    /// Apply an admin edit; untouched fields stay as they are
    pub fn apply_edit(&mut self, edit: ContestEdit) {
        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(category) = edit.category {
            self.category = category;
        }
        if let Some(prize_pool) = edit.prize_pool {
            self.prize_pool = prize_pool;
        }
        if let Some(duration) = edit.duration {
            self.duration = duration;
        }
        if let Some(max_team_size) = edit.max_team_size {
            self.max_team_size = max_team_size;
        }
        if let Some(deadline) = edit.deadline {
            self.deadline = deadline;
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = next_timestamp(self.updated_at);
    }

    /// Parse the deadline. A bare date counts until the end of that day (UTC).
    pub fn deadline_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.deadline) {
            return Some(dt.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(&self.deadline, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .map(|dt| dt.and_utc())
    }

    /// Unparseable deadlines are never considered past
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        self.deadline_at().map(|d| now > d).unwrap_or(false)
    }

    /// Whether the dashboard should offer the application form
    pub fn accepts_applications(&self, now: DateTime<Utc>) -> bool {
        self.status == ContestStatus::Open && !self.is_past_deadline(now)
    }
}

/// Fields an admin supplies when creating a contest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub prize_pool: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default = "default_team_size")]
    pub max_team_size: u32,
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub status: ContestStatus,
    #[serde(default)]
    pub created_by: String,
}

fn default_team_size() -> u32 {
    1
}

/// Partial update of a contest's descriptive fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContestEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub prize_pool: Option<String>,
    pub duration: Option<String>,
    pub max_team_size: Option<u32>,
    pub deadline: Option<String>,
}

/// Contest lifecycle. Any status may follow any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ContestStatus {
    #[default]
    Draft,
    Open,
    Closed,
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContestStatus::Draft => "Draft",
            ContestStatus::Open => "Open",
            ContestStatus::Closed => "Closed",
        };
        f.write_str(s)
    }
}

/// Accepts any casing, matching the command-line parser
impl<'de> Deserialize<'de> for ContestStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for ContestStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(ContestStatus::Draft),
            "open" => Ok(ContestStatus::Open),
            "closed" => Ok(ContestStatus::Closed),
            _ => Err(StoreError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}
