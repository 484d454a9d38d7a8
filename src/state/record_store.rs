use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::models::{
    ApplicationEdit, ApplicationStatus, Contest, ContestApplication, ContestEdit, ContestStatus,
    NewApplication, NewContest,
};
use crate::storage::StorageBackend;

/// Storage keys for the two collections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionKeys {
    pub contests: String,
    pub applications: String,
}

impl Default for CollectionKeys {
    fn default() -> Self {
        Self {
            contests: "contests".to_string(),
            applications: "applications".to_string(),
        }
    }
}

/// Full dump of both collections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub contests: Vec<Contest>,
    pub applications: Vec<ContestApplication>,
}

/// Contests and applications kept as whole JSON arrays in a storage backend.
///
/// Every mutation reads the full collection, changes it in memory and writes
/// the full collection back. New records are prepended so lists come back
/// newest first; updated records keep their position.
pub struct RecordStore {
    backend: Box<dyn StorageBackend>,
    keys: CollectionKeys,
}

impl RecordStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self::with_keys(backend, CollectionKeys::default())
    }

    pub fn with_keys(backend: Box<dyn StorageBackend>, keys: CollectionKeys) -> Self {
        info!(
            "Record store using {} (contests='{}', applications='{}')",
            backend.describe(),
            keys.contests,
            keys.applications
        );
        Self { backend, keys }
    }

    /// Absent key reads as empty; unparseable content is an error
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(content) = self.backend.get_item(key)? else {
            return Ok(Vec::new());
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            warn!("Collection '{}' could not be parsed: {}", key, e);
            StoreError::CorruptCollection {
                key: key.to_string(),
                source: e,
            }
        })
    }

    fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let content = serde_json::to_string(records)?;
        self.backend.set_item(key, &content)
    }

    // ========== Contests ==========

    pub fn create_contest(&mut self, new: NewContest) -> Result<Contest> {
        let mut contests: Vec<Contest> = self.read_collection(&self.keys.contests)?;
        let contest = Contest::from_new(new);

        contests.insert(0, contest.clone());
        self.write_collection(&self.keys.contests, &contests)?;

        info!("Created contest '{}' ({})", contest.title, contest.id);
        Ok(contest)
    }

    pub fn list_contests(&self) -> Result<Vec<Contest>> {
        self.read_collection(&self.keys.contests)
    }

    pub fn list_open_contests(&self) -> Result<Vec<Contest>> {
        Ok(self
            .list_contests()?
            .into_iter()
            .filter(|c| c.status == ContestStatus::Open)
            .collect())
    }

    pub fn get_contest(&self, contest_id: &str) -> Result<Contest> {
        self.list_contests()?
            .into_iter()
            .find(|c| c.id == contest_id)
            .ok_or_else(|| StoreError::ContestNotFound {
                id: contest_id.to_string(),
            })
    }

    /// Remove a contest and every application pointing at it.
    ///
    /// The two collections are written separately. Deleting an unknown id
    /// succeeds and still sweeps applications that reference it.
    pub fn delete_contest(&mut self, contest_id: &str) -> Result<String> {
        let mut contests: Vec<Contest> = self.read_collection(&self.keys.contests)?;
        let before = contests.len();
        contests.retain(|c| c.id != contest_id);

        if contests.len() != before {
            self.write_collection(&self.keys.contests, &contests)?;
            info!("Deleted contest {}", contest_id);
        } else {
            debug!("Delete of unknown contest {} is a no-op", contest_id);
        }

        let mut applications: Vec<ContestApplication> =
            self.read_collection(&self.keys.applications)?;
        let before = applications.len();
        applications.retain(|a| a.contest_id != contest_id);

        let removed = before - applications.len();
        if removed > 0 {
            self.write_collection(&self.keys.applications, &applications)?;
            info!(
                "Removed {} application(s) for deleted contest {}",
                removed, contest_id
            );
        }

        Ok(contest_id.to_string())
    }

    pub fn update_contest_status(
        &mut self,
        contest_id: &str,
        status: ContestStatus,
    ) -> Result<Contest> {
        let updated = self.modify_contest(contest_id, |contest| contest.set_status(status))?;
        info!("Contest {} is now {}", contest_id, status);
        Ok(updated)
    }

    pub fn update_contest(&mut self, contest_id: &str, edit: ContestEdit) -> Result<Contest> {
        let updated = self.modify_contest(contest_id, |contest| contest.apply_edit(edit))?;
        info!("Edited contest {}", contest_id);
        Ok(updated)
    }

    fn modify_contest<F>(&mut self, contest_id: &str, change: F) -> Result<Contest>
    where
        F: FnOnce(&mut Contest),
    {
        let mut contests: Vec<Contest> = self.read_collection(&self.keys.contests)?;
        let contest = contests
            .iter_mut()
            .find(|c| c.id == contest_id)
            .ok_or_else(|| StoreError::ContestNotFound {
                id: contest_id.to_string(),
            })?;

        change(contest);
        let updated = contest.clone();

        self.write_collection(&self.keys.contests, &contests)?;
        Ok(updated)
    }

    // ========== Applications ==========

    /// Insert a new pending application, rejecting a second one for the same
    /// user and contest. The contest id is not checked.
    pub fn create_application(&mut self, new: NewApplication) -> Result<ContestApplication> {
        let mut applications: Vec<ContestApplication> =
            self.read_collection(&self.keys.applications)?;

        if applications
            .iter()
            .any(|a| a.matches(&new.user_id, &new.contest_id))
        {
            warn!(
                "Rejected duplicate application from {} for contest {}",
                new.user_id, new.contest_id
            );
            return Err(StoreError::DuplicateApplication {
                user_id: new.user_id,
                contest_id: new.contest_id,
            });
        }

        let application = ContestApplication::from_new(new);
        applications.insert(0, application.clone());
        self.write_collection(&self.keys.applications, &applications)?;

        info!(
            "User {} applied to contest {} with '{}' ({})",
            application.user_id, application.contest_id, application.project_name, application.id
        );
        Ok(application)
    }

    pub fn list_applications(&self) -> Result<Vec<ContestApplication>> {
        self.read_collection(&self.keys.applications)
    }

    pub fn list_applications_for_user(&self, user_id: &str) -> Result<Vec<ContestApplication>> {
        Ok(self
            .list_applications()?
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect())
    }

    pub fn list_applications_for_contest(
        &self,
        contest_id: &str,
    ) -> Result<Vec<ContestApplication>> {
        Ok(self
            .list_applications()?
            .into_iter()
            .filter(|a| a.contest_id == contest_id)
            .collect())
    }

    /// Dispatch to the per-user or per-contest listing. Both filters
    /// together match at most the one application the pair may have.
    pub fn filter_applications(
        &self,
        user_id: Option<&str>,
        contest_id: Option<&str>,
    ) -> Result<Vec<ContestApplication>> {
        match (user_id, contest_id) {
            (Some(user_id), None) => self.list_applications_for_user(user_id),
            (None, Some(contest_id)) => self.list_applications_for_contest(contest_id),
            (Some(user_id), Some(contest_id)) => Ok(self
                .find_existing_application(user_id, contest_id)?
                .into_iter()
                .collect()),
            (None, None) => self.list_applications(),
        }
    }

    pub fn find_existing_application(
        &self,
        user_id: &str,
        contest_id: &str,
    ) -> Result<Option<ContestApplication>> {
        Ok(self
            .list_applications()?
            .into_iter()
            .find(|a| a.matches(user_id, contest_id)))
    }

    /// Member edit of links and team; only the submitting user may edit
    pub fn edit_application(
        &mut self,
        application_id: &str,
        user_id: &str,
        edit: ApplicationEdit,
    ) -> Result<ContestApplication> {
        let updated = self.modify_application(application_id, |application| {
            if application.user_id != user_id {
                return Err(StoreError::NotApplicationOwner {
                    id: application.id.clone(),
                    user_id: user_id.to_string(),
                });
            }
            application.apply_edit(edit);
            Ok(())
        })?;

        info!("User {} edited application {}", user_id, application_id);
        Ok(updated)
    }

    pub fn review_application(
        &mut self,
        application_id: &str,
        status: ApplicationStatus,
    ) -> Result<ContestApplication> {
        let updated =
            self.modify_application(application_id, |application| application.review(status))?;

        info!("Application {} marked {}", application_id, status);
        Ok(updated)
    }

    fn modify_application<F>(&mut self, application_id: &str, change: F) -> Result<ContestApplication>
    where
        F: FnOnce(&mut ContestApplication) -> Result<()>,
    {
        let mut applications: Vec<ContestApplication> =
            self.read_collection(&self.keys.applications)?;
        let application = applications
            .iter_mut()
            .find(|a| a.id == application_id)
            .ok_or_else(|| StoreError::ApplicationNotFound {
                id: application_id.to_string(),
            })?;

        change(application)?;
        let updated = application.clone();

        self.write_collection(&self.keys.applications, &applications)?;
        Ok(updated)
    }

    // ========== Export ==========

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            contests: self.list_contests()?,
            applications: self.list_applications()?,
        })
    }

    /// Export as JSON bytes (for download)
    pub fn export(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(&self.snapshot()?).map_err(|e| e.into())
    }

    /// Drop both collections from the backend. Works on corrupt data too.
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove_item(&self.keys.applications)?;
        self.backend.remove_item(&self.keys.contests)?;
        warn!("Cleared all contests and applications");
        Ok(())
    }
}

/// Shared record store type
pub type SharedRecordStore = Arc<tokio::sync::RwLock<RecordStore>>;

pub fn create_shared_record_store(store: RecordStore) -> SharedRecordStore {
    Arc::new(tokio::sync::RwLock::new(store))
}
