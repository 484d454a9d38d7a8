use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    // Storage errors
    #[error("Failed to read '{key}' from storage: {source}")]
    StorageRead {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{key}' to storage: {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("Invalid storage key '{key}'")]
    InvalidKey { key: String },

    #[error("Stored collection '{key}' is corrupt: {source}")]
    CorruptCollection {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    // Record errors
    #[error("Contest not found: {id}")]
    ContestNotFound { id: String },

    #[error("Application not found: {id}")]
    ApplicationNotFound { id: String },

    #[error("User {user_id} already applied to contest {contest_id}")]
    DuplicateApplication { user_id: String, contest_id: String },

    #[error("Application {id} does not belong to user {user_id}")]
    NotApplicationOwner { id: String, user_id: String },

    #[error("Cannot move application {id} from {from} to {to}")]
    InvalidStatusTransition { id: String, from: String, to: String },

    #[error("Invalid status value: {value}")]
    InvalidStatus { value: String },

    // Generic errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StoreError {
    /// Stable machine-readable code for response envelopes
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::StorageRead { .. } => "storage_read",
            StoreError::StorageWrite { .. } => "storage_write",
            StoreError::QuotaExceeded { .. } => "quota_exceeded",
            StoreError::InvalidKey { .. } => "invalid_key",
            StoreError::CorruptCollection { .. } => "corrupt_collection",
            StoreError::ContestNotFound { .. } => "contest_not_found",
            StoreError::ApplicationNotFound { .. } => "application_not_found",
            StoreError::DuplicateApplication { .. } => "duplicate_application",
            StoreError::NotApplicationOwner { .. } => "not_application_owner",
            StoreError::InvalidStatusTransition { .. } => "invalid_status_transition",
            StoreError::InvalidStatus { .. } => "invalid_status",
            StoreError::Internal { .. } => "internal",
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Internal {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
