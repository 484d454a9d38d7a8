use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// `{ data, error }` envelope, shaped like the hosted backend's client
/// responses so dashboard code can switch between the two.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult<T> {
    pub data: Option<T>,
    pub error: Option<QueryError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryError {
    pub code: String,
    pub message: String,
}

impl<T> QueryResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: &StoreError) -> Self {
        Self {
            data: None,
            error: Some(QueryError::from(error)),
        }
    }

    /// Error envelope for failures that never reached the store
    pub fn invalid(code: &str, message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(QueryError {
                code: code.to_string(),
                message: message.into(),
            }),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl From<&StoreError> for QueryError {
    fn from(error: &StoreError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

impl<T> From<Result<T>> for QueryResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(&e),
        }
    }
}
