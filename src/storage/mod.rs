//! Key-value backends the record store persists its collections into.
//!
//! A backend only ever sees whole serialized collections: one string value
//! per key, read and replaced in full.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// String key-value persistence, shaped after browser local storage
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was stored
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Short label for log lines
    fn describe(&self) -> String;
}

impl<T: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
