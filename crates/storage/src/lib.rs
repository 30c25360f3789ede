//! Device-local key-value storage for Taskpad
//!
//! This crate defines the asynchronous string key-value capability the task
//! store persists through, plus two adapters:
//! - [`FileStorage`]: one file per key under a data directory
//! - [`MemoryStorage`]: ephemeral, with write-failure injection for tests

mod error;
mod file;
mod memory;

use async_trait::async_trait;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Asynchronous string key-value capability.
///
/// No transactions and no partial-key updates: callers read and write whole
/// values. A missing key reads as `None`.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is absent.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<()>;
}
