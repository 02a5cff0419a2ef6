//! The key/value store the refresh cycle reads its input from and caches its output in.

pub mod file_storage;
pub mod memory_storage;
pub mod user_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use user_storage::UserStorage;

use crate::errors::AppError;
use std::future::Future;

/// Holds the display name of the user being tracked.
pub const DISPLAYNAME_STORAGE_KEY: &str = "dlive_displayname";
/// Holds the serialized [`UserRecord`](entities::user::UserRecord).
pub const USER_STORAGE_KEY: &str = "dlive_user";

/// A persistent string to string store.
pub trait KeyValueStorage: Send + Sync {
  fn get_item(&self, key: &str) -> impl Future<Output = Result<Option<String>, AppError>> + Send;

  fn set_item(&self, key: &str, value: String) -> impl Future<Output = Result<(), AppError>> + Send;
}
