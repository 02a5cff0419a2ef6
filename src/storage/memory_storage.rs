use super::KeyValueStorage;
use crate::errors::AppError;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Keeps everything in memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl KeyValueStorage for MemoryStorage {
  async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
    Ok(self.entries.lock().await.get(key).cloned())
  }

  async fn set_item(&self, key: &str, value: String) -> Result<(), AppError> {
    self.entries.lock().await.insert(key.to_owned(), value);

    Ok(())
  }
}
