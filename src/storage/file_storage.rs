use super::KeyValueStorage;
use crate::errors::AppError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;

/// Stores every entry in a single JSON object on disk.
///
/// The whole file is read on every access and rewritten on every change. Writes go to a
/// sibling temp file first and are then renamed over the original.
#[derive(Debug)]
pub struct FileStorage {
  path: PathBuf,
  write_lock: Mutex<()>,
}

impl FileStorage {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      write_lock: Mutex::new(()),
    }
  }

  async fn read_entries(&self) -> Result<BTreeMap<String, String>, AppError> {
    let contents = match fs::read_to_string(&self.path).await {
      Ok(contents) => contents,
      Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
      Err(error) => return Err(error.into()),
    };

    if contents.trim().is_empty() {
      return Ok(BTreeMap::new());
    }

    serde_json::from_str(&contents).map_err(|error| {
      tracing::error!(
        "Storage file {} contains invalid JSON: {}",
        self.path.display(),
        error
      );

      error.into()
    })
  }

  async fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), AppError> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).await?;
      }
    }

    let serialized_entries = serde_json::to_string_pretty(entries)?;
    let temporary_path = self.path.with_extension("json.tmp");

    fs::write(&temporary_path, serialized_entries).await?;
    fs::rename(&temporary_path, &self.path).await?;

    Ok(())
  }

  async fn update_entries<F>(&self, update: F) -> Result<(), AppError>
  where
    F: FnOnce(&mut BTreeMap<String, String>) + Send,
  {
    let _write_guard = self.write_lock.lock().await;
    let mut entries = self.read_entries().await?;

    update(&mut entries);

    self.write_entries(&entries).await
  }
}

impl KeyValueStorage for FileStorage {
  async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
    let mut entries = self.read_entries().await?;

    Ok(entries.remove(key))
  }

  async fn set_item(&self, key: &str, value: String) -> Result<(), AppError> {
    self
      .update_entries(|entries| {
        entries.insert(key.to_owned(), value);
      })
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn missing_file_reads_as_empty() {
    let directory = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(directory.path().join("storage.json"));

    assert_eq!(storage.get_item("dlive_user").await.unwrap(), None);
  }

  #[tokio::test]
  async fn values_persist_across_instances() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("nested").join("storage.json");

    FileStorage::new(&path)
      .set_item("dlive_displayname", "alice".to_string())
      .await
      .unwrap();

    let reopened = FileStorage::new(&path);

    assert_eq!(
      reopened.get_item("dlive_displayname").await.unwrap(),
      Some("alice".to_string())
    );
  }

  #[tokio::test]
  async fn setting_one_key_keeps_the_others() {
    let directory = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(directory.path().join("storage.json"));

    storage.set_item("a", "1".to_string()).await.unwrap();
    storage.set_item("b", "2".to_string()).await.unwrap();
    storage.set_item("a", "3".to_string()).await.unwrap();

    assert_eq!(storage.get_item("a").await.unwrap(), Some("3".to_string()));
    assert_eq!(storage.get_item("b").await.unwrap(), Some("2".to_string()));
  }

  #[tokio::test]
  async fn corrupted_file_is_an_error() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("storage.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = FileStorage::new(&path).get_item("a").await;

    assert!(matches!(result, Err(AppError::SerdeError(_))));
  }
}
