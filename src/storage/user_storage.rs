use super::{KeyValueStorage, DISPLAYNAME_STORAGE_KEY, USER_STORAGE_KEY};
use crate::errors::AppError;
use entities::user::UserRecord;

/// Typed access to the two entries the refresh cycle cares about.
#[derive(Debug)]
pub struct UserStorage<S> {
  storage: S,
}

impl<S: KeyValueStorage> UserStorage<S> {
  pub fn new(storage: S) -> Self {
    Self { storage }
  }

  pub fn inner(&self) -> &S {
    &self.storage
  }

  /// A blank display name counts as no display name.
  pub async fn displayname(&self) -> Result<Option<String>, AppError> {
    let displayname = self.storage.get_item(DISPLAYNAME_STORAGE_KEY).await?;

    Ok(
      displayname
        .map(|displayname| displayname.trim().to_owned())
        .filter(|displayname| !displayname.is_empty()),
    )
  }

  pub async fn set_displayname(&self, displayname: &str) -> Result<(), AppError> {
    self
      .storage
      .set_item(DISPLAYNAME_STORAGE_KEY, displayname.trim().to_owned())
      .await
  }

  pub async fn user_record(&self) -> Result<Option<UserRecord>, AppError> {
    let Some(serialized_user) = self.storage.get_item(USER_STORAGE_KEY).await? else {
      return Ok(None);
    };

    Ok(Some(serde_json::from_str(&serialized_user)?))
  }

  pub async fn set_user_record(&self, user: &UserRecord) -> Result<(), AppError> {
    let serialized_user = serde_json::to_string(user)?;

    self.storage.set_item(USER_STORAGE_KEY, serialized_user).await
  }
}
