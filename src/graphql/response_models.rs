use entities::deserializers::null_as_default;
use entities::prelude::*;
use serde::Deserialize;

/// The `{ data, errors }` envelope every GraphQL response comes back in.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<D> {
  pub data: Option<D>,
  #[serde(default)]
  pub errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlErrorMessage {
  pub message: String,
}

impl<D> GraphQlResponse<D> {
  pub fn joined_error_messages(&self) -> String {
    self
      .errors
      .iter()
      .map(|error| error.message.as_str())
      .collect::<Vec<&str>>()
      .join("; ")
  }
}

/// `data` for both documents. DLive returns `null` for unknown display names.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserByDisplayName<U> {
  pub user_by_display_name: Option<U>,
}

/// The user object returned by the profile document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
  pub displayname: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub avatar: String,
  pub id: String,
  pub username: String,
  pub livestream: Option<UserLivestream>,
  pub following: Option<FollowingConnection>,
}

impl ProfileUser {
  /// Returns None when the following block was null.
  pub fn into_user_record(self) -> Option<UserRecord> {
    Some(UserRecord {
      displayname: self.displayname,
      avatar: self.avatar,
      id: self.id,
      username: self.username,
      livestream: self.livestream,
      following: self.following?,
    })
  }
}

/// The user object returned by the following page document.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowingPageUser {
  pub displayname: String,
  pub following: Option<FollowingConnection>,
}

pub type UserProfileResponse = GraphQlResponse<UserByDisplayName<ProfileUser>>;
pub type FollowingPageResponse = GraphQlResponse<UserByDisplayName<FollowingPageUser>>;
