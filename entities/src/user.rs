use crate::deserializers::null_as_default;
use crate::following::{FollowingConnection, FollowingEntry};
use crate::livestream::UserLivestream;
use serde::{Deserialize, Serialize};

/// The cached profile of the tracked user along with everyone they follow.
///
/// Replaced wholesale by every profile fetch, then extended one following page at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
  pub displayname: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub avatar: String,
  pub id: String,
  pub username: String,
  pub livestream: Option<UserLivestream>,
  pub following: FollowingConnection,
}

impl UserRecord {
  /// Appends the entries in arrival order. Entries already present are not
  /// deduplicated, and the stored page info is left as the first page reported it.
  pub fn append_following(&mut self, entries: Vec<FollowingEntry>) {
    self.following.list.extend(entries);
  }

  pub fn following_list(&self) -> &[FollowingEntry] {
    &self.following.list
  }

  pub fn following_count(&self) -> usize {
    self.following.list.len()
  }

  pub fn live_following(&self) -> impl Iterator<Item = &FollowingEntry> {
    self.following.list.iter().filter(|entry| entry.is_live())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::following::{FollowerCount, PageInfo, PartnerStatus};
  use crate::livestream::FollowedLivestream;

  fn entry(username: &str, live: bool) -> FollowingEntry {
    FollowingEntry {
      avatar: String::new(),
      displayname: username.to_uppercase(),
      partner_status: PartnerStatus::None,
      id: format!("user:{username}"),
      username: username.to_string(),
      livestream: live.then(|| FollowedLivestream {
        id: Some(format!("stream:{username}")),
        ..Default::default()
      }),
      followers: FollowerCount::default(),
    }
  }

  fn record(entries: Vec<FollowingEntry>) -> UserRecord {
    UserRecord {
      displayname: "Alice".to_string(),
      avatar: String::new(),
      id: "user:alice".to_string(),
      username: "alice".to_string(),
      livestream: None,
      following: FollowingConnection {
        page_info: PageInfo {
          end_cursor: Some("2".to_string()),
          has_next_page: true,
        },
        list: entries,
      },
    }
  }

  #[test]
  fn append_keeps_arrival_order_and_duplicates() {
    let mut user = record(vec![entry("e1", false), entry("e2", true)]);

    user.append_following(vec![entry("e2", true), entry("e3", false)]);

    let usernames: Vec<&str> = user
      .following_list()
      .iter()
      .map(|entry| entry.username.as_str())
      .collect();

    assert_eq!(usernames, vec!["e1", "e2", "e2", "e3"]);
    assert_eq!(user.following_count(), 4);
    assert_eq!(user.live_following().count(), 2);
  }

  #[test]
  fn append_does_not_touch_page_info() {
    let mut user = record(vec![entry("e1", false)]);

    user.append_following(vec![entry("e2", false)]);

    assert_eq!(user.following.end_cursor(), Some("2"));
    assert!(user.following.has_next_page());
  }

  #[test]
  fn record_without_livestream_round_trips_through_json() {
    let user = record(vec![entry("e1", true)]);

    let serialized = serde_json::to_string(&user).unwrap();
    let deserialized: UserRecord = serde_json::from_str(&serialized).unwrap();

    assert!(serialized.contains("\"pageInfo\""));
    assert_eq!(deserialized, user);
  }
}
