use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a successful refresh left in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
  pub displayname: String,
  /// Includes the page that came with the profile.
  pub pages_fetched: usize,
  pub following_count: usize,
  pub live_following_count: usize,
  pub completed_at: DateTime<Utc>,
}

impl std::fmt::Display for RefreshReport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} follows {} accounts ({} live) across {} pages",
      self.displayname, self.following_count, self.live_following_count, self.pages_fetched
    )
  }
}
