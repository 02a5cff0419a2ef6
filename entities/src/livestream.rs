use serde::{Deserialize, Serialize};

/// The stream the tracked user is currently running, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLivestream {
  pub id: String,
  pub permlink: String,
}

/// A followed account's stream. Every field is optional since DLive
/// returns a sparse object for accounts that aren't live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowedLivestream {
  pub id: Option<String>,
  pub permlink: Option<String>,
  pub title: Option<String>,
  pub thumbnail_url: Option<String>,
  /// Current viewer count.
  pub watching_count: Option<u64>,
  pub category: Option<LivestreamCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivestreamCategory {
  pub title: Option<String>,
}
