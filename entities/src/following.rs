use crate::deserializers::null_as_default;
use crate::livestream::FollowedLivestream;
use serde::{Deserialize, Serialize};

/// The cursor state DLive returns with every following page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
  pub end_cursor: Option<String>,
  pub has_next_page: bool,
}

/// One page of a user's following list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingConnection {
  pub page_info: PageInfo,
  #[serde(default)]
  pub list: Vec<FollowingEntry>,
}

impl FollowingConnection {
  pub fn has_next_page(&self) -> bool {
    self.page_info.has_next_page
  }

  pub fn end_cursor(&self) -> Option<&str> {
    self.page_info.end_cursor.as_deref()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowingEntry {
  #[serde(default, deserialize_with = "null_as_default")]
  pub avatar: String,
  pub displayname: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub partner_status: PartnerStatus,
  pub id: String,
  pub username: String,
  pub livestream: Option<FollowedLivestream>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub followers: FollowerCount,
}

impl FollowingEntry {
  pub fn is_live(&self) -> bool {
    self
      .livestream
      .as_ref()
      .is_some_and(|livestream| livestream.id.is_some())
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerCount {
  pub total_count: u64,
}

/// The account tier DLive reports for a followed user.
///
/// Tiers this enum doesn't name are kept verbatim so the stored record matches what the API sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PartnerStatus {
  #[default]
  None,
  Affiliate,
  VerifiedPartner,
  GlobalPartner,
  GlobalPartnerPending,
  Other(String),
}

impl PartnerStatus {
  pub fn as_str(&self) -> &str {
    match self {
      Self::None => "NONE",
      Self::Affiliate => "AFFILIATE",
      Self::VerifiedPartner => "VERIFIED_PARTNER",
      Self::GlobalPartner => "GLOBAL_PARTNER",
      Self::GlobalPartnerPending => "GLOBAL_PARTNER_PENDING",
      Self::Other(partner_status) => partner_status,
    }
  }
}

impl From<String> for PartnerStatus {
  fn from(partner_status: String) -> Self {
    match partner_status.as_str() {
      "NONE" => Self::None,
      "AFFILIATE" => Self::Affiliate,
      "VERIFIED_PARTNER" => Self::VerifiedPartner,
      "GLOBAL_PARTNER" => Self::GlobalPartner,
      "GLOBAL_PARTNER_PENDING" => Self::GlobalPartnerPending,
      _ => Self::Other(partner_status),
    }
  }
}

impl From<PartnerStatus> for String {
  fn from(partner_status: PartnerStatus) -> Self {
    match partner_status {
      PartnerStatus::Other(partner_status) => partner_status,
      known => known.as_str().to_owned(),
    }
  }
}
