//! The cached shapes of a DLive user and the accounts they follow.
//!
//! Field names serialize to the same camelCase keys the GraphQL API uses, so a stored
//! [`UserRecord`](user::UserRecord) reads the same as the `userByDisplayName` object it came from.

pub mod deserializers;
pub mod following;
pub mod livestream;
pub mod user;

pub mod prelude {
  pub use crate::following::{FollowerCount, FollowingConnection, FollowingEntry, PageInfo, PartnerStatus};
  pub use crate::livestream::{FollowedLivestream, LivestreamCategory, UserLivestream};
  pub use crate::user::UserRecord;
}
