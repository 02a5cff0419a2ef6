mod extensions;

pub use extensions::FailureKind;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
  #[error("{0}")]
  UrlParseError(#[from] url::ParseError),

  #[error("{0}")]
  ReqwestError(#[from] reqwest::Error),

  #[error("{0}")]
  SerdeError(#[from] serde_json::Error),

  #[error("Encountered a Tokio IO error: `{:?}`", .0)]
  TokioIOError(#[from] tokio::io::Error),

  #[error("Received a failed response from {}. Code: {}", location, code)]
  FailedResponse { location: &'static str, code: u16 },

  #[error("The GraphQL API returned errors at {}: {}", location, messages)]
  GraphQlErrors {
    location: &'static str,
    messages: String,
  },

  #[error("Received an unknown response body structure when querying. Body location: {:?}", .0)]
  UnknownResponseBody(&'static str),

  /// When there's a missing value in a response when one was expected.
  ///
  /// Contains the value's name (something like "end cursor"), and the location in the codebase the error occurred.
  #[error("Failed to retrieve {} at {}.", expected_value_name, location)]
  MissingExpectedValue {
    expected_value_name: &'static str,
    location: &'static str,
  },

  #[error("No display name has been stored.")]
  NoDisplayName,

  #[error("User {:?} could not be fetched.", .0)]
  UserCouldNotBeFetched(String),

  #[error("The user record was missing from storage while merging following pages.")]
  UserMissingFromStorage,

  #[error("Received invalid following info for user {:?}.", displayname)]
  InvalidFollowingInfo { displayname: String },

  #[error(
    "Stopped fetching the following list after {} pages. The API kept reporting more pages.",
    max_pages
  )]
  PaginationLimitExceeded { max_pages: usize },

  /// The cursor is None for the first page.
  #[error(
    "The following page after cursor {:?} did not respond within {} seconds.",
    cursor,
    timeout_seconds
  )]
  PageRequestTimedOut {
    cursor: Option<String>,
    timeout_seconds: u64,
  },

  #[error("A refresh is already running. This request was coalesced into it.")]
  RefreshAlreadyInProgress,

  #[error("Unknown Message: {}", .0)]
  UnknownMessageKind(String),

  #[error("Received a message without a kind: {}", .0)]
  MalformedMessage(String),
}
