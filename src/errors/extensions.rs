use super::AppError;

/// The broad categories a refresh failure falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  /// Something the cycle needs from storage wasn't there.
  MissingPrecondition,
  /// The API answered, but not with what was asked for.
  UpstreamResponse,
  /// The request itself failed or the body couldn't be read.
  Transport,
  /// Another refresh was already running.
  Coalesced,
  /// A caller sent something the message handler doesn't understand.
  Contract,
}

impl AppError {
  pub fn failure_kind(&self) -> FailureKind {
    match self {
      Self::NoDisplayName | Self::UserMissingFromStorage => FailureKind::MissingPrecondition,

      Self::UserCouldNotBeFetched(_)
      | Self::InvalidFollowingInfo { .. }
      | Self::UnknownResponseBody(_)
      | Self::GraphQlErrors { .. }
      | Self::MissingExpectedValue { .. }
      | Self::PaginationLimitExceeded { .. } => FailureKind::UpstreamResponse,

      Self::UrlParseError(_)
      | Self::ReqwestError(_)
      | Self::SerdeError(_)
      | Self::TokioIOError(_)
      | Self::FailedResponse { .. }
      | Self::PageRequestTimedOut { .. } => FailureKind::Transport,

      Self::RefreshAlreadyInProgress => FailureKind::Coalesced,

      Self::UnknownMessageKind(_) | Self::MalformedMessage(_) => FailureKind::Contract,
    }
  }

  pub fn is_coalesced(&self) -> bool {
    self.failure_kind() == FailureKind::Coalesced
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_storage_values_are_preconditions() {
    assert_eq!(
      AppError::NoDisplayName.failure_kind(),
      FailureKind::MissingPrecondition
    );
    assert_eq!(
      AppError::UserMissingFromStorage.failure_kind(),
      FailureKind::MissingPrecondition
    );
  }

  #[test]
  fn pagination_limit_counts_as_an_upstream_failure() {
    let error = AppError::PaginationLimitExceeded { max_pages: 5 };

    assert_eq!(error.failure_kind(), FailureKind::UpstreamResponse);
    assert!(!error.is_coalesced());
  }

  #[test]
  fn unknown_message_is_a_contract_error() {
    let error = AppError::UnknownMessageKind("UNKNOWN".to_string());

    assert_eq!(error.failure_kind(), FailureKind::Contract);
    assert_eq!(error.to_string(), "Unknown Message: UNKNOWN");
  }
}
