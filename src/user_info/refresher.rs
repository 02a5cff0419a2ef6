use crate::errors::AppError;
use crate::graphql::queries::GraphQlRequest;
use crate::graphql::response_models::UserProfileResponse;
use crate::graphql::QueryExecutor;
use crate::messages::OutboundMessage;
use crate::storage::{KeyValueStorage, UserStorage};
use crate::user_info::following_aggregator::{FollowingAggregator, PaginationPolicy};
use crate::user_info::refresh_report::RefreshReport;
use chrono::Utc;
use tokio::sync::{broadcast, Mutex};

const NOTIFICATION_CHANNEL_CAPACITY: usize = 16;

/// Replaces the stored user record with a fresh copy of the profile and every page of its following list.
///
/// Only one refresh runs at a time. A refresh requested while another is running returns
/// [`AppError::RefreshAlreadyInProgress`] without touching storage.
pub struct UserInfoRefresher<E, S> {
  executor: E,
  user_storage: UserStorage<S>,
  policy: PaginationPolicy,
  notification_sender: broadcast::Sender<OutboundMessage>,
  cycle_lock: Mutex<()>,
}

impl<E, S> UserInfoRefresher<E, S>
where
  E: QueryExecutor,
  S: KeyValueStorage,
{
  pub fn new(executor: E, storage: S, policy: PaginationPolicy) -> Self {
    let (notification_sender, _) = broadcast::channel(NOTIFICATION_CHANNEL_CAPACITY);

    Self {
      executor,
      user_storage: UserStorage::new(storage),
      policy,
      notification_sender,
      cycle_lock: Mutex::new(()),
    }
  }

  /// Receives a [`OutboundMessage::UserInfoUpdated`] after every successful cycle.
  pub fn subscribe(&self) -> broadcast::Receiver<OutboundMessage> {
    self.notification_sender.subscribe()
  }

  pub fn storage(&self) -> &UserStorage<S> {
    &self.user_storage
  }

  pub fn executor(&self) -> &E {
    &self.executor
  }

  /// Runs a refresh and announces it if it succeeded.
  ///
  /// Failures are logged here. The caller is free to drop the returned error.
  pub async fn run_refresh_cycle(&self) -> Result<RefreshReport, AppError> {
    match self.refresh().await {
      Ok(report) => {
        tracing::info!("Refreshed user info. {}", report);

        // No receivers is fine, nobody is listening yet.
        let _ = self
          .notification_sender
          .send(OutboundMessage::UserInfoUpdated);

        Ok(report)
      }
      Err(error) if error.is_coalesced() => {
        tracing::debug!("{}", error);

        Err(error)
      }
      Err(error) => {
        tracing::error!(
          "Failed to refresh user info. Kind: {:?}. Reason: {}",
          error.failure_kind(),
          error
        );

        Err(error)
      }
    }
  }

  pub async fn refresh(&self) -> Result<RefreshReport, AppError> {
    let Ok(_cycle_guard) = self.cycle_lock.try_lock() else {
      return Err(AppError::RefreshAlreadyInProgress);
    };

    let Some(displayname) = self.user_storage.displayname().await? else {
      return Err(AppError::NoDisplayName);
    };

    tracing::debug!("Fetching the profile of {:?}.", displayname);

    let request = GraphQlRequest::user_profile(&displayname);
    let response = self.query_profile(&request).await?;

    let Some(data) = response.data else {
      return Err(AppError::UnknownResponseBody("user profile data"));
    };
    let Some(profile) = data.user_by_display_name else {
      return Err(AppError::UserCouldNotBeFetched(displayname));
    };
    let response_displayname = profile.displayname.clone();
    let Some(user) = profile.into_user_record() else {
      return Err(AppError::InvalidFollowingInfo {
        displayname: response_displayname,
      });
    };
    let first_page_info = user.following.page_info.clone();

    self.user_storage.set_user_record(&user).await?;

    let aggregator = FollowingAggregator::new(&self.executor, &self.user_storage, &self.policy);
    let summary = aggregator
      .continue_following(&response_displayname, &first_page_info)
      .await?;

    let following_count = summary
      .following_count
      .unwrap_or_else(|| user.following_count());
    let live_following_count = match summary.pages_fetched {
      0 => user.live_following().count(),
      _ => self
        .user_storage
        .user_record()
        .await?
        .map(|user| user.live_following().count())
        .unwrap_or_default(),
    };

    Ok(RefreshReport {
      displayname: response_displayname,
      pages_fetched: summary.pages_fetched + 1,
      following_count,
      live_following_count,
      completed_at: Utc::now(),
    })
  }

  async fn query_profile(&self, request: &GraphQlRequest) -> Result<UserProfileResponse, AppError> {
    match tokio::time::timeout(self.policy.page_timeout, self.executor.query(request)).await {
      Ok(response) => response,
      Err(_) => Err(AppError::PageRequestTimedOut {
        cursor: None,
        timeout_seconds: self.policy.page_timeout.as_secs(),
      }),
    }
  }
}
