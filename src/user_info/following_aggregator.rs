use crate::errors::AppError;
use crate::graphql::queries::{GraphQlRequest, FOLLOWING_PAGE_SIZE};
use crate::graphql::response_models::FollowingPageResponse;
use crate::graphql::QueryExecutor;
use crate::storage::{KeyValueStorage, UserStorage};
use entities::following::{FollowingConnection, PageInfo};
use std::time::Duration;

const DEFAULT_MAX_PAGES: usize = 250;
const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Limits on how far a single refresh walks the following list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationPolicy {
  pub page_size: u32,
  /// How many pages may be requested after the first one before giving up.
  pub max_pages: usize,
  pub page_timeout: Duration,
}

impl PaginationPolicy {
  pub fn new(max_pages: usize, page_timeout: Duration) -> Self {
    Self {
      page_size: FOLLOWING_PAGE_SIZE,
      max_pages,
      page_timeout,
    }
  }
}

impl Default for PaginationPolicy {
  fn default() -> Self {
    Self::new(DEFAULT_MAX_PAGES, DEFAULT_PAGE_TIMEOUT)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationSummary {
  pub pages_fetched: usize,
  /// The length of the stored following list after the last merge. None if nothing was merged.
  pub following_count: Option<usize>,
}

/// Walks the following list page by page, appending each page to the stored user record.
pub struct FollowingAggregator<'a, E, S> {
  executor: &'a E,
  user_storage: &'a UserStorage<S>,
  policy: &'a PaginationPolicy,
}

impl<'a, E, S> FollowingAggregator<'a, E, S>
where
  E: QueryExecutor,
  S: KeyValueStorage,
{
  pub fn new(executor: &'a E, user_storage: &'a UserStorage<S>, policy: &'a PaginationPolicy) -> Self {
    Self {
      executor,
      user_storage,
      policy,
    }
  }

  /// Checks a page that was already fetched, and keeps fetching from its end cursor if more pages remain.
  pub async fn continue_following(
    &self,
    displayname: &str,
    page_info: &PageInfo,
  ) -> Result<PaginationSummary, AppError> {
    if !page_info.has_next_page {
      return Ok(PaginationSummary::default());
    }

    let end_cursor = next_cursor(page_info)?;

    self
      .fetch_all_following(displayname, self.policy.page_size, Some(end_cursor))
      .await
  }

  /// Fetches and merges pages until one reports there's nothing after it.
  ///
  /// `first` only applies to the first request. Every page after that uses the policy's page size.
  pub async fn fetch_all_following(
    &self,
    displayname: &str,
    first: u32,
    after: Option<&str>,
  ) -> Result<PaginationSummary, AppError> {
    let mut summary = PaginationSummary::default();
    let mut page_size = first;
    let mut cursor = after.map(str::to_owned);

    loop {
      if summary.pages_fetched >= self.policy.max_pages {
        tracing::error!(
          "{:?} still reported more following pages after {} pages.",
          displayname,
          summary.pages_fetched
        );

        return Err(AppError::PaginationLimitExceeded {
          max_pages: self.policy.max_pages,
        });
      }

      let page = self
        .fetch_following_page_within_timeout(displayname, page_size, cursor.as_deref())
        .await?;
      let page_info = page.page_info.clone();

      summary.following_count = Some(self.merge_following_page(page).await?);
      summary.pages_fetched += 1;

      tracing::debug!(
        "Merged following page {} for {:?}. Has next page: {}",
        summary.pages_fetched,
        displayname,
        page_info.has_next_page
      );

      if !page_info.has_next_page {
        return Ok(summary);
      }

      cursor = Some(next_cursor(&page_info)?.to_owned());
      page_size = self.policy.page_size;
    }
  }

  /// Requests a single page of who the user follows.
  pub async fn fetch_following_page(
    &self,
    displayname: &str,
    first: u32,
    after: Option<&str>,
  ) -> Result<FollowingConnection, AppError> {
    let request = GraphQlRequest::following_page(displayname, first, after);
    let response: FollowingPageResponse = self.executor.query(&request).await?;

    let Some(data) = response.data else {
      return Err(AppError::UnknownResponseBody("following page data"));
    };
    let Some(user) = data.user_by_display_name else {
      return Err(AppError::UnknownResponseBody("following page user"));
    };
    let Some(following) = user.following else {
      return Err(AppError::InvalidFollowingInfo {
        displayname: user.displayname,
      });
    };

    Ok(following)
  }

  /// Appends the page's entries to the stored user record and writes it back.
  ///
  /// Returns the length of the stored following list afterwards.
  pub async fn merge_following_page(&self, page: FollowingConnection) -> Result<usize, AppError> {
    let Some(mut user) = self.user_storage.user_record().await? else {
      return Err(AppError::UserMissingFromStorage);
    };

    user.append_following(page.list);

    self.user_storage.set_user_record(&user).await?;

    Ok(user.following_count())
  }

  async fn fetch_following_page_within_timeout(
    &self,
    displayname: &str,
    first: u32,
    after: Option<&str>,
  ) -> Result<FollowingConnection, AppError> {
    let page_request = self.fetch_following_page(displayname, first, after);

    match tokio::time::timeout(self.policy.page_timeout, page_request).await {
      Ok(page_result) => page_result,
      Err(_) => Err(AppError::PageRequestTimedOut {
        cursor: after.map(str::to_owned),
        timeout_seconds: self.policy.page_timeout.as_secs(),
      }),
    }
  }
}

fn next_cursor(page_info: &PageInfo) -> Result<&str, AppError> {
  page_info
    .end_cursor
    .as_deref()
    .ok_or(AppError::MissingExpectedValue {
      expected_value_name: "end cursor",
      location: "following pagination",
    })
}
