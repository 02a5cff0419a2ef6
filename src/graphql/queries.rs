use serde::Serialize;

/// Both documents share the same operation name. DLive only distinguishes them by the fields requested.
pub const OPERATION_NAME: &str = "LivestreamPage";

/// How many followed accounts are requested per page.
pub const FOLLOWING_PAGE_SIZE: u32 = 40;

/// The tracked user's profile along with the first page of who they follow.
pub const USER_PROFILE_QUERY: &str = r#"
query LivestreamPage($displayname: String!, $first: Int, $after: String) {
  userByDisplayName (displayname: $displayname) {
    displayname
    avatar
    id
    username
    livestream {
      id
      permlink
    }
    following (
      sortedBy: AZ
      first: $first,
      after: $after
    ) {
      pageInfo {
        endCursor
        hasNextPage
      }
      list {
        avatar
        displayname
        partnerStatus
        id
        username
        livestream {
          id
          permlink
          title
          thumbnailUrl
          watchingCount
          category {
            title
          }
        }
        followers {
          totalCount
        }
      }
    }
  }
}"#;

/// A single page of who the user follows, starting after `$after`.
pub const FOLLOWING_PAGE_QUERY: &str = r#"
query LivestreamPage($displayname: String!, $first: Int, $after: String) {
  userByDisplayName (displayname: $displayname) {
    displayname
    following (
      sortedBy: AZ
      first: $first,
      after: $after
    ) {
      pageInfo {
        endCursor
        hasNextPage
      }
      list {
        avatar
        displayname
        partnerStatus
        id
        username
        livestream {
          id
          permlink
          title
          thumbnailUrl
          watchingCount
          category {
            title
          }
        }
        followers {
          totalCount
        }
      }
    }
  }
}"#;

/// Which of the two documents a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDocument {
  UserProfile,
  FollowingPage,
}

impl QueryDocument {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::UserProfile => USER_PROFILE_QUERY,
      Self::FollowingPage => FOLLOWING_PAGE_QUERY,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryVariables {
  pub displayname: String,
  pub first: u32,
  /// Left out of the body entirely when there's no cursor.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub after: Option<String>,
}

/// The body POSTed to the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
  pub operation_name: &'static str,
  #[serde(skip)]
  pub document: QueryDocument,
  pub query: &'static str,
  pub variables: QueryVariables,
}

impl GraphQlRequest {
  pub fn user_profile(displayname: &str) -> Self {
    Self::new(
      QueryDocument::UserProfile,
      QueryVariables {
        displayname: displayname.to_owned(),
        first: FOLLOWING_PAGE_SIZE,
        after: None,
      },
    )
  }

  pub fn following_page(displayname: &str, first: u32, after: Option<&str>) -> Self {
    Self::new(
      QueryDocument::FollowingPage,
      QueryVariables {
        displayname: displayname.to_owned(),
        first,
        after: after.map(str::to_owned),
      },
    )
  }

  fn new(document: QueryDocument, variables: QueryVariables) -> Self {
    Self {
      operation_name: OPERATION_NAME,
      document,
      query: document.as_str(),
      variables,
    }
  }
}
