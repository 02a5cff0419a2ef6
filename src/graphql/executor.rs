use crate::errors::AppError;
use crate::graphql::queries::GraphQlRequest;
use crate::graphql::response_models::GraphQlResponse;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Sends a single named query and hands back the parsed envelope.
///
/// Failures are returned as-is. Nothing is retried.
pub trait QueryExecutor: Send + Sync {
  fn query<D>(
    &self,
    request: &GraphQlRequest,
  ) -> impl Future<Output = Result<GraphQlResponse<D>, AppError>> + Send
  where
    D: DeserializeOwned + Send;
}

/// The reqwest backed executor bound to DLive's GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct DliveClient {
  reqwest_client: reqwest::Client,
  endpoint: Url,
}

impl DliveClient {
  pub fn new(backend_url: &str, request_timeout: Duration) -> Result<Self, AppError> {
    let endpoint = Url::parse(backend_url)?;
    let reqwest_client = reqwest::Client::builder()
      .timeout(request_timeout)
      .build()?;

    Ok(Self {
      reqwest_client,
      endpoint,
    })
  }
}

impl QueryExecutor for DliveClient {
  async fn query<D>(&self, request: &GraphQlRequest) -> Result<GraphQlResponse<D>, AppError>
  where
    D: DeserializeOwned + Send,
  {
    tracing::debug!(
      "Querying {} for {:?} with variables {:?}",
      self.endpoint,
      request.document,
      request.variables
    );

    let response = self
      .reqwest_client
      .post(self.endpoint.clone())
      .json(request)
      .send()
      .await?;
    let status = response.status();

    if !status.is_success() {
      return Err(AppError::FailedResponse {
        location: "dlive graphql query",
        code: status.as_u16(),
      });
    }

    let response_body = response.text().await?;
    let graphql_response: GraphQlResponse<D> = match serde_json::from_str(&response_body) {
      Ok(graphql_response) => graphql_response,
      Err(error) => {
        tracing::error!("Unknown response: {:?}", response_body);

        return Err(error.into());
      }
    };

    if !graphql_response.errors.is_empty() {
      if graphql_response.data.is_none() {
        return Err(AppError::GraphQlErrors {
          location: "dlive graphql query",
          messages: graphql_response.joined_error_messages(),
        });
      }

      tracing::warn!(
        "Received partial data with errors: {}",
        graphql_response.joined_error_messages()
      );
    }

    Ok(graphql_response)
  }
}
