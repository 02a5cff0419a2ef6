use crate::errors::AppError;
use crate::graphql::executor::QueryExecutor;
use crate::graphql::queries::GraphQlRequest;
use crate::graphql::response_models::GraphQlResponse;
use entities::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub fn following_entry(username: &str) -> FollowingEntry {
  FollowingEntry {
    avatar: format!("https://images.prd.dlivecdn.com/avatar/{username}"),
    displayname: username.to_uppercase(),
    partner_status: PartnerStatus::None,
    id: format!("user:{username}"),
    username: username.to_owned(),
    livestream: None,
    followers: FollowerCount { total_count: 7 },
  }
}

pub fn following_entries(usernames: &[&str]) -> Vec<FollowingEntry> {
  usernames
    .iter()
    .map(|username| following_entry(username))
    .collect()
}

/// `end_cursor` being Some means the page reports another page after it.
pub fn following_connection(
  entries: Vec<FollowingEntry>,
  end_cursor: Option<&str>,
) -> FollowingConnection {
  FollowingConnection {
    page_info: PageInfo {
      end_cursor: end_cursor.map(str::to_owned),
      has_next_page: end_cursor.is_some(),
    },
    list: entries,
  }
}

pub fn user_record(
  displayname: &str,
  entries: Vec<FollowingEntry>,
  end_cursor: Option<&str>,
) -> UserRecord {
  UserRecord {
    displayname: displayname.to_owned(),
    avatar: String::new(),
    id: format!("user:{displayname}"),
    username: displayname.to_lowercase(),
    livestream: None,
    following: following_connection(entries, end_cursor),
  }
}

/// The `data` object for a profile query.
pub fn profile_data(displayname: &str, entries: Vec<FollowingEntry>, end_cursor: Option<&str>) -> Value {
  json!({ "userByDisplayName": user_record(displayname, entries, end_cursor) })
}

/// The `data` object for a following page query.
pub fn following_page_data(
  displayname: &str,
  entries: Vec<FollowingEntry>,
  end_cursor: Option<&str>,
) -> Value {
  json!({
    "userByDisplayName": {
      "displayname": displayname,
      "following": following_connection(entries, end_cursor),
    }
  })
}

pub fn null_user_data() -> Value {
  json!({ "userByDisplayName": null })
}

#[derive(Debug, Clone)]
pub enum ScriptedResponse {
  Data(Value),
  Failure,
}

/// Answers queries from a queue of canned `data` objects, in order, and records every request it receives.
///
/// Once the queue runs dry it either repeats the last response forever or fails every query.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
  responses: Mutex<VecDeque<ScriptedResponse>>,
  requests: Mutex<Vec<GraphQlRequest>>,
  repeat_last: Option<ScriptedResponse>,
  delay: Option<Duration>,
}

impl ScriptedExecutor {
  pub fn new(responses: Vec<ScriptedResponse>) -> Self {
    Self {
      responses: Mutex::new(responses.into()),
      ..Default::default()
    }
  }

  pub fn from_data(responses: Vec<Value>) -> Self {
    Self::new(responses.into_iter().map(ScriptedResponse::Data).collect())
  }

  /// Returns the same response for every query.
  pub fn endless(response: Value) -> Self {
    Self {
      repeat_last: Some(ScriptedResponse::Data(response)),
      ..Default::default()
    }
  }

  /// Waits this long before answering each query.
  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = Some(delay);

    self
  }

  pub fn requests(&self) -> Vec<GraphQlRequest> {
    self.requests.lock().unwrap().clone()
  }

  pub fn request_count(&self) -> usize {
    self.requests.lock().unwrap().len()
  }

  fn next_response(&self, request: &GraphQlRequest) -> ScriptedResponse {
    self.requests.lock().unwrap().push(request.clone());

    let next = self.responses.lock().unwrap().pop_front();

    next
      .or_else(|| self.repeat_last.clone())
      .unwrap_or(ScriptedResponse::Failure)
  }
}

impl QueryExecutor for ScriptedExecutor {
  async fn query<D>(&self, request: &GraphQlRequest) -> Result<GraphQlResponse<D>, AppError>
  where
    D: DeserializeOwned + Send,
  {
    let response = self.next_response(request);

    if let Some(delay) = self.delay {
      tokio::time::sleep(delay).await;
    }

    match response {
      ScriptedResponse::Data(data) => Ok(serde_json::from_value(json!({ "data": data }))?),
      ScriptedResponse::Failure => Err(AppError::FailedResponse {
        location: "scripted executor",
        code: 500,
      }),
    }
  }
}

/// Serves exactly one HTTP response on a local port.
///
/// Returns the URL to query and a receiver for the body of the request that was received.
pub async fn serve_single_response(
  status_code: u16,
  body: &'static str,
) -> (String, oneshot::Receiver<String>) {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let address = listener.local_addr().unwrap();
  let (request_sender, request_receiver) = oneshot::channel();

  tokio::spawn(async move {
    let (mut socket, _) = listener.accept().await.unwrap();
    let request_body = read_http_request_body(&mut socket).await;
    let response = format!(
      "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
      status_code,
      body.len(),
      body
    );

    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.unwrap();

    let _ = request_sender.send(request_body);
  });

  (format!("http://{}/", address), request_receiver)
}

async fn read_http_request_body(socket: &mut tokio::net::TcpStream) -> String {
  let mut buffer = Vec::new();
  let mut chunk = [0_u8; 1024];

  loop {
    let read_count = socket.read(&mut chunk).await.unwrap();

    if read_count == 0 {
      break;
    }

    buffer.extend_from_slice(&chunk[..read_count]);

    let request = String::from_utf8_lossy(&buffer);
    let Some(header_end) = request.find("\r\n\r\n") else {
      continue;
    };
    let content_length = request[..header_end]
      .lines()
      .find_map(|line| {
        let (name, value) = line.split_once(':')?;

        name
          .eq_ignore_ascii_case("content-length")
          .then(|| value.trim().parse::<usize>().ok())
          .flatten()
      })
      .unwrap_or(0);

    if buffer.len() >= header_end + 4 + content_length {
      return String::from_utf8_lossy(&buffer[header_end + 4..header_end + 4 + content_length])
        .to_string();
    }
  }

  String::new()
}
