use crate::errors::AppError;
use crate::graphql::QueryExecutor;
use crate::messages::InboundMessage;
use crate::storage::KeyValueStorage;
use crate::user_info::UserInfoRefresher;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// An inbound message along with where to send the result of handling it.
#[derive(Debug)]
pub struct MessageRequest {
  pub message: Value,
  pub responder: oneshot::Sender<Result<(), AppError>>,
}

impl MessageRequest {
  pub fn new(message: Value) -> (Self, oneshot::Receiver<Result<(), AppError>>) {
    let (responder, response_receiver) = oneshot::channel();
    (Self { message, responder }, response_receiver)
  }
}

pub struct BackgroundService<E, S> {
  refresher: Arc<UserInfoRefresher<E, S>>,
  refresh_interval: Duration,
}

impl<E, S> BackgroundService<E, S>
where
  E: QueryExecutor + 'static,
  S: KeyValueStorage + 'static,
{
  pub fn new(refresher: Arc<UserInfoRefresher<E, S>>, refresh_interval: Duration) -> Self {
    Self {
      refresher,
      refresh_interval,
    }
  }

  /// Refreshes right away, then once every refresh interval, forever.
  ///
  /// Messages are served until every sender has been dropped. Polling continues after that.
  pub async fn run(self, mut message_receiver: mpsc::Receiver<MessageRequest>) -> ! {
    tracing::info!(
      "Starting the background service. Refreshing every {} seconds.",
      self.refresh_interval.as_secs()
    );

    self.spawn_refresh_cycle();

    let mut refresh_timer = interval_at(Instant::now() + self.refresh_interval, self.refresh_interval);
    refresh_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut accepting_messages = true;

    loop {
      tokio::select! {
        _ = refresh_timer.tick() => {
          self.spawn_refresh_cycle();
        }

        request = message_receiver.recv(), if accepting_messages => {
          let Some(request) = request else {
            tracing::info!("The message channel closed. Continuing with timed refreshes only.");
            accepting_messages = false;

            continue;
          };

          let result = self.handle_message(&request.message);

          if let Err(error) = &result {
            tracing::warn!("Rejected a message. Reason: {}", error);
          }

          if request.responder.send(result).is_err() {
            tracing::debug!("A message sender left before receiving its response.");
          }
        }
      }
    }
  }

  /// Starts a refresh for `UPDATE_USER_INFO`. The refresh's own outcome is never sent back.
  pub fn handle_message(&self, message: &Value) -> Result<(), AppError> {
    match InboundMessage::from_value(message)? {
      InboundMessage::UpdateUserInfo => {
        tracing::debug!("Received a request to update user info.");

        self.spawn_refresh_cycle();

        Ok(())
      }
    }
  }

  pub fn spawn_refresh_cycle(&self) -> JoinHandle<()> {
    let refresher = Arc::clone(&self.refresher);

    tokio::spawn(async move {
      // Already logged by the refresher.
      let _ = refresher.run_refresh_cycle().await;
    })
  }
}
