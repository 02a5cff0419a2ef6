//! Carries messages between the background service and another process as JSON lines.
//!
//! Every line read is one inbound message. Every line written is either an outbound
//! notification or `{"kind":"ERROR","reason":...}` for an inbound message that was rejected.

use crate::errors::AppError;
use crate::messages::OutboundMessage;
use crate::processes::background_service::MessageRequest;
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, mpsc, Mutex};

const ERROR_MESSAGE_KIND: &str = "ERROR";

#[derive(Debug, Serialize)]
struct ErrorLine<'a> {
  kind: &'static str,
  reason: &'a str,
}

/// Reads messages until the reader hits EOF or the service stops accepting them.
pub async fn forward_messages<R, W>(
  reader: R,
  message_sender: mpsc::Sender<MessageRequest>,
  writer: Arc<Mutex<W>>,
) -> Result<(), AppError>
where
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  let mut lines = reader.lines();

  while let Some(line) = lines.next_line().await? {
    if line.trim().is_empty() {
      continue;
    }

    let message = match serde_json::from_str(&line) {
      Ok(message) => message,
      Err(error) => {
        tracing::warn!("Received a line that wasn't JSON: {:?}", line);

        write_error(&writer, &AppError::from(error)).await?;

        continue;
      }
    };

    let (request, response) = MessageRequest::new(message);

    if message_sender.send(request).await.is_err() {
      tracing::info!("The background service stopped accepting messages.");

      break;
    }

    match response.await {
      Ok(Err(error)) => write_error(&writer, &error).await?,
      Ok(Ok(())) => (),
      Err(_) => tracing::warn!("The background service dropped a message without responding."),
    }
  }

  tracing::info!("Stopped reading inbound messages.");

  Ok(())
}

/// Writes every notification as its own line until the sending side is gone.
pub async fn forward_notifications<W>(
  mut notification_receiver: broadcast::Receiver<OutboundMessage>,
  writer: Arc<Mutex<W>>,
) -> Result<(), AppError>
where
  W: AsyncWrite + Unpin,
{
  loop {
    match notification_receiver.recv().await {
      Ok(notification) => write_line(&writer, &notification).await?,
      Err(broadcast::error::RecvError::Lagged(skipped)) => {
        tracing::warn!("Skipped {} notifications that were sent too quickly.", skipped);
      }
      Err(broadcast::error::RecvError::Closed) => return Ok(()),
    }
  }
}

async fn write_error<W>(writer: &Mutex<W>, error: &AppError) -> Result<(), AppError>
where
  W: AsyncWrite + Unpin,
{
  let reason = error.to_string();
  let line = ErrorLine {
    kind: ERROR_MESSAGE_KIND,
    reason: &reason,
  };

  write_line(writer, &line).await
}

async fn write_line<W, T>(writer: &Mutex<W>, value: &T) -> Result<(), AppError>
where
  W: AsyncWrite + Unpin,
  T: Serialize,
{
  let mut line = serde_json::to_vec(value)?;
  line.push(b'\n');

  let mut writer = writer.lock().await;
  writer.write_all(&line).await?;
  writer.flush().await?;

  Ok(())
}
