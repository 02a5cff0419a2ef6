use app_config::{APP_CONFIG, CLAP_ARGS};
use dlive_following_tracker::errors::AppError;
use dlive_following_tracker::graphql::DliveClient;
use dlive_following_tracker::processes::{
  forward_messages, forward_notifications, BackgroundService,
};
use dlive_following_tracker::storage::{FileStorage, UserStorage};
use dlive_following_tracker::user_info::{PaginationPolicy, UserInfoRefresher};
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::{mpsc, Mutex};

const MESSAGE_CHANNEL_CAPACITY: usize = 32;

#[tokio::main]
async fn main() {
  dlive_following_tracker::logging::setup_logging_config().unwrap();

  let client = match DliveClient::new(APP_CONFIG.backend_url(), APP_CONFIG.page_request_timeout()) {
    Ok(client) => client,
    Err(error) => {
      tracing::error!("Failed to build the DLive client. Reason: {}", error);
      eprintln!("Failed to build the DLive client: {}", error);

      std::process::exit(1);
    }
  };
  let storage = FileStorage::new(APP_CONFIG.storage_path().clone());
  let policy = PaginationPolicy::new(
    APP_CONFIG.max_following_pages(),
    APP_CONFIG.page_request_timeout(),
  );
  let refresher = Arc::new(UserInfoRefresher::new(client, storage, policy));

  if let Err(error) = store_configured_displayname(refresher.storage()).await {
    tracing::error!("Failed to store the configured display name. Reason: {}", error);
    eprintln!("Failed to store the configured display name: {}", error);

    std::process::exit(1);
  }

  if CLAP_ARGS.run_once_flag() {
    run_once(&refresher).await;
  }

  let stdout = Arc::new(Mutex::new(tokio::io::stdout()));
  let (message_sender, message_receiver) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);

  let notification_receiver = refresher.subscribe();
  let notification_writer = Arc::clone(&stdout);

  tokio::spawn(async move {
    if let Err(error) = forward_notifications(notification_receiver, notification_writer).await {
      tracing::error!("Stopped forwarding notifications. Reason: {}", error);
    }
  });
  tokio::spawn(async move {
    let stdin = BufReader::new(tokio::io::stdin());

    if let Err(error) = forward_messages(stdin, message_sender, stdout).await {
      tracing::error!("Stopped reading inbound messages. Reason: {}", error);
    }
  });

  BackgroundService::new(refresher, APP_CONFIG.refresh_interval())
    .run(message_receiver)
    .await
}

/// The command line display name takes priority over the configured one.
async fn store_configured_displayname(user_storage: &UserStorage<FileStorage>) -> Result<(), AppError> {
  let Some(displayname) = CLAP_ARGS.displayname().or(APP_CONFIG.displayname()) else {
    return Ok(());
  };

  tracing::info!("Tracking {:?}.", displayname);

  user_storage.set_displayname(displayname).await
}

async fn run_once(refresher: &UserInfoRefresher<DliveClient, FileStorage>) -> ! {
  match refresher.run_refresh_cycle().await {
    Ok(report) => {
      match serde_json::to_string(&report) {
        Ok(serialized_report) => println!("{}", serialized_report),
        Err(_) => println!("{}", report),
      }

      std::process::exit(0);
    }
    Err(error) => {
      eprintln!("Failed to refresh user info: {}", error);

      std::process::exit(1);
    }
  }
}
