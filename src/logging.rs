use app_config::{log_level_wrapper::LoggingConfigLevel, APP_CONFIG};
use tracing_subscriber::EnvFilter;

const HTTP_CLIENT_LOG_LEVEL: LoggingConfigLevel = LoggingConfigLevel::Warn;

/// Logs go to stderr when no logging directory is configured, since stdout carries outbound messages.
pub fn setup_logging_config() -> Result<(), Box<dyn std::error::Error>> {
  let Some(log_level) = APP_CONFIG.log_level() else {
    eprintln!("Logging is disabled.");

    return Ok(());
  };

  let subscriber_builder = tracing_subscriber::fmt()
    .with_env_filter(build_env_filter(log_level))
    .with_ansi(false);

  if let Some(logging_dir) = APP_CONFIG.logging_dir() {
    eprintln!("Logging to file");

    let file_appender = APP_CONFIG
      .logging_file_roll_appender()
      .to_file_appender(logging_dir, APP_CONFIG.logging_filename_prefix())?;

    subscriber_builder.with_writer(file_appender).init();
  } else {
    eprintln!("Logging to stderr.");

    subscriber_builder.with_writer(std::io::stderr).init();
  }

  Ok(())
}

fn build_env_filter(log_level: LoggingConfigLevel) -> EnvFilter {
  EnvFilter::new(filter_string(log_level))
}

fn filter_string(log_level: LoggingConfigLevel) -> String {
  format!(
    "{},hyper={http_level},hyper_util={http_level},reqwest={http_level}",
    log_level,
    http_level = log_level.quieter_of(HTTP_CLIENT_LOG_LEVEL)
  )
}
