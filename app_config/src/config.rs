use crate::log_level_wrapper::*;
use crate::rolling_appender_rotation::*;
use anyhow::anyhow;
use lazy_static::lazy_static;
use schematic::{Config, ConfigLoader};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_PATH_ENV_VAR: &str = "CONFIG_PATH";
const DEFAULT_CONFIG_FILEPATH: &str = "./config/config.yml";

lazy_static! {
  pub static ref APP_CONFIG: AppConfig = AppConfig::new().unwrap();
}

#[derive(Debug, Config, serde::Serialize, serde::Deserialize)]
pub struct AppConfig {
  log_level: Option<LoggingConfigLevel>,
  logging_dir: Option<PathBuf>,
  #[setting(default = "following_tracker")]
  logging_filename_prefix: String,
  logging_roll_appender: RollingAppenderRotation,

  /// The GraphQL endpoint every query is sent to.
  #[setting(default = "https://graphigo.prd.dlive.tv/", env = "DLIVE_BACKEND_URL")]
  backend_url: String,

  #[setting(default = 60)]
  refresh_interval_seconds: u64,
  #[setting(default = 30)]
  page_request_timeout_seconds: u64,
  /// Upper bound on the following pages requested after the first one in a single refresh.
  #[setting(default = 250)]
  max_following_pages: usize,

  #[setting(default = "./data/storage.json")]
  storage_path: PathBuf,

  /// Written into storage at startup when present.
  #[setting(env = "DLIVE_DISPLAYNAME")]
  displayname: Option<String>,
}

impl AppConfig {
  fn new() -> anyhow::Result<Self> {
    Self::load(&get_config_path())
  }

  /// Loads the config from the given file, falling back to defaults and the environment
  /// for anything the file doesn't set. A missing file is not an error.
  pub fn load(config_path: &Path) -> anyhow::Result<Self> {
    let config = ConfigLoader::<AppConfig>::new()
      .file_optional(config_path)?
      .load()?
      .config;

    if config.refresh_interval_seconds == 0 {
      return Err(anyhow!("refresh_interval_seconds must be greater than 0."));
    }

    if config.page_request_timeout_seconds == 0 {
      return Err(anyhow!("page_request_timeout_seconds must be greater than 0."));
    }

    if config.max_following_pages == 0 {
      return Err(anyhow!("max_following_pages must be greater than 0."));
    }

    Ok(config)
  }

  pub fn log_level(&self) -> Option<LoggingConfigLevel> {
    self.log_level
  }

  pub fn logging_dir(&self) -> Option<&PathBuf> {
    self.logging_dir.as_ref()
  }

  pub fn logging_filename_prefix(&self) -> &str {
    &self.logging_filename_prefix
  }

  pub fn logging_file_roll_appender(&self) -> &RollingAppenderRotation {
    &self.logging_roll_appender
  }

  pub fn backend_url(&self) -> &str {
    &self.backend_url
  }

  pub fn refresh_interval(&self) -> Duration {
    Duration::from_secs(self.refresh_interval_seconds)
  }

  pub fn page_request_timeout(&self) -> Duration {
    Duration::from_secs(self.page_request_timeout_seconds)
  }

  pub fn max_following_pages(&self) -> usize {
    self.max_following_pages
  }

  pub fn storage_path(&self) -> &PathBuf {
    &self.storage_path
  }

  pub fn displayname(&self) -> Option<&str> {
    self.displayname.as_deref()
  }
}

fn get_config_path() -> PathBuf {
  let Ok(config_path) = std::env::var(CONFIG_PATH_ENV_VAR) else {
    return PathBuf::from(DEFAULT_CONFIG_FILEPATH);
  };

  PathBuf::from(config_path)
}
