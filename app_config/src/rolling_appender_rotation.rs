use anyhow::anyhow;
use std::{path::Path, str::FromStr};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

const LOG_FILE_SUFFIX: &str = "log";

/// How often the log file is rolled over when logging to a directory.
///
/// Parsed leniently from the config file. Anything unrecognized is kept around as
/// [`Unknown`](RollingAppenderRotation::Unknown) so the error can report what was written.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RollingAppenderRotation {
  Minutely,
  Hourly,

  #[default]
  Daily,
  Never,

  /// Contains the unknown value used.
  Unknown(String),
}

impl RollingAppenderRotation {
  pub fn to_file_appender(
    &self,
    logging_dir: &Path,
    filename_prefix: &str,
  ) -> anyhow::Result<RollingFileAppender> {
    let rotation = match self {
      Self::Minutely => Rotation::MINUTELY,
      Self::Hourly => Rotation::HOURLY,
      Self::Daily => Rotation::DAILY,
      Self::Never => Rotation::NEVER,
      Self::Unknown(value) => {
        return Err(anyhow!(
          "Unknown rolling file appender configuration: {:?}",
          value
        ))
      }
    };

    RollingFileAppender::builder()
      .rotation(rotation)
      .filename_prefix(filename_prefix)
      .filename_suffix(LOG_FILE_SUFFIX)
      .build(logging_dir)
      .map_err(|error| anyhow!("Failed to create the log file appender: {}", error))
  }
}

impl<S> From<S> for RollingAppenderRotation
where
  S: AsRef<str>,
{
  fn from(appender_rotation_value: S) -> Self {
    match appender_rotation_value.as_ref().to_lowercase().trim() {
      "minute" | "minutely" | "minutes" => Self::Minutely,
      "hour" | "hourly" | "hours" => Self::Hourly,
      "day" | "daily" | "days" => Self::Daily,
      "never" | "none" => Self::Never,
      _ => Self::Unknown(appender_rotation_value.as_ref().to_string()),
    }
  }
}

impl From<RollingAppenderRotation> for String {
  fn from(rotation: RollingAppenderRotation) -> Self {
    match rotation {
      RollingAppenderRotation::Minutely => "minutely".to_string(),
      RollingAppenderRotation::Hourly => "hourly".to_string(),
      RollingAppenderRotation::Daily => "daily".to_string(),
      RollingAppenderRotation::Never => "never".to_string(),
      RollingAppenderRotation::Unknown(value) => value,
    }
  }
}

impl FromStr for RollingAppenderRotation {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::from(s))
  }
}
