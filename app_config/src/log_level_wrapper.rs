/// The level the tracing subscriber is configured with.
///
/// Leaving it out of the config disables logging entirely.
#[derive(
  Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LoggingConfigLevel {
  Error,
  Warn,
  #[default]
  Info,
  Debug,
  Trace,
}

impl LoggingConfigLevel {
  /// Levels that are noisier than this one get clamped to this one for the HTTP stack.
  pub fn quieter_of(self, other: Self) -> Self {
    std::cmp::min(self, other)
  }
}

impl AsRef<str> for LoggingConfigLevel {
  fn as_ref(&self) -> &str {
    match self {
      LoggingConfigLevel::Error => "error",
      LoggingConfigLevel::Warn => "warn",
      LoggingConfigLevel::Info => "info",
      LoggingConfigLevel::Debug => "debug",
      LoggingConfigLevel::Trace => "trace",
    }
  }
}

impl std::fmt::Display for LoggingConfigLevel {
  fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(formatter, "{}", self.as_ref())
  }
}
