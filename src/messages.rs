//! The messages exchanged with whatever is driving the background service.

use crate::errors::AppError;
use serde::Serialize;
use serde_json::Value;

pub const UPDATE_USER_INFO_MESSAGE: &str = "UPDATE_USER_INFO";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundMessage {
  UpdateUserInfo,
}

impl InboundMessage {
  /// Reads the `kind` field of a message. Every other field is ignored.
  pub fn from_value(message: &Value) -> Result<Self, AppError> {
    let Some(kind) = message.get("kind").and_then(Value::as_str) else {
      return Err(AppError::MalformedMessage(message.to_string()));
    };

    match kind {
      UPDATE_USER_INFO_MESSAGE => Ok(Self::UpdateUserInfo),
      unknown_kind => Err(AppError::UnknownMessageKind(unknown_kind.to_owned())),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum OutboundMessage {
  #[serde(rename = "USER_INFO_UPDATED")]
  UserInfoUpdated,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn update_user_info_is_recognized() {
    let message = json!({ "kind": "UPDATE_USER_INFO", "extra": 1 });

    assert_eq!(
      InboundMessage::from_value(&message).unwrap(),
      InboundMessage::UpdateUserInfo
    );
  }

  #[test]
  fn unknown_kind_is_reported_by_name() {
    let result = InboundMessage::from_value(&json!({ "kind": "UNKNOWN" }));

    assert!(matches!(result, Err(AppError::UnknownMessageKind(kind)) if kind == "UNKNOWN"));
  }

  #[test]
  fn kind_must_be_a_string() {
    assert!(matches!(
      InboundMessage::from_value(&json!({ "kind": 5 })),
      Err(AppError::MalformedMessage(_))
    ));
    assert!(matches!(
      InboundMessage::from_value(&json!("UPDATE_USER_INFO")),
      Err(AppError::MalformedMessage(_))
    ));
  }

  #[test]
  fn user_info_updated_has_no_payload() {
    let serialized = serde_json::to_string(&OutboundMessage::UserInfoUpdated).unwrap();

    assert_eq!(serialized, r#"{"kind":"USER_INFO_UPDATED"}"#);
  }
}
