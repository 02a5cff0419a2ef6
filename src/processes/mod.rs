pub mod background_service;
pub mod message_bridge;

pub use background_service::{BackgroundService, MessageRequest};
pub use message_bridge::{forward_messages, forward_notifications};
