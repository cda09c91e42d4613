pub mod auth;
pub mod health;
pub mod messages;
pub mod suggestions;
pub mod users;

use serde::Serialize;

/// Minimal success envelope shared by endpoints that return no payload.
#[derive(Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }
}
