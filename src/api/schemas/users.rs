use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAcceptMessages {
    pub accept_messages: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptMessagesResponse {
    pub success: bool,
    pub is_accepting_messages: bool,
}
