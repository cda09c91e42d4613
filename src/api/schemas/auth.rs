use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SignUp {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct VerifyCode {
    pub username: String,
    pub code: String,
}

#[derive(Deserialize)]
pub struct SignIn {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub expires_at: i64,
}
