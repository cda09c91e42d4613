use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub verify_code: String,
    pub verify_code_expires_at: OffsetDateTime,
    pub is_verified: bool,
    pub is_accepting_messages: bool,
    pub created_at: Option<OffsetDateTime>,
}
