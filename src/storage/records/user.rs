use crate::domain::user::User;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub(crate) struct UserRecord {
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

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            password_hash: record.password_hash,
            verify_code: record.verify_code,
            verify_code_expires_at: record.verify_code_expires_at,
            is_verified: record.is_verified,
            is_accepting_messages: record.is_accepting_messages,
            created_at: record.created_at,
        }
    }
}
