use crate::domain::message::Message;
use crate::error::Result;
use crate::storage::records::message::MessageRecord;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid, content: &str) -> Result<Message> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r"
            INSERT INTO messages (user_id, content)
            VALUES ($1, $2)
            RETURNING id, user_id, content, created_at
            ",
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    /// Lists a user's messages, most recent first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Message>> {
        let records = sqlx::query_as::<_, MessageRecord>(
            r"
            SELECT id, user_id, content, created_at
            FROM messages
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Deletes one message if it belongs to the given user. Returns whether
    /// a row was removed.
    pub async fn delete_owned(&self, message_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1 AND user_id = $2")
            .bind(message_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
