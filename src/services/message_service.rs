use crate::domain::message::Message;
use crate::error::{AppError, Result};
use crate::storage::message_repo::MessageRepository;
use crate::storage::user_repo::UserRepository;
use opentelemetry::{KeyValue, global, metrics::Counter};
use uuid::Uuid;

#[derive(Clone, Debug)]
struct Metrics {
    sent_total: Counter<u64>,
    deleted_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("whisperbox-server");
        Self {
            sent_total: meter
                .u64_counter("whisperbox_messages_sent_total")
                .with_description("Total anonymous messages accepted or rejected at intake")
                .build(),
            deleted_total: meter
                .u64_counter("whisperbox_messages_deleted_total")
                .with_description("Total messages deleted by their owner")
                .build(),
        }
    }
}

/// Anonymous message intake plus the owner-facing list/delete operations.
#[derive(Clone, Debug)]
pub struct MessageService {
    user_repo: UserRepository,
    message_repo: MessageRepository,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(user_repo: UserRepository, message_repo: MessageRepository) -> Self {
        Self { user_repo, message_repo, metrics: Metrics::new() }
    }

    /// Appends an anonymous message to the target user's inbox.
    ///
    /// # Errors
    /// `AppError::NotFound` if the target does not exist; `AppError::Forbidden`
    /// if the target is not accepting messages.
    #[tracing::instrument(skip(self, content), fields(username = %username), err(level = "warn"))]
    pub async fn send_to_username(&self, username: &str, content: &str) -> Result<Message> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !user.is_accepting_messages {
            self.metrics.sent_total.add(1, &[KeyValue::new("status", "rejected")]);
            return Err(AppError::Forbidden("User is not accepting messages".to_string()));
        }

        let message = self.message_repo.create(user.id, content).await?;
        tracing::debug!(message_id = %message.id, "Message stored");
        self.metrics.sent_total.add(1, &[KeyValue::new("status", "accepted")]);

        Ok(message)
    }

    /// Lists the caller's messages, most recent first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Message>> {
        self.message_repo.list_for_user(user_id).await
    }

    /// Deletes one of the caller's messages.
    ///
    /// # Errors
    /// `AppError::NotFound` if the message does not exist or belongs to
    /// someone else.
    #[tracing::instrument(skip(self), fields(user_id = %user_id, message_id = %message_id), err(level = "warn"))]
    pub async fn delete_message(&self, user_id: Uuid, message_id: Uuid) -> Result<()> {
        let removed = self.message_repo.delete_owned(message_id, user_id).await?;
        if !removed {
            return Err(AppError::NotFound("Message not found".to_string()));
        }

        self.metrics.deleted_total.add(1, &[]);
        Ok(())
    }
}
