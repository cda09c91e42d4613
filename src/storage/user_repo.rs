use crate::domain::user::User;
use crate::error::Result;
use crate::storage::records::user::UserRecord;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

/// Fields persisted when a registration is created or retried.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub verify_code: &'a str,
    pub verify_code_expires_at: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts an unverified registration, replacing any stale unverified
    /// rows that hold the contested username or email. Verified rows are
    /// never touched; the caller must reject those as conflicts first.
    pub async fn replace_unverified(&self, new_user: NewUser<'_>) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            DELETE FROM users
            WHERE (username = $1 OR email = $2) AND is_verified = FALSE
            ",
        )
        .bind(new_user.username)
        .bind(new_user.email)
        .execute(&mut *tx)
        .await?;

        let record = sqlx::query_as::<_, UserRecord>(
            r"
            INSERT INTO users (username, email, password_hash, verify_code, verify_code_expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, verify_code,
                      verify_code_expires_at, is_verified, is_accepting_messages, created_at
            ",
        )
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.password_hash)
        .bind(new_user.verify_code)
        .bind(new_user.verify_code_expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record.into())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r"
            SELECT id, username, email, password_hash, verify_code,
                   verify_code_expires_at, is_verified, is_accepting_messages, created_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Looks a user up by username or email, for sign-in.
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r"
            SELECT id, username, email, password_hash, verify_code,
                   verify_code_expires_at, is_verified, is_accepting_messages, created_at
            FROM users
            WHERE username = $1 OR email = $1
            ",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r"
            SELECT id, username, email, password_hash, verify_code,
                   verify_code_expires_at, is_verified, is_accepting_messages, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// A username is taken only when a verified user holds it.
    pub async fn verified_username_exists(&self, username: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 AND is_verified = TRUE)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn verified_email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND is_verified = TRUE)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn mark_verified(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET is_verified = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn set_accepting_messages(&self, id: Uuid, accepting: bool) -> Result<()> {
        sqlx::query("UPDATE users SET is_accepting_messages = $2 WHERE id = $1")
            .bind(id)
            .bind(accepting)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
