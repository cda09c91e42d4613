use crate::adapters::mail::Mailer;
use crate::config::VerificationConfig;
use crate::domain::verification::{self, VerificationOutcome};
use crate::error::{AppError, Result};
use crate::services::auth_service::{AuthService, Session};
use crate::storage::user_repo::{NewUser, UserRepository};
use opentelemetry::{global, metrics::Counter};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};

#[derive(Clone, Debug)]
struct AccountMetrics {
    registrations_total: Counter<u64>,
    verifications_total: Counter<u64>,
}

impl AccountMetrics {
    fn new() -> Self {
        let meter = global::meter("whisperbox-server");
        Self {
            registrations_total: meter
                .u64_counter("whisperbox_registrations_total")
                .with_description("Total number of registrations persisted")
                .build(),
            verifications_total: meter
                .u64_counter("whisperbox_verifications_total")
                .with_description("Total number of accounts verified")
                .build(),
        }
    }
}

/// Account lifecycle: registration, verification, sign-in, and the
/// message-acceptance flag.
#[derive(Clone, Debug)]
pub struct AccountService {
    user_repo: UserRepository,
    auth_service: AuthService,
    mailer: Arc<dyn Mailer>,
    config: VerificationConfig,
    metrics: AccountMetrics,
}

impl AccountService {
    #[must_use]
    pub fn new(
        user_repo: UserRepository,
        auth_service: AuthService,
        mailer: Arc<dyn Mailer>,
        config: VerificationConfig,
    ) -> Self {
        Self { user_repo, auth_service, mailer, config, metrics: AccountMetrics::new() }
    }

    /// Registers a new account and dispatches its verification code.
    ///
    /// A username or email held by a *verified* user is a conflict; stale
    /// unverified rows are replaced so a registration can be retried. The
    /// record is persisted before the email goes out, and a send failure is
    /// surfaced without rolling the record back.
    #[tracing::instrument(
        skip(self, email, password),
        fields(username = %username),
        err(level = "warn")
    )]
    pub async fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<()> {
        if self.user_repo.verified_username_exists(username).await? {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }
        if self.user_repo.verified_email_exists(email).await? {
            return Err(AppError::Conflict("An account with this email already exists".to_string()));
        }

        let password_hash = self.auth_service.hash_password(password).await?;
        let verify_code = verification::generate_code();
        let expires_at = OffsetDateTime::now_utc() + Duration::seconds(self.config.code_ttl_secs);

        let user = self
            .user_repo
            .replace_unverified(NewUser {
                username,
                email,
                password_hash: &password_hash,
                verify_code: &verify_code,
                verify_code_expires_at: expires_at,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Registration persisted");
        self.metrics.registrations_total.add(1, &[]);

        self.mailer.send_verification(email, username, &verify_code).await
    }

    /// Checks a submitted verification code and marks the account verified
    /// on success.
    #[tracing::instrument(skip(self, code), fields(username = %username), err(level = "warn"))]
    pub async fn verify_code(&self, username: &str, code: &str) -> Result<()> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let outcome = verification::check_code(
            &user.verify_code,
            code,
            user.verify_code_expires_at,
            OffsetDateTime::now_utc(),
        );

        match outcome {
            VerificationOutcome::Verified => {
                self.user_repo.mark_verified(user.id).await?;
                tracing::info!(user_id = %user.id, "Account verified");
                self.metrics.verifications_total.add(1, &[]);
                Ok(())
            }
            VerificationOutcome::CodeExpired => Err(AppError::Validation(
                "Verification code has expired. Please sign up again to get a new code".to_string(),
            )),
            VerificationOutcome::CodeMismatch => {
                Err(AppError::Validation("Incorrect verification code".to_string()))
            }
        }
    }

    /// Signs a verified user in by username or email.
    #[tracing::instrument(skip(self, identifier, password), fields(user_id = tracing::field::Empty), err(level = "warn"))]
    pub async fn sign_in(&self, identifier: &str, password: &str) -> Result<Session> {
        let user = match self.user_repo.find_by_identifier(identifier).await? {
            Some(u) => u,
            None => {
                tracing::warn!("Sign-in failed: user not found");
                return Err(AppError::AuthError);
            }
        };

        tracing::Span::current().record("user_id", tracing::field::display(user.id));

        let is_valid = self.auth_service.verify_password(password, &user.password_hash).await?;
        if !is_valid {
            tracing::warn!("Sign-in failed: invalid password");
            return Err(AppError::AuthError);
        }

        if !user.is_verified {
            return Err(AppError::Forbidden(
                "Please verify your account before signing in".to_string(),
            ));
        }

        let session = self.auth_service.create_session(user.id)?;
        tracing::info!("User signed in");
        Ok(session)
    }

    /// Returns whether a verified user already holds the username.
    pub async fn is_username_taken(&self, username: &str) -> Result<bool> {
        self.user_repo.verified_username_exists(username).await
    }

    pub async fn is_accepting_messages(&self, user_id: uuid::Uuid) -> Result<bool> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.is_accepting_messages)
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id), err(level = "warn"))]
    pub async fn set_accepting_messages(&self, user_id: uuid::Uuid, accepting: bool) -> Result<()> {
        // Confirm the user still exists so a deleted account surfaces as 404
        // rather than a silent no-op.
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.user_repo.set_accepting_messages(user_id, accepting).await?;
        tracing::info!(accepting, "Acceptance flag updated");
        Ok(())
    }
}
