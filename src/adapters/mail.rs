use crate::config::SmtpConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Outbound email seam. Implementations report success or failure only;
/// there is no delivery tracking.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug {
    async fn send_verification(&self, to: &str, username: &str, code: &str) -> Result<()>;
}

/// SMTP-backed mailer built once at boot from config.
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// # Errors
    /// Fails if the relay host or sender address is malformed.
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        let from = format!("{} <{}>", config.from_name, config.from_address).parse()?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[tracing::instrument(skip(self, to, code), fields(username = %username), err(level = "warn"))]
    async fn send_verification(&self, to: &str, username: &str, code: &str) -> Result<()> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|_| AppError::Validation("Invalid email address".to_string()))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject("Whisperbox verification code")
            .header(ContentType::TEXT_HTML)
            .body(render_verification_email(username, code))
            .map_err(|e| AppError::Upstream(format!("Failed to build verification email: {e}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to send verification email: {e}")))?;

        tracing::info!("Verification email dispatched");
        Ok(())
    }
}

fn render_verification_email(username: &str, code: &str) -> String {
    format!(
        r#"<html>
  <body style="font-family: Helvetica, Arial, sans-serif; color: #222;">
    <h2>Hello {username},</h2>
    <p>Thank you for registering. Use the following code to verify your account:</p>
    <p style="font-size: 24px; font-weight: bold; letter-spacing: 4px;">{code}</p>
    <p>This code expires in one hour. If you did not request this, you can ignore this email.</p>
  </body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_embeds_name_and_code() {
        let body = render_verification_email("alice", "123456");
        assert!(body.contains("alice"));
        assert!(body.contains("123456"));
    }
}
