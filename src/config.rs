use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Database connection URL
    #[arg(long, env = "WHISPERBOX_DATABASE_URL")]
    pub database_url: String,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub auth: AuthConfig,

    #[command(flatten)]
    pub verification: VerificationConfig,

    #[command(flatten)]
    pub rate_limit: RateLimitConfig,

    #[command(flatten)]
    pub smtp: SmtpConfig,

    #[command(flatten)]
    pub genai: GenAiConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "WHISPERBOX_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "WHISPERBOX_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management endpoints (livez/readyz)
    #[arg(long, env = "WHISPERBOX_MGMT_PORT", default_value_t = 3001)]
    pub mgmt_port: u16,
}

#[derive(Clone, Debug, Args)]
pub struct AuthConfig {
    /// Secret key for JWT signing
    #[arg(long, env = "WHISPERBOX_JWT_SECRET")]
    pub jwt_secret: String,

    /// Access token time-to-live in seconds
    #[arg(long, env = "WHISPERBOX_ACCESS_TOKEN_TTL_SECS", default_value_t = 86_400)]
    pub access_token_ttl_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct VerificationConfig {
    /// How long an issued verification code stays valid
    #[arg(long, env = "WHISPERBOX_VERIFY_CODE_TTL_SECS", default_value_t = 3600)]
    pub code_ttl_secs: i64,
}

#[derive(Clone, Debug, Args)]
pub struct RateLimitConfig {
    /// Requests per second allowed for standard endpoints
    #[arg(long, env = "WHISPERBOX_RATE_LIMIT_PER_SECOND", default_value_t = 10)]
    pub per_second: u32,

    /// Burst allowance for standard endpoints
    #[arg(long, env = "WHISPERBOX_RATE_LIMIT_BURST", default_value_t = 20)]
    pub burst: u32,

    /// Stricter rate limit for sign-up, sign-in, and code verification
    #[arg(long, env = "WHISPERBOX_AUTH_RATE_LIMIT_PER_SECOND", default_value_t = 1)]
    pub auth_per_second: u32,

    /// Burst allowance for the auth tier
    #[arg(long, env = "WHISPERBOX_AUTH_RATE_LIMIT_BURST", default_value_t = 3)]
    pub auth_burst: u32,
}

#[derive(Clone, Debug, Args)]
pub struct SmtpConfig {
    /// SMTP relay host
    #[arg(long, env = "WHISPERBOX_SMTP_HOST")]
    pub smtp_host: String,

    /// SMTP relay port
    #[arg(long, env = "WHISPERBOX_SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP username
    #[arg(long, env = "WHISPERBOX_SMTP_USERNAME")]
    pub smtp_username: String,

    /// SMTP password
    #[arg(long, env = "WHISPERBOX_SMTP_PASSWORD")]
    pub smtp_password: String,

    /// Sender address for verification emails
    #[arg(long, env = "WHISPERBOX_SMTP_FROM", default_value = "no-reply@whisperbox.app")]
    pub from_address: String,

    /// Display name used in the From header
    #[arg(long, env = "WHISPERBOX_SMTP_FROM_NAME", default_value = "Whisperbox")]
    pub from_name: String,
}

#[derive(Clone, Debug, Args)]
pub struct GenAiConfig {
    /// API key for the generative-text service. Startup fails without it.
    #[arg(long, env = "WHISPERBOX_GENAI_API_KEY")]
    pub api_key: String,

    /// Model used for suggestion generation
    #[arg(long, env = "WHISPERBOX_GENAI_MODEL", default_value = "gemini-pro")]
    pub model: String,

    /// Base URL of the generative-text API
    #[arg(
        long,
        env = "WHISPERBOX_GENAI_ENDPOINT",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub endpoint: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// OTLP endpoint for traces and metrics. Disabled when unset.
    #[arg(long, env = "WHISPERBOX_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "WHISPERBOX_LOG_FORMAT", value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

impl Config {
    pub fn load() -> Self {
        Self::parse()
    }
}
