#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

use crate::adapters::genai::TextGenerator;
use crate::adapters::mail::Mailer;
use crate::api::ServiceContainer;
use crate::config::Config;
use crate::services::account_service::AccountService;
use crate::services::auth_service::AuthService;
use crate::services::health_service::HealthService;
use crate::services::message_service::MessageService;
use crate::services::suggestion_service::SuggestionService;
use crate::storage::message_repo::MessageRepository;
use crate::storage::user_repo::UserRepository;
use crate::storage::DbPool;
use std::sync::Arc;

/// Runs the embedded migrations against the given pool.
///
/// # Errors
/// Returns an error if any migration fails to apply.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

/// Wires the service layer onto the shared infrastructure handles.
///
/// Pure construction: no I/O happens here. The mailer and generator are
/// injected so tests can substitute recording implementations.
#[must_use]
pub fn build_services(
    config: &Config,
    pool: DbPool,
    mailer: Arc<dyn Mailer>,
    generator: Arc<dyn TextGenerator>,
) -> ServiceContainer {
    let user_repo = UserRepository::new(pool.clone());
    let message_repo = MessageRepository::new(pool.clone());

    let auth_service = AuthService::new(config.auth.clone());
    let account_service = AccountService::new(
        user_repo.clone(),
        auth_service.clone(),
        mailer,
        config.verification.clone(),
    );
    let message_service = MessageService::new(user_repo, message_repo);
    let suggestion_service = SuggestionService::new(generator);
    let health_service = HealthService::new(pool);

    ServiceContainer {
        account_service,
        auth_service,
        message_service,
        suggestion_service,
        health_service,
    }
}

/// Installs a panic hook that routes panics through tracing before aborting
/// the offending task.
pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "panic");
        default_hook(info);
    }));
}

/// Spawns a task that flips the shutdown channel on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: tokio::sync::watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            let _ = tokio::signal::ctrl_c().await;
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                }
                Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
