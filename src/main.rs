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

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::Instrument;
use whisperbox_server::adapters::genai::GeminiClient;
use whisperbox_server::adapters::mail::SmtpMailer;
use whisperbox_server::api::MgmtState;
use whisperbox_server::config::Config;
use whisperbox_server::{storage, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    whisperbox_server::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (api_listener, mgmt_listener, app_router, mgmt_app, shutdown_tx) = async {
        // Phase 1: Infrastructure (process-scoped clients, initialized once)
        let pool = storage::init_pool(&config.database_url).await?;
        whisperbox_server::run_migrations(&pool).await?;

        let (shutdown_tx, _) = watch::channel(false);
        whisperbox_server::spawn_signal_handler(shutdown_tx.clone());

        let mailer = Arc::new(SmtpMailer::new(&config.smtp)?);
        let generator = Arc::new(GeminiClient::new(&config.genai));

        // Phase 2: Component wiring (pure, no side effects)
        let services = whisperbox_server::build_services(&config, pool, mailer, generator);
        let health_service = services.health_service.clone();

        // Phase 3: Listeners and routers
        let app_router = whisperbox_server::api::app_router(config.clone(), services);
        let mgmt_app = whisperbox_server::api::mgmt_router(MgmtState { health_service });

        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        tracing::info!(address = %api_addr, "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        Ok::<_, anyhow::Error>((api_listener, mgmt_listener, app_router, mgmt_app, shutdown_tx))
    }
    .instrument(boot_span)
    .await?;

    // Phase 4: Serve until the shutdown channel flips
    let mut api_rx = shutdown_tx.subscribe();
    let api_server = axum::serve(api_listener, app_router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            let _ = api_rx.wait_for(|&s| s).await;
        });

    let mut mgmt_rx = shutdown_tx.subscribe();
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move {
            let _ = mgmt_rx.wait_for(|&s| s).await;
        });

    if let Err(e) = tokio::try_join!(api_server, mgmt_server) {
        tracing::error!(error = %e, "Server error");
    }

    let _ = shutdown_tx.send(true);
    telemetry_guard.shutdown();
    Ok(())
}
