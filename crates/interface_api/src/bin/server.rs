//! Device Protection Policy - API Server Binary
//!
//! Issues the configured policy at startup and serves it over HTTP.
//!
//! # Usage
//!
//! ```bash
//! POLICY_CUSTOMER=... POLICY_AGENT=... POLICY_BROKER=... POLICY_ADMIN=... \
//! POLICY_INSURED_NAME="Alex Silva" POLICY_INSURED_AGE=88 \
//! POLICY_COVERAGE_VALUE=2280 POLICY_INITIAL_BALANCE=342 POLICY_DEDUCTIBLE=70 \
//! POLICY_DEVICE_MODEL="Samsung Galaxy S7" cargo run --bin policy-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_JSON` - Emit JSON log lines (default: false)
//! * `POLICY_*` - Policy terms, see `PolicyConfig`

use anyhow::Context;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_billing::SettlementBook;
use domain_policy::PolicyService;
use interface_api::{
    config::{ApiConfig, PolicyConfig},
    create_router, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("loading API configuration")?;

    init_tracing(&config.log_level, config.log_json);

    let policy = PolicyConfig::from_env()
        .context("loading POLICY_* configuration")?
        .issue()
        .context("issuing policy")?;

    tracing::info!(
        policy_id = %policy.id(),
        policy_number = %policy.policy_number(),
        host = %config.host,
        port = %config.port,
        "Starting policy API server"
    );

    let book = SettlementBook::new(policy.currency());
    let mut service = PolicyService::new(policy, book);
    service.subscribe(|event| {
        tracing::info!(
            policy_id = %event.policy_id(),
            event_type = event.event_type(),
            "Policy event"
        );
    });
    service.flush_events();

    let addr: SocketAddr = config.server_addr().parse()?;
    let app = create_router(AppState::new(service, config));

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber
///
/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().with_target(true)).init();
    }
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
