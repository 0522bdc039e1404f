//! HTTP API Layer
//!
//! This crate serves one protection policy over REST using Axum. Every
//! mutating route maps onto a `PolicyService` operation; the caller is the
//! party named by the bearer token and the policy decides what it may do.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for policy, commission and claim routes
//! - **Middleware**: Authentication, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Domain error kinds mapped onto status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let service = PolicyService::new(policy, SettlementBook::new(currency));
//! let app = create_router(AppState::new(service, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_billing::SettlementBook;
use domain_policy::PolicyService;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{claims, commissions, health, policy};

/// The policy service as shared by handlers
pub type SharedService = Arc<Mutex<PolicyService<SettlementBook>>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: SharedService,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(service: PolicyService<SettlementBook>, config: ApiConfig) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Served policy and API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check));

    // Policy routes
    let policy_routes = Router::new()
        .route("/", get(policy::get_summary))
        .route("/finalize", post(policy::finalize_policy))
        .route("/commissions", put(commissions::set_commissions))
        .route("/donation", put(commissions::change_donation))
        .route("/commissions/split", post(commissions::split_commissions))
        .route("/commissions/agent/payout", post(commissions::pay_agent))
        .route("/commissions/broker/payout", post(commissions::pay_broker))
        .route("/claims", post(claims::file_claim))
        .route("/claims/:id", get(claims::get_claim))
        .route("/claims/:id/documentation", put(claims::update_documentation));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/policy", policy_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
