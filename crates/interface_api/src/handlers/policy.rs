//! Policy handlers

use axum::{extract::State, Extension, Json};

use crate::auth::Caller;
use crate::dto::policy::PolicySummaryResponse;
use crate::{error::ApiError, AppState};

/// Returns the policy snapshot; readable by any authenticated caller
pub async fn get_summary(State(state): State<AppState>) -> Json<PolicySummaryResponse> {
    let service = state.service.lock().await;
    Json(PolicySummaryResponse::from(service.policy()))
}

/// Finalizes the policy
pub async fn finalize_policy(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
) -> Result<Json<PolicySummaryResponse>, ApiError> {
    let mut service = state.service.lock().await;
    service.finalize_policy(&caller)?;
    Ok(Json(PolicySummaryResponse::from(service.policy())))
}
