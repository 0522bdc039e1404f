//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::Money;

use crate::auth::Caller;
use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Files a first notice of loss against the policy balance
pub async fn file_claim(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<FnolRequest>,
) -> Result<(StatusCode, Json<FnolResponse>), ApiError> {
    let mut service = state.service.lock().await;
    let claim_value = Money::from_minor(request.claim_value, service.policy().currency());
    let deducted = service.fnol(&caller, request.internal_id, claim_value)?;

    let response = FnolResponse {
        internal_id: request.internal_id,
        deducted: deducted.amount(),
        policy_balance: service.policy().policy_balance().amount(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Gets a claim by internal ID
///
/// Unknown ids read as an all-false record with id 0.
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Json<ClaimResponse> {
    let service = state.service.lock().await;
    Json(ClaimResponse::new(service.policy(), id))
}

/// Replaces the documentation flags of a filed claim
pub async fn update_documentation(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Path(id): Path<u64>,
    Json(request): Json<DocumentationRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let mut service = state.service.lock().await;
    service.set_claim_documentation_work_flow(&caller, id, request.into())?;
    Ok(Json(ClaimResponse::new(service.policy(), id)))
}
