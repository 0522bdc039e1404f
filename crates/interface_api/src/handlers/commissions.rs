//! Commission handlers

use axum::{extract::State, Extension, Json};

use core_kernel::{Money, Percent};

use crate::auth::Caller;
use crate::dto::commissions::*;
use crate::dto::policy::PolicySummaryResponse;
use crate::{error::ApiError, AppState};

/// Sets the broker and agent fee percentages
pub async fn set_commissions(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<SetCommissionsRequest>,
) -> Result<Json<PolicySummaryResponse>, ApiError> {
    let mut service = state.service.lock().await;
    service.set_fee_commissions_percent(
        &caller,
        Percent::new(request.broker_percent),
        Percent::new(request.agent_percent),
    )?;
    Ok(Json(PolicySummaryResponse::from(service.policy())))
}

/// Changes the donation percentage
pub async fn change_donation(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<ChangeDonationRequest>,
) -> Result<Json<PolicySummaryResponse>, ApiError> {
    let mut service = state.service.lock().await;
    service.change_donation_value(&caller, Percent::new(request.donation_percent))?;
    Ok(Json(PolicySummaryResponse::from(service.policy())))
}

/// Splits an external payment into fees and donation
pub async fn split_commissions(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
    Json(request): Json<SplitRequest>,
) -> Result<Json<SplitResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let amount = Money::from_minor(request.amount, service.policy().currency());
    let split = service.split_commissions_with_external_money(&caller, amount)?;
    Ok(Json(SplitResponse::from(split)))
}

/// Pays the agent's share of the current split
pub async fn pay_agent(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
) -> Result<Json<PayoutResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let receipt = service.send_commission_splited_agent(&caller)?;
    Ok(Json(PayoutResponse::from(receipt)))
}

/// Pays the broker's share of the current split
pub async fn pay_broker(
    State(state): State<AppState>,
    Extension(Caller(caller)): Extension<Caller>,
) -> Result<Json<PayoutResponse>, ApiError> {
    let mut service = state.service.lock().await;
    let receipt = service.send_commission_splited_broker(&caller)?;
    Ok(Json(PayoutResponse::from(receipt)))
}
