use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;
use crate::api::dtos::requests::CreatePaymentRequest;
use crate::domain::models::payment::{NewPaymentParams, Payment};
use crate::error::AppError;

const METHODS: [&str; 4] = ["CASH", "CARD", "TRANSFER", "STRIPE"];
const STATUSES: [&str; 4] = ["PENDING", "PAID", "FAILED", "REFUNDED"];

pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.amount <= 0.0 {
        return Err(AppError::Validation("amount must be positive".into()));
    }
    if !METHODS.contains(&payload.method.as_str()) {
        return Err(AppError::Validation(format!("Unknown payment method: {}", payload.method)));
    }
    if let Some(ref status) = payload.status {
        if !STATUSES.contains(&status.as_str()) {
            return Err(AppError::Validation(format!("Unknown payment status: {}", status)));
        }
    }

    state.user_repo.find_by_id(&payload.user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if let Some(ref membership_id) = payload.membership_id {
        state.membership_repo.find_by_id(membership_id).await?
            .ok_or(AppError::NotFound("Membership not found".into()))?;
    }

    let payment = Payment::new(NewPaymentParams {
        user_id: payload.user_id,
        membership_id: payload.membership_id,
        amount: payload.amount,
        currency: payload.currency,
        method: payload.method,
        status: payload.status,
        paid_at: payload.paid_at,
    });
    let created = state.payment_repo.create(&payment).await?;

    info!("Payment recorded: {} ({} {})", created.id, created.amount, created.currency);
    Ok(Json(created))
}

pub async fn list_payments(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let payments = state.payment_repo.list().await?;
    Ok(Json(payments))
}
