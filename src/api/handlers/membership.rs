use axum::{extract::{State, Path}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::state::AppState;
use crate::api::dtos::requests::{CreateMembershipRequest, RenewMembershipRequest, UpdateMembershipRequest};
use crate::api::dtos::responses::SweepResponse;
use crate::domain::services::membership_service::MembershipUpdate;
use crate::error::AppError;

pub async fn create_membership(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateMembershipRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state.membership_service
        .create(&payload.user_id, &payload.plan_id, payload.start_date)
        .await?;
    Ok(Json(created))
}

pub async fn list_memberships(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let memberships = state.membership_service.list().await?;
    Ok(Json(memberships))
}

pub async fn get_membership(
    State(state): State<Arc<AppState>>,
    Path(membership_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let membership = state.membership_service.find_by_id(&membership_id).await?;
    Ok(Json(membership))
}

pub async fn list_user_memberships(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let memberships = state.membership_service.list_by_user(&user_id).await?;
    Ok(Json(memberships))
}

pub async fn update_membership(
    State(state): State<Arc<AppState>>,
    Path(membership_id): Path<String>,
    Json(payload): Json<UpdateMembershipRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.membership_service
        .update(&membership_id, MembershipUpdate {
            status: payload.status,
            end_date: payload.end_date,
            plan_id: payload.plan_id,
        })
        .await?;
    Ok(Json(updated))
}

pub async fn renew_membership(
    State(state): State<Arc<AppState>>,
    Path(membership_id): Path<String>,
    Json(payload): Json<RenewMembershipRequest>,
) -> Result<impl IntoResponse, AppError> {
    let renewed = state.membership_service.renew(&membership_id, payload.extra_days).await?;
    Ok(Json(renewed))
}

pub async fn delete_membership(
    State(state): State<Arc<AppState>>,
    Path(membership_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.membership_service.remove(&membership_id).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn sweep_expired(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.membership_service.sweep_expired().await?;
    Ok(Json(SweepResponse { updated }))
}

pub async fn preview_expiring(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let candidates = state.membership_service.preview_expiring().await?;
    Ok(Json(candidates))
}
