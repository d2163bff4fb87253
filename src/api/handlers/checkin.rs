use axum::{extract::{State, Path}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::state::AppState;
use crate::api::dtos::requests::CreateCheckinRequest;
use crate::error::AppError;

pub async fn create_checkin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCheckinRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = payload.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::Validation("user_id must not be empty".into()));
    }

    let checkin = state.checkin_service.record_admission(user_id, payload.notes).await?;
    Ok(Json(checkin))
}

pub async fn list_checkins(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let checkins = state.checkin_service.find_recent().await?;
    Ok(Json(checkins))
}

pub async fn today_checkins(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let checkins = state.checkin_service.find_today().await?;
    Ok(Json(checkins))
}

pub async fn user_checkins(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let checkins = state.checkin_service.find_by_user(&user_id).await?;
    Ok(Json(checkins))
}
