use axum::{extract::{State, Path}, response::IntoResponse, Json};
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

use crate::state::AppState;
use crate::api::dtos::requests::{CreateUserRequest, UpdateUserRequest};
use crate::domain::models::user::User;
use crate::error::AppError;

const ROLES: [&str; 3] = ["ADMIN", "STAFF", "CLIENT"];

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("email must not be empty".into()));
    }
    if let Some(ref role) = payload.role {
        if !ROLES.contains(&role.as_str()) {
            return Err(AppError::Validation(format!("Unknown role: {}", role)));
        }
    }

    if state.user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let user = User::new(payload.email, payload.name, payload.role);
    let created = state.user_repo.create(&user).await?;

    info!("User created: {} ({})", created.id, created.email);
    Ok(Json(created))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.user_repo.list().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut user = state.user_repo.find_by_id(&user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    if let Some(email) = payload.email {
        if email.trim().is_empty() {
            return Err(AppError::Validation("email must not be empty".into()));
        }
        user.email = email;
    }
    if let Some(name) = payload.name { user.name = name; }
    if let Some(role) = payload.role {
        if !ROLES.contains(&role.as_str()) {
            return Err(AppError::Validation(format!("Unknown role: {}", role)));
        }
        user.role = role;
    }
    if let Some(active) = payload.active { user.active = active; }
    user.updated_at = Utc::now();

    let updated = state.user_repo.update(&user).await?;
    info!("User updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.user_repo.delete(&user_id).await?;
    info!("User deleted: {}", user_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
