use axum::{extract::{State, Path}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;
use crate::api::dtos::requests::{CreatePlanRequest, UpdatePlanRequest};
use crate::domain::models::plan::MembershipPlan;
use crate::error::AppError;

pub async fn create_plan(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.price < 0.0 {
        return Err(AppError::Validation("price must not be negative".into()));
    }
    if payload.duration_days <= 0 {
        return Err(AppError::Validation("duration_days must be positive".into()));
    }

    let plan = MembershipPlan::new(payload.name, payload.price, payload.duration_days, payload.currency);
    let created = state.plan_repo.create(&plan).await?;

    info!("Membership plan created: {} ({})", created.id, created.name);
    Ok(Json(created))
}

pub async fn list_plans(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let plans = state.plan_repo.list().await?;
    Ok(Json(plans))
}

pub async fn get_plan(
    State(state): State<Arc<AppState>>,
    Path(plan_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let plan = state.plan_repo.find_by_id(&plan_id).await?
        .ok_or(AppError::NotFound("Membership plan not found".into()))?;
    Ok(Json(plan))
}

pub async fn update_plan(
    State(state): State<Arc<AppState>>,
    Path(plan_id): Path<String>,
    Json(payload): Json<UpdatePlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut plan = state.plan_repo.find_by_id(&plan_id).await?
        .ok_or(AppError::NotFound("Membership plan not found".into()))?;

    if let Some(name) = payload.name { plan.name = name; }
    if let Some(price) = payload.price {
        if price < 0.0 {
            return Err(AppError::Validation("price must not be negative".into()));
        }
        plan.price = price;
    }
    if let Some(duration_days) = payload.duration_days {
        if duration_days <= 0 {
            return Err(AppError::Validation("duration_days must be positive".into()));
        }
        plan.duration_days = duration_days;
    }
    if let Some(currency) = payload.currency { plan.currency = currency; }
    if let Some(active) = payload.active { plan.active = active; }

    let updated = state.plan_repo.update(&plan).await?;
    info!("Membership plan updated: {}", updated.id);
    Ok(Json(updated))
}
