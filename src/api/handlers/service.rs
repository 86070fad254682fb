use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateServiceRequest, UpdateServiceRequest};
use crate::domain::models::service::Service;
use crate::domain::services::authorization::{can, Action};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_repo.list(&actor.tenant_id).await?;
    Ok(Json(services))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::ManageServices) {
        return Err(AppError::Forbidden("Only admins can manage services".into()));
    }

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Service name is required".into()));
    }
    if payload.price < 0.0 {
        return Err(AppError::Validation("Price cannot be negative".into()));
    }
    if payload.duration_min <= 0 {
        return Err(AppError::Validation("Duration must be positive".into()));
    }

    let mut service = Service::new(actor.tenant_id.clone(), payload.name, payload.price, payload.duration_min);
    service.description = payload.description;
    service.image_url = payload.image_url;

    let created = state.service_repo.create(&service).await?;
    info!("Service created: {}", created.id);
    Ok(Json(created))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(service_id): Path<String>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::ManageServices) {
        return Err(AppError::Forbidden("Only admins can manage services".into()));
    }

    let mut service = state.service_repo.find_by_id(&actor.tenant_id, &service_id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;

    if let Some(name) = payload.name { service.name = name; }
    if let Some(price) = payload.price {
        if price < 0.0 {
            return Err(AppError::Validation("Price cannot be negative".into()));
        }
        service.price = price;
    }
    if let Some(duration) = payload.duration_min {
        if duration <= 0 {
            return Err(AppError::Validation("Duration must be positive".into()));
        }
        service.duration_min = duration;
    }
    if let Some(description) = payload.description { service.description = Some(description); }
    if let Some(image) = payload.image_url { service.image_url = Some(image); }

    let updated = state.service_repo.update(&service).await?;
    info!("Service updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(service_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::ManageServices) {
        return Err(AppError::Forbidden("Only admins can manage services".into()));
    }

    state.service_repo.delete(&actor.tenant_id, &service_id).await?;
    info!("Service deleted: {}", service_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
