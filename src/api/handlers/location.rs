use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateLocationRequest, UpdateLocationRequest};
use crate::domain::models::location::{Location, WeeklyHours};
use crate::domain::services::authorization::{can, Action};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn list_locations(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let locations = state.location_repo.list_active(&actor.tenant_id).await?;
    Ok(Json(locations))
}

pub async fn create_location(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::ManageLocations) {
        return Err(AppError::Forbidden("Only admins can manage locations".into()));
    }

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Location name is required".into()));
    }

    let tenant = state.tenant_repo.find_by_id(&actor.tenant_id).await?
        .ok_or(AppError::NotFound("Barbershop not found".into()))?;

    let schedule = payload.schedule.unwrap_or_else(WeeklyHours::default_business_week);
    let mut location = Location::new(actor.tenant_id.clone(), payload.name, &schedule);
    location.address = payload.address;
    location.phone = payload.phone;
    location.email = payload.email;

    // The repository re-checks the quota inside its insert transaction.
    let created = match state.location_repo.create(&location, tenant.plan).await {
        Ok(loc) => loc,
        Err(e @ AppError::QuotaExceeded(_)) => {
            warn!("Location creation blocked by plan limit for tenant {}", actor.tenant_id);
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    info!("Location created: {}", created.id);
    Ok(Json(created))
}

/// Resolves archived locations too: historical appointments keep pointing at
/// them. Assigned barbers ride along for the detail view.
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(location_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let location = state.location_repo.find_by_id(&actor.tenant_id, &location_id).await?
        .ok_or(AppError::NotFound("Location not found".into()))?;

    let barbers = state.account_repo.list_barbers_by_location(&actor.tenant_id, &location.id).await?;
    let barber_views: Vec<_> = barbers.iter()
        .filter(|b| b.active)
        .map(|b| serde_json::json!({
            "id": b.id,
            "name": b.name,
            "photo_url": b.photo_url,
        }))
        .collect();

    Ok(Json(serde_json::json!({
        "location": location,
        "barbers": barber_views,
    })))
}

pub async fn update_location(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(location_id): Path<String>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::ManageLocations) {
        return Err(AppError::Forbidden("Only admins can manage locations".into()));
    }

    let mut location = state.location_repo.find_by_id(&actor.tenant_id, &location_id).await?
        .ok_or(AppError::NotFound("Location not found".into()))?;

    if let Some(name) = payload.name { location.name = name; }
    if let Some(address) = payload.address { location.address = Some(address); }
    if let Some(phone) = payload.phone { location.phone = Some(phone); }
    if let Some(email) = payload.email { location.email = Some(email); }
    if let Some(schedule) = payload.schedule {
        location.schedule_json = serde_json::to_string(&schedule)
            .map_err(|_| AppError::Validation("Invalid schedule".into()))?;
    }

    let updated = state.location_repo.update(&location).await?;
    info!("Location updated: {}", updated.id);
    Ok(Json(updated))
}

/// Soft archival: the row survives, active listings drop it, and existing
/// appointments and barber assignments are left untouched.
pub async fn archive_location(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(location_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::ManageLocations) {
        return Err(AppError::Forbidden("Only admins can manage locations".into()));
    }

    state.location_repo.archive(&actor.tenant_id, &location_id).await?;
    info!("Location archived: {}", location_id);
    Ok(Json(serde_json::json!({"status": "archived"})))
}
