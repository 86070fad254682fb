use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateTenantRequest, UpdateTenantRequest},
    responses::TenantCreatedResponse
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{account::{Account, Role}, location::{Location, WeeklyHours}, tenant::{Plan, Tenant}};
use crate::domain::services::slug::slugify;
use std::sync::Arc;
use crate::error::AppError;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;
use tracing::info;

pub async fn create_tenant(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Barbershop name is required".into()));
    }

    let slug = slugify(&payload.name);
    if slug.is_empty() {
        return Err(AppError::Validation("Barbershop name must contain letters or digits".into()));
    }

    if state.tenant_repo.find_by_slug(&slug).await?.is_some() {
        return Err(AppError::Validation("A barbershop with this name already exists".into()));
    }

    if state.account_repo.email_exists(&payload.admin_email).await? {
        return Err(AppError::Validation("Email already registered".into()));
    }

    let plan = payload.plan.unwrap_or(Plan::Basic);
    let mut tenant = Tenant::new(payload.name.clone(), slug, plan);
    tenant.logo_url = payload.logo_url;

    let created_tenant = state.tenant_repo.create(&tenant).await?;
    info!("Tenant created: {}", created_tenant.id);

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.admin_password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let admin = Account::new(
        created_tenant.id.clone(),
        "Administrator".to_string(),
        payload.admin_email,
        Role::Admin,
        Some(password_hash),
    );
    let created_admin = state.account_repo.create(&admin).await?;

    // Every shop starts with one location carrying the default opening week.
    let first_location = Location::new(
        created_tenant.id.clone(),
        payload.name,
        &WeeklyHours::default_business_week(),
    );
    state.location_repo.create(&first_location, created_tenant.plan).await?;

    Ok(Json(TenantCreatedResponse {
        tenant_id: created_tenant.id,
        slug: created_tenant.slug,
        admin_id: created_admin.id,
    }))
}

/// Public booking page payload: the shop plus its active locations, active
/// barbers (with their nullable location reference) and service catalog.
pub async fn get_tenant_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.tenant_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Barbershop not found".into()))?;

    let locations = state.location_repo.list_active(&tenant.id).await?;
    let barbers = state.account_repo.list_by_role(&tenant.id, Role::Barber).await?;
    let services = state.service_repo.list(&tenant.id).await?;

    let barber_views: Vec<_> = barbers.iter()
        .filter(|b| b.active)
        .map(|b| serde_json::json!({
            "id": b.id,
            "name": b.name,
            "bio": b.bio,
            "specialties": b.specialties(),
            "photo_url": b.photo_url,
            "location_id": b.location_id,
        }))
        .collect();

    Ok(Json(serde_json::json!({
        "tenant": {
            "id": tenant.id,
            "name": tenant.name,
            "slug": tenant.slug,
            "logo_url": tenant.logo_url,
        },
        "locations": locations,
        "barbers": barber_views,
        "services": services,
    })))
}

pub async fn get_current_tenant(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.tenant_repo.find_by_id(&actor.tenant_id).await?
        .ok_or(AppError::NotFound("Barbershop not found".into()))?;
    Ok(Json(tenant))
}

pub async fn update_tenant(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<UpdateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    if actor.role != Role::Admin {
        return Err(AppError::Forbidden("Only admins can update the barbershop".into()));
    }

    let mut tenant = state.tenant_repo.find_by_id(&actor.tenant_id).await?
        .ok_or(AppError::NotFound("Barbershop not found".into()))?;

    if let Some(name) = payload.name {
        tenant.name = name;
    }
    if let Some(plan) = payload.plan {
        tenant.plan = plan;
    }
    if let Some(logo) = payload.logo_url {
        tenant.logo_url = Some(logo);
    }

    let updated = state.tenant_repo.update(&tenant).await?;
    info!("Tenant updated: {}", updated.id);
    Ok(Json(updated))
}
