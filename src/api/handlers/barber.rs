use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CreateBarberRequest, UpdateBarberRequest, UpdateOwnProfileRequest};
use crate::domain::models::account::{Account, Role};
use crate::domain::services::authorization::{can, Action};
use crate::error::AppError;
use std::sync::Arc;
use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::rngs::OsRng;
use tracing::info;

fn barber_view(account: &Account) -> serde_json::Value {
    serde_json::json!({
        "id": account.id,
        "name": account.name,
        "email": account.email,
        "phone": account.phone,
        "bio": account.bio,
        "specialties": account.specialties(),
        "photo_url": account.photo_url,
        "location_id": account.location_id,
        "active": account.active,
        "created_at": account.created_at,
    })
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string())
}

pub async fn create_barber(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<CreateBarberRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::ManageBarbers) {
        return Err(AppError::Forbidden("Only admins can manage barbers".into()));
    }

    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::Validation("Name and email are required".into()));
    }

    if state.account_repo.email_exists(&payload.email).await? {
        return Err(AppError::Validation("Email already registered".into()));
    }

    if let Some(ref location_id) = payload.location_id {
        // Archived locations are still valid assignment targets.
        state.location_repo.find_by_id(&actor.tenant_id, location_id).await?
            .ok_or(AppError::NotFound("Location not found".into()))?;
    }

    let password_hash = hash_password(&payload.password)?;

    let mut barber = Account::new(
        actor.tenant_id.clone(),
        payload.name,
        payload.email,
        Role::Barber,
        Some(password_hash),
    );
    barber.phone = payload.phone;
    barber.bio = payload.bio;
    barber.photo_url = payload.photo_url;
    barber.location_id = payload.location_id;
    if let Some(specialties) = payload.specialties {
        barber.specialties_json = serde_json::to_string(&specialties)
            .map_err(|_| AppError::Validation("Invalid specialties".into()))?;
    }

    let created = state.account_repo.create(&barber).await?;
    info!("Barber created: {}", created.id);

    Ok(Json(barber_view(&created)))
}

pub async fn list_barbers(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let barbers = state.account_repo.list_by_role(&actor.tenant_id, Role::Barber).await?;
    let views: Vec<_> = barbers.iter().map(barber_view).collect();
    Ok(Json(views))
}

pub async fn update_barber(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(barber_id): Path<String>,
    Json(payload): Json<UpdateBarberRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::ManageBarbers) {
        return Err(AppError::Forbidden("Only admins can manage barbers".into()));
    }

    let mut barber = state.account_repo.find_by_id(&actor.tenant_id, &barber_id).await?
        .filter(|a| a.role == Role::Barber)
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    if let Some(name) = payload.name { barber.name = name; }
    if let Some(phone) = payload.phone { barber.phone = Some(phone); }
    if let Some(bio) = payload.bio { barber.bio = Some(bio); }
    if let Some(photo) = payload.photo_url { barber.photo_url = Some(photo); }
    if let Some(active) = payload.active { barber.active = active; }
    if let Some(specialties) = payload.specialties {
        barber.specialties_json = serde_json::to_string(&specialties)
            .map_err(|_| AppError::Validation("Invalid specialties".into()))?;
    }

    if let Some(location_id) = payload.location_id {
        if location_id.is_empty() {
            barber.location_id = None;
        } else {
            state.location_repo.find_by_id(&actor.tenant_id, &location_id).await?
                .ok_or(AppError::NotFound("Location not found".into()))?;
            barber.location_id = Some(location_id);
        }
    }

    let updated = state.account_repo.update(&barber).await?;
    info!("Barber updated: {}", updated.id);
    Ok(Json(barber_view(&updated)))
}

/// Self-service profile edit. The field set is deliberately narrow: no role,
/// no tenant, no location assignment.
pub async fn update_own_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<UpdateOwnProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::UpdateBarberProfile { barber_id: &actor.id }) || actor.role != Role::Barber {
        return Err(AppError::Forbidden("Only barbers can edit their own profile".into()));
    }

    let mut barber = state.account_repo.find_by_id(&actor.tenant_id, &actor.id).await?
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    if let Some(name) = payload.name { barber.name = name; }
    if let Some(phone) = payload.phone { barber.phone = Some(phone); }
    if let Some(bio) = payload.bio { barber.bio = Some(bio); }
    if let Some(photo) = payload.photo_url { barber.photo_url = Some(photo); }
    if let Some(specialties) = payload.specialties {
        barber.specialties_json = serde_json::to_string(&specialties)
            .map_err(|_| AppError::Validation("Invalid specialties".into()))?;
    }
    if let Some(password) = payload.password {
        if password.len() < 6 {
            return Err(AppError::Validation("Password must have at least 6 characters".into()));
        }
        barber.password_hash = Some(hash_password(&password)?);
    }

    let updated = state.account_repo.update(&barber).await?;
    info!("Barber self-updated profile: {}", updated.id);
    Ok(Json(barber_view(&updated)))
}

pub async fn deactivate_barber(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(barber_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::ManageBarbers) {
        return Err(AppError::Forbidden("Only admins can manage barbers".into()));
    }

    state.account_repo.find_by_id(&actor.tenant_id, &barber_id).await?
        .filter(|a| a.role == Role::Barber)
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    state.account_repo.deactivate(&actor.tenant_id, &barber_id).await?;
    info!("Barber deactivated: {}", barber_id);
    Ok(Json(serde_json::json!({"status": "deactivated"})))
}
