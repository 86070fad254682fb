use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::{LoginRequest, RegisterRequest};
use crate::domain::models::account::{Account, Role};
use crate::domain::models::auth::{AuthResponse, AccountProfile};
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use argon2::{password_hash::{SaltString, PasswordHasher}, PasswordHash, Argon2, PasswordVerifier};
use rand::rngs::OsRng;
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation("Name, email and password are required".into()));
    }

    state.tenant_repo.find_by_id(&payload.tenant_id).await?
        .ok_or(AppError::NotFound("Barbershop not found".into()))?;

    // Registered accounts must be resolvable by email at login, so the
    // duplicate check is global rather than tenant-scoped.
    if state.account_repo.email_exists(&payload.email).await? {
        return Err(AppError::Validation("Email already registered".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let mut client = Account::new(
        payload.tenant_id,
        payload.name,
        payload.email,
        Role::Client,
        Some(password_hash),
    );
    client.phone = payload.phone;

    let created = state.account_repo.create(&client).await?;

    let (access_jwt, refresh_token, csrf_token) = state.auth_service.login(&created).await?;
    set_cookies(&cookies, &access_jwt, &refresh_token);

    info!("Client registered: {}", created.id);

    Ok(Json(AuthResponse {
        csrf_token,
        user: AccountProfile {
            id: created.id,
            name: created.name,
            email: created.email,
            role: created.role,
        }
    }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.account_repo.find_registered_by_email(&payload.email).await?
        .ok_or(AppError::Unauthenticated)?;

    if !account.active {
        return Err(AppError::Unauthenticated);
    }

    let stored_hash = account.password_hash.as_deref()
        .ok_or(AppError::Unauthenticated)?;
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthenticated)?;

    let (access_jwt, refresh_token, csrf_token) = state.auth_service.login(&account).await?;

    set_cookies(&cookies, &access_jwt, &refresh_token);

    info!("Account logged in: {}", account.id);

    Ok(Json(AuthResponse {
        csrf_token,
        user: AccountProfile {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
        }
    }))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    let refresh_cookie = cookies.get("refresh_token").ok_or(AppError::Unauthenticated)?;
    let raw_token = refresh_cookie.value();

    let token_hash = state.auth_service.hash_token(raw_token);
    let record = state.auth_repo.find_refresh_token(&token_hash).await?
        .ok_or(AppError::Unauthenticated)?;

    let account = state.account_repo.find_by_id(&record.tenant_id, &record.account_id).await?
        .ok_or(AppError::Unauthenticated)?;

    let (new_access, new_refresh, new_csrf) = state.auth_service.refresh(raw_token, &account).await?;

    set_cookies(&cookies, &new_access, &new_refresh);

    info!("Token refreshed for account: {}", account.id);

    Ok(Json(AuthResponse {
        csrf_token: new_csrf,
        user: AccountProfile {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
        }
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> Result<impl IntoResponse, AppError> {
    if let Some(cookie) = cookies.get("refresh_token") {
        let _ = state.auth_service.logout(cookie.value()).await;
    }

    cookies.remove(Cookie::build(("access_token", "")).path("/").into());
    cookies.remove(Cookie::build(("refresh_token", "")).path("/").into());

    info!("Account logged out");

    Ok(StatusCode::OK)
}

fn set_cookies(cookies: &Cookies, access: &str, refresh: &str) {
    let mut access_c = Cookie::new("access_token", access.to_string());
    access_c.set_http_only(true);
    access_c.set_secure(true);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::minutes(15));
    cookies.add(access_c);

    let mut refresh_c = Cookie::new("refresh_token", refresh.to_string());
    refresh_c.set_http_only(true);
    refresh_c.set_secure(true);
    refresh_c.set_same_site(SameSite::Strict);
    refresh_c.set_path("/");
    refresh_c.set_max_age(Duration::days(7));
    cookies.add(refresh_c);
}
