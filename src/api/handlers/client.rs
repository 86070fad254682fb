use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::CreateManualClientRequest;
use crate::domain::models::account::{Account, Role};
use crate::domain::services::authorization::{can, Action};
use crate::domain::services::slug::synthetic_manual_email;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_manual_client(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<CreateManualClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::CreateShadowClient) {
        return Err(AppError::Forbidden("Only staff can create clients manually".into()));
    }

    let name = payload.name
        .filter(|n| !n.trim().is_empty())
        .ok_or(AppError::Validation("Client name is required".into()))?;

    let email = match payload.email {
        Some(email) if !email.trim().is_empty() => {
            // Shadow clients only need tenant-level uniqueness.
            if state.account_repo.find_by_email(&actor.tenant_id, &email).await?.is_some() {
                return Err(AppError::Validation("Email already registered".into()));
            }
            email
        }
        _ => {
            let mut candidate = synthetic_manual_email(&name);
            let mut attempts = 0;
            while state.account_repo.find_by_email(&actor.tenant_id, &candidate).await?.is_some() {
                attempts += 1;
                if attempts > 5 {
                    return Err(AppError::Internal);
                }
                candidate = synthetic_manual_email(&name);
            }
            candidate
        }
    };

    let mut client = Account::new(
        actor.tenant_id.clone(),
        name,
        email,
        Role::Client,
        None,
    );
    client.phone = payload.phone;
    client.created_manually = true;
    client.created_by = Some(actor.id.clone());

    let created = state.account_repo.create(&client).await?;
    info!("Manual client created: {} by {}", created.id, actor.id);

    Ok(Json(serde_json::json!({
        "id": created.id,
        "name": created.name,
        "email": created.email,
        "phone": created.phone,
        "role": created.role,
        "created_manually": created.created_manually,
        "created_by": created.created_by,
        "created_at": created.created_at,
    })))
}

/// CRM listing: every client joined with aggregates derived from the
/// appointment table on the fly.
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    if !can(&actor, &Action::ListClients) {
        return Err(AppError::Forbidden("Only admins can list clients".into()));
    }

    let clients = state.account_repo.list_by_role(&actor.tenant_id, Role::Client).await?;

    let mut views = Vec::with_capacity(clients.len());
    for client in &clients {
        let stats = state.appointment_repo.client_stats(&actor.tenant_id, &client.id).await?;
        views.push(serde_json::json!({
            "id": client.id,
            "name": client.name,
            "email": client.email,
            "phone": client.phone,
            "created_manually": client.created_manually,
            "created_at": client.created_at,
            "total_appointments": stats.total_appointments,
            "completed_appointments": stats.completed_appointments,
            "total_spent": stats.total_spent,
            "last_visit": stats.last_visit,
        }));
    }

    Ok(Json(views))
}
