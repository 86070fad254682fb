use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Barber,
    Client,
}

/// One row per actor. Admins, barbers and clients share the table and are
/// discriminated by `role`; a client without a password hash is a shadow
/// client created by staff.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Account {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: Role,
    pub bio: Option<String>,
    pub specialties_json: String,
    pub photo_url: Option<String>,
    pub location_id: Option<String>,
    pub active: bool,
    pub created_manually: bool,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(tenant_id: String, name: String, email: String, role: Role, password_hash: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            name,
            email,
            phone: None,
            password_hash,
            role,
            bio: None,
            specialties_json: "[]".to_string(),
            photo_url: None,
            location_id: None,
            active: true,
            created_manually: false,
            created_by: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_shadow(&self) -> bool {
        self.role == Role::Client && self.password_hash.is_none()
    }

    pub fn specialties(&self) -> Vec<String> {
        serde_json::from_str(&self.specialties_json).unwrap_or_default()
    }
}
