use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub price: f64,
    pub duration_min: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn new(tenant_id: String, name: String, price: f64, duration_min: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            name,
            price,
            duration_min,
            description: None,
            image_url: None,
            created_at: Utc::now(),
        }
    }
}
