use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Pro,
    Enterprise,
}

impl Plan {
    /// Maximum number of active (non-archived) locations the plan allows.
    pub fn max_locations(&self) -> i64 {
        match self {
            Plan::Basic => 1,
            Plan::Pro => 3,
            Plan::Enterprise => 10,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub plan: Plan,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    pub fn new(name: String, slug: String, plan: Plan) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            slug,
            plan,
            logo_url: None,
            created_at: Utc::now(),
        }
    }
}
