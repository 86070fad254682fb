use crate::domain::{
    models::{location::{Location, LocationStatus}, tenant::Plan},
    ports::LocationRepository,
    services::quota,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteLocationRepo {
    pool: SqlitePool,
}

impl SqliteLocationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for SqliteLocationRepo {
    async fn create(&self, location: &Location, plan: Plan) -> Result<Location, AppError> {
        // Count and insert share a transaction so a concurrent create (or an
        // archive/re-create pair) cannot push the tenant past its plan.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let active_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM locations WHERE tenant_id = ? AND status = 'active'"
        )
            .bind(&location.tenant_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        quota::ensure_can_create_location(plan, active_count)?;

        let created = sqlx::query_as::<_, Location>(
            "INSERT INTO locations (id, tenant_id, name, address, phone, email, schedule_json, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&location.id).bind(&location.tenant_id).bind(&location.name)
            .bind(&location.address).bind(&location.phone).bind(&location.email)
            .bind(&location.schedule_json).bind(location.status).bind(location.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Location>, AppError> {
        // Intentionally no status filter: archived locations stay resolvable
        // for historical appointment detail.
        sqlx::query_as::<_, Location>("SELECT * FROM locations WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active(&self, tenant_id: &str) -> Result<Vec<Location>, AppError> {
        sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE tenant_id = ? AND status = 'active' ORDER BY created_at ASC"
        )
            .bind(tenant_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_active(&self, tenant_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM locations WHERE tenant_id = ? AND status = 'active'")
            .bind(tenant_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, location: &Location) -> Result<Location, AppError> {
        sqlx::query_as::<_, Location>(
            "UPDATE locations SET name=?, address=?, phone=?, email=?, schedule_json=?
             WHERE tenant_id=? AND id=?
             RETURNING *"
        )
            .bind(&location.name).bind(&location.address).bind(&location.phone)
            .bind(&location.email).bind(&location.schedule_json)
            .bind(&location.tenant_id).bind(&location.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn archive(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE locations SET status = ? WHERE tenant_id = ? AND id = ?")
            .bind(LocationStatus::Archived)
            .bind(tenant_id).bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Location not found".into()));
        }
        Ok(())
    }
}
