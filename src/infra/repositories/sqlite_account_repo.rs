use crate::domain::{models::account::{Account, Role}, ports::AccountRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAccountRepo {
    pool: SqlitePool,
}

impl SqliteAccountRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for SqliteAccountRepo {
    async fn create(&self, account: &Account) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, tenant_id, name, email, phone, password_hash, role, bio, specialties_json, photo_url, location_id, active, created_manually, created_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&account.id).bind(&account.tenant_id).bind(&account.name).bind(&account.email)
            .bind(&account.phone).bind(&account.password_hash).bind(account.role).bind(&account.bio)
            .bind(&account.specialties_json).bind(&account.photo_url).bind(&account.location_id)
            .bind(account.active).bind(account.created_manually).bind(&account.created_by)
            .bind(account.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_email(&self, tenant_id: &str, email: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE tenant_id = ? AND email = ?")
            .bind(tenant_id).bind(email)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_registered_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = ? AND password_hash IS NOT NULL")
            .bind(email)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(count > 0)
    }

    async fn list_by_role(&self, tenant_id: &str, role: Role) -> Result<Vec<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE tenant_id = ? AND role = ? ORDER BY created_at ASC")
            .bind(tenant_id).bind(role)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_barbers_by_location(&self, tenant_id: &str, location_id: &str) -> Result<Vec<Account>, AppError> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE tenant_id = ? AND role = 'barber' AND location_id = ? ORDER BY created_at ASC"
        )
            .bind(tenant_id).bind(location_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, account: &Account) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET name=?, email=?, phone=?, password_hash=?, bio=?, specialties_json=?, photo_url=?, location_id=?, active=?
             WHERE tenant_id=? AND id=?
             RETURNING *"
        )
            .bind(&account.name).bind(&account.email).bind(&account.phone).bind(&account.password_hash)
            .bind(&account.bio).bind(&account.specialties_json).bind(&account.photo_url)
            .bind(&account.location_id).bind(account.active)
            .bind(&account.tenant_id).bind(&account.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn deactivate(&self, tenant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE accounts SET active = 0 WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id).bind(id)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Account not found".into()));
        }
        Ok(())
    }
}
