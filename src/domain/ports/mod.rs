use crate::domain::models::{
    account::{Account, Role},
    appointment::{Appointment, AppointmentStatus, ClientStats},
    auth::RefreshTokenRecord,
    location::Location,
    service::Service,
    tenant::Tenant,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::models::tenant::Plan;

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn create(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, AppError>;
    async fn update(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, account: &Account) -> Result<Account, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Account>, AppError>;
    async fn find_by_email(&self, tenant_id: &str, email: &str) -> Result<Option<Account>, AppError>;
    /// Login lookup: accounts with credentials, across tenants. Registration
    /// keeps these globally unique, so at most one row matches.
    async fn find_registered_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;
    /// Any account, registered or shadow, in any tenant.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;
    async fn list_by_role(&self, tenant_id: &str, role: Role) -> Result<Vec<Account>, AppError>;
    async fn list_barbers_by_location(&self, tenant_id: &str, location_id: &str) -> Result<Vec<Account>, AppError>;
    async fn update(&self, account: &Account) -> Result<Account, AppError>;
    async fn deactivate(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Count-and-insert in one transaction; fails with `QuotaExceeded` when
    /// the tenant already holds as many active locations as the plan allows.
    async fn create(&self, location: &Location, plan: Plan) -> Result<Location, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Location>, AppError>;
    async fn list_active(&self, tenant_id: &str) -> Result<Vec<Location>, AppError>;
    async fn count_active(&self, tenant_id: &str) -> Result<i64, AppError>;
    async fn update(&self, location: &Location) -> Result<Location, AppError>;
    async fn archive(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Service>, AppError>;
    async fn list(&self, tenant_id: &str) -> Result<Vec<Service>, AppError>;
    async fn update(&self, service: &Service) -> Result<Service, AppError>;
    async fn delete(&self, tenant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Single INSERT racing on the partial unique slot index; a losing
    /// writer gets `Conflict`, never a duplicate row.
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Appointment>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_client(&self, tenant_id: &str, client_id: &str) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_barber(&self, tenant_id: &str, barber_id: &str) -> Result<Vec<Appointment>, AppError>;
    /// Non-rejected appointments of one barber on one day, for slot math.
    async fn list_holding_slots(&self, tenant_id: &str, barber_id: &str, date: NaiveDate) -> Result<Vec<Appointment>, AppError>;
    /// Guarded transition: only applies while the row still carries `from`.
    /// Returns None when a concurrent writer moved the row first.
    async fn update_status(
        &self,
        tenant_id: &str,
        id: &str,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<Option<Appointment>, AppError>;
    async fn client_stats(&self, tenant_id: &str, client_id: &str) -> Result<ClientStats, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
    async fn delete_refresh_family(&self, family_id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}
