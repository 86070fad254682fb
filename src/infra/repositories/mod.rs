pub mod sqlite_tenant_repo;
pub mod sqlite_account_repo;
pub mod sqlite_location_repo;
pub mod sqlite_service_repo;
pub mod sqlite_appointment_repo;
pub mod sqlite_auth_repo;

pub mod postgres_tenant_repo;
pub mod postgres_account_repo;
pub mod postgres_location_repo;
pub mod postgres_service_repo;
pub mod postgres_appointment_repo;
pub mod postgres_auth_repo;
