use std::sync::Arc;
use crate::domain::ports::{
    AccountRepository, AppointmentRepository, AuthRepository, EmailService,
    LocationRepository, ServiceRepository, TenantRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tenant_repo: Arc<dyn TenantRepository>,
    pub account_repo: Arc<dyn AccountRepository>,
    pub location_repo: Arc<dyn LocationRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub templates: Arc<Tera>,
}
