use crate::domain::models::location::WeeklyHours;
use crate::domain::models::tenant::Plan;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub tenant_id: String,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateTenantRequest {
    pub name: String,
    pub admin_email: String,
    pub admin_password: String,
    pub plan: Option<Plan>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTenantRequest {
    pub name: Option<String>,
    pub plan: Option<Plan>,
    pub logo_url: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub schedule: Option<WeeklyHours>,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub schedule: Option<WeeklyHours>,
}

#[derive(Deserialize)]
pub struct CreateBarberRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub photo_url: Option<String>,
    pub location_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateBarberRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub photo_url: Option<String>,
    /// Some("") clears the assignment, Some(id) moves the barber, None keeps it.
    pub location_id: Option<String>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateOwnProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub photo_url: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub price: f64,
    pub duration_min: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub duration_min: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

// Booking payloads keep every field optional so an omitted field surfaces as
// a 400 validation error instead of a deserialization rejection.
#[derive(Deserialize)]
pub struct CreateManualClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub barber_id: Option<String>,
    pub service_id: Option<String>,
    pub location_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateManualAppointmentRequest {
    pub client_id: Option<String>,
    pub barber_id: Option<String>,
    pub service_id: Option<String>,
    pub location_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub barber_id: String,
    pub service_id: String,
    pub date: String,
}
