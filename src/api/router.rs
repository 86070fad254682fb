use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{appointment, auth, barber, client, health, location, service, tenant};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Tenant Public (booking page)
        .route("/api/v1/tenants/by-slug/{slug}", get(tenant::get_tenant_by_slug))

        // Tenant
        .route("/api/v1/tenants", post(tenant::create_tenant))
        .route("/api/v1/tenant", get(tenant::get_current_tenant).put(tenant::update_tenant))

        // Locations
        .route("/api/v1/locations", get(location::list_locations).post(location::create_location))
        .route("/api/v1/locations/{location_id}", get(location::get_location).put(location::update_location).delete(location::archive_location))

        // Barbers
        .route("/api/v1/barbers", get(barber::list_barbers).post(barber::create_barber))
        .route("/api/v1/barbers/me", put(barber::update_own_profile))
        .route("/api/v1/barbers/{barber_id}", put(barber::update_barber).delete(barber::deactivate_barber))

        // Services
        .route("/api/v1/services", get(service::list_services).post(service::create_service))
        .route("/api/v1/services/{service_id}", put(service::update_service).delete(service::delete_service))

        // Clients (manual creation + CRM)
        .route("/api/v1/clients", get(client::list_clients))
        .route("/api/v1/clients/manual", post(client::create_manual_client))

        // Appointments
        .route("/api/v1/appointments", get(appointment::list_appointments).post(appointment::create_appointment))
        .route("/api/v1/appointments/manual", post(appointment::create_manual_appointment))
        .route("/api/v1/appointments/slots", get(appointment::get_slots))
        .route("/api/v1/appointments/{appointment_id}/status", put(appointment::update_appointment_status))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        tenant_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
