use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::{
    requests::{CreateAppointmentRequest, CreateManualAppointmentRequest, SlotsQuery, UpdateAppointmentStatusRequest},
    responses::SlotsResponse,
};
use crate::domain::models::account::{Account, Role};
use crate::domain::models::appointment::{Appointment, AppointmentStatus, NewAppointmentParams};
use crate::domain::models::location::{Location, LocationStatus};
use crate::domain::models::service::Service;
use crate::domain::services::authorization::{can, Action, Actor};
use crate::domain::services::availability::{free_slots, is_within_hours};
use crate::error::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format (YYYY-MM-DD)".into()))
}

fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

fn require(field: Option<String>, name: &str) -> Result<String, AppError> {
    field
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Validation(format!("Missing required field: {}", name)))
}

struct BookingRefs {
    barber: Account,
    service: Service,
    location: Option<Location>,
}

/// Resolves the referenced entities inside the actor's tenant. A foreign or
/// missing id is absent, full stop; existence is never leaked across tenants.
async fn resolve_refs(
    state: &AppState,
    tenant_id: &str,
    barber_id: &str,
    service_id: &str,
    location_id: Option<&str>,
) -> Result<BookingRefs, AppError> {
    let barber = state.account_repo.find_by_id(tenant_id, barber_id).await?
        .filter(|a| a.role == Role::Barber)
        .ok_or(AppError::NotFound("Barber not found".into()))?;

    let service = state.service_repo.find_by_id(tenant_id, service_id).await?
        .ok_or(AppError::NotFound("Service not found".into()))?;

    let location = match location_id {
        Some(id) => Some(
            state.location_repo.find_by_id(tenant_id, id).await?
                .ok_or(AppError::NotFound("Location not found".into()))?,
        ),
        None => None,
    };

    Ok(BookingRefs { barber, service, location })
}

/// The location whose opening hours govern the slot: the explicit one, or the
/// barber's own assignment.
async fn effective_location(
    state: &AppState,
    tenant_id: &str,
    refs: &BookingRefs,
) -> Result<Option<Location>, AppError> {
    if let Some(ref loc) = refs.location {
        return Ok(Some(loc.clone()));
    }
    match refs.barber.location_id.as_deref() {
        Some(id) => Ok(state.location_repo.find_by_id(tenant_id, id).await?),
        None => Ok(None),
    }
}

async fn validate_slot_is_bookable(
    state: &AppState,
    tenant_id: &str,
    refs: &BookingRefs,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<(), AppError> {
    if !refs.barber.active {
        return Err(AppError::Validation("Barber is not active".into()));
    }

    if let Some(ref loc) = refs.location
        && loc.status != LocationStatus::Active {
        return Err(AppError::Validation("Location is not active".into()));
    }

    if let Some(loc) = effective_location(state, tenant_id, refs).await?
        && !is_within_hours(&loc.schedule(), date, time, refs.service.duration_min) {
        return Err(AppError::Validation("Requested time is outside opening hours".into()));
    }

    Ok(())
}

async fn send_confirmation_email(state: &AppState, actor: &Actor, appointment: &Appointment, refs: &BookingRefs) {
    let Ok(Some(tenant)) = state.tenant_repo.find_by_id(&actor.tenant_id).await else { return };
    let Ok(Some(client)) = state.account_repo.find_by_id(&actor.tenant_id, &appointment.client_id).await else { return };

    let mut context = tera::Context::new();
    context.insert("client_name", &client.name);
    context.insert("shop_name", &tenant.name);
    context.insert("service_name", &refs.service.name);
    context.insert("barber_name", &refs.barber.name);
    context.insert("date", &appointment.date.to_string());
    context.insert("time", &appointment.time.format("%H:%M").to_string());
    context.insert("location_name", &refs.location.as_ref().map(|l| l.name.clone()));

    let Ok(body) = state.templates.render("confirmation.html", &context) else {
        warn!("Failed to render confirmation template for {}", appointment.id);
        return;
    };

    // Relay failure never fails the booking.
    if let Err(e) = state.email_service.send(&client.email, "Booking received", &body).await {
        warn!("Confirmation email failed for {}: {}", appointment.id, e);
    }
}

/// Online booking by an authenticated client: lands in `pending` review.
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if actor.role != Role::Client {
        return Err(AppError::Forbidden("Online booking is for clients; staff use manual booking".into()));
    }

    let barber_id = require(payload.barber_id, "barber_id")?;
    let service_id = require(payload.service_id, "service_id")?;
    let date = parse_date(&require(payload.date, "date")?)?;
    let time = parse_time(&require(payload.time, "time")?)?;

    let refs = resolve_refs(&state, &actor.tenant_id, &barber_id, &service_id, payload.location_id.as_deref()).await?;
    validate_slot_is_bookable(&state, &actor.tenant_id, &refs, date, time).await?;

    let appointment = Appointment::new(NewAppointmentParams {
        tenant_id: actor.tenant_id.clone(),
        client_id: actor.id.clone(),
        barber_id,
        service_id,
        location_id: refs.location.as_ref().map(|l| l.id.clone()),
        date,
        time,
        notes: payload.notes,
        service_price: refs.service.price,
        status: AppointmentStatus::Pending,
        created_by: None,
    });

    // Check-and-insert is a single atomic unit: the partial unique index
    // decides the winner between concurrent requests for the same slot.
    let created = state.appointment_repo.create(&appointment).await?;
    info!("Appointment created: {} ({} {})", created.id, created.date, created.time);

    send_confirmation_email(&state, &actor, &created, &refs).await;

    Ok(Json(created))
}

/// Staff booking on a client's behalf: skips review, lands in `accepted`.
/// A barber may only book against their own calendar.
pub async fn create_manual_appointment(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Json(payload): Json<CreateManualAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if actor.role == Role::Client {
        return Err(AppError::Forbidden("Only staff can create manual bookings".into()));
    }

    let client_id = require(payload.client_id, "client_id")?;
    let barber_id = require(payload.barber_id, "barber_id")?;
    let service_id = require(payload.service_id, "service_id")?;
    let date = parse_date(&require(payload.date, "date")?)?;
    let time = parse_time(&require(payload.time, "time")?)?;

    // Resolve the target barber before the identity check so an unknown id
    // reads as not-found rather than forbidden.
    let refs = resolve_refs(&state, &actor.tenant_id, &barber_id, &service_id, payload.location_id.as_deref()).await?;

    if !can(&actor, &Action::CreateManualAppointment { barber_id: &barber_id }) {
        warn!("Barber {} attempted manual booking for barber {}", actor.id, barber_id);
        return Err(AppError::Forbidden("Barbers can only create bookings for themselves".into()));
    }

    let client = state.account_repo.find_by_id(&actor.tenant_id, &client_id).await?
        .filter(|a| a.role == Role::Client)
        .ok_or(AppError::NotFound("Client not found".into()))?;

    validate_slot_is_bookable(&state, &actor.tenant_id, &refs, date, time).await?;

    let appointment = Appointment::new(NewAppointmentParams {
        tenant_id: actor.tenant_id.clone(),
        client_id: client.id,
        barber_id,
        service_id,
        location_id: refs.location.as_ref().map(|l| l.id.clone()),
        date,
        time,
        notes: payload.notes,
        service_price: refs.service.price,
        status: AppointmentStatus::Accepted,
        created_by: Some(actor.id.clone()),
    });

    let created = state.appointment_repo.create(&appointment).await?;
    info!("Manual appointment created: {} by {}", created.id, actor.id);

    Ok(Json(created))
}

/// Role-scoped listing: clients see their own bookings, barbers their
/// assigned ones, admins everything in the tenant. Rows are enriched with
/// client/barber/service/location summaries.
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let appointments = match actor.role {
        Role::Admin => state.appointment_repo.list_by_tenant(&actor.tenant_id).await?,
        Role::Barber => state.appointment_repo.list_by_barber(&actor.tenant_id, &actor.id).await?,
        Role::Client => state.appointment_repo.list_by_client(&actor.tenant_id, &actor.id).await?,
    };

    let mut accounts: HashMap<String, Option<Account>> = HashMap::new();
    let mut services: HashMap<String, Option<Service>> = HashMap::new();
    let mut locations: HashMap<String, Option<Location>> = HashMap::new();

    let mut views = Vec::with_capacity(appointments.len());
    for appt in &appointments {
        for account_id in [&appt.client_id, &appt.barber_id] {
            if !accounts.contains_key(account_id) {
                let found = state.account_repo.find_by_id(&actor.tenant_id, account_id).await?;
                accounts.insert(account_id.clone(), found);
            }
        }
        if !services.contains_key(&appt.service_id) {
            let found = state.service_repo.find_by_id(&actor.tenant_id, &appt.service_id).await?;
            services.insert(appt.service_id.clone(), found);
        }
        if let Some(ref loc_id) = appt.location_id
            && !locations.contains_key(loc_id) {
            let found = state.location_repo.find_by_id(&actor.tenant_id, loc_id).await?;
            locations.insert(loc_id.clone(), found);
        }

        let client = accounts.get(&appt.client_id).and_then(|a| a.as_ref());
        let barber = accounts.get(&appt.barber_id).and_then(|a| a.as_ref());
        let service = services.get(&appt.service_id).and_then(|s| s.as_ref());
        let location = appt.location_id.as_ref()
            .and_then(|id| locations.get(id))
            .and_then(|l| l.as_ref());

        views.push(serde_json::json!({
            "id": appt.id,
            "date": appt.date,
            "time": appt.time.format("%H:%M").to_string(),
            "status": appt.status,
            "notes": appt.notes,
            "service_price": appt.service_price,
            "created_manually": appt.created_manually,
            "created_by": appt.created_by,
            "created_at": appt.created_at,
            "client": client.map(|c| serde_json::json!({"id": c.id, "name": c.name, "email": c.email})),
            "barber": barber.map(|b| serde_json::json!({"id": b.id, "name": b.name})),
            "service": service.map(|s| serde_json::json!({"id": s.id, "name": s.name, "price": s.price, "duration_min": s.duration_min})),
            "location": location.map(|l| serde_json::json!({"id": l.id, "name": l.name, "status": l.status})),
        }));
    }

    Ok(Json(views))
}

pub async fn update_appointment_status(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Path(appointment_id): Path<String>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_status = AppointmentStatus::parse(&payload.status)
        .ok_or(AppError::Validation("Unknown status".into()))?;

    let appointment = state.appointment_repo.find_by_id(&actor.tenant_id, &appointment_id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    if !can(&actor, &Action::ViewAppointment { appointment: &appointment }) {
        return Err(AppError::NotFound("Appointment not found".into()));
    }

    if !appointment.status.can_transition_to(new_status) {
        return Err(AppError::Validation(format!(
            "Invalid status transition: {:?} -> {:?}",
            appointment.status, new_status
        )));
    }

    if !can(&actor, &Action::TransitionAppointment { appointment: &appointment, to: new_status }) {
        return Err(AppError::Forbidden("Not allowed to change this appointment".into()));
    }

    let updated = state.appointment_repo
        .update_status(&actor.tenant_id, &appointment.id, appointment.status, new_status)
        .await?
        .ok_or(AppError::Conflict("Appointment was updated concurrently".into()))?;

    info!("Appointment {} moved to {:?}", updated.id, updated.status);
    Ok(Json(updated))
}

/// The free-slot grid for one barber, service and day: the governing
/// location's open window stepped by service duration, minus held slots.
pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    AuthUser(actor): AuthUser,
    Query(query): Query<SlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&query.date)?;

    let refs = resolve_refs(&state, &actor.tenant_id, &query.barber_id, &query.service_id, None).await?;

    let location = match effective_location(&state, &actor.tenant_id, &refs).await? {
        Some(loc) => Some(loc),
        // Unassigned barber: fall back to the shop's first active location.
        None => state.location_repo.list_active(&actor.tenant_id).await?.into_iter().next(),
    };

    let Some(location) = location else {
        return Ok(Json(SlotsResponse { date: query.date, slots: Vec::new() }));
    };

    let taken = state.appointment_repo.list_holding_slots(&actor.tenant_id, &query.barber_id, date).await?;
    let slots = free_slots(&location.schedule(), date, refs.service.duration_min, &taken);

    Ok(Json(SlotsResponse {
        date: query.date,
        slots: slots.iter().map(|t| t.format("%H:%M").to_string()).collect(),
    }))
}
