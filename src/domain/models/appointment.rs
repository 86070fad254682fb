use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl AppointmentStatus {
    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Rejected | AppointmentStatus::Completed)
    }

    /// The lifecycle: pending -> accepted | rejected,
    /// accepted -> rejected | completed. Everything else is invalid.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted) | (Pending, Rejected) | (Accepted, Rejected) | (Accepted, Completed)
        )
    }

    /// Rejected appointments release their slot for reuse.
    pub fn holds_slot(&self) -> bool {
        *self != AppointmentStatus::Rejected
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(AppointmentStatus::Pending),
            "accepted" => Some(AppointmentStatus::Accepted),
            "rejected" => Some(AppointmentStatus::Rejected),
            "completed" => Some(AppointmentStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Appointment {
    pub id: String,
    pub tenant_id: String,
    pub client_id: String,
    pub barber_id: String,
    pub service_id: String,
    pub location_id: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub service_price: f64,
    pub created_manually: bool,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewAppointmentParams {
    pub tenant_id: String,
    pub client_id: String,
    pub barber_id: String,
    pub service_id: String,
    pub location_id: Option<String>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    pub service_price: f64,
    pub status: AppointmentStatus,
    pub created_by: Option<String>,
}

impl Appointment {
    pub fn new(params: NewAppointmentParams) -> Self {
        let created_manually = params.created_by.is_some();
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id: params.tenant_id,
            client_id: params.client_id,
            barber_id: params.barber_id,
            service_id: params.service_id,
            location_id: params.location_id,
            date: params.date,
            time: params.time,
            status: params.status,
            notes: params.notes,
            service_price: params.service_price,
            created_manually,
            created_by: params.created_by,
            created_at: Utc::now(),
        }
    }
}

/// Aggregates derived from the appointment table for the CRM listing.
/// Computed on read, never stored.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct ClientStats {
    pub total_appointments: i64,
    pub completed_appointments: i64,
    pub total_spent: f64,
    pub last_visit: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus::*;

    #[test]
    fn pending_can_be_accepted_or_rejected() {
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn accepted_can_be_rejected_or_completed() {
        assert!(Accepted.can_transition_to(Rejected));
        assert!(Accepted.can_transition_to(Completed));
        assert!(!Accepted.can_transition_to(Pending));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for from in [Rejected, Completed] {
            for to in [Pending, Accepted, Rejected, Completed] {
                assert!(!from.can_transition_to(to), "{:?} -> {:?} must be invalid", from, to);
            }
        }
    }

    #[test]
    fn rejected_releases_the_slot() {
        assert!(!Rejected.holds_slot());
        assert!(Pending.holds_slot());
        assert!(Accepted.holds_slot());
        assert!(Completed.holds_slot());
    }
}
