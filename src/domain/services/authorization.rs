use crate::domain::models::account::Role;
use crate::domain::models::appointment::{Appointment, AppointmentStatus};

/// The acting identity resolved from a verified token. Every mutation is
/// gated on `can` before any store is touched.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub tenant_id: String,
    pub role: Role,
}

pub enum Action<'a> {
    ManageLocations,
    ManageBarbers,
    ManageServices,
    UpdateBarberProfile { barber_id: &'a str },
    CreateShadowClient,
    ListClients,
    CreateManualAppointment { barber_id: &'a str },
    TransitionAppointment { appointment: &'a Appointment, to: AppointmentStatus },
    ViewAppointment { appointment: &'a Appointment },
}

/// Pure capability decision. Tenant scoping is not decided here: callers
/// resolve targets within the actor's tenant, so a foreign id never reaches
/// this function.
pub fn can(actor: &Actor, action: &Action) -> bool {
    match action {
        Action::ManageLocations | Action::ManageBarbers | Action::ManageServices => {
            actor.role == Role::Admin
        }
        Action::UpdateBarberProfile { barber_id } => match actor.role {
            Role::Admin => true,
            Role::Barber => actor.id == *barber_id,
            Role::Client => false,
        },
        Action::CreateShadowClient => matches!(actor.role, Role::Admin | Role::Barber),
        Action::ListClients => actor.role == Role::Admin,
        Action::CreateManualAppointment { barber_id } => match actor.role {
            Role::Admin => true,
            Role::Barber => actor.id == *barber_id,
            Role::Client => false,
        },
        Action::TransitionAppointment { appointment, to } => match actor.role {
            Role::Admin => true,
            Role::Barber => appointment.barber_id == actor.id,
            // Clients may only cancel their own pending/accepted bookings.
            Role::Client => {
                appointment.client_id == actor.id
                    && *to == AppointmentStatus::Rejected
                    && matches!(appointment.status, AppointmentStatus::Pending | AppointmentStatus::Accepted)
            }
        },
        Action::ViewAppointment { appointment } => match actor.role {
            Role::Admin => true,
            Role::Barber => appointment.barber_id == actor.id,
            Role::Client => appointment.client_id == actor.id,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::appointment::NewAppointmentParams;
    use chrono::{NaiveDate, NaiveTime};

    fn actor(id: &str, role: Role) -> Actor {
        Actor { id: id.to_string(), tenant_id: "t1".to_string(), role }
    }

    fn appointment(client_id: &str, barber_id: &str, status: AppointmentStatus) -> Appointment {
        let mut appt = Appointment::new(NewAppointmentParams {
            tenant_id: "t1".to_string(),
            client_id: client_id.to_string(),
            barber_id: barber_id.to_string(),
            service_id: "s1".to_string(),
            location_id: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            notes: None,
            service_price: 15.0,
            status: AppointmentStatus::Pending,
            created_by: None,
        });
        appt.status = status;
        appt
    }

    #[test]
    fn only_admins_manage_structure() {
        assert!(can(&actor("a", Role::Admin), &Action::ManageLocations));
        assert!(!can(&actor("b", Role::Barber), &Action::ManageLocations));
        assert!(!can(&actor("c", Role::Client), &Action::ManageServices));
    }

    #[test]
    fn barbers_edit_only_their_own_profile() {
        assert!(can(&actor("b1", Role::Barber), &Action::UpdateBarberProfile { barber_id: "b1" }));
        assert!(!can(&actor("b1", Role::Barber), &Action::UpdateBarberProfile { barber_id: "b2" }));
        assert!(can(&actor("a", Role::Admin), &Action::UpdateBarberProfile { barber_id: "b2" }));
    }

    #[test]
    fn staff_create_shadow_clients_clients_do_not() {
        assert!(can(&actor("a", Role::Admin), &Action::CreateShadowClient));
        assert!(can(&actor("b", Role::Barber), &Action::CreateShadowClient));
        assert!(!can(&actor("c", Role::Client), &Action::CreateShadowClient));
    }

    #[test]
    fn barber_cannot_book_manually_for_another_barber() {
        assert!(can(&actor("b1", Role::Barber), &Action::CreateManualAppointment { barber_id: "b1" }));
        assert!(!can(&actor("b1", Role::Barber), &Action::CreateManualAppointment { barber_id: "b2" }));
        assert!(can(&actor("a", Role::Admin), &Action::CreateManualAppointment { barber_id: "b2" }));
    }

    #[test]
    fn clients_cancel_only_their_own_open_bookings() {
        let own = appointment("c1", "b1", AppointmentStatus::Pending);
        assert!(can(&actor("c1", Role::Client), &Action::TransitionAppointment {
            appointment: &own,
            to: AppointmentStatus::Rejected,
        }));
        assert!(!can(&actor("c1", Role::Client), &Action::TransitionAppointment {
            appointment: &own,
            to: AppointmentStatus::Accepted,
        }));

        let someone_elses = appointment("c2", "b1", AppointmentStatus::Pending);
        assert!(!can(&actor("c1", Role::Client), &Action::TransitionAppointment {
            appointment: &someone_elses,
            to: AppointmentStatus::Rejected,
        }));

        let completed = appointment("c1", "b1", AppointmentStatus::Completed);
        assert!(!can(&actor("c1", Role::Client), &Action::TransitionAppointment {
            appointment: &completed,
            to: AppointmentStatus::Rejected,
        }));
    }

    #[test]
    fn barbers_transition_only_assigned_appointments() {
        let assigned = appointment("c1", "b1", AppointmentStatus::Pending);
        assert!(can(&actor("b1", Role::Barber), &Action::TransitionAppointment {
            appointment: &assigned,
            to: AppointmentStatus::Accepted,
        }));
        assert!(!can(&actor("b2", Role::Barber), &Action::TransitionAppointment {
            appointment: &assigned,
            to: AppointmentStatus::Accepted,
        }));
    }

    #[test]
    fn view_scope_follows_ownership() {
        let appt = appointment("c1", "b1", AppointmentStatus::Accepted);
        assert!(can(&actor("a", Role::Admin), &Action::ViewAppointment { appointment: &appt }));
        assert!(can(&actor("b1", Role::Barber), &Action::ViewAppointment { appointment: &appt }));
        assert!(can(&actor("c1", Role::Client), &Action::ViewAppointment { appointment: &appt }));
        assert!(!can(&actor("c2", Role::Client), &Action::ViewAppointment { appointment: &appt }));
    }
}
