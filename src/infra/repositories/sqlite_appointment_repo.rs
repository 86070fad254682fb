use crate::domain::{
    models::appointment::{Appointment, AppointmentStatus, ClientStats},
    ports::AppointmentRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteAppointmentRepo {
    pool: SqlitePool,
}

impl SqliteAppointmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepo {
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        // The partial unique slot index is the exclusivity invariant; a losing
        // concurrent writer surfaces here as a unique violation.
        let result = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (id, tenant_id, client_id, barber_id, service_id, location_id, date, time, status, notes, service_price, created_manually, created_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&appointment.id).bind(&appointment.tenant_id).bind(&appointment.client_id)
            .bind(&appointment.barber_id).bind(&appointment.service_id).bind(&appointment.location_id)
            .bind(appointment.date).bind(appointment.time).bind(appointment.status)
            .bind(&appointment.notes).bind(appointment.service_price)
            .bind(appointment.created_manually).bind(&appointment.created_by)
            .bind(appointment.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database);

        match result {
            Err(e) if e.is_unique_violation() => {
                Err(AppError::Conflict("Time slot is already booked".into()))
            }
            other => other,
        }
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE tenant_id = ? ORDER BY date DESC, time DESC"
        )
            .bind(tenant_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_client(&self, tenant_id: &str, client_id: &str) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE tenant_id = ? AND client_id = ? ORDER BY date DESC, time DESC"
        )
            .bind(tenant_id).bind(client_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_barber(&self, tenant_id: &str, barber_id: &str) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE tenant_id = ? AND barber_id = ? ORDER BY date DESC, time DESC"
        )
            .bind(tenant_id).bind(barber_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_holding_slots(&self, tenant_id: &str, barber_id: &str, date: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE tenant_id = ? AND barber_id = ? AND date = ? AND status != 'rejected' ORDER BY time ASC"
        )
            .bind(tenant_id).bind(barber_id).bind(date)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_status(
        &self,
        tenant_id: &str,
        id: &str,
        from: AppointmentStatus,
        to: AppointmentStatus,
    ) -> Result<Option<Appointment>, AppError> {
        // Guarded on the current status: a concurrent transition makes this a
        // no-op instead of skipping a state.
        sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET status = ? WHERE tenant_id = ? AND id = ? AND status = ? RETURNING *"
        )
            .bind(to).bind(tenant_id).bind(id).bind(from)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn client_stats(&self, tenant_id: &str, client_id: &str) -> Result<ClientStats, AppError> {
        sqlx::query_as::<_, ClientStats>(
            "SELECT COUNT(*) AS total_appointments,
                    COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0) AS completed_appointments,
                    COALESCE(SUM(CASE WHEN status = 'completed' THEN service_price ELSE 0.0 END), 0.0) AS total_spent,
                    MAX(CASE WHEN status = 'completed' THEN date END) AS last_visit
             FROM appointments WHERE tenant_id = ? AND client_id = ?"
        )
            .bind(tenant_id).bind(client_id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
}
