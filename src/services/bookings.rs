use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Booking;

/// Fields accepted when creating a booking. The tracking code, timestamps
/// and initial called/status values are server-generated.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub plan_type: String,
    pub plan_price: Decimal,
}

/// Partial update applied through the privileged endpoint. The tracking
/// code is deliberately present so a patch naming it can be rejected with a
/// field-level error instead of being silently dropped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub plan_type: Option<String>,
    pub plan_price: Option<Decimal>,
    pub called: Option<bool>,
    pub status: Option<String>,
    pub tracking_code: Option<String>,
}

impl BookingPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.plan_type.is_none()
            && self.plan_price.is_none()
            && self.called.is_none()
            && self.status.is_none()
    }
}

pub struct BookingService {
    pool: PgPool,
}

impl BookingService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Insert a new booking with a generated tracking code. Single attempt;
    /// a tracking-code collision surfaces as a unique violation.
    pub async fn create(&self, new: &NewBooking) -> Result<Booking, DatabaseError> {
        let tracking_code = Booking::generate_tracking_code();

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (first_name, last_name, phone, plan_type, plan_price, tracking_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.phone)
        .bind(&new.plan_type)
        .bind(new.plan_price)
        .bind(&tracking_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Unauthenticated status lookup by tracking code
    pub async fn find_by_tracking_code(&self, code: &str) -> Result<Booking, DatabaseError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE tracking_code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No booking for tracking code {}", code)))
    }

    /// All bookings for the admin panel, newest first
    pub async fn list_all(&self) -> Result<Vec<Booking>, DatabaseError> {
        let rows = sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn set_called(&self, id: Uuid, called: bool) -> Result<Booking, DatabaseError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET called = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(called)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("Booking {} not found", id)))
    }

    pub async fn set_status(&self, id: Uuid, status: &str) -> Result<Booking, DatabaseError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("Booking {} not found", id)))
    }

    pub async fn update(&self, id: Uuid, patch: &BookingPatch) -> Result<Booking, DatabaseError> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new("UPDATE bookings SET updated_at = now()");

        if let Some(v) = &patch.first_name {
            builder.push(", first_name = ").push_bind(v);
        }
        if let Some(v) = &patch.last_name {
            builder.push(", last_name = ").push_bind(v);
        }
        if let Some(v) = &patch.phone {
            builder.push(", phone = ").push_bind(v);
        }
        if let Some(v) = &patch.plan_type {
            builder.push(", plan_type = ").push_bind(v);
        }
        if let Some(v) = patch.plan_price {
            builder.push(", plan_price = ").push_bind(v);
        }
        if let Some(v) = patch.called {
            builder.push(", called = ").push_bind(v);
        }
        if let Some(v) = &patch.status {
            builder.push(", status = ").push_bind(v);
        }

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Booking>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Booking {} not found", id)))
    }

    /// Hard delete. A missing row reports NotFound rather than succeeding.
    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Booking {} not found", id)));
        }
        Ok(())
    }
}
