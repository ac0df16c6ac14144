use axum::{extract::Path, response::Json};
use serde_json::Value;

use crate::database::models::Booking;
use crate::handlers::admin::validate;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{BookingService, NewBooking};

/// POST /bookings - unauthenticated booking creation from the public form.
///
/// The server generates the id and tracking code; the customer is shown the
/// tracking code for later status lookup. This is one of the two public
/// write paths, everything else goes through the privileged endpoint.
pub async fn create(Json(payload): Json<Value>) -> ApiResult<Booking> {
    let new: NewBooking = validate::decode_payload(payload, "booking")?;
    validate::new_booking(&new)?;

    let service = BookingService::new().await?;
    let booking = service.create(&new).await?;

    tracing::info!(booking_id = %booking.id, "Created booking");

    Ok(ApiResponse::created(booking))
}

/// GET /bookings/:tracking_code - unauthenticated status lookup
pub async fn lookup(Path(tracking_code): Path<String>) -> ApiResult<Booking> {
    let service = BookingService::new().await?;
    let booking = service.find_by_tracking_code(tracking_code.trim()).await?;
    Ok(ApiResponse::success(booking))
}
