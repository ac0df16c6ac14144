// Admin read endpoints. Unlike the public lists these include inactive
// rows; the panel toggles visibility rather than re-fetching filtered sets.

use crate::database::models::{Booking, CustomerReview, DiscountPlan, HomepageEntry};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{BookingService, CatalogService, CurationService, ReviewService};

/// GET /api/admin/bookings - every booking, newest first
pub async fn bookings() -> ApiResult<Vec<Booking>> {
    let service = BookingService::new().await?;
    Ok(ApiResponse::success(service.list_all().await?))
}

/// GET /api/admin/reviews - every review including inactive
pub async fn reviews() -> ApiResult<Vec<CustomerReview>> {
    let service = ReviewService::new().await?;
    Ok(ApiResponse::success(service.list_all().await?))
}

/// GET /api/admin/homepage - every curation entry including inactive
pub async fn homepage() -> ApiResult<Vec<HomepageEntry>> {
    let service = CurationService::new().await?;
    Ok(ApiResponse::success(service.list_all().await?))
}

/// GET /api/admin/plans - every pricing plan including inactive
pub async fn plans() -> ApiResult<Vec<DiscountPlan>> {
    let service = CatalogService::new().await?;
    Ok(ApiResponse::success(service.list_all_plans().await?))
}
