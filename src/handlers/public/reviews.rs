use crate::database::models::CustomerReview;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ReviewService;

/// GET /reviews - active testimonials in display order
pub async fn list() -> ApiResult<Vec<CustomerReview>> {
    let service = ReviewService::new().await?;
    Ok(ApiResponse::success(service.list_active().await?))
}

/// GET /reviews/featured - active reviews flagged for the homepage
pub async fn featured() -> ApiResult<Vec<CustomerReview>> {
    let service = ReviewService::new().await?;
    Ok(ApiResponse::success(service.list_featured().await?))
}
