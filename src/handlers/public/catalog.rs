use axum::extract::Query;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{Category, DiscountPlan, HomepageEntry, PortfolioImage};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{CatalogService, CurationService};

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    pub category: Option<Uuid>,
}

/// GET /portfolio - gallery images, optionally filtered by category
pub async fn portfolio(Query(query): Query<PortfolioQuery>) -> ApiResult<Vec<PortfolioImage>> {
    let service = CatalogService::new().await?;
    Ok(ApiResponse::success(service.list_portfolio(query.category).await?))
}

/// GET /categories
pub async fn categories() -> ApiResult<Vec<Category>> {
    let service = CatalogService::new().await?;
    Ok(ApiResponse::success(service.list_categories().await?))
}

/// GET /plans - active pricing plans in display order
pub async fn plans() -> ApiResult<Vec<DiscountPlan>> {
    let service = CatalogService::new().await?;
    Ok(ApiResponse::success(service.list_active_plans().await?))
}

/// GET /homepage - active curation entries in carousel order
pub async fn homepage() -> ApiResult<Vec<HomepageEntry>> {
    let service = CurationService::new().await?;
    Ok(ApiResponse::success(service.list_active().await?))
}
