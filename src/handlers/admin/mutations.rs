use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use uuid::Uuid;

use super::validate;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{BookingService, CatalogService, CurationService, ReviewService};

/// Closed action vocabulary of the privileged endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    UpdateCalled,
    UpdateStatus,
    Delete,
    Create,
    Update,
}

impl FromStr for Action {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "update_called" => Ok(Action::UpdateCalled),
            "update_status" => Ok(Action::UpdateStatus),
            "delete" => Ok(Action::Delete),
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            other => Err(ApiError::bad_request(format!("Invalid action: {}", other))),
        }
    }
}

/// Resource families that accept privileged writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTable {
    Bookings,
    CustomerReviews,
    HomepagePortfolio,
    PortfolioImages,
    Categories,
    DiscountPlans,
}

impl FromStr for TargetTable {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bookings" => Ok(TargetTable::Bookings),
            "customer_reviews" => Ok(TargetTable::CustomerReviews),
            "homepage_portfolio" => Ok(TargetTable::HomepagePortfolio),
            "portfolio_images" => Ok(TargetTable::PortfolioImages),
            "categories" => Ok(TargetTable::Categories),
            "discount_plans" => Ok(TargetTable::DiscountPlans),
            other => Err(ApiError::bad_request(format!("Unknown table: {}", other))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MutationRequest {
    pub action: String,
    pub target_table: String,
    pub id: Option<String>,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Deserialize)]
struct CalledData {
    called: bool,
}

#[derive(Debug, Deserialize)]
struct StatusData {
    status: String,
}

/// POST /api/admin/mutations - the single dispatch point for privileged
/// writes. Authentication already happened in middleware; each arm performs
/// exactly one row write and returns the full post-mutation row so the
/// caller can patch its local state without a follow-up read. No retries,
/// no transactions, last writer wins.
pub async fn mutate(Json(req): Json<MutationRequest>) -> ApiResult<Value> {
    let action = req.action.parse::<Action>()?;
    let table = req.target_table.parse::<TargetTable>()?;

    tracing::info!(action = %req.action, table = %req.target_table, id = ?req.id, "Admin mutation");

    match action {
        Action::UpdateCalled => {
            require_bookings(table, "update_called")?;
            let id = require_id(&req.id)?;
            let data: CalledData = validate::decode_payload(req.data, "update_called")?;

            let service = BookingService::new().await?;
            let booking = service.set_called(id, data.called).await?;
            Ok(ApiResponse::success(serde_json::to_value(booking)?))
        }
        Action::UpdateStatus => {
            require_bookings(table, "update_status")?;
            let id = require_id(&req.id)?;
            let data: StatusData = validate::decode_payload(req.data, "update_status")?;
            validate::status_value(&data.status)?;

            let service = BookingService::new().await?;
            let booking = service.set_status(id, &data.status).await?;
            Ok(ApiResponse::success(serde_json::to_value(booking)?))
        }
        Action::Delete => {
            let id = require_id(&req.id)?;
            delete_row(table, id).await?;
            Ok(ApiResponse::success(json!({ "deleted": true, "id": id })))
        }
        Action::Create => create_row(table, req.data).await,
        Action::Update => {
            let id = require_id(&req.id)?;
            update_row(table, id, req.data).await
        }
    }
}

fn require_bookings(table: TargetTable, action: &str) -> Result<(), ApiError> {
    if table != TargetTable::Bookings {
        return Err(ApiError::bad_request(format!(
            "Action {} only applies to bookings",
            action
        )));
    }
    Ok(())
}

fn require_id(id: &Option<String>) -> Result<Uuid, ApiError> {
    let raw = id
        .as_deref()
        .ok_or_else(|| ApiError::invalid_field("id", "required for this action"))?;
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_field("id", "not a valid identifier"))
}

async fn create_row(table: TargetTable, data: Value) -> ApiResult<Value> {
    match table {
        TargetTable::Bookings => {
            let new = validate::decode_payload(data, "booking")?;
            validate::new_booking(&new)?;
            let service = BookingService::new().await?;
            let row = service.create(&new).await?;
            Ok(ApiResponse::created(serde_json::to_value(row)?))
        }
        TargetTable::CustomerReviews => {
            let new = validate::decode_payload(data, "review")?;
            validate::new_review(&new)?;
            let service = ReviewService::new().await?;
            let row = service.create(&new).await?;
            Ok(ApiResponse::created(serde_json::to_value(row)?))
        }
        TargetTable::HomepagePortfolio => {
            let new = validate::decode_payload(data, "homepage entry")?;
            let service = CurationService::new().await?;
            let row = service.create(&new).await?;
            Ok(ApiResponse::created(serde_json::to_value(row)?))
        }
        TargetTable::PortfolioImages => {
            let new = validate::decode_payload(data, "portfolio image")?;
            validate::new_portfolio_image(&new)?;
            let service = CatalogService::new().await?;
            let row = service.create_image(&new).await?;
            Ok(ApiResponse::created(serde_json::to_value(row)?))
        }
        TargetTable::Categories => {
            let new = validate::decode_payload(data, "category")?;
            validate::new_category(&new)?;
            let service = CatalogService::new().await?;
            let row = service.create_category(&new).await?;
            Ok(ApiResponse::created(serde_json::to_value(row)?))
        }
        TargetTable::DiscountPlans => {
            let new = validate::decode_payload(data, "plan")?;
            validate::new_plan(&new)?;
            let service = CatalogService::new().await?;
            let row = service.create_plan(&new).await?;
            Ok(ApiResponse::created(serde_json::to_value(row)?))
        }
    }
}

async fn update_row(table: TargetTable, id: Uuid, data: Value) -> ApiResult<Value> {
    match table {
        TargetTable::Bookings => {
            let patch = validate::decode_payload(data, "booking")?;
            validate::booking_patch(&patch)?;
            let service = BookingService::new().await?;
            let row = service.update(id, &patch).await?;
            Ok(ApiResponse::success(serde_json::to_value(row)?))
        }
        TargetTable::CustomerReviews => {
            let patch = validate::decode_payload(data, "review")?;
            validate::review_patch(&patch)?;
            let service = ReviewService::new().await?;
            let row = service.update(id, &patch).await?;
            Ok(ApiResponse::success(serde_json::to_value(row)?))
        }
        TargetTable::HomepagePortfolio => {
            let patch = validate::decode_payload(data, "homepage entry")?;
            validate::homepage_entry_patch(&patch)?;
            let service = CurationService::new().await?;
            let row = service.update(id, &patch).await?;
            Ok(ApiResponse::success(serde_json::to_value(row)?))
        }
        TargetTable::PortfolioImages => {
            let patch = validate::decode_payload(data, "portfolio image")?;
            validate::portfolio_image_patch(&patch)?;
            let service = CatalogService::new().await?;
            let row = service.update_image(id, &patch).await?;
            Ok(ApiResponse::success(serde_json::to_value(row)?))
        }
        TargetTable::Categories => {
            let patch = validate::decode_payload(data, "category")?;
            validate::category_patch(&patch)?;
            let service = CatalogService::new().await?;
            let row = service.update_category(id, &patch).await?;
            Ok(ApiResponse::success(serde_json::to_value(row)?))
        }
        TargetTable::DiscountPlans => {
            let patch = validate::decode_payload(data, "plan")?;
            validate::plan_patch(&patch)?;
            let service = CatalogService::new().await?;
            let row = service.update_plan(id, &patch).await?;
            Ok(ApiResponse::success(serde_json::to_value(row)?))
        }
    }
}

async fn delete_row(table: TargetTable, id: Uuid) -> Result<(), ApiError> {
    match table {
        TargetTable::Bookings => {
            let service = BookingService::new().await?;
            service.delete(id).await?;
        }
        TargetTable::CustomerReviews => {
            let service = ReviewService::new().await?;
            service.delete(id).await?;
        }
        TargetTable::HomepagePortfolio => {
            let service = CurationService::new().await?;
            service.delete(id).await?;
        }
        TargetTable::PortfolioImages => {
            let service = CatalogService::new().await?;
            service.delete_image(id).await?;
        }
        TargetTable::Categories => {
            let service = CatalogService::new().await?;
            service.delete_category(id).await?;
        }
        TargetTable::DiscountPlans => {
            let service = CatalogService::new().await?;
            service.delete_plan(id).await?;
        }
    }
    Ok(())
}
