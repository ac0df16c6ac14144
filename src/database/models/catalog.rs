// Catalog rows: served read-only to the public pages, managed by the admin
// panel through the privileged mutation endpoint.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PortfolioImage {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub featured: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiscountPlan {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub original_price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub duration_days: Option<i32>,
    pub features: Vec<String>,
    pub conditions: Option<String>,
    pub category_id: Option<Uuid>,
    pub active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
