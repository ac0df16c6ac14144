use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Customer testimonial. Public reads filter to `active`; `featured` rows
/// are eligible for prioritized display on the homepage.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustomerReview {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_name_en: Option<String>,
    pub customer_name_it: Option<String>,
    pub customer_location: Option<String>,
    pub review_text: String,
    pub review_text_en: Option<String>,
    pub review_text_it: Option<String>,
    /// 1..=5, enforced both here and by a DB CHECK constraint.
    pub rating: i32,
    pub avatar_url: Option<String>,
    pub featured: bool,
    /// Public sort key, ascending; ties broken by id.
    pub display_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
