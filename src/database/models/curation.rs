use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Join record selecting which portfolio image appears on the homepage and
/// in what order. Each image may be curated at most once (unique FK).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HomepageEntry {
    pub id: Uuid,
    pub portfolio_image_id: Uuid,
    pub display_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
