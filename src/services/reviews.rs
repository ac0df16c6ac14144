use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::CustomerReview;

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub customer_name: String,
    #[serde(default)]
    pub customer_name_en: Option<String>,
    #[serde(default)]
    pub customer_name_it: Option<String>,
    #[serde(default)]
    pub customer_location: Option<String>,
    pub review_text: String,
    #[serde(default)]
    pub review_text_en: Option<String>,
    #[serde(default)]
    pub review_text_it: Option<String>,
    pub rating: i32,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPatch {
    pub customer_name: Option<String>,
    pub customer_name_en: Option<String>,
    pub customer_name_it: Option<String>,
    pub customer_location: Option<String>,
    pub review_text: Option<String>,
    pub review_text_en: Option<String>,
    pub review_text_it: Option<String>,
    pub rating: Option<i32>,
    pub avatar_url: Option<String>,
    pub featured: Option<bool>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
}

impl ReviewPatch {
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.customer_name_en.is_none()
            && self.customer_name_it.is_none()
            && self.customer_location.is_none()
            && self.review_text.is_none()
            && self.review_text_en.is_none()
            && self.review_text_it.is_none()
            && self.rating.is_none()
            && self.avatar_url.is_none()
            && self.featured.is_none()
            && self.display_order.is_none()
            && self.active.is_none()
    }
}

pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Active reviews for public display, ordered for the carousel
    pub async fn list_active(&self) -> Result<Vec<CustomerReview>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerReview>(
            "SELECT * FROM customer_reviews WHERE active ORDER BY display_order ASC, created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Active reviews flagged for prioritized homepage display
    pub async fn list_featured(&self) -> Result<Vec<CustomerReview>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerReview>(
            "SELECT * FROM customer_reviews WHERE active AND featured ORDER BY display_order ASC, created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every review including inactive ones, for the admin panel
    pub async fn list_all(&self) -> Result<Vec<CustomerReview>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerReview>(
            "SELECT * FROM customer_reviews ORDER BY display_order ASC, created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(&self, new: &NewReview) -> Result<CustomerReview, DatabaseError> {
        let review = sqlx::query_as::<_, CustomerReview>(
            r#"
            INSERT INTO customer_reviews (
                customer_name, customer_name_en, customer_name_it, customer_location,
                review_text, review_text_en, review_text_it,
                rating, avatar_url, featured, display_order, active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&new.customer_name)
        .bind(&new.customer_name_en)
        .bind(&new.customer_name_it)
        .bind(&new.customer_location)
        .bind(&new.review_text)
        .bind(&new.review_text_en)
        .bind(&new.review_text_it)
        .bind(new.rating)
        .bind(&new.avatar_url)
        .bind(new.featured)
        .bind(new.display_order)
        .bind(new.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    pub async fn update(&self, id: Uuid, patch: &ReviewPatch) -> Result<CustomerReview, DatabaseError> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new("UPDATE customer_reviews SET updated_at = now()");

        if let Some(v) = &patch.customer_name {
            builder.push(", customer_name = ").push_bind(v);
        }
        if let Some(v) = &patch.customer_name_en {
            builder.push(", customer_name_en = ").push_bind(v);
        }
        if let Some(v) = &patch.customer_name_it {
            builder.push(", customer_name_it = ").push_bind(v);
        }
        if let Some(v) = &patch.customer_location {
            builder.push(", customer_location = ").push_bind(v);
        }
        if let Some(v) = &patch.review_text {
            builder.push(", review_text = ").push_bind(v);
        }
        if let Some(v) = &patch.review_text_en {
            builder.push(", review_text_en = ").push_bind(v);
        }
        if let Some(v) = &patch.review_text_it {
            builder.push(", review_text_it = ").push_bind(v);
        }
        if let Some(v) = patch.rating {
            builder.push(", rating = ").push_bind(v);
        }
        if let Some(v) = &patch.avatar_url {
            builder.push(", avatar_url = ").push_bind(v);
        }
        if let Some(v) = patch.featured {
            builder.push(", featured = ").push_bind(v);
        }
        if let Some(v) = patch.display_order {
            builder.push(", display_order = ").push_bind(v);
        }
        if let Some(v) = patch.active {
            builder.push(", active = ").push_bind(v);
        }

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<CustomerReview>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Review {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM customer_reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Review {} not found", id)));
        }
        Ok(())
    }
}
