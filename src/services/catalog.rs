use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Category, DiscountPlan, PortfolioImage};

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.slug.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPortfolioImage {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioImagePatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub featured: Option<bool>,
    pub display_order: Option<i32>,
}

impl PortfolioImagePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.featured.is_none()
            && self.display_order.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDiscountPlan {
    pub name: String,
    pub description: String,
    pub original_price: Decimal,
    #[serde(default)]
    pub discounted_price: Option<Decimal>,
    #[serde(default)]
    pub duration_days: Option<i32>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscountPlanPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub original_price: Option<Decimal>,
    pub discounted_price: Option<Decimal>,
    pub duration_days: Option<i32>,
    pub features: Option<Vec<String>>,
    pub conditions: Option<String>,
    pub category_id: Option<Uuid>,
    pub active: Option<bool>,
    pub display_order: Option<i32>,
}

impl DiscountPlanPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.original_price.is_none()
            && self.discounted_price.is_none()
            && self.duration_days.is_none()
            && self.features.is_none()
            && self.conditions.is_none()
            && self.category_id.is_none()
            && self.active.is_none()
            && self.display_order.is_none()
    }
}

/// Catalog queries and writes: portfolio images, their categories and the
/// pricing plans. Reads serve the public pages; writes come through the
/// privileged endpoint.
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub async fn list_portfolio(
        &self,
        category_id: Option<Uuid>,
    ) -> Result<Vec<PortfolioImage>, DatabaseError> {
        let rows = match category_id {
            Some(category_id) => {
                sqlx::query_as::<_, PortfolioImage>(
                    "SELECT * FROM portfolio_images WHERE category_id = $1 ORDER BY display_order ASC, created_at ASC, id ASC",
                )
                .bind(category_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, PortfolioImage>(
                    "SELECT * FROM portfolio_images ORDER BY display_order ASC, created_at ASC, id ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        let rows = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_active_plans(&self) -> Result<Vec<DiscountPlan>, DatabaseError> {
        let rows = sqlx::query_as::<_, DiscountPlan>(
            "SELECT * FROM discount_plans WHERE active ORDER BY display_order ASC, created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every plan including inactive ones, for the admin panel
    pub async fn list_all_plans(&self) -> Result<Vec<DiscountPlan>, DatabaseError> {
        let rows = sqlx::query_as::<_, DiscountPlan>(
            "SELECT * FROM discount_plans ORDER BY display_order ASC, created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_category(&self, new: &NewCategory) -> Result<Category, DatabaseError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.slug)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        patch: &CategoryPatch,
    ) -> Result<Category, DatabaseError> {
        let mut builder =
            sqlx::QueryBuilder::<sqlx::Postgres>::new("UPDATE categories SET updated_at = now()");

        if let Some(v) = &patch.name {
            builder.push(", name = ").push_bind(v);
        }
        if let Some(v) = &patch.slug {
            builder.push(", slug = ").push_bind(v);
        }
        if let Some(v) = &patch.description {
            builder.push(", description = ").push_bind(v);
        }

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Category>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category. Images and plans pointing at it are detached, not
    /// deleted; they fall back to uncategorized.
    pub async fn delete_category(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }

    pub async fn create_image(
        &self,
        new: &NewPortfolioImage,
    ) -> Result<PortfolioImage, DatabaseError> {
        let image = sqlx::query_as::<_, PortfolioImage>(
            r#"
            INSERT INTO portfolio_images (title, url, description, category_id, featured, display_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&new.title)
        .bind(&new.url)
        .bind(&new.description)
        .bind(new.category_id)
        .bind(new.featured)
        .bind(new.display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    pub async fn update_image(
        &self,
        id: Uuid,
        patch: &PortfolioImagePatch,
    ) -> Result<PortfolioImage, DatabaseError> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(
            "UPDATE portfolio_images SET updated_at = now()",
        );

        if let Some(v) = &patch.title {
            builder.push(", title = ").push_bind(v);
        }
        if let Some(v) = &patch.url {
            builder.push(", url = ").push_bind(v);
        }
        if let Some(v) = &patch.description {
            builder.push(", description = ").push_bind(v);
        }
        if let Some(v) = patch.category_id {
            builder.push(", category_id = ").push_bind(v);
        }
        if let Some(v) = patch.featured {
            builder.push(", featured = ").push_bind(v);
        }
        if let Some(v) = patch.display_order {
            builder.push(", display_order = ").push_bind(v);
        }

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<PortfolioImage>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Portfolio image {} not found", id)))
    }

    /// Delete a portfolio image. Any homepage curation entry for it goes
    /// with it (the FK cascades).
    pub async fn delete_image(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM portfolio_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "Portfolio image {} not found",
                id
            )));
        }
        Ok(())
    }

    pub async fn create_plan(&self, new: &NewDiscountPlan) -> Result<DiscountPlan, DatabaseError> {
        let plan = sqlx::query_as::<_, DiscountPlan>(
            r#"
            INSERT INTO discount_plans (
                name, description, original_price, discounted_price, duration_days,
                features, conditions, category_id, active, display_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.original_price)
        .bind(new.discounted_price)
        .bind(new.duration_days)
        .bind(&new.features)
        .bind(&new.conditions)
        .bind(new.category_id)
        .bind(new.active)
        .bind(new.display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(plan)
    }

    pub async fn update_plan(
        &self,
        id: Uuid,
        patch: &DiscountPlanPatch,
    ) -> Result<DiscountPlan, DatabaseError> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new(
            "UPDATE discount_plans SET updated_at = now()",
        );

        if let Some(v) = &patch.name {
            builder.push(", name = ").push_bind(v);
        }
        if let Some(v) = &patch.description {
            builder.push(", description = ").push_bind(v);
        }
        if let Some(v) = patch.original_price {
            builder.push(", original_price = ").push_bind(v);
        }
        if let Some(v) = patch.discounted_price {
            builder.push(", discounted_price = ").push_bind(v);
        }
        if let Some(v) = patch.duration_days {
            builder.push(", duration_days = ").push_bind(v);
        }
        if let Some(v) = &patch.features {
            builder.push(", features = ").push_bind(v);
        }
        if let Some(v) = &patch.conditions {
            builder.push(", conditions = ").push_bind(v);
        }
        if let Some(v) = patch.category_id {
            builder.push(", category_id = ").push_bind(v);
        }
        if let Some(v) = patch.active {
            builder.push(", active = ").push_bind(v);
        }
        if let Some(v) = patch.display_order {
            builder.push(", display_order = ").push_bind(v);
        }

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<DiscountPlan>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Plan {} not found", id)))
    }

    pub async fn delete_plan(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM discount_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Plan {} not found", id)));
        }
        Ok(())
    }
}
