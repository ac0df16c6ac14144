use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::HomepageEntry;

#[derive(Debug, Clone, Deserialize)]
pub struct NewHomepageEntry {
    pub portfolio_image_id: Uuid,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HomepageEntryPatch {
    pub display_order: Option<i32>,
    pub active: Option<bool>,
}

impl HomepageEntryPatch {
    pub fn is_empty(&self) -> bool {
        self.display_order.is_none() && self.active.is_none()
    }
}

pub struct CurationService {
    pool: PgPool,
}

impl CurationService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    /// Active curation entries in carousel order
    pub async fn list_active(&self) -> Result<Vec<HomepageEntry>, DatabaseError> {
        let rows = sqlx::query_as::<_, HomepageEntry>(
            "SELECT * FROM homepage_portfolio WHERE active ORDER BY display_order ASC, created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every entry including inactive ones, for the admin panel
    pub async fn list_all(&self) -> Result<Vec<HomepageEntry>, DatabaseError> {
        let rows = sqlx::query_as::<_, HomepageEntry>(
            "SELECT * FROM homepage_portfolio ORDER BY display_order ASC, created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Curate an image onto the homepage. The FK guarantees the image
    /// exists; the unique constraint guarantees at-most-once curation.
    pub async fn create(&self, new: &NewHomepageEntry) -> Result<HomepageEntry, DatabaseError> {
        let entry = sqlx::query_as::<_, HomepageEntry>(
            r#"
            INSERT INTO homepage_portfolio (portfolio_image_id, display_order, active)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(new.portfolio_image_id)
        .bind(new.display_order)
        .bind(new.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: &HomepageEntryPatch,
    ) -> Result<HomepageEntry, DatabaseError> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Postgres>::new("UPDATE homepage_portfolio SET updated_at = now()");

        if let Some(v) = patch.display_order {
            builder.push(", display_order = ").push_bind(v);
        }
        if let Some(v) = patch.active {
            builder.push(", active = ").push_bind(v);
        }

        builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<HomepageEntry>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Homepage entry {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM homepage_portfolio WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Homepage entry {} not found", id)));
        }
        Ok(())
    }
}
