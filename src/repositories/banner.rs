//! BannerRepository - MySQL persistence of banners

use super::BannerStore;
use crate::entities::{Banner, BannerPosition};
use sqlx::{Error, MySqlPool};

pub struct BannerRepository {
    connection_pool: MySqlPool,
}

impl BannerRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

impl BannerStore for BannerRepository {
    async fn find_all(&self) -> Result<Vec<Banner>, Error> {
        sqlx::query_as::<_, Banner>(
            "SELECT banner_id, position_on_page, content FROM banners ORDER BY banner_id",
        )
        .fetch_all(&self.connection_pool)
        .await
    }

    async fn find_by_position(&self, position: BannerPosition) -> Result<Option<Banner>, Error> {
        sqlx::query_as::<_, Banner>(
            "SELECT banner_id, position_on_page, content FROM banners WHERE position_on_page = ?",
        )
        .bind(position)
        .fetch_optional(&self.connection_pool)
        .await
    }

    async fn save(&self, position: BannerPosition, content: &str) -> Result<Banner, Error> {
        // position_on_page is UNIQUE
        sqlx::query(
            r#"
            INSERT INTO banners (position_on_page, content) VALUES (?, ?)
            ON DUPLICATE KEY UPDATE content = VALUES(content)
            "#,
        )
        .bind(position)
        .bind(content)
        .execute(&self.connection_pool)
        .await?;

        self.find_by_position(position)
            .await?
            .ok_or(Error::RowNotFound)
    }
}
