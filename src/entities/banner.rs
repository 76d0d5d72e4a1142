//! Banner entity

use super::enums::BannerPosition;
use serde::{Deserialize, Serialize};

/// Raw HTML/JS block shown at a fixed place of every page, one per position
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Banner {
    pub banner_id: i32,
    pub position_on_page: BannerPosition,
    pub content: String,
}
