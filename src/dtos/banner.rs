//! Banner DTOs

use crate::entities::BannerPosition;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SetBannerDTO {
    pub position: BannerPosition,

    #[validate(length(max = 65535, message = "Banner content is too long"))]
    pub content: String,
}
