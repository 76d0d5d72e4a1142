//! Banner service

use super::error::{ServiceError, ServiceResult};
use crate::dtos::SetBannerDTO;
use crate::entities::{Banner, BannerPosition, User};
use crate::repositories::BannerStore;
use tracing::{info, instrument, warn};
use validator::Validate;

pub struct BannerService<'a, B> {
    banners: &'a B,
}

impl<'a, B: BannerStore> BannerService<'a, B> {
    pub fn new(banners: &'a B) -> Self {
        Self { banners }
    }

    /// Replaces the banner shown at a position. Administrators only.
    #[instrument(skip(self, user, dto), fields(user_id = user.user_id, position = ?dto.position))]
    pub async fn set_banner(&self, user: &User, dto: SetBannerDTO) -> ServiceResult<Banner> {
        if !user.is_admin {
            warn!("Banner change refused to non administrator");
            return Err(ServiceError::Forbidden("Only administrators can change banners"));
        }
        dto.validate()?;

        let banner = self.banners.save(dto.position, &dto.content).await?;
        info!(banner_id = banner.banner_id, "Banner saved");
        Ok(banner)
    }

    pub async fn get_all_banners(&self) -> ServiceResult<Vec<Banner>> {
        Ok(self.banners.find_all().await?)
    }

    pub async fn get_banner(&self, position: BannerPosition) -> ServiceResult<Option<Banner>> {
        Ok(self.banners.find_by_position(position).await?)
    }
}
