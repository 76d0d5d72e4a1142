//! Application State - shared state of the application
//!
//! Holds the repositories, the shared caches and the configured services
//! needed to serve the requests.

use crate::repositories::{
    BannerRepository, PollRepository, PrivateMessageRepository, TopicRepository, UserRepository,
};
use crate::services::{
    BannerService, MailService, PollService, PrivateMessageService, TopicService, UserDataCache,
    UserService,
};
use crate::validation::PollValidator;
use sqlx::MySqlPool;

/// Global state shared by every route and middleware
pub struct AppState {
    pub user: UserRepository,

    pub pm: PrivateMessageRepository,

    pub topic: TopicRepository,

    pub poll: PollRepository,

    pub banner: BannerRepository,

    /// Secret key for the JWT tokens
    pub jwt_secret: String,

    pub mail: MailService,

    /// Unread private message counters per user
    pub user_data: UserDataCache,

    pub poll_validator: PollValidator,
}

impl AppState {
    /// Creates the repositories over the shared connection pool
    pub fn new(
        pool: MySqlPool,
        jwt_secret: String,
        mail: MailService,
        poll_validator: PollValidator,
    ) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            pm: PrivateMessageRepository::new(pool.clone()),
            topic: TopicRepository::new(pool.clone()),
            poll: PollRepository::new(pool.clone()),
            banner: BannerRepository::new(pool),
            jwt_secret,
            mail,
            user_data: UserDataCache::new(),
            poll_validator,
        }
    }

    pub fn users(&self) -> UserService<'_, UserRepository> {
        UserService::new(&self.user, &self.mail, &self.jwt_secret)
    }

    pub fn private_messages(&self) -> PrivateMessageService<'_, PrivateMessageRepository, UserRepository> {
        PrivateMessageService::new(&self.pm, &self.user, &self.user_data, &self.mail)
    }

    pub fn topics(&self) -> TopicService<'_, TopicRepository, PollRepository> {
        TopicService::new(&self.topic, &self.poll, &self.poll_validator)
    }

    pub fn polls(&self) -> PollService<'_, PollRepository> {
        PollService::new(&self.poll)
    }

    pub fn banners(&self) -> BannerService<'_, BannerRepository> {
        BannerService::new(&self.banner)
    }
}
