//! Common repository traits
//!
//! This module defines generic interfaces for database operations, and one
//! store trait per aggregate bundling the CRUD traits with its finders. The
//! service layer is written against the store traits only.

use crate::dtos::{CreatePollDTO, CreatePrivateMessageDTO, CreateTopicRecordDTO, NewUserDTO};
use crate::entities::{Banner, BannerPosition, Poll, PrivateMessage, Topic, User};
use sqlx::Error;

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the database)
/// * `CreateDTO` - DTO for creation (without ID, will be automatically generated)
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity in the database
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity with ID assigned by the database
    /// * `Err(sqlx::Error)` - Error during insertion
    async fn create(&self, data: &CreateDTO) -> Result<Entity, Error>;
}

/// Trait for reading a single entity by primary key
///
/// # Type Parameters
/// * `Entity` - Type of the entity to read
/// * `Id` - Type of the primary key
pub trait Read<Entity, Id> {
    /// Reads an entity from the database by its primary key
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    /// * `Err(sqlx::Error)` - Error during reading
    async fn read(&self, id: &Id) -> Result<Option<Entity>, Error>;
}

/// Trait for updating existing entities
///
/// # Type Parameters
/// * `Entity` - Type of the updated entity
/// * `UpdateDTO` - Data to store; the entity itself when the whole row is saved
/// * `Id` - Type of the primary key
pub trait Update<Entity, UpdateDTO, Id> {
    /// Updates an existing entity in the database
    ///
    /// # Returns
    /// * `Ok(Entity)` - Updated entity
    /// * `Err(sqlx::Error::RowNotFound)` - No entity with that ID
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<Entity, Error>;
}

/// Trait for deleting entities
pub trait Delete<Id> {
    /// Deletes an entity from the database. Deleting a missing row is not an error.
    async fn delete(&self, id: &Id) -> Result<(), Error>;
}

/// Persistence of user accounts
pub trait UserStore:
    Create<User, NewUserDTO> + Read<User, i32> + Update<User, User, i32> + Delete<i32>
{
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    async fn find_by_activation_uuid(&self, uuid: &str) -> Result<Option<User>, Error>;

    /// Users whose username starts with `prefix`, at most `limit` of them
    async fn search_by_username_partial(&self, prefix: &str, limit: i64) -> Result<Vec<User>, Error>;

    /// Accounts registered but never activated
    async fn find_non_activated(&self) -> Result<Vec<User>, Error>;
}

/// Persistence of private messages
pub trait PrivateMessageStore:
    Create<PrivateMessage, CreatePrivateMessageDTO>
    + Read<PrivateMessage, i32>
    + Update<PrivateMessage, PrivateMessage, i32>
    + Delete<i32>
{
    /// Delivered messages addressed to the user, newest first
    async fn find_inbox(&self, user_id: i32) -> Result<Vec<PrivateMessage>, Error>;

    /// Sent messages the user has not deleted, newest first
    async fn find_outbox(&self, user_id: i32) -> Result<Vec<PrivateMessage>, Error>;

    async fn find_drafts(&self, user_id: i32) -> Result<Vec<PrivateMessage>, Error>;

    /// Unread messages in the user inbox
    async fn count_unread_for(&self, user_id: i32) -> Result<i64, Error>;
}

/// Persistence of topics. A topic and its poll are created together.
pub trait TopicStore: Read<Topic, i32> {
    async fn create_with_poll(
        &self,
        topic: &CreateTopicRecordDTO,
        poll: Option<&CreatePollDTO>,
    ) -> Result<(Topic, Option<Poll>), Error>;
}

/// Persistence of polls, read with their items
pub trait PollStore: Read<Poll, i32> {
    async fn find_by_topic_id(&self, topic_id: i32) -> Result<Option<Poll>, Error>;

    /// Adds one vote to each listed item of the poll, atomically
    async fn increment_votes(&self, poll_id: i32, item_ids: &[i32]) -> Result<(), Error>;
}

/// Persistence of banners, unique per position
pub trait BannerStore {
    async fn find_all(&self) -> Result<Vec<Banner>, Error>;

    async fn find_by_position(&self, position: BannerPosition) -> Result<Option<Banner>, Error>;

    /// Inserts the banner of a position or replaces its content
    async fn save(&self, position: BannerPosition, content: &str) -> Result<Banner, Error>;
}
