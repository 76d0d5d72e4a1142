//! Repositories module - database access for every entity
//!
//! Each repository owns a clone of the MySQL pool and implements the CRUD
//! traits plus the store trait of its aggregate.

// ************************* SQLX QUERIES ************************* //

/*
   Queries go through the runtime functions `sqlx::query`, `sqlx::query_as`
   and `sqlx::query_scalar`, so the crate builds without a reachable database.
   Pick the fetch method by the number of expected rows:

   Rows            Method                       Returns
   none            .execute(..).await           sqlx::Result<MySqlQueryResult>
   zero or one     .fetch_optional(..).await    sqlx::Result<Option<T>>
   exactly one     .fetch_one(..).await         sqlx::Result<T>   (aggregates, COUNT(*))
   many            .fetch_all(..).await         sqlx::Result<Vec<T>>

   Writes spanning several statements run in a transaction taken from the
   pool (`pool.begin()`), executed on `&mut *tx` and committed at the end.
   The sqlx error is propagated with `?` to the service layer, which maps it
   to a `ServiceError`.
*/

pub mod banner;
pub mod poll;
pub mod private_message;
pub mod topic;
pub mod traits;
pub mod user;

#[cfg(test)]
pub mod memory;

pub use traits::{
    BannerStore, Create, Delete, PollStore, PrivateMessageStore, Read, TopicStore, Update,
    UserStore,
};

pub use banner::BannerRepository;
pub use poll::PollRepository;
pub use private_message::PrivateMessageRepository;
pub use topic::TopicRepository;
pub use user::UserRepository;
