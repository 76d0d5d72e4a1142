//! PollRepository - MySQL persistence of polls and poll items

use super::{PollStore, Read};
use crate::entities::{Poll, PollItem};
use sqlx::{Error, MySqlPool};

pub struct PollRepository {
    connection_pool: MySqlPool,
}

impl PollRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    async fn with_items(&self, poll: Option<Poll>) -> Result<Option<Poll>, Error> {
        let Some(mut poll) = poll else {
            return Ok(None);
        };
        poll.items = sqlx::query_as::<_, PollItem>(
            "SELECT item_id, poll_id, name, votes_count FROM poll_items WHERE poll_id = ? ORDER BY item_id",
        )
        .bind(poll.poll_id)
        .fetch_all(&self.connection_pool)
        .await?;
        Ok(Some(poll))
    }
}

impl Read<Poll, i32> for PollRepository {
    async fn read(&self, id: &i32) -> Result<Option<Poll>, Error> {
        let poll = sqlx::query_as::<_, Poll>(
            "SELECT poll_id, topic_id, title, ending_date FROM polls WHERE poll_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;
        self.with_items(poll).await
    }
}

impl PollStore for PollRepository {
    async fn find_by_topic_id(&self, topic_id: i32) -> Result<Option<Poll>, Error> {
        let poll = sqlx::query_as::<_, Poll>(
            "SELECT poll_id, topic_id, title, ending_date FROM polls WHERE topic_id = ?",
        )
        .bind(topic_id)
        .fetch_optional(&self.connection_pool)
        .await?;
        self.with_items(poll).await
    }

    async fn increment_votes(&self, poll_id: i32, item_ids: &[i32]) -> Result<(), Error> {
        let mut tx = self.connection_pool.begin().await?;
        for item_id in item_ids {
            sqlx::query(
                "UPDATE poll_items SET votes_count = votes_count + 1 WHERE item_id = ? AND poll_id = ?",
            )
            .bind(item_id)
            .bind(poll_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}
