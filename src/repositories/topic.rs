//! TopicRepository - MySQL persistence of topics and their polls

use super::{Read, TopicStore};
use crate::dtos::{CreatePollDTO, CreateTopicRecordDTO};
use crate::entities::{Poll, PollItem, Topic};
use sqlx::{Error, MySqlPool};

pub struct TopicRepository {
    connection_pool: MySqlPool,
}

impl TopicRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

impl Read<Topic, i32> for TopicRepository {
    async fn read(&self, id: &i32) -> Result<Option<Topic>, Error> {
        sqlx::query_as::<_, Topic>(
            "SELECT topic_id, title, content, author_id, created_at FROM topics WHERE topic_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl TopicStore for TopicRepository {
    /// Inserts the topic, then the poll and its items, in one transaction
    async fn create_with_poll(
        &self,
        topic: &CreateTopicRecordDTO,
        poll: Option<&CreatePollDTO>,
    ) -> Result<(Topic, Option<Poll>), Error> {
        let mut tx = self.connection_pool.begin().await?;

        let topic_id = sqlx::query(
            "INSERT INTO topics (title, content, author_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&topic.title)
        .bind(&topic.content)
        .bind(topic.author_id)
        .bind(topic.created_at)
        .execute(&mut *tx)
        .await?
        .last_insert_id() as i32;

        let created_poll = match poll {
            None => None,
            Some(poll) => {
                let poll_id = sqlx::query(
                    "INSERT INTO polls (topic_id, title, ending_date) VALUES (?, ?, ?)",
                )
                .bind(topic_id)
                .bind(&poll.title)
                .bind(poll.ending_date)
                .execute(&mut *tx)
                .await?
                .last_insert_id() as i32;

                let mut items = Vec::with_capacity(poll.items.len());
                for name in &poll.items {
                    let item_id = sqlx::query(
                        "INSERT INTO poll_items (poll_id, name, votes_count) VALUES (?, ?, 0)",
                    )
                    .bind(poll_id)
                    .bind(name)
                    .execute(&mut *tx)
                    .await?
                    .last_insert_id() as i32;
                    items.push(PollItem {
                        item_id,
                        poll_id,
                        name: name.clone(),
                        votes_count: 0,
                    });
                }

                Some(Poll {
                    poll_id,
                    topic_id,
                    title: poll.title.clone(),
                    ending_date: poll.ending_date,
                    items,
                })
            }
        };

        tx.commit().await?;

        let created_topic = Topic {
            topic_id,
            title: topic.title.clone(),
            content: topic.content.clone(),
            author_id: topic.author_id,
            created_at: topic.created_at,
        };
        Ok((created_topic, created_poll))
    }
}
