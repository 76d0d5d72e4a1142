//! Topic and poll DTOs

use crate::entities::{Poll, PollItem, Topic};
use crate::validation::PollForm;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// New topic form. The poll fields are checked by `PollValidator`, the poll
/// is created only when `poll_title` is filled in.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateTopicDTO {
    #[validate(length(min = 1, max = 255, message = "Topic title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 20000, message = "Topic content must be between 1 and 20000 characters"))]
    pub content: String,

    pub poll_title: Option<String>,
    /// One poll item per line
    pub poll_items: Option<String>,
    /// `dd-MM-yyyy`
    pub ending_date: Option<String>,
}

impl CreateTopicDTO {
    pub fn poll_form(&self) -> PollForm<'_> {
        PollForm {
            title: self.poll_title.as_deref(),
            items: self.poll_items.as_deref(),
            ending_date: self.ending_date.as_deref(),
        }
    }
}

/// Row to insert for a new topic
#[derive(Debug, Clone)]
pub struct CreateTopicRecordDTO {
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Poll to insert together with its topic and items
#[derive(Debug, Clone)]
pub struct CreatePollDTO {
    pub title: String,
    pub ending_date: Option<DateTime<Utc>>,
    pub items: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PollItemDTO {
    pub item_id: i32,
    pub name: String,
    pub votes_count: i32,
}

impl From<PollItem> for PollItemDTO {
    fn from(value: PollItem) -> Self {
        Self {
            item_id: value.item_id,
            name: value.name,
            votes_count: value.votes_count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PollDTO {
    pub poll_id: i32,
    pub topic_id: i32,
    pub title: String,
    pub ending_date: Option<DateTime<Utc>>,
    pub active: bool,
    pub total_votes: i32,
    pub items: Vec<PollItemDTO>,
}

impl From<Poll> for PollDTO {
    fn from(value: Poll) -> Self {
        let active = value.is_active(Utc::now());
        let total_votes = value.total_votes();
        Self {
            poll_id: value.poll_id,
            topic_id: value.topic_id,
            title: value.title,
            ending_date: value.ending_date,
            active,
            total_votes,
            items: value.items.into_iter().map(PollItemDTO::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TopicDTO {
    pub topic_id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub poll: Option<PollDTO>,
}

impl TopicDTO {
    pub fn new(topic: Topic, poll: Option<Poll>) -> Self {
        Self {
            topic_id: topic.topic_id,
            title: topic.title,
            content: topic.content,
            author_id: topic.author_id,
            created_at: topic.created_at,
            poll: poll.map(PollDTO::from),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct VoteDTO {
    pub item_ids: Vec<i32>,
}
