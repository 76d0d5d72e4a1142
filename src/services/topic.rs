//! Topic service - topics created together with their optional poll

use super::error::{ServiceError, ServiceResult};
use crate::dtos::{CreatePollDTO, CreateTopicDTO, CreateTopicRecordDTO};
use crate::entities::{Poll, Topic, User};
use crate::repositories::{PollStore, Read, TopicStore};
use crate::validation::{PollValidator, parse_ending_date, parse_items};
use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

pub struct TopicService<'a, T, P> {
    topics: &'a T,
    polls: &'a P,
    validator: &'a PollValidator,
}

impl<'a, T: TopicStore, P: PollStore> TopicService<'a, T, P> {
    pub fn new(topics: &'a T, polls: &'a P, validator: &'a PollValidator) -> Self {
        Self {
            topics,
            polls,
            validator,
        }
    }

    /// Validates the topic form and its poll fields, then stores both
    #[instrument(skip(self, author, dto), fields(user_id = author.user_id))]
    pub async fn create_topic(
        &self,
        author: &User,
        dto: CreateTopicDTO,
    ) -> ServiceResult<(Topic, Option<Poll>)> {
        let now = Utc::now();
        dto.validate()?;
        self.validator.validate(&dto.poll_form(), now)?;

        let poll = match dto.poll_title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => Some(CreatePollDTO {
                title: title.to_string(),
                ending_date: dto.ending_date.as_deref().and_then(parse_ending_date),
                items: dto.poll_items.as_deref().map(parse_items).unwrap_or_default(),
            }),
            _ => None,
        };
        let record = CreateTopicRecordDTO {
            title: dto.title,
            content: dto.content,
            author_id: author.user_id,
            created_at: now,
        };

        let (topic, poll) = self.topics.create_with_poll(&record, poll.as_ref()).await?;
        info!(topic_id = topic.topic_id, with_poll = poll.is_some(), "Topic created");
        Ok((topic, poll))
    }

    pub async fn get_topic(&self, topic_id: i32) -> ServiceResult<(Topic, Option<Poll>)> {
        let topic = self
            .topics
            .read(&topic_id)
            .await?
            .ok_or(ServiceError::NotFound("Topic"))?;
        let poll = self.polls.find_by_topic_id(topic_id).await?;
        Ok((topic, poll))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::user::sample_user;
    use crate::repositories::memory::MemoryForumStore;
    use chrono::Duration;

    fn topic_form() -> CreateTopicDTO {
        CreateTopicDTO {
            title: "Weekend plans".to_string(),
            content: "Where do we go?".to_string(),
            poll_title: None,
            poll_items: None,
            ending_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_topic_without_poll() {
        let store = MemoryForumStore::new();
        let validator = PollValidator::default();
        let service = TopicService::new(&store, &store, &validator);

        let (topic, poll) = service.create_topic(&sample_user(1, "alice"), topic_form()).await.unwrap();

        assert_eq!(topic.author_id, 1);
        assert!(poll.is_none());
        assert_eq!(store.polls.len(), 0);
    }

    #[tokio::test]
    async fn test_create_topic_with_poll() {
        let store = MemoryForumStore::new();
        let validator = PollValidator::default();
        let service = TopicService::new(&store, &store, &validator);
        let ending = (Utc::now() + Duration::days(10)).format("%d-%m-%Y").to_string();
        let mut form = topic_form();
        form.poll_title = Some("  Destination ".to_string());
        form.poll_items = Some("Sea\n\n  Mountains  \nLake\n".to_string());
        form.ending_date = Some(ending);

        let (topic, poll) = service.create_topic(&sample_user(1, "alice"), form).await.unwrap();

        let poll = poll.unwrap();
        assert_eq!(poll.topic_id, topic.topic_id);
        assert_eq!(poll.title, "Destination");
        assert!(poll.ending_date.is_some());
        let names: Vec<&str> = poll.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Sea", "Mountains", "Lake"]);

        let (_, stored_poll) = service.get_topic(topic.topic_id).await.unwrap();
        assert_eq!(stored_poll.unwrap().poll_id, poll.poll_id);
    }

    #[tokio::test]
    async fn test_create_topic_rejects_invalid_poll() {
        let store = MemoryForumStore::new();
        let validator = PollValidator::default();
        let service = TopicService::new(&store, &store, &validator);
        let mut form = topic_form();
        form.poll_title = Some("Only one option".to_string());
        form.poll_items = Some("Yes".to_string());

        let result = service.create_topic(&sample_user(1, "alice"), form).await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert_eq!(store.topics.len(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_topic() {
        let store = MemoryForumStore::new();
        let validator = PollValidator::default();
        let service = TopicService::new(&store, &store, &validator);

        assert!(matches!(service.get_topic(7).await, Err(ServiceError::NotFound(_))));
    }
}
