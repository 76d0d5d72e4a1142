//! Poll service - reading polls and voting

use super::error::{ServiceError, ServiceResult};
use crate::entities::Poll;
use crate::repositories::{PollStore, Read};
use chrono::Utc;
use tracing::{debug, info, instrument};

pub struct PollService<'a, P> {
    polls: &'a P,
}

impl<'a, P: PollStore> PollService<'a, P> {
    pub fn new(polls: &'a P) -> Self {
        Self { polls }
    }

    pub async fn get_poll(&self, poll_id: i32) -> ServiceResult<Poll> {
        self.polls
            .read(&poll_id)
            .await?
            .ok_or(ServiceError::NotFound("Poll"))
    }

    /// Adds one vote to each chosen item and returns the updated poll. Votes
    /// on an expired poll and ids of other items change nothing.
    #[instrument(skip(self))]
    pub async fn vote(&self, poll_id: i32, item_ids: &[i32]) -> ServiceResult<Poll> {
        let mut poll = self.get_poll(poll_id).await?;

        let voted = poll.register_votes(item_ids, Utc::now());
        if voted.is_empty() {
            debug!(active = poll.is_active(Utc::now()), "No vote registered");
            return Ok(poll);
        }
        self.polls.increment_votes(poll_id, &voted).await?;
        info!("Registered votes for {} items", voted.len());
        Ok(poll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::poll::sample_poll;
    use crate::repositories::memory::MemoryForumStore;
    use chrono::{Duration, TimeZone};

    fn votes(poll: &Poll) -> Vec<(i32, i32)> {
        poll.items.iter().map(|item| (item.item_id, item.votes_count)).collect()
    }

    #[tokio::test]
    async fn test_vote_increments_each_chosen_item() {
        let store = MemoryForumStore::with_poll(sample_poll(1, &[1, 5, 9], 0, None));
        let service = PollService::new(&store);

        let poll = service.vote(1, &[1, 5, 9]).await.unwrap();

        assert_eq!(votes(&poll), [(1, 1), (5, 1), (9, 1)]);
        let stored = service.get_poll(1).await.unwrap();
        assert_eq!(votes(&stored), [(1, 1), (5, 1), (9, 1)]);
    }

    #[tokio::test]
    async fn test_vote_for_unknown_items_changes_nothing() {
        let store = MemoryForumStore::with_poll(sample_poll(1, &[1, 5, 9], 0, None));
        let service = PollService::new(&store);

        service.vote(1, &[11, 13]).await.unwrap();

        let stored = service.get_poll(1).await.unwrap();
        assert_eq!(votes(&stored), [(1, 0), (5, 0), (9, 0)]);
    }

    #[tokio::test]
    async fn test_vote_on_expired_poll_is_ignored() {
        let ended = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
        let store = MemoryForumStore::with_poll(sample_poll(1, &[1, 2], 3, Some(ended)));
        let service = PollService::new(&store);

        let poll = service.vote(1, &[1, 2]).await.unwrap();

        assert_eq!(votes(&poll), [(1, 3), (2, 3)]);
        let stored = service.get_poll(1).await.unwrap();
        assert_eq!(votes(&stored), [(1, 3), (2, 3)]);
    }

    #[tokio::test]
    async fn test_vote_before_ending_date() {
        let ending = Utc::now() + Duration::days(1);
        let store = MemoryForumStore::with_poll(sample_poll(1, &[1, 2], 0, Some(ending)));
        let service = PollService::new(&store);

        service.vote(1, &[2, 2]).await.unwrap();

        let stored = service.get_poll(1).await.unwrap();
        assert_eq!(votes(&stored), [(1, 0), (2, 1)]);
    }

    #[tokio::test]
    async fn test_vote_on_missing_poll() {
        let store = MemoryForumStore::new();
        let service = PollService::new(&store);

        assert!(matches!(service.vote(3, &[1]).await, Err(ServiceError::NotFound(_))));
    }
}
