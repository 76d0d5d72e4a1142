//! Poll and PollItem entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Poll {
    pub poll_id: i32,
    pub topic_id: i32,
    pub title: String,
    pub ending_date: Option<DateTime<Utc>>,
    // loaded from poll_items, ordered by item_id
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<PollItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PollItem {
    pub item_id: i32,
    pub poll_id: i32,
    pub name: String,
    pub votes_count: i32,
}

impl Poll {
    /// Votes are accepted strictly before the ending date
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.ending_date.is_none_or(|end| now < end)
    }

    pub fn total_votes(&self) -> i32 {
        self.items.iter().map(|item| item.votes_count).sum()
    }

    /// Adds one vote to every item named in `item_ids` and returns the ids of
    /// the items that were incremented. Unknown ids are ignored, a repeated id
    /// counts once and an expired poll is left untouched.
    pub fn register_votes(&mut self, item_ids: &[i32], now: DateTime<Utc>) -> Vec<i32> {
        if !self.is_active(now) {
            return Vec::new();
        }
        let chosen: HashSet<i32> = item_ids.iter().copied().collect();
        let mut voted = Vec::with_capacity(chosen.len());
        for item in self.items.iter_mut().filter(|item| chosen.contains(&item.item_id)) {
            item.votes_count += 1;
            voted.push(item.item_id);
        }
        voted
    }
}

#[cfg(test)]
pub(crate) fn sample_poll(
    poll_id: i32,
    item_ids: &[i32],
    votes: i32,
    ending_date: Option<DateTime<Utc>>,
) -> Poll {
    Poll {
        poll_id,
        topic_id: 1,
        title: "Poll".to_string(),
        ending_date,
        items: item_ids
            .iter()
            .map(|&item_id| PollItem {
                item_id,
                poll_id,
                name: format!("Option:{item_id}"),
                votes_count: votes,
            })
            .collect(),
    }
}
