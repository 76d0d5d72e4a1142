//! In-memory stores used by the service tests

use super::{
    BannerStore, Create, Delete, PollStore, PrivateMessageStore, Read, TopicStore, Update,
    UserStore,
};
use crate::dtos::{CreatePollDTO, CreatePrivateMessageDTO, CreateTopicRecordDTO, NewUserDTO};
use crate::entities::{
    Banner, BannerPosition, Poll, PollItem, PrivateMessage, PrivateMessageStatus, Topic, User,
};
use sqlx::Error;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Rows keyed by id, ids assigned in insertion order starting at 1
pub struct Table<T> {
    rows: Mutex<BTreeMap<i32, T>>,
    last_id: Mutex<i32>,
}

impl<T: Clone> Table<T> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            last_id: Mutex::new(0),
        }
    }

    fn next_id(&self) -> i32 {
        let mut last_id = self.last_id.lock().unwrap();
        *last_id += 1;
        *last_id
    }

    pub fn insert_with(&self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id();
        let row = build(id);
        self.rows.lock().unwrap().insert(id, row.clone());
        row
    }

    pub fn get(&self, id: i32) -> Option<T> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn put(&self, id: i32, row: T) {
        self.rows.lock().unwrap().insert(id, row);
    }

    /// Stores a row under a chosen id; later inserts get higher ids
    pub fn seed(&self, id: i32, row: T) {
        let mut last_id = self.last_id.lock().unwrap();
        *last_id = (*last_id).max(id);
        self.put(id, row);
    }

    pub fn remove(&self, id: i32) {
        self.rows.lock().unwrap().remove(&id);
    }

    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

// ************************* USERS ************************* //

pub struct MemoryUserStore {
    pub table: Table<User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }

    /// Stores a ready-made user under its own id
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        for user in users {
            store.table.seed(user.user_id, user);
        }
        store
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.table.filter(predicate).into_iter().next()
    }
}

impl Create<User, NewUserDTO> for MemoryUserStore {
    async fn create(&self, data: &NewUserDTO) -> Result<User, Error> {
        Ok(self.table.insert_with(|user_id| User {
            user_id,
            username: data.username.clone(),
            email: data.email.clone(),
            password: data.password.clone(),
            first_name: None,
            last_name: None,
            signature: None,
            location: None,
            language: data.language.clone(),
            page_size: 50,
            autosubscribe: data.autosubscribe,
            enabled: false,
            activation_uuid: data.activation_uuid.clone(),
            is_admin: false,
            registration_date: data.registration_date,
            last_login: None,
        }))
    }
}

impl Read<User, i32> for MemoryUserStore {
    async fn read(&self, id: &i32) -> Result<Option<User>, Error> {
        Ok(self.table.get(*id))
    }
}

impl Update<User, User, i32> for MemoryUserStore {
    async fn update(&self, id: &i32, data: &User) -> Result<User, Error> {
        self.table.get(*id).ok_or(Error::RowNotFound)?;
        self.table.put(*id, data.clone());
        Ok(data.clone())
    }
}

impl Delete<i32> for MemoryUserStore {
    async fn delete(&self, id: &i32) -> Result<(), Error> {
        self.table.remove(*id);
        Ok(())
    }
}

impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        Ok(self.find(|user| user.username == username))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        Ok(self.find(|user| user.email == email))
    }

    async fn find_by_activation_uuid(&self, uuid: &str) -> Result<Option<User>, Error> {
        Ok(self.find(|user| user.activation_uuid == uuid))
    }

    async fn search_by_username_partial(&self, prefix: &str, limit: i64) -> Result<Vec<User>, Error> {
        let mut users = self.table.filter(|user| user.username.starts_with(prefix));
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users.truncate(limit as usize);
        Ok(users)
    }

    async fn find_non_activated(&self) -> Result<Vec<User>, Error> {
        Ok(self.table.filter(|user| !user.enabled))
    }
}

// ************************* PRIVATE MESSAGES ************************* //

pub struct MemoryPrivateMessageStore {
    pub table: Table<PrivateMessage>,
}

impl MemoryPrivateMessageStore {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }

    fn newest_first(&self, predicate: impl Fn(&PrivateMessage) -> bool) -> Vec<PrivateMessage> {
        let mut messages = self.table.filter(predicate);
        messages.sort_by(|a, b| {
            (b.creation_date, b.message_id).cmp(&(a.creation_date, a.message_id))
        });
        messages
    }
}

impl Create<PrivateMessage, CreatePrivateMessageDTO> for MemoryPrivateMessageStore {
    async fn create(&self, data: &CreatePrivateMessageDTO) -> Result<PrivateMessage, Error> {
        Ok(self.table.insert_with(|message_id| PrivateMessage {
            message_id,
            user_from: data.user_from,
            user_to: data.user_to,
            title: data.title.clone(),
            body: data.body.clone(),
            creation_date: data.creation_date,
            read: false,
            status: data.status,
        }))
    }
}

impl Read<PrivateMessage, i32> for MemoryPrivateMessageStore {
    async fn read(&self, id: &i32) -> Result<Option<PrivateMessage>, Error> {
        Ok(self.table.get(*id))
    }
}

impl Update<PrivateMessage, PrivateMessage, i32> for MemoryPrivateMessageStore {
    async fn update(&self, id: &i32, data: &PrivateMessage) -> Result<PrivateMessage, Error> {
        self.table.get(*id).ok_or(Error::RowNotFound)?;
        self.table.put(*id, data.clone());
        Ok(data.clone())
    }
}

impl Delete<i32> for MemoryPrivateMessageStore {
    async fn delete(&self, id: &i32) -> Result<(), Error> {
        self.table.remove(*id);
        Ok(())
    }
}

impl PrivateMessageStore for MemoryPrivateMessageStore {
    async fn find_inbox(&self, user_id: i32) -> Result<Vec<PrivateMessage>, Error> {
        Ok(self.newest_first(|pm| pm.is_recipient(user_id) && pm.is_delivered()))
    }

    async fn find_outbox(&self, user_id: i32) -> Result<Vec<PrivateMessage>, Error> {
        Ok(self.newest_first(|pm| {
            pm.is_sender(user_id)
                && matches!(
                    pm.status,
                    PrivateMessageStatus::Sent | PrivateMessageStatus::DeletedFromInbox
                )
        }))
    }

    async fn find_drafts(&self, user_id: i32) -> Result<Vec<PrivateMessage>, Error> {
        Ok(self.newest_first(|pm| pm.is_sender(user_id) && pm.status == PrivateMessageStatus::Draft))
    }

    async fn count_unread_for(&self, user_id: i32) -> Result<i64, Error> {
        let unread = self.table.filter(|pm| pm.is_recipient(user_id) && pm.is_delivered() && !pm.read);
        Ok(unread.len() as i64)
    }
}

// ************************* TOPICS AND POLLS ************************* //

/// Topics and polls share one store, as they share tables in the database
pub struct MemoryForumStore {
    pub topics: Table<Topic>,
    pub polls: Table<Poll>,
    last_item_id: Mutex<i32>,
}

impl MemoryForumStore {
    pub fn new() -> Self {
        Self {
            topics: Table::new(),
            polls: Table::new(),
            last_item_id: Mutex::new(0),
        }
    }

    /// Stores a ready-made poll under its own id
    pub fn with_poll(poll: Poll) -> Self {
        let store = Self::new();
        store.polls.seed(poll.poll_id, poll);
        store
    }
}

impl Read<Topic, i32> for MemoryForumStore {
    async fn read(&self, id: &i32) -> Result<Option<Topic>, Error> {
        Ok(self.topics.get(*id))
    }
}

impl TopicStore for MemoryForumStore {
    async fn create_with_poll(
        &self,
        topic: &CreateTopicRecordDTO,
        poll: Option<&CreatePollDTO>,
    ) -> Result<(Topic, Option<Poll>), Error> {
        let created_topic = self.topics.insert_with(|topic_id| Topic {
            topic_id,
            title: topic.title.clone(),
            content: topic.content.clone(),
            author_id: topic.author_id,
            created_at: topic.created_at,
        });
        let created_poll = poll.map(|poll| {
            self.polls.insert_with(|poll_id| Poll {
                poll_id,
                topic_id: created_topic.topic_id,
                title: poll.title.clone(),
                ending_date: poll.ending_date,
                items: poll
                    .items
                    .iter()
                    .map(|name| {
                        let mut last_item_id = self.last_item_id.lock().unwrap();
                        *last_item_id += 1;
                        PollItem {
                            item_id: *last_item_id,
                            poll_id,
                            name: name.clone(),
                            votes_count: 0,
                        }
                    })
                    .collect(),
            })
        });
        Ok((created_topic, created_poll))
    }
}

impl Read<Poll, i32> for MemoryForumStore {
    async fn read(&self, id: &i32) -> Result<Option<Poll>, Error> {
        Ok(self.polls.get(*id))
    }
}

impl PollStore for MemoryForumStore {
    async fn find_by_topic_id(&self, topic_id: i32) -> Result<Option<Poll>, Error> {
        Ok(self.polls.filter(|poll| poll.topic_id == topic_id).into_iter().next())
    }

    async fn increment_votes(&self, poll_id: i32, item_ids: &[i32]) -> Result<(), Error> {
        let Some(mut poll) = self.polls.get(poll_id) else {
            return Ok(());
        };
        for item in poll.items.iter_mut() {
            if item_ids.contains(&item.item_id) {
                item.votes_count += 1;
            }
        }
        self.polls.put(poll_id, poll);
        Ok(())
    }
}

// ************************* BANNERS ************************* //

pub struct MemoryBannerStore {
    pub table: Table<Banner>,
}

impl MemoryBannerStore {
    pub fn new() -> Self {
        Self { table: Table::new() }
    }
}

impl BannerStore for MemoryBannerStore {
    async fn find_all(&self) -> Result<Vec<Banner>, Error> {
        Ok(self.table.filter(|_| true))
    }

    async fn find_by_position(&self, position: BannerPosition) -> Result<Option<Banner>, Error> {
        Ok(self
            .table
            .filter(|banner| banner.position_on_page == position)
            .into_iter()
            .next())
    }

    async fn save(&self, position: BannerPosition, content: &str) -> Result<Banner, Error> {
        match self.find_by_position(position).await? {
            Some(mut banner) => {
                banner.content = content.to_string();
                self.table.put(banner.banner_id, banner.clone());
                Ok(banner)
            }
            None => Ok(self.table.insert_with(|banner_id| Banner {
                banner_id,
                position_on_page: position,
                content: content.to_string(),
            })),
        }
    }
}
