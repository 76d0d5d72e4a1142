//! PrivateMessageRepository - MySQL persistence of private messages

use super::{Create, Delete, PrivateMessageStore, Read, Update};
use crate::dtos::CreatePrivateMessageDTO;
use crate::entities::PrivateMessage;
use sqlx::{Error, MySqlPool};

const PM_COLUMNS: &str =
    "message_id, user_from, user_to, title, body, creation_date, is_read, status";

pub struct PrivateMessageRepository {
    connection_pool: MySqlPool,
}

impl PrivateMessageRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    async fn find_many(&self, condition: &str, user_id: i32) -> Result<Vec<PrivateMessage>, Error> {
        let query = format!(
            "SELECT {PM_COLUMNS} FROM private_messages WHERE {condition} \
             ORDER BY creation_date DESC, message_id DESC"
        );
        sqlx::query_as::<_, PrivateMessage>(&query)
            .bind(user_id)
            .fetch_all(&self.connection_pool)
            .await
    }
}

impl Create<PrivateMessage, CreatePrivateMessageDTO> for PrivateMessageRepository {
    async fn create(&self, data: &CreatePrivateMessageDTO) -> Result<PrivateMessage, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO private_messages (user_from, user_to, title, body, creation_date, is_read, status)
            VALUES (?, ?, ?, ?, ?, FALSE, ?)
            "#,
        )
        .bind(data.user_from)
        .bind(data.user_to)
        .bind(&data.title)
        .bind(&data.body)
        .bind(data.creation_date)
        .bind(data.status)
        .execute(&self.connection_pool)
        .await?;

        Ok(PrivateMessage {
            message_id: result.last_insert_id() as i32,
            user_from: data.user_from,
            user_to: data.user_to,
            title: data.title.clone(),
            body: data.body.clone(),
            creation_date: data.creation_date,
            read: false,
            status: data.status,
        })
    }
}

impl Read<PrivateMessage, i32> for PrivateMessageRepository {
    async fn read(&self, id: &i32) -> Result<Option<PrivateMessage>, Error> {
        let query = format!("SELECT {PM_COLUMNS} FROM private_messages WHERE message_id = ?");
        sqlx::query_as::<_, PrivateMessage>(&query)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<PrivateMessage, PrivateMessage, i32> for PrivateMessageRepository {
    async fn update(&self, id: &i32, data: &PrivateMessage) -> Result<PrivateMessage, Error> {
        sqlx::query(
            r#"
            UPDATE private_messages
            SET user_to = ?, title = ?, body = ?, creation_date = ?, is_read = ?, status = ?
            WHERE message_id = ?
            "#,
        )
        .bind(data.user_to)
        .bind(&data.title)
        .bind(&data.body)
        .bind(data.creation_date)
        .bind(data.read)
        .bind(data.status)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i32> for PrivateMessageRepository {
    async fn delete(&self, id: &i32) -> Result<(), Error> {
        sqlx::query("DELETE FROM private_messages WHERE message_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }
}

impl PrivateMessageStore for PrivateMessageRepository {
    async fn find_inbox(&self, user_id: i32) -> Result<Vec<PrivateMessage>, Error> {
        self.find_many("user_to = ? AND status IN ('SENT', 'DELETED_FROM_OUTBOX')", user_id)
            .await
    }

    async fn find_outbox(&self, user_id: i32) -> Result<Vec<PrivateMessage>, Error> {
        self.find_many("user_from = ? AND status IN ('SENT', 'DELETED_FROM_INBOX')", user_id)
            .await
    }

    async fn find_drafts(&self, user_id: i32) -> Result<Vec<PrivateMessage>, Error> {
        self.find_many("user_from = ? AND status = 'DRAFT'", user_id)
            .await
    }

    async fn count_unread_for(&self, user_id: i32) -> Result<i64, Error> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM private_messages
            WHERE user_to = ? AND is_read = FALSE AND status IN ('SENT', 'DELETED_FROM_OUTBOX')
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.connection_pool)
        .await
    }
}
