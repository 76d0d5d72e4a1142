//! UserRepository - MySQL persistence of user accounts

use super::{Create, Delete, Read, Update, UserStore};
use crate::dtos::NewUserDTO;
use crate::entities::User;
use sqlx::{Error, MySqlPool};

const USER_COLUMNS: &str = "user_id, username, email, password, first_name, last_name, \
     signature, location, language, page_size, autosubscribe, enabled, activation_uuid, \
     is_admin, registration_date, last_login";

pub struct UserRepository {
    connection_pool: MySqlPool,
}

impl UserRepository {
    pub fn new(connection_pool: MySqlPool) -> UserRepository {
        Self { connection_pool }
    }

    async fn find_one_by(&self, column: &str, value: &str) -> Result<Option<User>, Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(value)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Create<User, NewUserDTO> for UserRepository {
    async fn create(&self, data: &NewUserDTO) -> Result<User, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO users
                (username, email, password, language, page_size, autosubscribe,
                 enabled, activation_uuid, is_admin, registration_date)
            VALUES (?, ?, ?, ?, 50, ?, FALSE, ?, FALSE, ?)
            "#,
        )
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password)
        .bind(&data.language)
        .bind(data.autosubscribe)
        .bind(&data.activation_uuid)
        .bind(data.registration_date)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_id() as i32;
        self.read(&new_id).await?.ok_or(Error::RowNotFound)
    }
}

impl Read<User, i32> for UserRepository {
    async fn read(&self, id: &i32) -> Result<Option<User>, Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<User, User, i32> for UserRepository {
    /// Saves every mutable column of the user
    async fn update(&self, id: &i32, data: &User) -> Result<User, Error> {
        sqlx::query(
            r#"
            UPDATE users SET
                email = ?, password = ?, first_name = ?, last_name = ?, signature = ?,
                location = ?, language = ?, page_size = ?, autosubscribe = ?, enabled = ?,
                is_admin = ?, last_login = ?
            WHERE user_id = ?
            "#,
        )
        .bind(&data.email)
        .bind(&data.password)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.signature)
        .bind(&data.location)
        .bind(&data.language)
        .bind(data.page_size)
        .bind(data.autosubscribe)
        .bind(data.enabled)
        .bind(data.is_admin)
        .bind(data.last_login)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i32> for UserRepository {
    async fn delete(&self, user_id: &i32) -> Result<(), Error> {
        sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }
}

impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        self.find_one_by("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.find_one_by("email", email).await
    }

    async fn find_by_activation_uuid(&self, uuid: &str) -> Result<Option<User>, Error> {
        self.find_one_by("activation_uuid", uuid).await
    }

    async fn search_by_username_partial(&self, prefix: &str, limit: i64) -> Result<Vec<User>, Error> {
        let pattern = format!("{}%", prefix.replace('%', "\\%").replace('_', "\\_"));
        let query =
            format!("SELECT {USER_COLUMNS} FROM users WHERE username LIKE ? ORDER BY username LIMIT ?");
        sqlx::query_as::<_, User>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&self.connection_pool)
            .await
    }

    async fn find_non_activated(&self) -> Result<Vec<User>, Error> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE enabled = FALSE");
        sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.connection_pool)
            .await
    }
}
