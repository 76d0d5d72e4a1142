//! User entity with password handling

use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Accounts that are still disabled this long after registration are swept.
pub const ACTIVATION_WINDOW_HOURS: i64 = 24;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub signature: Option<String>,
    pub location: Option<String>,
    pub language: String,
    pub page_size: i32,
    pub autosubscribe: bool,
    pub enabled: bool,
    #[serde(skip_serializing)]
    pub activation_uuid: String,
    pub is_admin: bool,
    pub registration_date: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Verify if target_password matches the stored hashed password
    pub fn verify_password(&self, target_password: &str) -> bool {
        verify(target_password, &self.password).unwrap_or(false)
    }

    /// Hash a password using bcrypt with default cost
    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        let hash = hash(password, DEFAULT_COST)?;
        Ok(hash)
    }

    /// True for a disabled account whose activation window has elapsed
    pub fn is_activation_expired(&self, now: DateTime<Utc>) -> bool {
        !self.enabled && now - self.registration_date >= Duration::hours(ACTIVATION_WINDOW_HOURS)
    }
}

#[cfg(test)]
pub(crate) fn sample_user(user_id: i32, username: &str) -> User {
    User {
        user_id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: String::new(),
        first_name: None,
        last_name: None,
        signature: None,
        location: None,
        language: "en".to_string(),
        page_size: 50,
        autosubscribe: true,
        enabled: true,
        activation_uuid: format!("uuid-{username}"),
        is_admin: false,
        registration_date: Utc::now(),
        last_login: None,
    }
}
