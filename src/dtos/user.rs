//! User DTOs

use crate::entities::User;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap();
}

/// Public view of a user, never exposes credentials
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserDTO {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub signature: Option<String>,
    pub location: Option<String>,
    pub registration_date: DateTime<Utc>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.user_id,
            username: value.username,
            first_name: value.first_name,
            last_name: value.last_name,
            signature: value.signature,
            location: value.location,
            registration_date: value.registration_date,
        }
    }
}

/// Profile of the logged in user, includes the private settings
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProfileDTO {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub signature: Option<String>,
    pub location: Option<String>,
    pub language: String,
    pub page_size: i32,
    pub autosubscribe: bool,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for ProfileDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.user_id,
            username: value.username,
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            signature: value.signature,
            location: value.location,
            language: value.language,
            page_size: value.page_size,
            autosubscribe: value.autosubscribe,
            last_login: value.last_login,
        }
    }
}

/// Registration form
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[validate(
        length(min = 2, max = 25, message = "Username must be between 2 and 25 characters"),
        regex(path = *USERNAME_REGEX, message = "Username may only contain letters, digits, '.', '_' and '-'")
    )]
    pub username: String,

    #[validate(email(message = "Email is not valid"))]
    pub email: String,

    #[validate(length(min = 4, max = 50, message = "Password must be between 4 and 50 characters"))]
    pub password: String,

    #[validate(length(min = 2, max = 5, message = "Language must be a 2-5 characters code"))]
    pub language: Option<String>,
}

/// Row to insert for a freshly registered user (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUserDTO {
    pub username: String,
    pub email: String,
    pub password: String,
    pub language: String,
    pub autosubscribe: bool,
    pub activation_uuid: String,
    pub registration_date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct RestorePasswordDTO {
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
}

/// Profile edit form. Optional text fields are cleared when missing.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct EditProfileDTO {
    #[validate(email(message = "Email is not valid"))]
    pub email: String,

    #[validate(length(min = 4, max = 50, message = "Password must be between 4 and 50 characters"))]
    pub new_password: Option<String>,

    #[validate(length(max = 64))]
    pub first_name: Option<String>,

    #[validate(length(max = 64))]
    pub last_name: Option<String>,

    #[validate(length(max = 255))]
    pub signature: Option<String>,

    #[validate(length(max = 30))]
    pub location: Option<String>,

    #[validate(length(min = 2, max = 5))]
    pub language: String,

    #[validate(range(min = 5, max = 150, message = "Page size must be between 5 and 150"))]
    pub page_size: i32,

    #[serde(default = "default_autosubscribe")]
    pub autosubscribe: bool,
}

fn default_autosubscribe() -> bool {
    true
}
