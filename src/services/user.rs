//! User service - registration, activation, login and profile management

use super::error::{ServiceError, ServiceResult};
use super::mail::MailService;
use crate::core::encode_jwt;
use crate::dtos::{CreateUserDTO, EditProfileDTO, LoginDTO, NewUserDTO};
use crate::entities::User;
use crate::repositories::UserStore;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Most usernames returned by one completion query
pub const USERNAME_SUGGESTIONS_LIMIT: i64 = 10;

const RESTORED_PASSWORD_LENGTH: usize = 6;

const DEFAULT_LANGUAGE: &str = "en";

pub struct UserService<'a, U> {
    users: &'a U,
    mail: &'a MailService,
    jwt_secret: &'a str,
}

impl<'a, U: UserStore> UserService<'a, U> {
    pub fn new(users: &'a U, mail: &'a MailService, jwt_secret: &'a str) -> Self {
        Self {
            users,
            mail,
            jwt_secret,
        }
    }

    /// Stores a disabled account and mails its activation link
    #[instrument(skip(self, dto), fields(username = %dto.username))]
    pub async fn register(&self, dto: CreateUserDTO) -> ServiceResult<User> {
        dto.validate()?;

        if self.users.find_by_username(&dto.username).await?.is_some() {
            warn!("Username already taken");
            return Err(ServiceError::Conflict("Username already exists"));
        }
        if self.users.find_by_email(&dto.email).await?.is_some() {
            warn!("Email already registered");
            return Err(ServiceError::Conflict("Email already registered"));
        }

        let new_user = NewUserDTO {
            username: dto.username,
            email: dto.email,
            password: User::hash_password(&dto.password)?,
            language: dto.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            autosubscribe: true,
            activation_uuid: Uuid::new_v4().to_string(),
            registration_date: Utc::now(),
        };
        let user = self.users.create(&new_user).await?;
        info!(user_id = user.user_id, "User registered");

        // the account is stored either way, the sweep removes it if never activated
        if let Err(e) = self.mail.send_account_activation_mail(&user) {
            warn!("Activation mail not sent: {}", e);
        }
        Ok(user)
    }

    /// Enables the account owning the activation key; enabling twice is a no-op
    #[instrument(skip(self))]
    pub async fn activate_account(&self, uuid: &str) -> ServiceResult<User> {
        let mut user = self
            .users
            .find_by_activation_uuid(uuid)
            .await?
            .ok_or(ServiceError::NotFound("Activation key"))?;

        if user.enabled {
            debug!("Account already active");
            return Ok(user);
        }
        user.enabled = true;
        let user = self.users.update(&user.user_id, &user).await?;
        info!(user_id = user.user_id, "Account activated");
        Ok(user)
    }

    /// Checks the credentials and returns the user with a fresh JWT
    #[instrument(skip(self, dto), fields(username = %dto.username))]
    pub async fn login(&self, dto: &LoginDTO) -> ServiceResult<(User, String)> {
        let Some(mut user) = self.users.find_by_username(&dto.username).await? else {
            warn!("Unknown username");
            return Err(ServiceError::Unauthorized("Username or password are not correct"));
        };
        if !user.verify_password(&dto.password) {
            warn!("Wrong password");
            return Err(ServiceError::Unauthorized("Username or password are not correct"));
        }
        if !user.enabled {
            warn!("Account not activated");
            return Err(ServiceError::Unauthorized("Account is not activated"));
        }

        user.last_login = Some(Utc::now());
        let user = self.users.update(&user.user_id, &user).await?;
        let token = encode_jwt(user.username.clone(), user.user_id, self.jwt_secret)
            .map_err(|e| ServiceError::Unexpected(e.to_string()))?;
        info!("User logged in");
        Ok((user, token))
    }

    pub async fn get_by_username(&self, username: &str) -> ServiceResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or(ServiceError::NotFound("User"))
    }

    /// Usernames starting with `pattern`, for completion
    #[instrument(skip(self))]
    pub async fn get_usernames(&self, pattern: &str) -> ServiceResult<Vec<String>> {
        let users = self
            .users
            .search_by_username_partial(pattern, USERNAME_SUGGESTIONS_LIMIT)
            .await?;
        debug!("Found {} usernames", users.len());
        Ok(users.into_iter().map(|user| user.username).collect())
    }

    #[instrument(skip(self, user, dto), fields(user_id = user.user_id))]
    pub async fn save_edited_profile(&self, user: &User, dto: EditProfileDTO) -> ServiceResult<User> {
        dto.validate()?;

        if dto.email != user.email {
            let owner = self.users.find_by_email(&dto.email).await?;
            if owner.is_some_and(|owner| owner.user_id != user.user_id) {
                return Err(ServiceError::Conflict("Email already registered"));
            }
        }

        let mut edited = user.clone();
        edited.email = dto.email;
        edited.first_name = dto.first_name;
        edited.last_name = dto.last_name;
        edited.signature = dto.signature;
        edited.location = dto.location;
        edited.language = dto.language;
        edited.page_size = dto.page_size;
        edited.autosubscribe = dto.autosubscribe;
        if let Some(new_password) = dto.new_password {
            edited.password = User::hash_password(&new_password)?;
            debug!("Password changed");
        }

        let saved = self.users.update(&user.user_id, &edited).await?;
        info!("Profile updated");
        Ok(saved)
    }

    /// Mails a new random password, then stores it. A failed mail leaves the
    /// old password in place.
    #[instrument(skip(self))]
    pub async fn restore_password(&self, email: &str) -> ServiceResult<()> {
        let mut user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(ServiceError::NotFound("User"))?;

        let new_password = random_password();
        self.mail.send_password_recovery_mail(&user, &new_password)?;

        user.password = User::hash_password(&new_password)?;
        self.users.update(&user.user_id, &user).await?;
        info!(user_id = user.user_id, "Password restored");
        Ok(())
    }

    /// Removes accounts left disabled past the activation window
    #[instrument(skip(self))]
    pub async fn delete_unactivated_accounts(&self, now: DateTime<Utc>) -> ServiceResult<usize> {
        let mut deleted = 0;
        for user in self.users.find_non_activated().await? {
            if user.is_activation_expired(now) {
                self.users.delete(&user.user_id).await?;
                debug!(user_id = user.user_id, "Unactivated account deleted");
                deleted += 1;
            }
        }
        if deleted > 0 {
            info!("Deleted {} unactivated accounts", deleted);
        }
        Ok(deleted)
    }
}

fn random_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RESTORED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}
