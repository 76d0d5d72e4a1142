use crate::validation::PollValidator;
use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "a not so secret secret";

/// Size of the `poll_items.name` column
const POLL_ITEM_COLUMN_LENGTH: usize = 255;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub connection_lifetime_secs: u64,
    pub app_env: String,
    /// Public address of the forum, used for the links in the mails
    pub base_url: String,
    pub mail_from: String,
    pub account_sweep_interval_secs: u64,
    pub poll_validator: PollValidator,
}

/// Reads an optional variable, falling back to `default` when unset
fn var_or<T: FromStr>(name: &str, default: T, error: &str) -> Result<T, String> {
    match env::var(name) {
        Ok(value) => value.parse::<T>().map_err(|_| error.to_string()),
        Err(_) => Ok(default),
    }
}

fn check_poll_bounds(bounds: &PollValidator) -> Result<(), String> {
    if bounds.min_items > bounds.max_items || bounds.min_item_length > bounds.max_item_length {
        return Err("Invalid poll bounds: minimum greater than maximum".to_string());
    }
    if bounds.max_item_length > POLL_ITEM_COLUMN_LENGTH {
        return Err(format!(
            "Invalid POLL_MAX_ITEM_LENGTH: must be at most {}",
            POLL_ITEM_COLUMN_LENGTH
        ));
    }
    Ok(())
}

impl Config {
    /// Loads the configuration from the environment, reading `.env` first
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env file".to_string())?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = var_or(
            "SERVER_PORT",
            3000u16,
            "Invalid SERVER_PORT: must be a number between 0-65535",
        )?;

        let max_connections = var_or(
            "MAX_DB_CONNECTIONS",
            100u32,
            "Invalid MAX_DB_CONNECTIONS: must be a positive number",
        )?;

        let connection_lifetime_secs = var_or(
            "DB_CONNECTION_LIFETIME_SECS",
            1800u64,
            "Invalid DB_CONNECTION_LIFETIME_SECS: must be a positive number",
        )?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let base_url = env::var("FORUM_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port));

        let mail_from = env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@localhost".to_string());

        let account_sweep_interval_secs = var_or(
            "ACCOUNT_SWEEP_INTERVAL_SECS",
            3600u64,
            "Invalid ACCOUNT_SWEEP_INTERVAL_SECS: must be a positive number",
        )?;
        if account_sweep_interval_secs == 0 {
            return Err("Invalid ACCOUNT_SWEEP_INTERVAL_SECS: must be greater than 0".to_string());
        }

        let defaults = PollValidator::default();
        let poll_validator = PollValidator {
            min_items: var_or("POLL_MIN_ITEMS", defaults.min_items, "Invalid POLL_MIN_ITEMS")?,
            max_items: var_or("POLL_MAX_ITEMS", defaults.max_items, "Invalid POLL_MAX_ITEMS")?,
            min_item_length: var_or(
                "POLL_MIN_ITEM_LENGTH",
                defaults.min_item_length,
                "Invalid POLL_MIN_ITEM_LENGTH",
            )?,
            max_item_length: var_or(
                "POLL_MAX_ITEM_LENGTH",
                defaults.max_item_length,
                "Invalid POLL_MAX_ITEM_LENGTH",
            )?,
        };
        check_poll_bounds(&poll_validator)?;

        Ok(Config {
            database_url,
            jwt_secret,
            server_host,
            server_port,
            max_connections,
            connection_lifetime_secs,
            app_env,
            base_url,
            mail_from,
            account_sweep_interval_secs,
            poll_validator,
        })
    }

    /// Logs the configuration, hiding the secrets
    pub fn print_info(&self) {
        info!("Server configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server address: {}:{}", self.server_host, self.server_port);
        info!("   Public URL: {}", self.base_url);
        info!("   Database: {}", Self::mask_url(&self.database_url));
        info!("   Max DB connections: {}", self.max_connections);
        info!("   Connection lifetime: {}s", self.connection_lifetime_secs);
        info!("   Mail sender: {}", self.mail_from);
        info!("   Account sweep every {}s", self.account_sweep_interval_secs);
        info!(
            "   Poll items: {}..={}, item length: {}..={}",
            self.poll_validator.min_items,
            self.poll_validator.max_items,
            self.poll_validator.min_item_length,
            self.poll_validator.max_item_length
        );
        info!(
            "   JWT secret: {}",
            if self.jwt_secret == DEFAULT_JWT_SECRET {
                "USING DEFAULT (INSECURE!)"
            } else {
                "custom secret configured"
            }
        );
    }

    /// Masks the credentials of the database URL for logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        "***".to_string()
    }
}
