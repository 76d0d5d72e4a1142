//! Background jobs of the server
//!
//! The unactivated account sweep runs as a tokio task for the whole life of
//! the process, removing the accounts whose activation window has elapsed.

use crate::core::AppState;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, error, info};

/// Deletes the expired unactivated accounts every `interval_secs` seconds
///
/// # Example
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use forum::core::{AppState, jobs::start_account_sweep};
/// # fn spawn(state: Arc<AppState>) {
/// tokio::spawn(start_account_sweep(state, 3600));
/// # }
/// ```
pub async fn start_account_sweep(state: Arc<AppState>, interval_secs: u64) {
    info!("Starting unactivated account sweep every {} seconds", interval_secs);

    let mut interval = time::interval(Duration::from_secs(interval_secs));

    // the first tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;
        debug!("Running unactivated account sweep");
        match state.users().delete_unactivated_accounts(Utc::now()).await {
            Ok(0) => {}
            Ok(deleted) => info!("Account sweep removed {} accounts", deleted),
            Err(e) => error!("Account sweep failed: {}", e),
        }
    }
}
