//! Query DTOs

use serde::{Deserialize, Serialize};

/// Query parameters of the username search
#[derive(Serialize, Deserialize, Debug)]
pub struct UserSearchQuery {
    pub search: String,
}
