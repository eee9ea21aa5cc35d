use dioxus::prelude::*;
use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

use crate::services::auth_api;

/// A user identity record, as written to the `user` slot at login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    pub location: String,
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The signed-in user, shared by every view
pub static CURRENT_USER: GlobalSignal<Option<User>> = Signal::global(|| None);

const STORAGE_KEY_USER: &str = "user";

/// Restore the session from the persisted `user` slot. A corrupt record is
/// logged and treated as signed-out.
pub fn init_auth() {
    match LocalStorage::get::<User>(STORAGE_KEY_USER) {
        Ok(user) => {
            log::info!("Restored session for {}", user.username);
            *CURRENT_USER.write() = Some(user);
        }
        Err(StorageError::KeyNotFound(_)) => {
            log::info!("No stored session");
        }
        Err(e) => {
            log::error!("Failed to parse stored user: {}", e);
        }
    }
}

/// Authenticate against the backend and persist the session.
pub async fn login(username: &str, password: &str) -> Result<(), String> {
    let user = auth_api::authenticate(username, password).await?;

    LocalStorage::set(STORAGE_KEY_USER, &user)
        .map_err(|e| format!("Failed to persist session: {}", e))?;
    log::info!("Signed in as {}", user.username);
    *CURRENT_USER.write() = Some(user);
    Ok(())
}

/// Clear the session and the persisted slot.
pub fn logout() {
    log::info!("Signing out");
    LocalStorage::delete(STORAGE_KEY_USER);
    *CURRENT_USER.write() = None;
}

/// The signed-in user, if any.
pub fn current_user() -> Option<User> {
    CURRENT_USER.read().clone()
}
