use crate::models::CurrentUser;
use serde::{Deserialize, Serialize};

/// Written by the session provider after sign-in. This app only clears it on logout.
pub(crate) const USER_KEY: &str = "earn_user";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_json_from_storage<T: for<'de> Deserialize<'de>>(key: &str) -> Option<T> {
    let storage = local_storage()?;
    let json = storage.get_item(key).ok().flatten()?;
    match serde_json::from_str(&json) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed local storage entry");
            None
        }
    }
}

pub(crate) fn save_json_to_storage<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, &json);
        }
    }
}

pub(crate) fn remove_from_storage(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub(crate) fn load_user_from_storage() -> Option<CurrentUser> {
    load_json_from_storage::<CurrentUser>(USER_KEY).filter(|u| !u.id.trim().is_empty())
}

#[cfg(test)]
pub(crate) fn save_user_to_storage(user: &CurrentUser) {
    save_json_to_storage(USER_KEY, user);
}
