mod notes_autosave;

pub(crate) use notes_autosave::NotesAutosave;

use crate::api::ApiClient;
use crate::config::EnvConfig;
use crate::models::CurrentUser;
use crate::storage::{load_user_from_storage, remove_from_storage, USER_KEY};
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Signed-in user, including the sponsor they currently act for.
    pub current_user: RwSignal<Option<CurrentUser>>,

    /// Feedback for explicit user actions (subscribe toggles etc.).
    pub toast: RwSignal<Option<Toast>>,
}

impl AppState {
    pub fn new(config: &EnvConfig, current_user: Option<CurrentUser>) -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_config(config)),
            current_user: RwSignal::new(current_user),
            toast: RwSignal::new(None),
        }
    }

    pub fn load(config: &EnvConfig) -> Self {
        Self::new(config, load_user_from_storage())
    }

    pub fn current_sponsor_id(&self) -> Option<String> {
        self.current_user
            .get_untracked()
            .and_then(|u| u.current_sponsor_id)
            .filter(|id| !id.trim().is_empty())
    }

    /// Forget the local session copy; the provider clears its own cookie.
    pub fn sign_out(&self) {
        remove_from_storage(USER_KEY);
        self.current_user.set(None);
    }

    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        self.toast.set(Some(Toast {
            kind,
            message: message.into(),
        }));
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
