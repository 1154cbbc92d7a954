mod api;
mod app;
mod components;
mod config;
mod editor;
mod listings;
mod logging;
mod models;
mod notes;
mod pages;
mod state;
mod storage;
mod talent;
mod util;

use crate::app::App;
use crate::config::EnvConfig;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[allow(unused_imports)]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::models::CurrentUser;
    use crate::storage::{
        load_user_from_storage, remove_from_storage, save_user_to_storage, USER_KEY,
    };
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_user_storage_roundtrip() {
        remove_from_storage(USER_KEY);
        assert!(load_user_from_storage().is_none());

        let user = CurrentUser {
            id: "u1".to_string(),
            username: Some("sponsor".to_string()),
            first_name: Some("Ada".to_string()),
            location: Some("India".to_string()),
            is_talent_filled: true,
            current_sponsor_id: Some("s1".to_string()),
        };
        save_user_to_storage(&user);
        let loaded = load_user_from_storage().expect("should load user from localStorage");
        assert_eq!(loaded, user);

        remove_from_storage(USER_KEY);
        assert!(load_user_from_storage().is_none());
    }

    #[wasm_bindgen_test]
    fn test_malformed_user_entry_is_ignored() {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .expect("localStorage");
        storage.set_item(USER_KEY, "{not json").expect("set_item");
        assert!(load_user_from_storage().is_none());
        remove_from_storage(USER_KEY);
    }

    #[wasm_bindgen_test]
    fn test_user_without_id_is_signed_out() {
        save_user_to_storage(&CurrentUser::default());
        assert!(load_user_from_storage().is_none());
        remove_from_storage(USER_KEY);
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = EnvConfig::new();
    logging::init(&config.log_level);
    tracing::info!(api_url = %config.api_url, "starting earn-app");

    mount_to_body(move || view! { <App config=config.clone() /> });
}
