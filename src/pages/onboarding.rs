use crate::components::share::ShareProfile;
use crate::components::ui::{Button, ButtonSize};
use crate::models::CurrentUser;
use crate::state::AppContext;
use crate::storage::{load_json_from_storage, remove_from_storage, save_json_to_storage};
use crate::talent::{
    bio_chars_left, bio_near_limit, clamp_to_max, validate_username, AboutYouDraft,
    UsernameError, BIO_MAX_CHARS, NAME_MAX_CHARS, ONBOARDING_DRAFT_KEY, USERNAME_MAX_CHARS,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

const FIELD_CLASS: &str = "h-9 w-full rounded-md border bg-transparent px-3 text-sm outline-none focus-visible:ring-2 focus-visible:ring-ring/50";

/// Saved draft first, then whatever the session already knows about the user.
pub(crate) fn initial_draft(saved: Option<AboutYouDraft>, user: Option<&CurrentUser>) -> AboutYouDraft {
    if let Some(saved) = saved {
        return saved;
    }
    let Some(user) = user else {
        return AboutYouDraft::default();
    };
    AboutYouDraft {
        username: user.username.clone().unwrap_or_default(),
        first_name: user.first_name.clone().unwrap_or_default(),
        location: user.location.clone().unwrap_or_default(),
        ..Default::default()
    }
}

/// Live hint under the username field. Blank input shows nothing until submit.
pub(crate) fn username_hint(username: &str, taken: Option<&str>) -> Option<UsernameError> {
    if username.is_empty() {
        return None;
    }
    if let Err(e) = validate_username(username) {
        return Some(e);
    }
    (taken == Some(username.trim())).then_some(UsernameError::Taken)
}

#[component]
pub fn TalentOnboardingPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let draft: RwSignal<AboutYouDraft> = RwSignal::new(initial_draft(
        load_json_from_storage(ONBOARDING_DRAFT_KEY),
        app_state.0.current_user.get_untracked().as_ref(),
    ));
    let taken: RwSignal<Option<String>> = RwSignal::new(None);
    let form_error: RwSignal<Option<String>> = RwSignal::new(None);
    let checking: RwSignal<bool> = RwSignal::new(false);
    let finished: RwSignal<bool> = RwSignal::new(false);

    let update = move |apply: fn(&mut AboutYouDraft, String), max: usize, ev: leptos::ev::Event| {
        let value = clamp_to_max(&event_target_value(&ev), max);
        draft.update(|d| apply(d, value));
        form_error.set(None);
        draft.with_untracked(|d| save_json_to_storage(ONBOARDING_DRAFT_KEY, d));
    };

    let username_error = move || {
        draft.with(|d| {
            taken.with(|t| username_hint(&d.username, t.as_deref()).map(|e| e.to_string()))
        })
    };

    let on_continue = move |_: leptos::ev::MouseEvent| {
        let d = draft.get_untracked();
        if let Err(e) = d.validate() {
            form_error.set(Some(e.to_string()));
            return;
        }
        let username = d.username.trim().to_string();
        let api_client = app_state.0.api_client.get_untracked();
        checking.set(true);
        spawn_local(async move {
            match api_client.check_username_available(&username).await {
                Ok(true) => {
                    tracing::info!(%username, "talent onboarding: about you complete");
                    let _ = finished.try_set(true);
                }
                Ok(false) => {
                    let _ = taken.try_set(Some(username));
                }
                Err(e) => {
                    tracing::warn!(%username, kind = ?e.kind, error = %e, "username check failed");
                    let _ = form_error.try_set(Some(e.message));
                }
            }
            let _ = checking.try_set(false);
        });
    };

    let on_done = move |_: leptos::ev::MouseEvent| remove_from_storage(ONBOARDING_DRAFT_KEY);

    let about_you = move || {
        view! {
            <div class="flex flex-col gap-4">
                <label class="flex flex-col gap-1 text-sm">
                    "Username"
                    <input
                        class=FIELD_CLASS
                        maxlength=USERNAME_MAX_CHARS.to_string()
                        placeholder="Username"
                        prop:value=move || draft.with(|d| d.username.clone())
                        on:input=move |ev: leptos::ev::Event| update(|d, v| d.username = v, USERNAME_MAX_CHARS, ev)
                    />
                    {move || username_error().map(|m| view! { <span class="text-xs text-destructive">{m}</span> })}
                </label>
                <div class="flex gap-3">
                    <label class="flex flex-1 flex-col gap-1 text-sm">
                        "First Name"
                        <input
                            class=FIELD_CLASS
                            maxlength=NAME_MAX_CHARS.to_string()
                            prop:value=move || draft.with(|d| d.first_name.clone())
                            on:input=move |ev: leptos::ev::Event| update(|d, v| d.first_name = v, NAME_MAX_CHARS, ev)
                        />
                    </label>
                    <label class="flex flex-1 flex-col gap-1 text-sm">
                        "Last Name"
                        <input
                            class=FIELD_CLASS
                            maxlength=NAME_MAX_CHARS.to_string()
                            prop:value=move || draft.with(|d| d.last_name.clone())
                            on:input=move |ev: leptos::ev::Event| update(|d, v| d.last_name = v, NAME_MAX_CHARS, ev)
                        />
                    </label>
                </div>
                <label class="flex flex-col gap-1 text-sm">
                    "Location"
                    <input
                        class=FIELD_CLASS
                        maxlength=NAME_MAX_CHARS.to_string()
                        placeholder="Country"
                        prop:value=move || draft.with(|d| d.location.clone())
                        on:input=move |ev: leptos::ev::Event| update(|d, v| d.location = v, NAME_MAX_CHARS, ev)
                    />
                </label>
                <label class="flex flex-col gap-1 text-sm">
                    "Your One-Line Bio"
                    <textarea
                        class="min-h-20 w-full resize-none rounded-md border bg-transparent px-3 py-2 text-sm outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
                        maxlength=BIO_MAX_CHARS.to_string()
                        placeholder="Here is a sample placeholder"
                        prop:value=move || draft.with(|d| d.bio.clone())
                        on:input=move |ev: leptos::ev::Event| update(|d, v| d.bio = v, BIO_MAX_CHARS, ev)
                    ></textarea>
                    <span class=move || {
                        if draft.with(|d| bio_near_limit(&d.bio)) {
                            "self-end text-xs text-destructive"
                        } else {
                            "self-end text-xs text-muted-foreground"
                        }
                    }>
                        {move || format!("{} characters left", draft.with(|d| bio_chars_left(&d.bio)))}
                    </span>
                </label>
                {move || form_error.get().map(|m| view! { <p class="text-sm text-destructive">{m}</p> })}
                <Button size=ButtonSize::Default attr:disabled=move || checking.get() on:click=on_continue>
                    {move || if checking.get() { "Checking..." } else { "Continue" }}
                </Button>
            </div>
        }
    };

    let share = move || {
        let username = draft.with_untracked(|d| d.username.trim().to_string());
        view! {
            <div class="flex flex-col gap-4">
                <p class="text-sm text-muted-foreground">"Your profile is ready to share."</p>
                <ShareProfile username=username own_profile=true />
                <a class="text-sm font-medium text-primary" href="/" on:click=on_done>"Done"</a>
            </div>
        }
    };

    view! {
        <div class="mx-auto flex w-full max-w-lg flex-col gap-6 px-4 py-10">
            <div class="flex flex-col gap-1">
                <h1 class="text-lg font-semibold">"Complete your Profile"</h1>
                <span class="text-sm text-muted-foreground">
                    {move || if finished.get() { "Step 2 of 2" } else { "Step 1 of 2: About You" }}
                </span>
            </div>
            <Show when=move || finished.get() fallback=about_you>
                {share}
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_draft_wins_over_session() {
        let user = CurrentUser {
            id: "u1".into(),
            username: Some("ada".into()),
            first_name: Some("Ada".into()),
            location: Some("India".into()),
            ..Default::default()
        };
        let from_session = initial_draft(None, Some(&user));
        assert_eq!(from_session.username, "ada");
        assert_eq!(from_session.location, "India");
        assert!(from_session.bio.is_empty());

        let saved = AboutYouDraft {
            username: "ada_l".into(),
            ..Default::default()
        };
        assert_eq!(initial_draft(Some(saved.clone()), Some(&user)), saved);
        assert_eq!(initial_draft(None, None), AboutYouDraft::default());
    }

    #[test]
    fn username_hint_flags_shape_then_availability() {
        assert_eq!(username_hint("", None), None);
        assert_eq!(username_hint("a b", None), Some(UsernameError::InvalidCharacters));
        assert_eq!(username_hint("ada", None), None);
        assert_eq!(username_hint("ada", Some("ada")), Some(UsernameError::Taken));
        assert_eq!(username_hint("ada2", Some("ada")), None);
    }
}
