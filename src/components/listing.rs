use crate::api::ApiErrorKind;
use crate::components::ui::{Alert, AlertDescription, Spinner};
use crate::listings::{listing_status, region_tooltip_label, user_region_eligible, ListingStatus};
use crate::models::{CurrentUser, Listing, ListingType, Subscriber};
use crate::state::{AppContext, ToastKind};
use icons::{Bell, BellRing};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub(crate) fn is_subscribed(subscribers: &[Subscriber], user_id: Option<&str>) -> bool {
    let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
        return false;
    };
    subscribers.iter().any(|s| s.user_id == user_id)
}

/// The sponsor counts as one interested party on top of the subscribers.
pub(crate) fn interested_label(subscriber_count: usize) -> String {
    let n = subscriber_count + 1;
    let noun = if n == 1 { "Person" } else { "People" };
    format!("{n} {noun} Interested")
}

#[component]
pub fn StatusBadge(status: ListingStatus) -> impl IntoView {
    let class = format!(
        "inline-flex items-center rounded-full px-3 py-0.5 text-xs font-medium {}",
        status.badge_class()
    );
    view! { <span class=class>{status.to_string()}</span> }
}

#[component]
pub fn ListingHeader(listing: Listing, #[prop(optional)] is_template: bool) -> impl IntoView {
    let status = listing_status(&listing, chrono::Utc::now());
    let sponsor_name = listing
        .sponsor
        .as_ref()
        .map(|s| s.name.clone())
        .unwrap_or_default();
    let type_label = match listing.listing_type {
        Some(ListingType::Project) => "Project",
        Some(ListingType::Hackathon) => "Hackathon",
        Some(ListingType::Grant) => "Grant",
        _ => "Bounty",
    };
    let title = listing.title_or_default().to_string();
    let listing_id = listing.id.clone();

    view! {
        <header class="w-full border-b bg-background px-3 md:px-6">
            <div class="mx-auto flex max-w-6xl flex-row items-center justify-between gap-5 py-4 md:py-10">
                <div class="flex flex-col items-start gap-1">
                    <div class="flex items-center gap-2">
                        <h1 class="text-xl font-bold">{title}</h1>
                        {status.map(|s| view! { <StatusBadge status=s /> })}
                    </div>
                    <Show when=move || !is_template>
                        <div class="flex flex-wrap items-center gap-1 text-sm text-muted-foreground md:gap-3">
                            <span class="whitespace-nowrap">{format!("by {sponsor_name}")}</span>
                            <span>"|"</span>
                            <span>{type_label}</span>
                        </div>
                    </Show>
                </div>
                <Show when=move || !is_template>
                    <SubscribeBell listing_id=listing_id.clone() />
                </Show>
            </div>
        </header>
    }
}

/// Notify-me toggle plus the interested count.
///
/// After each toggle the full subscriber list is fetched again instead of flipping
/// local state.
#[component]
pub fn SubscribeBell(listing_id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let subscribers: RwSignal<Vec<Subscriber>> = RwSignal::new(vec![]);
    let refresh: RwSignal<u64> = RwSignal::new(0);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let show_profile_warning: RwSignal<bool> = RwSignal::new(false);
    let listing_id = StoredValue::new(listing_id);

    Effect::new(move |_| {
        let _ = refresh.get();
        let id = listing_id.get_value();
        if id.trim().is_empty() {
            return;
        }

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.get_subscription_status(&id).await {
                Ok(list) => {
                    let _ = subscribers.try_set(list);
                }
                Err(e) => {
                    tracing::error!(listing_id = %id, error = %e, "failed to load subscribers");
                }
            }
        });
    });

    let current_user_id = move || app_state.0.current_user.get().map(|u| u.id);
    let subscribed = move || is_subscribed(&subscribers.get(), current_user_id().as_deref());

    let on_toggle = move |_| {
        // Signed-out visitors are handled by the session provider's sign-in prompt.
        let Some(user) = app_state.0.current_user.get_untracked() else {
            return;
        };
        if !user.is_talent_filled {
            show_profile_warning.set(true);
            return;
        }
        if loading.get_untracked() {
            return;
        }

        let was_subscribed =
            is_subscribed(&subscribers.get_untracked(), Some(user.id.as_str()));
        let id = listing_id.get_value();
        let api_client = app_state.0.api_client.get_untracked();

        loading.set(true);
        spawn_local(async move {
            match api_client.toggle_subscription(&id).await {
                Ok(()) => {
                    refresh.update(|n| *n += 1);
                    let msg = if was_subscribed { "Unsubscribed" } else { "Subscribed" };
                    app_state.0.notify(ToastKind::Success, msg);
                }
                Err(e) => {
                    tracing::error!(listing_id = %id, kind = ?e.kind, error = %e, "toggle subscription failed");
                    let msg = if e.kind == ApiErrorKind::Unauthorized {
                        "Please sign in to get notified"
                    } else {
                        "Error occurred while toggling subscription"
                    };
                    app_state.0.notify(ToastKind::Error, msg);
                }
            }
            let _ = loading.try_set(false);
        });
    };

    let bell_class = move || {
        if subscribed() {
            "inline-flex size-9 items-center justify-center rounded-md bg-primary text-primary-foreground shadow-xs disabled:opacity-50"
        } else {
            "inline-flex size-9 items-center justify-center rounded-md bg-secondary text-secondary-foreground shadow-xs disabled:opacity-50"
        }
    };

    view! {
        <div class="flex items-start gap-3">
            <button
                class=bell_class
                aria-label="Notify"
                disabled=move || loading.get()
                on:click=on_toggle
            >
                {move || {
                    if loading.get() {
                        view! { <Spinner /> }.into_any()
                    } else if subscribed() {
                        view! { <BellRing /> }.into_any()
                    } else {
                        view! { <Bell /> }.into_any()
                    }
                }}
            </button>
            <span class="whitespace-nowrap text-sm text-muted-foreground">
                {move || interested_label(subscribers.get().len())}
            </span>
        </div>
        <Show when=move || show_profile_warning.get()>
            <Alert class="mt-2">
                <AlertDescription class="text-xs">
                    "Please complete your profile before subscribing to a listing. "
                    <a class="text-primary underline underline-offset-4" href="/new/talent">"Complete Profile"</a>
                </AlertDescription>
            </Alert>
        </Show>
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GrantButtonState {
    Checking,
    Applied,
    Open,
}

impl GrantButtonState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Checking => "Checking Application..",
            Self::Applied => "Applied Successfully",
            Self::Open => "Apply Now",
        }
    }

    pub fn disabled(self) -> bool {
        !matches!(self, Self::Open)
    }

    fn button_class(self) -> &'static str {
        match self {
            Self::Applied => "inline-flex h-10 w-full items-center justify-center gap-2 rounded-md bg-success px-6 text-sm font-medium text-success-foreground disabled:opacity-70",
            _ => "inline-flex h-10 w-full items-center justify-center gap-2 rounded-md bg-primary px-6 text-sm font-medium text-primary-foreground hover:bg-primary/90 disabled:opacity-70",
        }
    }
}

/// Only a signed-in talent with a finished profile is held back by region;
/// everyone else gets the profile prompt or the sign-in flow first.
pub(crate) fn region_blocks_apply(user: Option<&CurrentUser>, region: Option<&str>) -> bool {
    match user {
        Some(u) if !u.id.is_empty() && u.is_talent_filled => {
            !user_region_eligible(region, u.location.as_deref())
        }
        _ => false,
    }
}

/// Apply button for grant listings; checks for an existing application on mount.
#[component]
pub fn GrantApplicationButton(
    grant_id: String,
    #[prop(default = None)] region: Option<String>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state: RwSignal<GrantButtonState> = RwSignal::new(GrantButtonState::Open);
    let show_profile_warning: RwSignal<bool> = RwSignal::new(false);
    let grant_id = StoredValue::new(grant_id);

    let region_tooltip = region_tooltip_label(region.as_deref());
    let region = StoredValue::new(region);
    let region_blocked = Memo::new(move |_| {
        app_state
            .0
            .current_user
            .with(|u| region.with_value(|r| region_blocks_apply(u.as_ref(), r.as_deref())))
    });

    Effect::new(move |_| {
        let user_id = app_state.0.current_user.get().map(|u| u.id);
        if user_id.is_none() {
            return;
        }
        let id = grant_id.get_value();
        let api_client = app_state.0.api_client.get_untracked();

        state.set(GrantButtonState::Checking);
        spawn_local(async move {
            let next = match api_client.get_grant_application_status(&id).await {
                Ok(true) => GrantButtonState::Applied,
                Ok(false) => GrantButtonState::Open,
                Err(e) => {
                    tracing::warn!(grant_id = %id, error = %e, "failed to load grant application status");
                    GrantButtonState::Open
                }
            };
            let _ = state.try_set(next);
        });
    });

    let on_apply = move |_| {
        let Some(user) = app_state.0.current_user.get_untracked() else {
            return;
        };
        if !user.is_talent_filled {
            show_profile_warning.set(true);
            return;
        }
        if region_blocked.get_untracked() {
            return;
        }
        let id = grant_id.get_value();
        tracing::info!(grant_id = %id, "opening grant application");
        let _ = window()
            .location()
            .set_href(&format!("/grants/{}/apply", urlencoding::encode(&id)));
    };

    view! {
        <div class="w-full">
            <button
                class=move || state.get().button_class()
                disabled=move || state.get().disabled() || region_blocked.get()
                title=region_tooltip.clone()
                on:click=on_apply
            >
                <Show when=move || state.get() == GrantButtonState::Checking>
                    <Spinner />
                </Show>
                {move || state.get().label()}
            </button>
            <Show when=move || region_blocked.get()>
                <p class="mt-2 text-xs text-muted-foreground">{region_tooltip.clone()}</p>
            </Show>
            <Show when=move || show_profile_warning.get()>
                <Alert class="mt-2">
                    <AlertDescription class="text-xs">
                        "Please complete your profile before applying. "
                        <a class="text-primary underline underline-offset-4" href="/new/talent">"Complete Profile"</a>
                    </AlertDescription>
                </Alert>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(user_id: &str) -> Subscriber {
        Subscriber {
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn subscription_matches_current_user() {
        let subs = vec![sub("u1"), sub("u2")];
        assert!(is_subscribed(&subs, Some("u2")));
        assert!(!is_subscribed(&subs, Some("u3")));
        assert!(!is_subscribed(&subs, None));
        assert!(!is_subscribed(&[sub("")], Some("")));
    }

    #[test]
    fn interested_label_counts_sponsor() {
        assert_eq!(interested_label(0), "1 Person Interested");
        assert_eq!(interested_label(1), "2 People Interested");
    }

    #[test]
    fn grant_button_disables_unless_open() {
        assert!(GrantButtonState::Checking.disabled());
        assert!(GrantButtonState::Applied.disabled());
        assert!(!GrantButtonState::Open.disabled());
        assert_eq!(GrantButtonState::Applied.label(), "Applied Successfully");
    }

    fn talent(location: Option<&str>, filled: bool) -> CurrentUser {
        CurrentUser {
            id: "u1".into(),
            location: location.map(str::to_string),
            is_talent_filled: filled,
            ..Default::default()
        }
    }

    #[test]
    fn region_gate_applies_to_finished_profiles_only() {
        let in_india = talent(Some("India"), true);
        let in_brazil = talent(Some("Brazil"), true);
        assert!(!region_blocks_apply(Some(&in_india), Some("INDIA")));
        assert!(region_blocks_apply(Some(&in_brazil), Some("INDIA")));
        assert!(!region_blocks_apply(Some(&in_brazil), Some("GLOBAL")));
        assert!(!region_blocks_apply(Some(&in_brazil), None));

        // Unfinished profiles see the profile prompt instead.
        assert!(!region_blocks_apply(Some(&talent(Some("Brazil"), false)), Some("INDIA")));
        assert!(!region_blocks_apply(None, Some("INDIA")));
        assert!(region_blocks_apply(Some(&talent(None, true)), Some("INDIA")));
    }
}
