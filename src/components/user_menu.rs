use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::models::CurrentUser;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

pub(crate) const SUPPORT_EMAIL_HREF: &str = "mailto:support@superteamearn.com";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MenuLink {
    pub label: &'static str,
    pub href: String,
}

fn is_sponsor(user: &CurrentUser) -> bool {
    user.current_sponsor_id
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty())
}

/// Signed-in users who are neither talent nor sponsor get nudged to onboarding.
pub(crate) fn needs_profile(user: &CurrentUser) -> bool {
    !is_sponsor(user) && !user.is_talent_filled
}

/// Entries in menu order. Logout is rendered separately.
pub(crate) fn user_menu_links(user: &CurrentUser) -> Vec<MenuLink> {
    let mut links = Vec::new();
    let username = user
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());

    if user.is_talent_filled {
        if let Some(username) = username {
            let base = format!("/t/{}", urlencoding::encode(username));
            links.push(MenuLink {
                label: "Profile",
                href: base.clone(),
            });
            links.push(MenuLink {
                label: "Edit Profile",
                href: format!("{base}/edit"),
            });
        }
    }
    if is_sponsor(user) {
        links.push(MenuLink {
            label: "Sponsor Dashboard",
            href: "/dashboard/listings".to_string(),
        });
    }
    links.push(MenuLink {
        label: "Get Help",
        href: SUPPORT_EMAIL_HREF.to_string(),
    });
    links
}

#[component]
pub fn UserMenu() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());
    let open: RwSignal<bool> = RwSignal::new(false);

    let on_logout = move |_: leptos::ev::MouseEvent| {
        open.set(false);
        app_state.0.sign_out();
        tracing::info!("signed out");
        navigate.with_value(|nav| nav("/", Default::default()));
    };

    view! {
        {move || {
            let Some(user) = app_state.0.current_user.get() else {
                return ().into_any();
            };
            let name = user.display_name().to_string();
            let links = user_menu_links(&user);
            let show_complete = needs_profile(&user);

            view! {
                <div class="relative flex items-center gap-3">
                    <Show when=move || show_complete>
                        <a class="text-sm font-medium text-primary" href="/new/talent">"Complete your Profile"</a>
                    </Show>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=move |_: leptos::ev::MouseEvent| open.update(|o| *o = !*o)
                    >
                        {name}
                    </Button>
                    <Show when=move || open.get()>
                        <ul class="absolute right-0 top-full z-10 mt-2 flex w-48 flex-col rounded-md border bg-background py-1 text-sm shadow-md">
                            {links
                                .clone()
                                .into_iter()
                                .map(|l| {
                                    view! {
                                        <li>
                                            <a class="block px-3 py-2 hover:bg-accent" href=l.href>
                                                {l.label}
                                            </a>
                                        </li>
                                    }
                                })
                                .collect_view()}
                            <li>
                                <button
                                    class="block w-full px-3 py-2 text-left text-destructive hover:bg-accent"
                                    on:click=on_logout
                                >
                                    "Logout"
                                </button>
                            </li>
                        </ul>
                    </Show>
                </div>
            }
                .into_any()
        }}
    }
}
