use crate::talent::{profile_url, share_message, SharePlatform};
use leptos::prelude::*;

fn page_origin() -> String {
    window().location().origin().unwrap_or_default()
}

/// Profile link plus one-click share targets.
#[component]
pub fn ShareProfile(username: String, #[prop(optional)] own_profile: bool) -> impl IntoView {
    let url = profile_url(&page_origin(), &username);
    let message = share_message(own_profile);

    view! {
        <div class="flex flex-col gap-3">
            <input
                class="h-9 w-full rounded-md border bg-transparent px-3 text-sm text-muted-foreground"
                readonly=true
                prop:value=url.clone()
            />
            <div class="flex items-center gap-3 text-sm">
                {SharePlatform::ALL
                    .into_iter()
                    .map(|p| {
                        view! {
                            <a
                                class="text-primary underline underline-offset-4"
                                href=p.share_url(&url, message)
                                target="_blank"
                                rel="noopener noreferrer"
                            >
                                {p.to_string()}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
