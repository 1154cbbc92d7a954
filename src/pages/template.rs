use crate::components::feedback::{ErrorSection, LoadingSection};
use crate::components::listing::ListingHeader;
use crate::models::Listing;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

pub(crate) const LISTING_UNAVAILABLE: &str =
    "Sorry! The bounty you are looking for is not available.";

#[derive(Params, PartialEq, Clone, Debug)]
pub struct TemplateRouteParams {
    pub slug: Option<String>,
}

/// Read-only preview of a listing template: header without sponsor details or
/// the notify bell, then the description.
#[component]
pub fn ListingTemplatePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<TemplateRouteParams>();

    let template: RwSignal<Option<Listing>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let load_error: RwSignal<Option<String>> = RwSignal::new(None);

    Effect::new(move |_| {
        let slug = params
            .get()
            .ok()
            .and_then(|p| p.slug)
            .unwrap_or_default();
        if slug.trim().is_empty() {
            loading.set(false);
            return;
        }

        loading.set(true);
        load_error.set(None);
        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.get_listing_template(&slug).await {
                Ok(found) => {
                    if found.is_none() {
                        tracing::info!(%slug, "listing template not found");
                    }
                    let _ = template.try_set(found);
                }
                Err(e) => {
                    tracing::error!(%slug, kind = ?e.kind, error = %e, "failed to load listing template");
                    let _ = load_error.try_set(Some(e.message));
                }
            }
            let _ = loading.try_set(false);
        });
    });

    view! {
        {move || {
            if loading.get() {
                return view! { <LoadingSection /> }.into_any();
            }
            let Some(t) = template.get() else {
                let message = load_error.get().unwrap_or_else(|| LISTING_UNAVAILABLE.to_string());
                return view! { <ErrorSection message=Some(message) /> }.into_any();
            };
            let description = t.description.clone().unwrap_or_default();

            view! {
                <div class="flex w-full flex-col">
                    <ListingHeader listing=t is_template=true />
                    <article class="mx-auto w-full max-w-6xl px-3 py-6 md:px-6">
                        <div class="whitespace-pre-wrap text-sm leading-relaxed">{description}</div>
                    </article>
                </div>
            }
                .into_any()
        }}
    }
}
