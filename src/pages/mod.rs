mod onboarding;
mod template;
mod wizard;

pub(crate) use onboarding::TalentOnboardingPage;
pub(crate) use template::{ListingTemplatePage, LISTING_UNAVAILABLE};
pub(crate) use wizard::{ListingWizard, WizardMode};

use crate::api::ApiErrorKind;
use crate::components::feedback::{ErrorSection, LoadingSection};
use crate::components::listing::{GrantApplicationButton, ListingHeader};
use crate::editor::SubmissionNotes;
use crate::listings::{matching_resume_rule, resume_step_or, DEFAULT_RESUME_STEP};
use crate::models::{Listing, ListingType, Submission};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;

const SPONSOR_LISTINGS_PATH: &str = "/dashboard/listings";

#[derive(Params, PartialEq, Clone, Debug)]
pub struct ListingRouteParams {
    pub listing_type: Option<String>,
    pub slug: Option<String>,
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct SponsorListingRouteParams {
    pub slug: Option<String>,
}

/// A listing may only be edited from the sponsor account that owns it.
pub(crate) fn owned_by_sponsor(listing: &Listing, current_sponsor_id: Option<&str>) -> bool {
    match (listing.sponsor_id.as_deref(), current_sponsor_id) {
        (Some(owner), Some(current)) => !owner.is_empty() && owner == current,
        _ => false,
    }
}

pub(crate) fn parse_listing_type(raw: Option<&str>) -> Option<ListingType> {
    raw.and_then(|t| t.trim().to_ascii_lowercase().parse().ok())
}

pub(crate) fn submission_count_label(count: u64) -> String {
    if count == 1 {
        "1 Submission".to_string()
    } else {
        format!("{count} Submissions")
    }
}

#[component]
pub fn ListingDetailsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<ListingRouteParams>();

    let listing: RwSignal<Option<Listing>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(true);
    let load_error: RwSignal<Option<String>> = RwSignal::new(None);
    let submission_count: RwSignal<u64> = RwSignal::new(0);
    let request_id: RwSignal<u64> = RwSignal::new(0);

    Effect::new(move |_| {
        let Some(p) = params.get().ok() else {
            return;
        };
        let slug = p.slug.unwrap_or_default();
        if slug.trim().is_empty() {
            loading.set(false);
            return;
        }
        let listing_type = parse_listing_type(p.listing_type.as_deref());

        let req_id = request_id.get_untracked().saturating_add(1);
        request_id.set(req_id);
        loading.set(true);
        load_error.set(None);
        submission_count.set(0);

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.get_listing_by_slug(&slug, listing_type).await;

            // Ignore stale responses.
            if request_id.try_get_untracked() != Some(req_id) {
                return;
            }

            let loaded = match result {
                Ok(found) => found,
                Err(e) => {
                    tracing::error!(%slug, kind = ?e.kind, error = %e, "failed to load listing");
                    let _ = load_error.try_set(Some(e.message));
                    None
                }
            };
            let listing_id = loaded.as_ref().map(|l| l.id.clone());
            let _ = listing.try_set(loaded);
            let _ = loading.try_set(false);

            let Some(listing_id) = listing_id.filter(|id| !id.is_empty()) else {
                return;
            };
            match api_client.get_submission_count(&listing_id).await {
                Ok(n) => {
                    if request_id.try_get_untracked() == Some(req_id) {
                        let _ = submission_count.try_set(n);
                    }
                }
                Err(e) => {
                    tracing::warn!(%listing_id, error = %e, "failed to load submission count");
                }
            }
        });
    });

    view! {
        {move || {
            if loading.get() {
                return view! { <LoadingSection /> }.into_any();
            }
            let Some(l) = listing.get() else {
                let message = load_error.get().unwrap_or_else(|| LISTING_UNAVAILABLE.to_string());
                return view! { <ErrorSection message=Some(message) /> }.into_any();
            };

            let is_grant = l.listing_type == Some(ListingType::Grant);
            let grant_id = l.id.clone();
            let grant_region = l.region.clone();
            let description = l.description.clone().unwrap_or_default();
            let requirements = l.requirements.clone().filter(|r| !r.trim().is_empty());

            view! {
                <div class="flex w-full flex-col">
                    <ListingHeader listing=l />
                    <div class="mx-auto flex w-full max-w-6xl flex-col gap-8 px-3 py-6 md:flex-row md:px-6">
                        <aside class="flex w-full flex-col gap-4 md:w-80">
                            <span class="text-sm text-muted-foreground">
                                {move || submission_count_label(submission_count.get())}
                            </span>
                            <Show when=move || is_grant>
                                <GrantApplicationButton grant_id=grant_id.clone() region=grant_region.clone() />
                            </Show>
                        </aside>
                        <article class="flex flex-1 flex-col gap-6">
                            {requirements
                                .map(|r| {
                                    view! {
                                        <section class="flex flex-col gap-2">
                                            <h2 class="text-sm font-semibold">"Eligibility"</h2>
                                            <p class="whitespace-pre-wrap text-sm text-muted-foreground">{r}</p>
                                        </section>
                                    }
                                })}
                            <div class="whitespace-pre-wrap text-sm leading-relaxed">{description}</div>
                        </article>
                    </div>
                </div>
            }
                .into_any()
        }}
    }
}

/// Loads the sponsor's copy of a listing and bounces away if it belongs to
/// another sponsor. Shared by the edit and duplicate routes.
#[component]
fn SponsorListingGate(mode: WizardMode) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<SponsorListingRouteParams>();
    let navigate = StoredValue::new(use_navigate());

    let listing: RwSignal<Option<Listing>> = RwSignal::new(None);
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
            match api_client.get_sponsor_listing(&slug).await {
                Ok(l) => {
                    let current = app_state.0.current_sponsor_id();
                    if !owned_by_sponsor(&l, current.as_deref()) {
                        tracing::info!(%slug, "listing belongs to another sponsor; leaving editor");
                        navigate.with_value(|nav| {
                            nav(
                                SPONSOR_LISTINGS_PATH,
                                leptos_router::NavigateOptions {
                                    replace: true,
                                    ..Default::default()
                                },
                            );
                        });
                        return;
                    }
                    let _ = listing.try_set(Some(l));
                }
                Err(e) if e.kind == ApiErrorKind::NotFound => {
                    tracing::info!(%slug, "sponsor listing not found");
                }
                Err(e) => {
                    tracing::error!(%slug, kind = ?e.kind, error = %e, "failed to load sponsor listing");
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
            match listing.get() {
                Some(l) => {
                    let (step, rule) = match mode {
                        WizardMode::Edit => (
                            resume_step_or(&l, DEFAULT_RESUME_STEP),
                            matching_resume_rule(&l).map(|r| r.name).unwrap_or("default"),
                        ),
                        WizardMode::Duplicate => (DEFAULT_RESUME_STEP, "duplicate"),
                    };
                    tracing::debug!(slug = %l.slug, step, rule, ?mode, "opening listing wizard");
                    view! { <ListingWizard listing=l initial_step=step mode=mode /> }.into_any()
                }
                None => view! { <ErrorSection message=load_error.get() /> }.into_any(),
            }
        }}
    }
}

#[component]
pub fn EditListingPage() -> impl IntoView {
    view! { <SponsorListingGate mode=WizardMode::Edit /> }
}

#[component]
pub fn DuplicateListingPage() -> impl IntoView {
    view! { <SponsorListingGate mode=WizardMode::Duplicate /> }
}

/// Sponsor review of a listing's submissions, with per-submission notes.
#[component]
pub fn SubmissionReviewPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<SponsorListingRouteParams>();
    let navigate = StoredValue::new(use_navigate());

    let listing: RwSignal<Option<Listing>> = RwSignal::new(None);
    let submissions: RwSignal<Vec<Submission>> = RwSignal::new(vec![]);
    let selected: RwSignal<Option<Submission>> = RwSignal::new(None);
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
            let l = match api_client.get_sponsor_listing(&slug).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!(%slug, kind = ?e.kind, error = %e, "failed to load sponsor listing");
                    let _ = load_error.try_set(Some(e.message));
                    let _ = loading.try_set(false);
                    return;
                }
            };

            let current = app_state.0.current_sponsor_id();
            if !owned_by_sponsor(&l, current.as_deref()) {
                tracing::info!(%slug, "listing belongs to another sponsor; leaving review");
                navigate.with_value(|nav| nav(SPONSOR_LISTINGS_PATH, Default::default()));
                return;
            }
            let _ = listing.try_set(Some(l));

            match api_client.get_listing_submissions(&slug).await {
                Ok(xs) => {
                    tracing::debug!(%slug, count = xs.len(), "loaded submissions");
                    let first = xs.first().cloned();
                    let _ = submissions.try_set(xs);
                    let _ = selected.try_set(first);
                }
                Err(e) => {
                    tracing::error!(%slug, kind = ?e.kind, error = %e, "failed to load submissions");
                    let _ = load_error.try_set(Some(e.message));
                }
            }
            let _ = loading.try_set(false);
        });
    });

    // The editor is keyed by submission id only; note edits mirrored into
    // `selected` must not remount it.
    let selected_id = Memo::new(move |_| selected.with(|s| s.as_ref().map(|s| s.id.clone())));

    let select = move |id: String| {
        let next = submissions.with_untracked(|xs| xs.iter().find(|s| s.id == id).cloned());
        selected.set(next);
    };

    let submission_list = move || {
        submissions
            .get()
            .into_iter()
            .map(|s| {
                let id = s.id.clone();
                let id_for_class = s.id.clone();
                let is_winner = s.is_winner;
                let name = s
                    .user
                    .as_ref()
                    .map(|u| u.display_name())
                    .unwrap_or_else(|| s.user_id.clone());
                let class = move || {
                    if selected_id.get().as_deref() == Some(id_for_class.as_str()) {
                        "flex w-full items-center justify-between rounded-md bg-accent px-3 py-2 text-left text-sm"
                    } else {
                        "flex w-full items-center justify-between rounded-md px-3 py-2 text-left text-sm hover:bg-accent/50"
                    }
                };
                view! {
                    <li>
                        <button class=class on:click=move |_| select(id.clone())>
                            <span class="truncate">{name}</span>
                            <Show when=move || is_winner>
                                <span class="text-xs text-primary">"Winner"</span>
                            </Show>
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    let detail = move || {
        selected_id.get().map(|id| {
            let (notes, link) = selected.with_untracked(|s| {
                s.as_ref()
                    .map(|s| (s.notes.clone().unwrap_or_default(), s.link.clone()))
                    .unwrap_or_default()
            });
            view! {
                <div class="flex flex-col gap-4">
                    {link
                        .filter(|l| !l.trim().is_empty())
                        .map(|l| {
                            let href = l.clone();
                            view! {
                                <a class="truncate text-sm text-primary underline underline-offset-4" href=href target="_blank" rel="noopener noreferrer">
                                    {l}
                                </a>
                            }
                        })}
                    <SubmissionNotes
                        submission_id=id
                        initial_notes=notes
                        selected=selected
                        submissions=submissions
                    />
                </div>
            }
        })
    };

    view! {
        {move || {
            if loading.get() {
                return view! { <LoadingSection /> }.into_any();
            }
            if let Some(message) = load_error.get() {
                return view! { <ErrorSection title="Something went wrong" message=Some(message) /> }.into_any();
            }
            let title = listing
                .with(|l| l.as_ref().map(|l| l.title_or_default().to_string()))
                .unwrap_or_default();

            view! {
                <div class="mx-auto flex w-full max-w-6xl flex-col gap-6 px-4 py-8">
                    <h1 class="text-lg font-semibold">{title}</h1>
                    <Show
                        when=move || !submissions.with(|xs| xs.is_empty())
                        fallback=|| view! { <p class="text-sm text-muted-foreground">"No submissions yet."</p> }
                    >
                        <div class="flex flex-col gap-6 md:flex-row">
                            <ul class="flex w-full flex-col gap-1 md:w-72">{submission_list}</ul>
                            <div class="flex-1">{detail}</div>
                        </div>
                    </Show>
                </div>
            }
                .into_any()
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_of(sponsor_id: Option<&str>) -> Listing {
        Listing {
            sponsor_id: sponsor_id.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn ownership_requires_matching_sponsor() {
        assert!(owned_by_sponsor(&listing_of(Some("s1")), Some("s1")));
        assert!(!owned_by_sponsor(&listing_of(Some("s1")), Some("s2")));
        assert!(!owned_by_sponsor(&listing_of(Some("s1")), None));
        assert!(!owned_by_sponsor(&listing_of(None), Some("s1")));
        assert!(!owned_by_sponsor(&listing_of(None), None));
        assert!(!owned_by_sponsor(&listing_of(Some("")), Some("")));
    }

    #[test]
    fn listing_type_from_route_segment() {
        assert_eq!(parse_listing_type(Some("bounty")), Some(ListingType::Bounty));
        assert_eq!(parse_listing_type(Some("Project")), Some(ListingType::Project));
        assert_eq!(parse_listing_type(Some("grant")), Some(ListingType::Grant));
        assert_eq!(parse_listing_type(Some("nope")), None);
        assert_eq!(parse_listing_type(None), None);
    }

    #[test]
    fn submission_count_pluralizes() {
        assert_eq!(submission_count_label(0), "0 Submissions");
        assert_eq!(submission_count_label(1), "1 Submission");
        assert_eq!(submission_count_label(12), "12 Submissions");
    }
}
