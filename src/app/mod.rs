use crate::components::feedback::Toaster;
use crate::components::user_menu::UserMenu;
use crate::config::EnvConfig;
use crate::pages::{
    DuplicateListingPage, EditListingPage, ListingDetailsPage, ListingTemplatePage,
    SubmissionReviewPage, TalentOnboardingPage,
};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App(config: EnvConfig) -> impl IntoView {
    provide_context(AppContext(AppState::load(&config)));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <nav class="flex h-14 w-full items-center justify-between border-b px-3 md:px-6">
                <a class="text-sm font-semibold" href="/">"Earn"</a>
                <UserMenu />
            </nav>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("listings/:listing_type/:slug") view=ListingDetailsPage />
                <Route path=path!("dashboard/listings/:slug/edit") view=EditListingPage />
                <Route path=path!("dashboard/listings/:slug/duplicate") view=DuplicateListingPage />
                <Route path=path!("dashboard/listings/:slug/submissions") view=SubmissionReviewPage />
                <Route path=path!("templates/listings/:slug") view=ListingTemplatePage />
                <Route path=path!("new/talent") view=TalentOnboardingPage />
            </Routes>
            <Toaster />
        </Router>
    }
}
