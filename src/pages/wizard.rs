use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::models::{Listing, ListingType};
use leptos::prelude::*;

const BOUNTY_STEPS: &[&str] = &["Template", "Basics", "Description", "Reward"];
const PROJECT_STEPS: &[&str] = &["Template", "Basics", "Description", "Eligibility", "Reward"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WizardMode {
    Edit,
    Duplicate,
}

impl WizardMode {
    fn heading(self) -> &'static str {
        match self {
            Self::Edit => "Edit Listing",
            Self::Duplicate => "Duplicate Listing",
        }
    }
}

/// Step titles, 1-based in the UI. Projects get an extra eligibility step.
pub(crate) fn wizard_steps(listing_type: Option<ListingType>) -> &'static [&'static str] {
    match listing_type {
        Some(ListingType::Project) => PROJECT_STEPS,
        _ => BOUNTY_STEPS,
    }
}

pub(crate) fn clamp_step(step: u8, step_count: usize) -> u8 {
    let max = u8::try_from(step_count).unwrap_or(u8::MAX).max(1);
    step.clamp(1, max)
}

#[component]
pub fn ListingWizard(listing: Listing, initial_step: u8, mode: WizardMode) -> impl IntoView {
    let steps = wizard_steps(listing.listing_type);
    let step_count = steps.len();
    let current: RwSignal<u8> = RwSignal::new(clamp_step(initial_step, step_count));

    let title = listing.title_or_default().to_string();
    let title = match mode {
        WizardMode::Edit => title,
        WizardMode::Duplicate => format!("{title} (copy)"),
    };

    let on_back = move |_: leptos::ev::MouseEvent| current.update(|s| *s = clamp_step(s.saturating_sub(1), step_count));
    let on_continue = move |_: leptos::ev::MouseEvent| current.update(|s| *s = clamp_step(s.saturating_add(1), step_count));

    view! {
        <div class="mx-auto flex w-full max-w-3xl flex-col gap-6 px-4 py-8">
            <div class="flex flex-col gap-1">
                <span class="text-xs uppercase text-muted-foreground">{mode.heading()}</span>
                <h1 class="text-lg font-semibold">{title}</h1>
            </div>
            <ol class="flex flex-wrap items-center gap-2 text-sm">
                {steps
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        let n = (i + 1) as u8;
                        let class = move || {
                            if current.get() == n {
                                "rounded-full bg-primary px-3 py-1 text-primary-foreground"
                            } else if current.get() > n {
                                "rounded-full bg-secondary px-3 py-1 text-secondary-foreground"
                            } else {
                                "rounded-full px-3 py-1 text-muted-foreground"
                            }
                        };
                        view! { <li class=class>{format!("{n}. {name}")}</li> }
                    })
                    .collect_view()}
            </ol>
            <section class="min-h-48 rounded-lg border p-6">
                <h2 class="text-base font-medium">
                    {move || steps.get(usize::from(current.get()).saturating_sub(1)).copied().unwrap_or_default()}
                </h2>
            </section>
            <div class="flex items-center justify-between">
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:disabled=move || current.get() <= 1
                    on:click=on_back
                >
                    "Back"
                </Button>
                <Button
                    size=ButtonSize::Sm
                    attr:disabled=move || usize::from(current.get()) >= step_count
                    on:click=on_continue
                >
                    "Continue"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_have_an_eligibility_step() {
        assert_eq!(wizard_steps(Some(ListingType::Project)).len(), 5);
        assert_eq!(wizard_steps(Some(ListingType::Project))[3], "Eligibility");
        assert_eq!(wizard_steps(Some(ListingType::Bounty)), BOUNTY_STEPS);
        assert_eq!(wizard_steps(Some(ListingType::Hackathon)), BOUNTY_STEPS);
        assert_eq!(wizard_steps(None), BOUNTY_STEPS);
    }

    #[test]
    fn steps_clamp_to_range() {
        assert_eq!(clamp_step(0, 4), 1);
        assert_eq!(clamp_step(2, 4), 2);
        assert_eq!(clamp_step(5, 4), 4);
        assert_eq!(clamp_step(5, 5), 5);
        assert_eq!(clamp_step(3, 0), 1);
    }
}
