use crate::models::Listing;

/// Wizard positions (1-based) used when reopening a listing for editing.
pub(crate) const STEP_BASICS: u8 = 2;
pub(crate) const STEP_DESCRIPTION: u8 = 3;
/// Reward for bounties/hackathons, eligibility for projects.
pub(crate) const STEP_REWARD_OR_ELIGIBILITY: u8 = 4;
pub(crate) const STEP_PROJECT_REWARD: u8 = 5;

/// Step used when no resume rule matches.
pub(crate) const DEFAULT_RESUME_STEP: u8 = STEP_BASICS;

pub(crate) struct ResumeRule {
    pub name: &'static str,
    pub applies: fn(&Listing) -> bool,
    pub step: u8,
}

fn basics_incomplete(l: &Listing) -> bool {
    l.is_published
        || !l.has_title()
        || !l.has_skills()
        || !l.has_poc_socials()
        || !l.has_application_type()
        || !l.has_deadline()
        || (l.is_project() && !l.has_time_to_complete())
}

fn rewarded_non_project(l: &Listing) -> bool {
    l.has_reward_info() && !l.is_project()
}

fn rewarded_project(l: &Listing) -> bool {
    l.has_reward_info() && l.is_project()
}

fn project_with_eligibility(l: &Listing) -> bool {
    l.is_project() && l.has_eligibility_questions()
}

fn has_write_up(l: &Listing) -> bool {
    l.has_requirements_or_description()
}

/// Evaluated top to bottom; the first rule whose predicate holds decides the step.
///
/// A project with both rewards and eligibility questions stops at `rewarded_project`,
/// so `project_with_eligibility` only sees projects without reward info.
pub(crate) const RESUME_RULES: &[ResumeRule] = &[
    ResumeRule {
        name: "basics_incomplete",
        applies: basics_incomplete,
        step: STEP_BASICS,
    },
    ResumeRule {
        name: "rewarded_non_project",
        applies: rewarded_non_project,
        step: STEP_REWARD_OR_ELIGIBILITY,
    },
    ResumeRule {
        name: "rewarded_project",
        applies: rewarded_project,
        step: STEP_PROJECT_REWARD,
    },
    ResumeRule {
        name: "project_with_eligibility",
        applies: project_with_eligibility,
        step: STEP_REWARD_OR_ELIGIBILITY,
    },
    ResumeRule {
        name: "has_write_up",
        applies: has_write_up,
        step: STEP_DESCRIPTION,
    },
];

/// The first matching rule, if any.
pub(crate) fn matching_resume_rule(listing: &Listing) -> Option<&'static ResumeRule> {
    RESUME_RULES.iter().find(|r| (r.applies)(listing))
}

pub(crate) fn resolve_resume_step(listing: &Listing) -> Option<u8> {
    matching_resume_rule(listing).map(|r| r.step)
}

pub(crate) fn resume_step_or(listing: &Listing, fallback: u8) -> u8 {
    resolve_resume_step(listing).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplicationType, EligibilityQuestion, ListingSkill, ListingType};
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn complete_basics(kind: ListingType) -> Listing {
        Listing {
            title: Some("Build a dashboard".into()),
            listing_type: Some(kind),
            skills: Some(vec![ListingSkill {
                skills: "Frontend".into(),
                subskills: vec!["React".into()],
            }]),
            poc_socials: Some("https://x.com/acme".into()),
            application_type: Some(ApplicationType::Fixed),
            deadline: Some("2030-01-01T00:00:00Z".into()),
            time_to_complete: Some("1-2 Weeks".into()),
            ..Default::default()
        }
    }

    fn question() -> EligibilityQuestion {
        EligibilityQuestion {
            order: 1,
            question: "Why you?".into(),
            kind: Some("text".into()),
        }
    }

    #[test]
    fn published_listing_resumes_at_basics() {
        let l = Listing {
            is_published: true,
            reward_amount: Some(500.0),
            description: Some("desc".into()),
            ..complete_basics(ListingType::Bounty)
        };
        assert_eq!(resolve_resume_step(&l), Some(STEP_BASICS));
    }

    #[test]
    fn project_without_time_to_complete_resumes_at_basics() {
        let l = Listing {
            time_to_complete: None,
            reward_amount: Some(500.0),
            ..complete_basics(ListingType::Project)
        };
        assert_eq!(resolve_resume_step(&l), Some(STEP_BASICS));

        // Bounties do not need it.
        let l = Listing {
            time_to_complete: None,
            reward_amount: Some(500.0),
            ..complete_basics(ListingType::Bounty)
        };
        assert_eq!(resolve_resume_step(&l), Some(STEP_REWARD_OR_ELIGIBILITY));
    }

    #[test]
    fn rewarded_bounty_and_hackathon_resume_at_reward() {
        for kind in [ListingType::Bounty, ListingType::Hackathon] {
            let mut rewards = BTreeMap::new();
            rewards.insert("first".to_string(), 1000.0);
            let l = Listing {
                rewards: Some(rewards),
                ..complete_basics(kind)
            };
            assert_eq!(resolve_resume_step(&l), Some(STEP_REWARD_OR_ELIGIBILITY));
        }
    }

    #[test]
    fn rewarded_project_resumes_at_project_reward_even_with_eligibility() {
        let l = Listing {
            reward_amount: Some(2000.0),
            eligibility: Some(vec![question()]),
            ..complete_basics(ListingType::Project)
        };
        assert_eq!(resolve_resume_step(&l), Some(STEP_PROJECT_REWARD));
        assert_eq!(
            matching_resume_rule(&l).map(|r| r.name),
            Some("rewarded_project")
        );
    }

    #[test]
    fn compensation_range_alone_is_not_reward_info() {
        let l = Listing {
            min_reward_ask: Some(100.0),
            max_reward_ask: Some(900.0),
            description: Some("desc".into()),
            ..complete_basics(ListingType::Project)
        };
        assert_eq!(resolve_resume_step(&l), Some(STEP_DESCRIPTION));
        assert_eq!(matching_resume_rule(&l).map(|r| r.name), Some("has_write_up"));

        let l = Listing {
            min_reward_ask: Some(100.0),
            max_reward_ask: Some(900.0),
            eligibility: Some(vec![question()]),
            ..complete_basics(ListingType::Project)
        };
        assert_eq!(resolve_resume_step(&l), Some(STEP_REWARD_OR_ELIGIBILITY));

        let l = Listing {
            min_reward_ask: Some(100.0),
            max_reward_ask: Some(900.0),
            ..complete_basics(ListingType::Project)
        };
        assert_eq!(resolve_resume_step(&l), None);
    }

    #[test]
    fn project_with_eligibility_resumes_at_eligibility() {
        let l = Listing {
            eligibility: Some(vec![question()]),
            description: Some("desc".into()),
            ..complete_basics(ListingType::Project)
        };
        assert_eq!(resolve_resume_step(&l), Some(STEP_REWARD_OR_ELIGIBILITY));

        // Empty question list does not count.
        let l = Listing {
            eligibility: Some(vec![]),
            description: Some("desc".into()),
            ..complete_basics(ListingType::Project)
        };
        assert_eq!(resolve_resume_step(&l), Some(STEP_DESCRIPTION));
    }

    #[test]
    fn eligibility_on_bounty_is_ignored() {
        let l = Listing {
            eligibility: Some(vec![question()]),
            ..complete_basics(ListingType::Bounty)
        };
        assert_eq!(resolve_resume_step(&l), None);
    }

    #[test]
    fn requirements_alone_resume_at_description() {
        let l = Listing {
            requirements: Some("Must know Rust".into()),
            ..complete_basics(ListingType::Bounty)
        };
        assert_eq!(resolve_resume_step(&l), Some(STEP_DESCRIPTION));
    }

    #[test]
    fn no_rule_leaves_fallback() {
        let l = complete_basics(ListingType::Bounty);
        assert_eq!(resolve_resume_step(&l), None);
        assert_eq!(resume_step_or(&l, DEFAULT_RESUME_STEP), DEFAULT_RESUME_STEP);
        assert_eq!(resume_step_or(&l, 1), 1);
    }

    #[test]
    fn empty_draft_resolves_the_same_twice() {
        let l = Listing::default();
        let a = resume_step_or(&l, DEFAULT_RESUME_STEP);
        let b = resume_step_or(&l, DEFAULT_RESUME_STEP);
        assert_eq!(a, STEP_BASICS);
        assert_eq!(a, b);
    }

    fn kind() -> impl Strategy<Value = Option<ListingType>> {
        prop_oneof![
            Just(None),
            Just(Some(ListingType::Bounty)),
            Just(Some(ListingType::Project)),
            Just(Some(ListingType::Hackathon)),
            Just(Some(ListingType::Grant)),
        ]
    }

    fn opt_text() -> impl Strategy<Value = Option<String>> {
        prop_oneof![Just(None), Just(Some(String::new())), Just(Some("x".to_string()))]
    }

    prop_compose! {
        fn any_listing()(
            listing_type in kind(),
            title in opt_text(),
            poc_socials in opt_text(),
            deadline in opt_text(),
            time_to_complete in opt_text(),
            requirements in opt_text(),
            description in opt_text(),
            has_skills in any::<bool>(),
            has_app_type in any::<bool>(),
            reward_amount in prop_oneof![Just(None), Just(Some(0.0)), Just(Some(250.0))],
            questions in 0usize..3,
            is_published in any::<bool>(),
        ) -> Listing {
            Listing {
                listing_type,
                title,
                poc_socials,
                deadline,
                time_to_complete,
                requirements,
                description,
                skills: has_skills.then(Vec::new),
                application_type: has_app_type.then_some(ApplicationType::Rolling),
                reward_amount,
                eligibility: Some(vec![EligibilityQuestion::default(); questions]),
                is_published,
                ..Default::default()
            }
        }
    }

    proptest! {
        #[test]
        fn basics_incomplete_always_wins(l in any_listing()) {
            if basics_incomplete(&l) {
                prop_assert_eq!(resolve_resume_step(&l), Some(STEP_BASICS));
            }
        }

        #[test]
        fn rewarded_project_never_lands_on_eligibility(l in any_listing()) {
            if !basics_incomplete(&l) && l.is_project() && l.has_reward_info() {
                prop_assert_eq!(resolve_resume_step(&l), Some(STEP_PROJECT_REWARD));
            }
        }

        #[test]
        fn rewarded_non_project_lands_on_reward(l in any_listing()) {
            if !basics_incomplete(&l) && !l.is_project() && l.has_reward_info() {
                prop_assert_eq!(resolve_resume_step(&l), Some(STEP_REWARD_OR_ELIGIBILITY));
            }
        }

        #[test]
        fn resolution_is_deterministic(l in any_listing()) {
            prop_assert_eq!(resolve_resume_step(&l), resolve_resume_step(&l.clone()));
        }
    }
}
