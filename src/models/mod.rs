use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ListingType {
    Bounty,
    Project,
    Hackathon,
    Grant,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ApplicationType {
    Fixed,
    Rolling,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct ListingSkill {
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub subskills: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct EligibilityQuestion {
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub question: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SponsorSummary {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HackathonSummary {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub alt_logo: Option<String>,
}

/// A sponsor listing as returned by the dashboard endpoints.
///
/// Drafts are partially filled, so every field tolerates being absent or null.
/// Presence checks follow the backend's notion of "set": empty strings and zero
/// amounts count as missing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Listing {
    pub id: String,
    pub slug: String,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub listing_type: Option<ListingType>,
    pub skills: Option<Vec<ListingSkill>>,
    pub poc_socials: Option<String>,
    pub application_type: Option<ApplicationType>,
    pub deadline: Option<String>,
    pub time_to_complete: Option<String>,

    /// Position -> amount. Present as soon as the reward step has been saved once.
    pub rewards: Option<BTreeMap<String, f64>>,
    pub reward_amount: Option<f64>,
    pub min_reward_ask: Option<f64>,
    pub max_reward_ask: Option<f64>,
    pub token: Option<String>,

    pub eligibility: Option<Vec<EligibilityQuestion>>,
    pub requirements: Option<String>,
    pub description: Option<String>,

    pub sponsor_id: Option<String>,
    pub sponsor: Option<SponsorSummary>,
    pub status: Option<String>,
    pub region: Option<String>,
    pub is_winners_announced: bool,
    pub is_published: bool,
    pub published_at: Option<String>,

    #[serde(rename = "Hackathon")]
    pub hackathon: Option<HackathonSummary>,
}

fn is_set(s: &Option<String>) -> bool {
    s.as_deref().is_some_and(|v| !v.is_empty())
}

fn is_set_amount(a: Option<f64>) -> bool {
    a.is_some_and(|v| v != 0.0)
}

impl Listing {
    pub fn is_project(&self) -> bool {
        self.listing_type == Some(ListingType::Project)
    }

    pub fn has_title(&self) -> bool {
        is_set(&self.title)
    }

    pub fn has_skills(&self) -> bool {
        self.skills.is_some()
    }

    pub fn has_poc_socials(&self) -> bool {
        is_set(&self.poc_socials)
    }

    pub fn has_application_type(&self) -> bool {
        self.application_type.is_some()
    }

    pub fn has_deadline(&self) -> bool {
        is_set(&self.deadline)
    }

    pub fn has_time_to_complete(&self) -> bool {
        is_set(&self.time_to_complete)
    }

    /// Per-position rewards or a fixed amount. A `minRewardAsk`/`maxRewardAsk`
    /// range alone does not count.
    pub fn has_reward_info(&self) -> bool {
        self.rewards.is_some() || is_set_amount(self.reward_amount)
    }

    pub fn has_eligibility_questions(&self) -> bool {
        self.eligibility.as_ref().is_some_and(|q| !q.is_empty())
    }

    pub fn has_requirements_or_description(&self) -> bool {
        is_set(&self.requirements) || is_set(&self.description)
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UserSummary {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo: Option<String>,
}

impl UserSummary {
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.username.clone().unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Submission {
    pub id: String,
    pub listing_id: String,
    pub user_id: String,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub is_winner: bool,
    pub user: Option<UserSummary>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Subscriber {
    pub id: String,
    pub user_id: String,
    pub bounty_id: String,
    #[serde(rename = "User")]
    pub user: Option<UserSummary>,
}

/// Session-derived identity, written to local storage by the session provider.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct CurrentUser {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    /// Country or region name picked during onboarding.
    pub location: Option<String>,
    pub is_talent_filled: bool,
    pub current_sponsor_id: Option<String>,
}

impl CurrentUser {
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("New User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_deserializes_sparse_draft() {
        let json = r#"{
            "id": "l1",
            "slug": "write-a-thread",
            "title": "Write a thread",
            "type": "bounty",
            "skills": null,
            "rewardAmount": 0,
            "isPublished": false
        }"#;
        let l: Listing = serde_json::from_str(json).expect("draft should parse");
        assert_eq!(l.listing_type, Some(ListingType::Bounty));
        assert!(l.has_title());
        assert!(!l.has_skills());
        assert!(!l.has_reward_info());
        assert!(l.eligibility.is_none());
    }

    #[test]
    fn listing_presence_follows_backend_truthiness() {
        let l = Listing {
            title: Some(String::new()),
            skills: Some(vec![]),
            rewards: Some(BTreeMap::new()),
            eligibility: Some(vec![]),
            ..Default::default()
        };
        assert!(!l.has_title());
        assert!(l.has_skills());
        assert!(l.has_reward_info());
        assert!(!l.has_eligibility_questions());
    }

    #[test]
    fn listing_reads_hackathon_and_sponsor() {
        let json = r#"{
            "type": "hackathon",
            "sponsor": {"id": "s1", "name": "Acme"},
            "Hackathon": {"startDate": "2024-05-01T00:00:00Z"}
        }"#;
        let l: Listing = serde_json::from_str(json).expect("listing should parse");
        assert_eq!(l.sponsor.map(|s| s.name).as_deref(), Some("Acme"));
        assert_eq!(
            l.hackathon.and_then(|h| h.start_date).as_deref(),
            Some("2024-05-01T00:00:00Z")
        );
    }

    #[test]
    fn listing_type_roundtrips_through_strum() {
        assert_eq!(ListingType::Project.to_string(), "project");
        assert_eq!("grant".parse::<ListingType>().ok(), Some(ListingType::Grant));
    }

    #[test]
    fn subscriber_reads_nested_user() {
        let json = r#"[{"id": "s1", "userId": "u1", "bountyId": "b1", "User": {"id": "u1", "username": "ana"}}]"#;
        let subs: Vec<Subscriber> = serde_json::from_str(json).expect("subscribers should parse");
        assert_eq!(subs[0].user_id, "u1");
        assert_eq!(
            subs[0].user.as_ref().and_then(|u| u.username.as_deref()),
            Some("ana")
        );
    }

    #[test]
    fn display_name_prefers_full_name() {
        let u = UserSummary {
            id: "u1".into(),
            username: Some("ana".into()),
            first_name: Some("Ana".into()),
            last_name: Some("Lopez".into()),
            photo: None,
        };
        assert_eq!(u.display_name(), "Ana Lopez");

        let u = UserSummary {
            first_name: None,
            last_name: None,
            ..u
        };
        assert_eq!(u.display_name(), "ana");
    }

    #[test]
    fn current_user_name_falls_back_to_new_user() {
        let json = r#"{"id": "u1", "firstName": "Ada", "location": "India", "isTalentFilled": true}"#;
        let u: CurrentUser = serde_json::from_str(json).expect("user should parse");
        assert_eq!(u.display_name(), "Ada");
        assert_eq!(u.location.as_deref(), Some("India"));

        let u = CurrentUser {
            first_name: Some("  ".into()),
            ..u
        };
        assert_eq!(u.display_name(), "New User");
    }
}
