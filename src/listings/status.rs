use crate::models::{Listing, ListingType};
use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub(crate) enum ListingStatus {
    #[strum(to_string = "Draft")]
    Draft,
    #[strum(to_string = "Submissions Paused")]
    SubmissionsPaused,
    #[strum(to_string = "Opens Soon")]
    OpensSoon,
    #[strum(to_string = "Winners Announced")]
    WinnersAnnounced,
    #[strum(to_string = "In Review")]
    InReview,
    #[strum(to_string = "Submissions Open")]
    SubmissionsOpen,
}

impl ListingStatus {
    /// Tailwind classes for the status badge.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Draft => "bg-slate-200 text-slate-500",
            Self::SubmissionsPaused => "bg-amber-100 text-amber-500",
            Self::OpensSoon => "bg-purple-100 text-violet-500",
            Self::WinnersAnnounced | Self::SubmissionsOpen => "bg-green-100 text-green-600",
            Self::InReview => "bg-orange-100 text-orange-600",
        }
    }
}

pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// `true` when `at` parses and lies strictly before `now`. Unparseable or missing
/// timestamps are treated as "not yet".
fn is_past(at: Option<&str>, now: DateTime<Utc>) -> bool {
    at.and_then(parse_timestamp).is_some_and(|t| now > t)
}

pub(crate) fn listing_status(listing: &Listing, now: DateTime<Utc>) -> Option<ListingStatus> {
    let deadline_ended = is_past(listing.deadline.as_deref(), now);
    let hackathon_started = is_past(
        listing
            .hackathon
            .as_ref()
            .and_then(|h| h.start_date.as_deref()),
        now,
    );
    let is_open = listing.status.as_deref() == Some("OPEN");
    let published_once = listing
        .published_at
        .as_deref()
        .is_some_and(|s| !s.is_empty());

    if !listing.is_published && !published_once {
        Some(ListingStatus::Draft)
    } else if !listing.is_published {
        Some(ListingStatus::SubmissionsPaused)
    } else if listing.listing_type == Some(ListingType::Hackathon)
        && !deadline_ended
        && !hackathon_started
    {
        Some(ListingStatus::OpensSoon)
    } else if is_open && listing.is_winners_announced {
        Some(ListingStatus::WinnersAnnounced)
    } else if is_open && deadline_ended {
        Some(ListingStatus::InReview)
    } else if is_open {
        Some(ListingStatus::SubmissionsOpen)
    } else {
        None
    }
}
