mod share;

pub(crate) use share::{profile_url, share_message, SharePlatform};

use crate::util::utf16_len;
use serde::{Deserialize, Serialize};

pub(crate) const USERNAME_MAX_CHARS: usize = 40;
pub(crate) const NAME_MAX_CHARS: usize = 100;
pub(crate) const BIO_MAX_CHARS: usize = 180;
/// Past this many characters the bio counter turns red.
pub(crate) const BIO_WARN_CHARS: usize = 160;

/// Local copy of the onboarding form, kept between visits.
pub(crate) const ONBOARDING_DRAFT_KEY: &str = "earn_talent_onboarding";

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum UsernameError {
    #[error("Username is required")]
    Empty,
    #[error("Username can't be longer than 40 characters")]
    TooLong,
    #[error("Username can only contain letters, numbers, '_' and '-'")]
    InvalidCharacters,
    #[error("Username is unavailable! Please try another one.")]
    Taken,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum AboutYouError {
    #[error(transparent)]
    Username(#[from] UsernameError),
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} can't be longer than 100 characters")]
    NameTooLong(&'static str),
    #[error("Bio can't be longer than 180 characters")]
    BioTooLong,
}

/// Shape check only; availability is a separate backend call.
pub(crate) fn validate_username(raw: &str) -> Result<(), UsernameError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(UsernameError::Empty);
    }
    if utf16_len(username) > USERNAME_MAX_CHARS {
        return Err(UsernameError::TooLong);
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(UsernameError::InvalidCharacters);
    }
    Ok(())
}

pub(crate) fn bio_chars_left(bio: &str) -> usize {
    BIO_MAX_CHARS.saturating_sub(utf16_len(bio))
}

pub(crate) fn bio_near_limit(bio: &str) -> bool {
    utf16_len(bio) > BIO_WARN_CHARS
}

/// Cut `value` down to `max` UTF-16 units, the way `maxlength` does for typed input.
pub(crate) fn clamp_to_max(value: &str, max: usize) -> String {
    let mut used = 0;
    value
        .chars()
        .take_while(|c| {
            used += c.len_utf16();
            used <= max
        })
        .collect()
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AboutYouDraft {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub location: String,
    pub bio: String,
}

impl AboutYouDraft {
    pub fn validate(&self) -> Result<(), AboutYouError> {
        validate_username(&self.username)?;
        for (label, value) in [("First name", &self.first_name), ("Last name", &self.last_name)] {
            if value.trim().is_empty() {
                return Err(AboutYouError::Missing(label));
            }
            if utf16_len(value) > NAME_MAX_CHARS {
                return Err(AboutYouError::NameTooLong(label));
            }
        }
        if self.location.trim().is_empty() {
            return Err(AboutYouError::Missing("Location"));
        }
        if utf16_len(&self.bio) > BIO_MAX_CHARS {
            return Err(AboutYouError::BioTooLong);
        }
        Ok(())
    }
}
