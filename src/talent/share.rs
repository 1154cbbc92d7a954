use urlencoding::encode;

/// Public talent profile address.
pub(crate) fn profile_url(origin: &str, username: &str) -> String {
    format!("{}/t/{}", origin.trim_end_matches('/'), encode(username))
}

pub(crate) fn share_message(own_profile: bool) -> &'static str {
    if own_profile {
        "Check out my profile on Superteam Earn!"
    } else {
        "Check out this profile on Superteam Earn!"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub(crate) enum SharePlatform {
    #[strum(serialize = "X")]
    Twitter,
    Telegram,
    #[strum(serialize = "WhatsApp")]
    WhatsApp,
}

impl SharePlatform {
    pub const ALL: [SharePlatform; 3] = [Self::Twitter, Self::Telegram, Self::WhatsApp];

    pub fn share_url(self, url: &str, message: &str) -> String {
        match self {
            Self::Twitter => format!(
                "https://twitter.com/intent/tweet?text={}&url={}",
                encode(message),
                encode(url)
            ),
            Self::Telegram => format!(
                "https://t.me/share/url?url={}&text={}",
                encode(url),
                encode(message)
            ),
            Self::WhatsApp => format!(
                "https://api.whatsapp.com/send?text={}",
                encode(&format!("{message} {url}"))
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_url_joins_origin() {
        assert_eq!(
            profile_url("https://earn.example/", "ada_l"),
            "https://earn.example/t/ada_l"
        );
        assert_eq!(profile_url("https://earn.example", "a b"), "https://earn.example/t/a%20b");
    }

    #[test]
    fn message_depends_on_viewer() {
        assert_eq!(share_message(true), "Check out my profile on Superteam Earn!");
        assert_eq!(share_message(false), "Check out this profile on Superteam Earn!");
    }

    #[test]
    fn share_links_encode_text_and_url() {
        let url = "https://earn.example/t/ada";
        let msg = "Hi there!";
        assert_eq!(
            SharePlatform::Twitter.share_url(url, msg),
            "https://twitter.com/intent/tweet?text=Hi%20there%21&url=https%3A%2F%2Fearn.example%2Ft%2Fada"
        );
        assert_eq!(
            SharePlatform::Telegram.share_url(url, msg),
            "https://t.me/share/url?url=https%3A%2F%2Fearn.example%2Ft%2Fada&text=Hi%20there%21"
        );
        assert_eq!(
            SharePlatform::WhatsApp.share_url(url, msg),
            "https://api.whatsapp.com/send?text=Hi%20there%21%20https%3A%2F%2Fearn.example%2Ft%2Fada"
        );
        assert_eq!(SharePlatform::Twitter.to_string(), "X");
    }
}
