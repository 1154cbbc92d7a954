use crate::config::EnvConfig;
use crate::models::{Listing, ListingType, Submission, Subscriber};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    NotFound,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn not_found(path: &str) -> Self {
        Self {
            kind: ApiErrorKind::NotFound,
            message: format!("Not found: {path}"),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, path: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("Request to {path} failed ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ToggleSubscriptionRequest {
    #[serde(rename = "bountyId")]
    pub bounty_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SubscriptionStatusRequest {
    #[serde(rename = "listingId")]
    pub listing_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct UpdateNotesRequest {
    /// Submission id.
    pub id: String,
    pub notes: String,
}

/// reqwest needs absolute URLs; same-origin requests resolve against the page.
#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    fn url(&self, path: &str) -> String {
        if self.base_url.is_empty() {
            if let Some(origin) = page_origin() {
                return format!("{origin}{path}");
            }
        }
        format!("{}{}", self.base_url, path)
    }

    /// Session cookies belong to the external auth provider; send them along.
    fn with_credentials(req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        #[cfg(target_arch = "wasm32")]
        let req = req.fetch_credentials_include();
        req
    }

    async fn send(&self, req: reqwest::RequestBuilder, path: &str) -> ApiResult<reqwest::Response> {
        let res = Self::with_credentials(req)
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else if status == reqwest::StatusCode::UNAUTHORIZED {
            Err(ApiError::unauthorized())
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(ApiError::not_found(path))
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, path))
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let mut req = client.get(self.url(path));
        if !query.is_empty() {
            req = req.query(query);
        }

        tracing::debug!(path, "GET");
        let res = self.send(req, path).await?;
        res.json().await.map_err(ApiError::parse)
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let req = client.post(self.url(path)).json(body);

        tracing::debug!(path, "POST");
        let res = self.send(req, path).await?;
        res.json().await.map_err(ApiError::parse)
    }

    /// POST where the response body carries nothing the caller uses.
    async fn post_unit(&self, path: &str, body: &impl Serialize) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let req = client.post(self.url(path)).json(body);

        tracing::debug!(path, "POST");
        self.send(req, path).await.map(|_| ())
    }

    /// Whether the current user has an application on file for `grant_id`.
    pub async fn get_grant_application_status(&self, grant_id: &str) -> ApiResult<bool> {
        let path = format!(
            "/api/grants/application/{}/user/",
            urlencoding::encode(grant_id)
        );
        let data: serde_json::Value = self.get_json(&path, &[]).await?;
        Ok(Self::parse_application_status(&data))
    }

    pub async fn toggle_subscription(&self, listing_id: &str) -> ApiResult<()> {
        self.post_unit(
            "/api/listings/notifications/toggle",
            &ToggleSubscriptionRequest {
                bounty_id: listing_id.to_string(),
            },
        )
        .await
    }

    pub async fn get_subscription_status(&self, listing_id: &str) -> ApiResult<Vec<Subscriber>> {
        let data: serde_json::Value = self
            .post_json(
                "/api/listings/notifications/status",
                &SubscriptionStatusRequest {
                    listing_id: listing_id.to_string(),
                },
            )
            .await?;
        Self::parse_subscribers(data)
    }

    pub async fn update_submission_notes(&self, submission_id: &str, notes: &str) -> ApiResult<()> {
        self.post_unit(
            "/api/sponsor-dashboard/submission/update-notes",
            &UpdateNotesRequest {
                id: submission_id.to_string(),
                notes: notes.to_string(),
            },
        )
        .await
    }

    /// Public listing lookup. `Ok(None)` when the backend answers with no listing.
    pub async fn get_listing_by_slug(
        &self,
        slug: &str,
        listing_type: Option<ListingType>,
    ) -> ApiResult<Option<Listing>> {
        let path = format!("/api/sponsor-dashboard/{}", urlencoding::encode(slug));
        let query: Vec<(&str, String)> = listing_type
            .map(|t| vec![("type", t.to_string())])
            .unwrap_or_default();

        let data: serde_json::Value = match self.get_json(&path, &query).await {
            Ok(v) => v,
            Err(e) if e.kind == ApiErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        Self::parse_optional_listing(data)
    }

    /// Read-only template preview. A missing template is `Ok(None)`.
    pub async fn get_listing_template(&self, slug: &str) -> ApiResult<Option<Listing>> {
        let path = format!("/api/listings/templates/{}/", urlencoding::encode(slug));
        let data: serde_json::Value = match self.get_json(&path, &[]).await {
            Ok(v) => v,
            Err(e) if e.kind == ApiErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        Self::parse_optional_listing(data)
    }

    /// `true` when nobody else holds `username`.
    pub async fn check_username_available(&self, username: &str) -> ApiResult<bool> {
        let data: serde_json::Value = self
            .get_json("/api/user/username", &[("username", username.to_string())])
            .await?;
        Ok(Self::parse_username_available(&data))
    }

    /// Sponsor-side listing used by the edit and duplicate flows.
    pub async fn get_sponsor_listing(&self, slug: &str) -> ApiResult<Listing> {
        let path = format!("/api/sponsor-dashboard/{}/listing", urlencoding::encode(slug));
        self.get_json(&path, &[]).await
    }

    pub async fn get_submission_count(&self, listing_id: &str) -> ApiResult<u64> {
        let path = format!(
            "/api/listings/{}/submission-count/",
            urlencoding::encode(listing_id)
        );
        let data: serde_json::Value = self.get_json(&path, &[]).await?;
        Ok(Self::parse_count(&data))
    }

    pub async fn get_listing_submissions(&self, slug: &str) -> ApiResult<Vec<Submission>> {
        let path = format!(
            "/api/sponsor-dashboard/{}/submissions/",
            urlencoding::encode(slug)
        );
        self.get_json(&path, &[]).await
    }

    pub(crate) fn parse_application_status(data: &serde_json::Value) -> bool {
        match data.get("id") {
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(serde_json::Value::Number(_)) => true,
            _ => false,
        }
    }

    /// `{ "available": bool }`; anything else reads as taken.
    pub(crate) fn parse_username_available(data: &serde_json::Value) -> bool {
        match data {
            serde_json::Value::Bool(b) => *b,
            _ => data
                .get("available")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false),
        }
    }

    pub(crate) fn parse_subscribers(data: serde_json::Value) -> ApiResult<Vec<Subscriber>> {
        if data.is_null() {
            return Ok(vec![]);
        }
        serde_json::from_value(data).map_err(ApiError::parse)
    }

    pub(crate) fn parse_optional_listing(data: serde_json::Value) -> ApiResult<Option<Listing>> {
        if !data.is_object() {
            return Ok(None);
        }
        let listing: Listing = serde_json::from_value(data).map_err(ApiError::parse)?;
        if listing.id.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(listing))
        }
    }

    /// Counts arrive as a bare number; anything else reads as zero.
    pub(crate) fn parse_count(data: &serde_json::Value) -> u64 {
        data.as_u64()
            .or_else(|| data.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .or_else(|| data.as_str().and_then(|s| s.trim().parse().ok()))
            .unwrap_or(0)
    }
}
