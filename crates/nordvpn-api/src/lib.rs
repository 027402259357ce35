//! Typed Rust client for the NordVPN public API.
//!
//! Covers the subset needed to generate WireGuard configs:
//! service credentials, the country list and server recommendations.

mod types;

use std::time::Duration;

pub use reqwest::StatusCode;
pub use types::*;

pub const BASE_URL: &str = "https://api.nordvpn.com/v1";

/// Catalog tag for servers speaking WireGuard ("NordLynx").
pub const WIREGUARD_TECHNOLOGY: &str = "wireguard_udp";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("nordvpn api request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("nordvpn api {endpoint} returned {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}

impl Error {
    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Request(e) => e.status(),
            Self::Api { status, .. } => Some(*status),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(reqwest::StatusCode::UNAUTHORIZED)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Client for the NordVPN REST API.
#[derive(Clone)]
pub struct NordClient {
    base_url: String,
    http: reqwest::Client,
}

impl NordClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nordgen/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: BASE_URL.to_string(),
            http,
        })
    }

    /// Point the client at another deployment of the API (e.g. a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn check(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                endpoint,
                status,
                body,
            });
        }
        Ok(resp)
    }

    // ── Credentials ─────────────────────────────────────────────────

    /// Exchange an access token for the account's service credentials.
    ///
    /// Authenticates with HTTP Basic, user `token`, password = access token.
    pub async fn credentials(&self, access_token: &str) -> Result<Credentials> {
        let resp = self.credentials_request(access_token).send().await?;

        Self::check(resp, "get credentials")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    fn credentials_request(&self, access_token: &str) -> reqwest::RequestBuilder {
        self.http
            .get(self.url("/users/services/credentials"))
            .basic_auth("token", Some(access_token))
    }

    // ── Servers ─────────────────────────────────────────────────────

    pub async fn countries(&self) -> Result<Vec<Country>> {
        let resp = self
            .http
            .get(self.url("/servers/countries"))
            .send()
            .await?;

        Self::check(resp, "list countries")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    /// Recommended WireGuard servers matching `query`.
    ///
    /// The response order is whatever the API returns; callers sort.
    pub async fn recommendations(&self, query: &ServerQuery) -> Result<Vec<Server>> {
        let resp = self
            .http
            .get(self.url("/servers/recommendations"))
            .query(&query.to_params())
            .send()
            .await?;

        Self::check(resp, "list recommendations")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }
}
