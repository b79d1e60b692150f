//! The OpenAlex API client.

use crate::error::{Result, WorksError};
use crate::rate_limit::CourtesyDelay;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Default OpenAlex API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openalex.org";

/// Async client for the OpenAlex works API.
///
/// Holds only immutable configuration, so it is cheap to clone and share.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> openalex_works::error::Result<()> {
/// let client = openalex_works::OpenAlexClient::from_env();
/// let record = client.work("W2741809807").await?;
/// println!("{}", record.citation()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OpenAlexClient {
    pub(crate) http: Client,
    pub(crate) base_url: String,
    pub(crate) mailto: Option<String>,
    pub(crate) delay: CourtesyDelay,
}

impl OpenAlexClient {
    /// Create a client for the public OpenAlex API.
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            mailto: None,
            delay: CourtesyDelay::default(),
        }
    }

    /// Create a client, joining the polite pool when `OPENALEX_MAILTO`
    /// (or `OPENALEX_EMAIL`) is set.
    pub fn from_env() -> Self {
        let mailto = std::env::var("OPENALEX_MAILTO")
            .or_else(|_| std::env::var("OPENALEX_EMAIL"))
            .ok()
            .filter(|m| !m.trim().is_empty());

        let client = Self::new();
        match mailto {
            Some(m) => client.with_mailto(m),
            None => client,
        }
    }

    /// Override the base URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Send a `mailto` parameter with every request.
    pub fn with_mailto(mut self, email: impl Into<String>) -> Self {
        self.mailto = Some(email.into());
        self
    }

    /// Override the pause taken before each per-item traversal request.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.delay = CourtesyDelay::new(delay);
        self
    }

    /// The configured courtesy delay.
    pub fn delay(&self) -> CourtesyDelay {
        self.delay
    }

    /// URL of a single work record.
    ///
    /// The identifier is used as the path verbatim (URL-form ids such as
    /// `https://openalex.org/W123` included), so `?` and `#` are rejected
    /// rather than turned into a query or fragment.
    pub fn work_url(&self, identifier: &str) -> Result<Url> {
        let identifier = identifier.trim();
        if identifier.is_empty() || identifier.contains(&['?', '#'][..]) {
            return Err(WorksError::InvalidIdentifier(identifier.to_string()));
        }
        parse_url(&format!("{}/works/{}", self.base_url, identifier))
    }

    /// Fetch the raw JSON body of a single work.
    pub(crate) async fn get_work(&self, identifier: &str) -> Result<String> {
        let url = self.work_url(identifier)?;
        self.get(url).await
    }

    /// Fetch an absolute URL taken from a previous response.
    pub(crate) async fn get_url(&self, url: &str) -> Result<String> {
        self.get(parse_url(url)?).await
    }

    /// Make a GET request, adding the polite-pool address when configured.
    async fn get(&self, mut url: Url) -> Result<String> {
        if let Some(mailto) = &self.mailto {
            url.query_pairs_mut().append_pair("mailto", mailto);
        }

        tracing::debug!(url = %url, "GET");
        let response = self.http.get(url).send().await?;
        handle_response(response).await
    }
}

impl Default for OpenAlexClient {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| WorksError::Parse(format!("Invalid URL {}: {}", raw, e)))
}

/// Handle the HTTP response, mapping status codes to errors.
async fn handle_response(response: reqwest::Response) -> Result<String> {
    let status = response.status().as_u16();

    match status {
        200..=299 => Ok(response.text().await?),
        404 => Err(WorksError::NotFound(response.url().path().to_string())),
        429 => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            tracing::warn!(?retry_after, "rate limited by OpenAlex");
            Err(WorksError::RateLimited { retry_after })
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status, "non-success response");
            Err(WorksError::Api {
                status,
                message: body,
            })
        }
    }
}
