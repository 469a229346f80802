//! `TmdbClient` - TMDB API client implementation.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, bail};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::error::{Result, TmdbError};
use super::params::{
    ListParams, QueryDefaults, QueryParams, SearchMovieParams, SearchTvParams, build_url,
};
use super::types::{
    ErrorBody, MovieDetails, MovieSummary, Paginated, TvDetails, TvSeason, TvSummary,
};

/// Default base URL for the TMDB API. Endpoint paths carry the `/3` prefix.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// TMDB API client.
///
/// Owns its configuration and the underlying connection pool. The pool is
/// released by [`TmdbClient::close`]; every request after that fails with
/// [`super::ErrorKind::Closed`] without touching the network.
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client, `None` once closed.
    http_client: RwLock<Option<Client>>,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
    /// Default language / region.
    defaults: QueryDefaults,
    /// Per-request timeout.
    timeout: Duration,
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"<redacted>")
            .field("defaults", &self.defaults)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    language: Option<String>,
    region: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            timeout: None,
            language: None,
            region: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (default: `tmdbkit-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the default response language (e.g. "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the default region (ISO 3166-1).
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set or empty.
    /// - `base_url` cannot carry a path.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> anyhow::Result<TmdbClient> {
        let api_token = self
            .api_token
            .filter(|t| !t.is_empty())
            .context("api_token is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };
        if base_url.cannot_be_a_base() {
            bail!("base_url cannot be a base URL: {base_url}");
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client: RwLock::new(Some(http_client)),
            base_url,
            api_token,
            defaults: QueryDefaults {
                language: self.language.filter(|l| !l.is_empty()),
                region: self.region.filter(|r| !r.is_empty()),
            },
            timeout,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Creates a client with the given token and default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the HTTP client fails to build.
    pub fn new(api_token: impl Into<String>) -> anyhow::Result<Self> {
        Self::builder().api_token(api_token).build()
    }

    /// Configured default language / region.
    #[must_use]
    pub const fn defaults(&self) -> &QueryDefaults {
        &self.defaults
    }

    /// Configured per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the full request URL for `path` with defaults merged in.
    #[must_use]
    pub fn request_url(&self, path: &str, query: &QueryParams) -> Url {
        build_url(&self.base_url, path, &query.merge(&self.defaults))
    }

    /// Releases the connection pool.
    ///
    /// Only the first call has an effect. Requests issued afterwards fail
    /// with [`super::ErrorKind::Closed`]. Requests already in flight finish
    /// on their own handle.
    pub async fn close(&self) {
        if self.http_client.write().await.take().is_some() {
            tracing::debug!("TMDB client closed");
        } else {
            tracing::debug!("TMDB client already closed");
        }
    }

    /// Returns `true` once [`TmdbClient::close`] has been called.
    pub async fn is_closed(&self) -> bool {
        self.http_client.read().await.is_none()
    }

    /// Sends a GET request with Bearer auth and the merged query.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &QueryParams) -> Result<T> {
        let http_client = self
            .http_client
            .read()
            .await
            .clone()
            .ok_or_else(|| TmdbError::closed(path))?;

        let url = self.request_url(path, query);
        tracing::debug!(url = %url, "TMDB API request");

        let response = http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(path, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(path, e))?;

        map_response(path, status, &body)
    }
}

/// Splits reqwest failures into timeout and other transport errors.
fn transport_error(path: &str, err: reqwest::Error) -> TmdbError {
    if err.is_timeout() {
        tracing::warn!(path, "TMDB API request timed out");
        TmdbError::timeout(path, err)
    } else {
        tracing::warn!(path, error = %err, "TMDB API request failed");
        TmdbError::transport(path, err)
    }
}

/// Maps a raw response to decoded data or a `TmdbError`.
///
/// Anything other than 200 is an error. Its message is the body's
/// `status_message` when present and non-empty, else `HTTP {code}`.
fn map_response<T: DeserializeOwned>(path: &str, status: StatusCode, body: &str) -> Result<T> {
    if status != StatusCode::OK {
        let code = status.as_u16();
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|e| e.status_message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {code}"));
        tracing::warn!(status = code, path, message = %message, "TMDB API error response");
        return Err(TmdbError::http_status(code, message, String::from(body)));
    }

    serde_json::from_str(body).map_err(|e| TmdbError::decode(path, e))
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn popular_movies(&self, params: &ListParams) -> Result<Paginated<MovieSummary>> {
        self.get_json("/3/movie/popular", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn top_rated_movies(&self, params: &ListParams) -> Result<Paginated<MovieSummary>> {
        self.get_json("/3/movie/top_rated", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn search_movies(&self, params: &SearchMovieParams) -> Result<Paginated<MovieSummary>> {
        self.get_json("/3/search/movie", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn movie_details(&self, movie_id: u64, language: Option<&str>) -> Result<MovieDetails> {
        let path = format!("/3/movie/{movie_id}");
        let query = QueryParams::new().string("language", language);
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn popular_tv(&self, params: &ListParams) -> Result<Paginated<TvSummary>> {
        self.get_json("/3/tv/popular", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn top_rated_tv(&self, params: &ListParams) -> Result<Paginated<TvSummary>> {
        self.get_json("/3/tv/top_rated", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn search_tv(&self, params: &SearchTvParams) -> Result<Paginated<TvSummary>> {
        self.get_json("/3/search/tv", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn tv_details(&self, series_id: u64, language: Option<&str>) -> Result<TvDetails> {
        let path = format!("/3/tv/{series_id}");
        let query = QueryParams::new().string("language", language);
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn tv_season(
        &self,
        series_id: u64,
        season_number: u32,
        language: Option<&str>,
    ) -> Result<TvSeason> {
        let path = format!("/3/tv/{series_id}/season/{season_number}");
        let query = QueryParams::new().string("language", language);
        self.get_json(&path, &query).await
    }
}
