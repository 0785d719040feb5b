//! Session: HTTP request layer for one wiki host.
//!
//! A [`Session`] owns the wiki domain and an [`HttpClient`] backend and
//! knows the three endpoint shapes involved:
//!
//! - `index.php` for raw page content ([`Session::index_call`])
//! - `api.php` for structured queries, including the legacy
//!   `query-continue` pagination signal ([`Session::api_query`])
//! - the Wikimedia per-article page-view REST endpoint
//!   ([`Session::pageviews`])
//!
//! The session decodes raw bodies; shaping the results into domain values
//! is the facade's job ([`crate::api::MediaWikiApi`]).

use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::response::{expect_array, single_entry, views_count, walk, Step};

/// Public Wikimedia per-article page-view endpoint.
pub const DEFAULT_PAGEVIEWS_BASE: &str =
    "https://wikimedia.org/api/rest_v1/metrics/pageviews/per-article";

/// A session for requests against one MediaWiki host.
#[derive(Debug, Clone)]
pub struct Session<C = ReqwestHttpClient> {
    domain: String,
    scheme: String,
    pageviews_base: String,
    client: C,
}

impl Session<ReqwestHttpClient> {
    /// Build a session from validated [`Config`].
    ///
    /// # Errors
    /// Returns [`Error::Transport`] when the HTTP backend cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            domain: config.wiki.domain.clone(),
            scheme: config.wiki.scheme.clone(),
            pageviews_base: config.pageviews.base_url.clone(),
            client: ReqwestHttpClient::from_config(&config.http)?,
        })
    }
}

impl<C: HttpClient> Session<C> {
    /// Create a session for `domain` (e.g. `"en.wikibooks.org"`) over a
    /// given HTTP backend, with the `http` scheme and the public page-view
    /// endpoint.
    pub fn new(domain: impl Into<String>, client: C) -> Self {
        Self {
            domain: domain.into(),
            scheme: "http".to_string(),
            pageviews_base: DEFAULT_PAGEVIEWS_BASE.to_string(),
            client,
        }
    }

    /// Replace the URL scheme used for the MediaWiki endpoints.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Replace the page-view endpoint base (used by tests to point at a
    /// stub server).
    #[must_use]
    pub fn with_pageviews_base(mut self, base_url: impl Into<String>) -> Self {
        self.pageviews_base = base_url.into();
        self
    }

    /// The wiki host this session queries.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The injected HTTP backend.
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    /// URL of the host's `index.php` endpoint.
    #[must_use]
    pub fn index_url(&self) -> String {
        format!("{}://{}/w/index.php", self.scheme, self.domain)
    }

    /// URL of the host's `api.php` endpoint.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}://{}/w/api.php", self.scheme, self.domain)
    }

    /// GET `index.php` with `params` and return the raw body text.
    ///
    /// Status codes are not interpreted; transport failures propagate.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] on network failure.
    pub async fn index_call(&self, params: &[(String, String)]) -> Result<String, Error> {
        self.client.get_text(&self.index_url(), params).await
    }

    /// GET `api.php` with `params` plus a forced `format=json` and return
    /// the decoded JSON body.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] on network failure and
    /// [`Error::Decode`] when the body is not valid JSON.
    pub async fn api_call(&self, params: &[(String, String)]) -> Result<Value, Error> {
        let mut params = params.to_vec();
        set_param(&mut params, "format", "json");
        self.client.get_json(&self.api_url(), &params).await
    }

    /// Perform a MediaWiki `action=query`, following `query-continue`
    /// pagination until exhausted.
    ///
    /// `path` is evaluated against the response's `query` object and must
    /// yield an array; the arrays of all rounds are concatenated in
    /// request order. Each continuation round merges the parameters from
    /// the response's single `query-continue` entry into `params`,
    /// replacing earlier values. There is no bound on the number of
    /// rounds; a server that keeps signaling continuation keeps the loop
    /// going.
    ///
    /// # Errors
    /// Propagates transport and decode failures, and returns
    /// [`Error::Shape`] when the `query` object, the `path` target or the
    /// `query-continue` structure does not have the expected form.
    pub async fn api_query(
        &self,
        params: Vec<(String, String)>,
        path: &[Step],
    ) -> Result<Vec<Value>, Error> {
        let mut params = params;
        set_param(&mut params, "action", "query");

        let mut results = Vec::new();
        let mut rounds = 0u32;

        loop {
            let body = self.api_call(&params).await?;
            let query = walk(&body, &[Step::Key("query")])?;
            let items = expect_array(walk(query, path)?)?;
            results.extend(items.iter().cloned());

            let Some(marker) = body.get("query-continue") else {
                break;
            };

            let (module, continuation) = single_entry(marker)?;
            let continuation = continuation
                .as_object()
                .ok_or(crate::response::ShapeError::ExpectedObject)?;
            for (key, value) in continuation {
                set_param(&mut params, key, &scalar_to_string(value));
            }

            rounds += 1;
            debug!(module = module.as_str(), rounds, "following query-continue");
        }

        Ok(results)
    }

    /// Sum the daily page views of `title` over the range `start..end`,
    /// both `YYYYMMDD` strings (range semantics are the endpoint's own).
    ///
    /// A response without an `items` key means "no data" and yields 0.
    ///
    /// # Errors
    /// Propagates transport and decode failures; returns [`Error::Shape`]
    /// when `items` is present but malformed.
    pub async fn pageviews(&self, title: &str, start: &str, end: &str) -> Result<u64, Error> {
        let url = format!(
            "{}/{}/all-access/all-agents/{}/daily/{}/{}",
            self.pageviews_base,
            self.domain,
            urlencoding::encode(title),
            start,
            end
        );

        let body = self.client.get_json(&url, &[]).await?;

        let Some(items) = body.get("items") else {
            return Ok(0);
        };

        let mut total = 0u64;
        for item in expect_array(items)? {
            total += views_count(item)?;
        }
        Ok(total)
    }
}

/// Set `key` to `value` in `params`, replacing an existing entry.
fn set_param(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    if let Some(entry) = params.iter_mut().find(|(existing, _)| existing == key) {
        entry.1 = value.to_string();
    } else {
        params.push((key.to_string(), value.to_string()));
    }
}

/// Continuation parameters arrive as JSON scalars; render them the way
/// they must appear in a query string.
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
