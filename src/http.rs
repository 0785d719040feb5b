//! HTTP backend abstraction.
//!
//! The session never talks to `reqwest` directly; it goes through the
//! [`HttpClient`] trait so the transport can be swapped out:
//!
//! - [`ReqwestHttpClient`] - real HTTP implementation using reqwest
//! - [`mock::MockHttpClient`] - canned responses for unit tests (behind the
//!   `test-utils` feature)
//!
//! Status codes are deliberately not interpreted here: a transport-level
//! failure surfaces as [`Error::Transport`], and a body that is not JSON
//! where JSON is expected surfaces as [`Error::Decode`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::Error;

/// Capability to issue GET requests and read the body as text or JSON.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` with `query` parameters and return the raw body text.
    async fn get_text(&self, url: &str, query: &[(String, String)]) -> Result<String, Error>;

    /// GET `url` with `query` parameters and return the body decoded as
    /// JSON.
    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, Error>;
}

/// HTTP backend backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a backend around a default `reqwest` client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a backend around a caller-configured `reqwest` client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a backend from [`HttpConfig`] (timeout and user agent).
    ///
    /// # Errors
    /// Returns [`Error::Transport`] when the underlying client cannot be
    /// constructed.
    pub fn from_config(config: &HttpConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get_text(&self, url: &str, query: &[(String, String)]) -> Result<String, Error> {
        debug!(url, params = query.len(), "GET");
        let response = self.client.get(url).query(query).send().await?;
        Ok(response.text().await?)
    }

    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, Error> {
        let body = self.get_text(url, query).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::must_use_candidate)]
pub mod mock {
    //! Mock HTTP backend for unit testing.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::HttpClient;
    use crate::error::Error;

    /// One recorded GET request.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedCall {
        pub url: String,
        pub query: Vec<(String, String)>,
    }

    /// Mock implementation of [`HttpClient`] for unit tests.
    ///
    /// Queue responses with `push_text` / `push_json` (consumed in FIFO
    /// order) and inspect issued requests with `calls()`. An exhausted
    /// queue yields an empty body / JSON `null`.
    pub struct MockHttpClient {
        text_responses: Mutex<VecDeque<Result<String, Error>>>,
        json_responses: Mutex<VecDeque<Result<Value, Error>>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                text_responses: Mutex::new(VecDeque::new()),
                json_responses: Mutex::new(VecDeque::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Queue the result of the next `get_text` call.
        pub fn push_text(&self, result: Result<String, Error>) {
            self.text_responses.lock().unwrap().push_back(result);
        }

        /// Queue the result of the next `get_json` call.
        pub fn push_json(&self, result: Result<Value, Error>) {
            self.json_responses.lock().unwrap().push_back(result);
        }

        /// All requests issued so far, in order.
        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockHttpClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get_text(&self, url: &str, query: &[(String, String)]) -> Result<String, Error> {
            self.calls.lock().unwrap().push(RecordedCall {
                url: url.to_string(),
                query: query.to_vec(),
            });

            self.text_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))
        }

        async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value, Error> {
            self.calls.lock().unwrap().push(RecordedCall {
                url: url.to_string(),
                query: query.to_vec(),
            });

            self.json_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Value::Null))
        }
    }
}
