#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Client library for querying a MediaWiki-powered wiki over HTTP: raw
//! article content, revision history, page-view statistics and historical
//! title aliases derived from page-move edit comments.
//!
//! # Architecture
//!
//! Requests flow facade → session → HTTP backend → remote server:
//!
//! - [`http::HttpClient`] - trait capability for GET-as-text / GET-as-JSON
//! - [`session::Session`] - endpoint shapes of one wiki host, pagination,
//!   page-view summation
//! - [`api::MediaWikiApi`] - article-centric operations built on a session
//! - [`moves::MovePatterns`] - localized move-comment phrasings, treated
//!   as configuration data
//! - [`config::Config`] - figment-loaded configuration (defaults →
//!   `mwactivity.yaml` → `MWA_` environment variables)
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Backend)
//!
//! Use [`http::mock::MockHttpClient`] (behind the `test-utils` feature)
//! for fast, isolated unit tests:
//!
//! ```ignore
//! use mwactivity::http::mock::MockHttpClient;
//! use mwactivity::{MediaWikiApi, Session};
//!
//! let client = MockHttpClient::new();
//! client.push_text(Ok("wikitext".to_string()));
//!
//! let api = MediaWikiApi::new(Session::new("en.wikibooks.org", client));
//! assert_eq!(api.get_content("Foo").await?, "wikitext");
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! Use `wiremock` to exercise the real [`http::ReqwestHttpClient`] against
//! stubbed endpoints; see `tests/wiki_client_tests.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod moves;
pub mod response;
pub mod session;
pub mod types;

pub use api::MediaWikiApi;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use http::{HttpClient, ReqwestHttpClient};
pub use moves::{MovePattern, MovePatterns};
pub use response::{ShapeError, Step};
pub use session::Session;
pub use types::Revision;
