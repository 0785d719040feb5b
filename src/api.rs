//! Article-centric operations on top of a [`Session`].

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::moves::MovePatterns;
use crate::response::{ShapeError, Step};
use crate::session::Session;
use crate::types::Revision;

/// Where `prop=revisions` data lives in a single-title query response:
/// under a dynamically keyed page-ID object that must hold exactly one
/// page.
const REVISIONS_PATH: &[Step] = &[Step::Key("pages"), Step::Singleton, Step::Key("revisions")];

/// High-level MediaWiki operations for one wiki.
#[derive(Debug, Clone)]
pub struct MediaWikiApi<C = ReqwestHttpClient> {
    session: Session<C>,
    move_patterns: MovePatterns,
}

impl MediaWikiApi<ReqwestHttpClient> {
    /// Build a facade from validated [`Config`]: session, HTTP backend and
    /// move patterns all come from the configuration.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] when the HTTP backend cannot be built
    /// and a pattern error when a configured move template is invalid.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            session: Session::from_config(config)?,
            move_patterns: config.moves.compile()?,
        })
    }
}

impl<C: HttpClient> MediaWikiApi<C> {
    /// Wrap a session, recognizing the default move-comment phrasings.
    pub fn new(session: Session<C>) -> Self {
        Self {
            session,
            move_patterns: MovePatterns::default(),
        }
    }

    /// Wrap a session with a custom move-comment pattern list.
    pub const fn with_patterns(session: Session<C>, move_patterns: MovePatterns) -> Self {
        Self {
            session,
            move_patterns,
        }
    }

    /// The underlying session.
    #[must_use]
    pub const fn session(&self) -> &Session<C> {
        &self.session
    }

    /// Fetch the raw wikitext of `title`, exactly as the server sent it.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] on network failure.
    pub async fn get_content(&self, title: &str) -> Result<String, Error> {
        self.session
            .index_call(&[
                ("action".to_string(), "raw".to_string()),
                ("title".to_string(), title.to_string()),
            ])
            .await
    }

    /// Fetch the full revision history of `title`, newest first (the
    /// API's own order).
    ///
    /// A page without revisions (typically: a page that does not exist)
    /// yields an empty list rather than an error; that is the only shape
    /// failure recovered here. A response with zero or several page
    /// entries still fails.
    ///
    /// # Errors
    /// Propagates transport, decode and remaining shape failures.
    pub async fn revisions(&self, title: &str) -> Result<Vec<Revision>, Error> {
        let params = vec![
            ("prop".to_string(), "revisions".to_string()),
            ("titles".to_string(), title.to_string()),
            ("rvprop".to_string(), "timestamp|user|size|comment".to_string()),
            ("rvlimit".to_string(), "max".to_string()),
        ];

        match self.session.api_query(params, REVISIONS_PATH).await {
            Ok(values) => values
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<Vec<Revision>, _>>()
                .map_err(Error::from),
            Err(Error::Shape(ShapeError::MissingKey { key })) => {
                debug!(title, key = key.as_str(), "no revisions found");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Count revisions of `title` with `start <= timestamp < end`.
    ///
    /// Timestamps are ISO-8601-like, so lexicographic comparison equals
    /// chronological comparison.
    ///
    /// # Errors
    /// See [`MediaWikiApi::revisions`].
    pub async fn revisions_count(
        &self,
        title: &str,
        start: &str,
        end: &str,
    ) -> Result<usize, Error> {
        let revisions = self.revisions(title).await?;
        Ok(revisions
            .iter()
            .filter(|revision| {
                revision.timestamp.as_str() >= start && revision.timestamp.as_str() < end
            })
            .count())
    }

    /// Every title the article has ever had: `title` itself, plus every
    /// pair of titles captured from a move-log comment in its history.
    ///
    /// # Errors
    /// See [`MediaWikiApi::revisions`].
    pub async fn all_titles(&self, title: &str) -> Result<BTreeSet<String>, Error> {
        let mut titles = BTreeSet::new();
        titles.insert(title.to_string());

        for revision in self.revisions(title).await? {
            if let Some((old, new)) = self.move_patterns.extract(revision.effective_comment()) {
                titles.insert(old.to_string());
                titles.insert(new.to_string());
            }
        }

        Ok(titles)
    }

    /// Sum the page views of `title` over `start..end` (`YYYYMMDD`
    /// bounds) across every title the article has ever had. Per-title
    /// totals are summed as-is; nothing is deduplicated.
    ///
    /// # Errors
    /// Propagates failures from both the revision lookup and the
    /// page-view endpoint.
    pub async fn pageviews(&self, title: &str, start: &str, end: &str) -> Result<u64, Error> {
        let mut total = 0u64;
        for historical in self.all_titles(title).await? {
            total += self.session.pageviews(&historical, start, end).await?;
        }
        Ok(total)
    }
}
