use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::moves::{MovePatterns, DEFAULT_MOVE_PATTERNS};

/// Client configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. mwactivity.yaml file (if exists)
/// 3. Environment variables with `MWA_` prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub wiki: WikiConfig,
    #[serde(default)]
    pub pageviews: PageviewsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub moves: MovesConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WikiConfig {
    /// Wiki host to query (required - no compiled-in default).
    #[serde(default)]
    pub domain: String,

    /// URL scheme for the MediaWiki endpoints: "http" or "https".
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageviewsConfig {
    /// Base URL of the per-article page-view endpoint.
    #[serde(default = "default_pageviews_base")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MovesConfig {
    /// Move-comment pattern templates, each with exactly two capture
    /// groups (old title, new title).
    #[serde(default = "default_move_patterns")]
    pub patterns: Vec<String>,
}

impl MovesConfig {
    /// Compile the configured templates.
    ///
    /// # Errors
    /// Returns the first template that does not compile or does not have
    /// exactly two capture groups.
    pub fn compile(&self) -> Result<MovePatterns, crate::error::Error> {
        MovePatterns::compile_all(&self.patterns)
    }
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_pageviews_base() -> String {
    crate::session::DEFAULT_PAGEVIEWS_BASE.to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("mwactivity/{}", env!("CARGO_PKG_VERSION"))
}

fn default_move_patterns() -> Vec<String> {
    DEFAULT_MOVE_PATTERNS.iter().map(ToString::to_string).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wiki: WikiConfig {
                domain: String::new(),
                scheme: default_scheme(),
            },
            pageviews: PageviewsConfig::default(),
            http: HttpConfig::default(),
            moves: MovesConfig::default(),
        }
    }
}

impl Default for PageviewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_pageviews_base(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for MovesConfig {
    fn default() -> Self {
        Self {
            patterns: default_move_patterns(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. mwactivity.yaml file (if exists)
    /// 3. Environment variables with `MWA_` prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file("mwactivity.yaml"))
            .merge(Env::prefixed("MWA_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("MWA_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Wiki domain is required
        if self.wiki.domain.is_empty() {
            return Err(ConfigError::Validation(
                "wiki.domain is required. Set MWA_WIKI__DOMAIN environment variable or configure in mwactivity.yaml.".into(),
            ));
        }

        if self.wiki.scheme != "http" && self.wiki.scheme != "https" {
            return Err(ConfigError::Validation(format!(
                "wiki.scheme must be 'http' or 'https', got: '{}'",
                self.wiki.scheme
            )));
        }

        if !self.pageviews.base_url.starts_with("http://")
            && !self.pageviews.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "pageviews.base_url must start with http:// or https://, got: '{}'",
                self.pageviews.base_url
            )));
        }

        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "http.timeout_secs cannot be 0".into(),
            ));
        }

        if self.http.user_agent.is_empty() {
            return Err(ConfigError::Validation(
                "http.user_agent cannot be empty".into(),
            ));
        }

        // Every move pattern must compile with two capture groups
        if let Err(err) = self.moves.compile() {
            return Err(ConfigError::Validation(format!(
                "moves.patterns contains an invalid template: {err}"
            )));
        }

        Ok(())
    }
}
