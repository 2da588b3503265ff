//! Per-call parser settings.

use std::time::{Duration, Instant};

use config::{Config, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("invalid parser options: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    /// Emit `Comment` lines into the document.
    pub keep_comments: bool,
    /// Give up once parsing has run this long; checked between lines.
    pub time_limit_ms: Option<u64>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            keep_comments: true,
            time_limit_ms: None,
        }
    }
}

impl ParseOptions {
    /// Reads options from a TOML table; missing keys keep their defaults.
    ///
    /// ```toml
    /// keep_comments = false
    /// time_limit_ms = 250
    /// ```
    pub fn from_toml_str(toml: &str) -> Result<Self, OptionsError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn with_keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub(crate) fn deadline(&self, start: Instant) -> Option<Instant> {
        self.time_limit_ms
            .and_then(|ms| start.checked_add(Duration::from_millis(ms)))
    }
}
