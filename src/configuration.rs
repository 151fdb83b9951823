use crate::models::{Language, DEFAULT_COVER_IMAGE};
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_MS: i64 = 5000;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub language: Language,
    pub default_cover_image: String,
}

impl Settings {
    /// Loads defaults, then the config file, then `CHAPTERS_*` environment variables.
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("request_timeout_ms", DEFAULT_TIMEOUT_MS)?
            .set_default("language", "zh")?
            .set_default("default_cover_image", DEFAULT_COVER_IMAGE)?
            .add_source(config::File::with_name(config_file))
            .add_source(config::Environment::with_prefix("CHAPTERS"))
            .build()?;
        builder.try_deserialize()
    }

    pub fn with_base_url(api_base_url: &str) -> Self {
        Settings {
            api_base_url: api_base_url.into(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS as u64,
            language: Language::default(),
            default_cover_image: DEFAULT_COVER_IMAGE.into(),
        }
    }

    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.api_base_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
