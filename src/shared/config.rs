//! Application configuration. Defaults for token, chat id, endpoint and report path.
//!
//! Sources, lowest priority first: optional file named by `TOSINT_CONFIG`,
//! then `TOSINT_*` environment variables (`main` loads `.env` beforehand).
//! Command-line flags override everything here.

use crate::adapters::telegram::DEFAULT_API_BASE;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bot token. Read from TOSINT_TOKEN.
    #[serde(default)]
    pub token: Option<String>,

    /// Target chat id or @username. Read from TOSINT_CHAT_ID.
    #[serde(default)]
    pub chat_id: Option<String>,

    /// Bot API base URL. Read from TOSINT_API_BASE.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Where to save the JSON report. Read from TOSINT_JSON_FILE.
    #[serde(default)]
    pub json_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("TOSINT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("TOSINT"));
        c.build()?.try_deserialize()
    }

    pub fn api_base_or_default(&self) -> String {
        self.api_base
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
    }
}
