//! Implements BotApiPort over HTTPS with reqwest.
//!
//! One GET per method: `{api_base}/bot{token}/{method}?{params}`. The body is
//! decoded as an envelope whatever the HTTP status, since the Bot API reports
//! its own failures as `ok: false` with a 4xx code.

use crate::domain::{ApiResponse, DomainError};
use crate::ports::BotApiPort;
use async_trait::async_trait;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Bot API gateway bound to one token.
pub struct HttpBotApi {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl HttpBotApi {
    /// Create a gateway.
    ///
    /// # Arguments
    /// * `api_base` - Bot API server (e.g. "https://api.telegram.org" or a local server)
    /// * `token` - Bot token without the `bot` prefix
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base.trim_end_matches('/'),
            self.token,
            method
        )
    }
}

#[async_trait]
impl BotApiPort for HttpBotApi {
    async fn call(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, DomainError> {
        // without_url(): the request URL embeds the token
        let response = self
            .client
            .get(self.method_url(method))
            .query(params)
            .send()
            .await
            .map_err(|e| {
                DomainError::Transport(format!("{method} request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DomainError::Transport(format!("{method} body read failed: {}", e.without_url()))
        })?;
        debug!(method, status = %status, body_len = body.len(), "bot api response");

        serde_json::from_str(&body).map_err(|e| {
            DomainError::Decode(format!(
                "{method} returned status {} with invalid JSON: {}",
                status.as_u16(),
                e
            ))
        })
    }
}
