//! Scripted Bot API gateway. Test double only; compiled under `cfg(test)`.
//!
//! Responses are queued per method. The last queued response for a method is
//! repeated; unscripted methods answer `{"ok": false}` with no description.

use crate::domain::{ApiResponse, DomainError};
use crate::ports::BotApiPort;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tracing::info;

/// One recorded call: method name and query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: String,
    pub params: Vec<(String, String)>,
}

#[derive(Default)]
pub struct ScriptedBotApi {
    script: Mutex<HashMap<String, VecDeque<ApiResponse>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedBotApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful envelope with `result`.
    pub fn ok(self, method: &str, result: Value) -> Self {
        self.respond(
            method,
            ApiResponse {
                ok: true,
                result: Some(result),
                ..Default::default()
            },
        )
    }

    /// Queue a failed envelope with `description`.
    pub fn fail(self, method: &str, description: &str) -> Self {
        self.respond(method, ApiResponse::failure(description))
    }

    /// Queue a raw envelope, e.g. one parsed from a captured Bot API body.
    pub fn respond(self, method: &str, response: ApiResponse) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script
                .entry(method.to_string())
                .or_default()
                .push_back(response);
        }
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Method names called so far, in order.
    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.method).collect()
    }

    fn next_response(&self, method: &str) -> ApiResponse {
        let Ok(mut script) = self.script.lock() else {
            return ApiResponse::default();
        };
        match script.get_mut(method) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => ApiResponse::default(),
        }
    }
}

#[async_trait::async_trait]
impl BotApiPort for ScriptedBotApi {
    async fn call(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, DomainError> {
        info!(method, params = params.len(), "[MOCK] Bot API call");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                method: method.to_string(),
                params: params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            });
        }
        Ok(self.next_response(method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_queue_repeats_last() {
        let api = ScriptedBotApi::new()
            .ok("getChat", json!({"id": 1}))
            .fail("getChat", "Bad Request: chat not found");

        let first = api.call("getChat", &[("chat_id", "1".into())]).await.unwrap();
        let second = api.call("getChat", &[("chat_id", "2".into())]).await.unwrap();
        let third = api.call("getChat", &[]).await.unwrap();

        assert!(first.ok);
        assert_eq!(second.error_description(), Some("Bad Request: chat not found"));
        assert_eq!(third, second);
        assert_eq!(api.calls()[1].params, [("chat_id".to_string(), "2".to_string())]);
    }

    #[tokio::test]
    async fn test_unscripted_method_fails_silently() {
        let api = ScriptedBotApi::new();
        let resp = api.call("getMe", &[]).await.unwrap();
        assert!(!resp.ok);
        assert!(resp.error_description().is_none());
        assert_eq!(api.methods(), ["getMe"]);
    }
}
