//! Inbound port. UI (adapter) supplies run parameters to the application.

use crate::domain::DomainError;

/// Input port: interactive fallback for parameters not given on the command line.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Ask for the bot token (`bot` prefix allowed).
    async fn prompt_token(&self) -> Result<String, DomainError>;

    /// Ask for the target chat id or `@username`.
    async fn prompt_chat_id(&self) -> Result<String, DomainError>;
}
