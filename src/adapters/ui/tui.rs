//! Implements InputPort. Inquire-based interactive prompts.

use crate::domain::DomainError;
use crate::ports::InputPort;
use async_trait::async_trait;
use inquire::Text;
use inquire::ui::{Color, RenderConfig, Styled};

/// Neon prompt prefix for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new(">").with_fg(Color::LightMagenta))
        .with_answered_prompt_prefix(Styled::new("✓").with_fg(Color::LightCyan));
    inquire::set_global_render_config(config);
}

/// TUI adapter. Inquire prompts (rendered on stderr).
#[derive(Debug, Default)]
pub struct TuiInputPort;

impl TuiInputPort {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn prompt_token(&self) -> Result<String, DomainError> {
        Text::new("Telegram Token (bot1xxx):")
            .with_help_message("the leading `bot` prefix is optional")
            .prompt()
            .map_err(|e| DomainError::Input(e.to_string()))
    }

    async fn prompt_chat_id(&self) -> Result<String, DomainError> {
        Text::new("Telegram Chat ID (-100xxx):")
            .with_help_message("numeric id or @username")
            .prompt()
            .map_err(|e| DomainError::Input(e.to_string()))
    }
}
