//! Command-line surface. Every flag is optional; gaps are filled from config or prompts.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "tosint")]
#[command(about = "Inspect what a Telegram bot token can see about a chat", long_about = None)]
#[command(version)]
pub struct CliArgs {
    /// Bot token (the leading `bot` prefix is optional)
    #[arg(short = 't', long)]
    pub token: Option<String>,

    /// Target chat id or @username
    #[arg(short = 'c', long = "chat_id", alias = "chat-id", allow_hyphen_values = true)]
    pub chat_id: Option<String>,

    /// Print the JSON report to stdout instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Also save the JSON report to this file
    #[arg(long, value_name = "PATH")]
    pub json_file: Option<PathBuf>,

    /// Bot API base URL
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,
}

/// Trim and drop a leading `bot` marker, as pasted from Bot API URLs.
pub fn normalize_token(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix("bot").unwrap_or(trimmed).to_string()
}

pub fn normalize_chat_id(raw: &str) -> String {
    raw.trim().to_string()
}

/// First non-blank value after normalization: flag, then configuration.
pub fn resolve(
    flag: Option<String>,
    configured: Option<String>,
    normalize: fn(&str) -> String,
) -> Option<String> {
    [flag, configured]
        .into_iter()
        .flatten()
        .map(|v| normalize(&v))
        .find(|v| !v.is_empty())
}
