//! Domain errors and run diagnostics.
//!
//! `DomainError` is what ports and adapters return. `Diagnostic` is what the
//! recon run records into the report: it never aborts the process.

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Fixed text recorded when `getMe` yields no usable bot.
pub const TOKEN_INVALID: &str = "Telegram token is invalid or revoked.";

/// Fallback text when `getChat` fails without a provider description.
pub const CHAT_UNAVAILABLE: &str = "Chat ID is invalid, inaccessible, or no longer available.";

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Bot API transport error: {0}")]
    Transport(String),

    #[error("Bot API decode error: {0}")]
    Decode(String),

    #[error("Report encode error: {0}")]
    Encode(String),

    #[error("Report persistence error: {0}")]
    Persistence(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Collection step a diagnostic was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BotIdentity,
    BotMembership,
    ChatProfile,
    LinkedChat,
}

/// One recorded failure. Serialized into `errors` as its display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub description: String,
    /// Present when the provider reported that the group became a supergroup.
    pub migrate_to_chat_id: Option<i64>,
}

impl Diagnostic {
    pub fn new(stage: Stage, description: impl Into<String>) -> Self {
        Self {
            stage,
            description: description.into(),
            migrate_to_chat_id: None,
        }
    }

    pub fn with_migration(mut self, chat_id: Option<i64>) -> Self {
        self.migrate_to_chat_id = chat_id;
        self
    }

    /// True when `self` repeats what `earlier` already told the reader.
    ///
    /// Only a chat-profile failure following a membership failure on the same
    /// target is a repeat; identical text from unrelated stages is not.
    pub fn echoes(&self, earlier: &Diagnostic) -> bool {
        self.stage == Stage::ChatProfile
            && earlier.stage == Stage::BotMembership
            && self.description == earlier.description
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.stage, self.migrate_to_chat_id) {
            (Stage::LinkedChat, _) => {
                write!(f, "linked_chat_id getChat error: {}", self.description)
            }
            (_, Some(id)) => write!(f, "{} - Migrated to: {}", self.description, id),
            (_, None) => f.write_str(&self.description),
        }
    }
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
