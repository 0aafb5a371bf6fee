//! Core domain layer. No external I/O dependencies.
//!
//! Report model, diagnostics, field formatting and Bot API wire shapes.

pub mod entities;
pub mod errors;
pub mod format;
pub mod wire;

pub use entities::{
    AdminEntry, BotProfile, ChatProfile, InviteLinkSet, LinkedChat, Permissions, PinnedMessage,
    Report, ReportInput,
};
pub use errors::{CHAT_UNAVAILABLE, Diagnostic, DomainError, Stage, TOKEN_INVALID};
pub use wire::ApiResponse;
