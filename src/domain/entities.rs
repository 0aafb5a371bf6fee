//! Report entities. The flat reporting model built from Bot API responses.
//!
//! Field order here is the order of the JSON report.

use crate::domain::errors::{Diagnostic, Stage};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Rights map in provider order (`can_*` flags plus `is_anonymous`).
pub type Permissions = Map<String, Value>;

/// Root aggregate of one recon run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub input: ReportInput,
    #[serde(serialize_with = "empty_object_if_none")]
    pub bot: Option<BotProfile>,
    #[serde(serialize_with = "empty_object_if_none")]
    pub chat: Option<ChatProfile>,
    #[serde(serialize_with = "empty_object_if_none")]
    pub invite_links: Option<InviteLinkSet>,
    pub admins: Vec<AdminEntry>,
    errors: Vec<Diagnostic>,
}

/// Echo of what the run was started with. Not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportInput {
    pub token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BotProfile {
    pub first_name: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<i64>,
    pub can_read_all_group_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_admin_rights_groups: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_admin_rights_channels: Option<Map<String, Value>>,
    /// Absent when the membership lookup failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_in_chat: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_usernames: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_forum: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_direct_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_visible_history: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_hidden_members: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_protected_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_to_send_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_by_request: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow_mode_delay: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_auto_delete_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<PinnedMessage>,
    /// Unmodelled provider keys (photo, reactions, newer flags), in provider order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_chat: Option<LinkedChat>,
    /// Whatever `getChatMemberCount` returned; null on failure.
    pub member_count: Option<i64>,
}

/// Reduced profile of the discussion group / channel behind `linked_chat_id`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkedChat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_usernames: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PinnedMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_chat: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PinnedMessage {
    pub fn is_empty(&self) -> bool {
        self.message_id.is_none()
            && self.date.is_none()
            && self.author_signature.is_none()
            && self.text.is_none()
            && self.from.is_none()
            && self.sender_chat.is_none()
            && self.extra.is_empty()
    }
}

/// Links from the three independent sources. Any mix may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InviteLinkSet {
    pub chat_invite_link: Option<String>,
    pub exported: Option<String>,
    pub created: Option<String>,
}

impl InviteLinkSet {
    pub fn is_empty(&self) -> bool {
        self.chat_invite_link.is_none() && self.exported.is_none() && self.created.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminEntry {
    /// 1-based position in the provider's listing.
    pub index: usize,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub is_bot: Option<bool>,
    pub status: Option<String>,
    pub custom_title: Option<String>,
    pub permissions: Permissions,
}

impl Report {
    pub fn new(input: ReportInput) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    /// Append a diagnostic. Entries are never removed.
    pub fn push_error(&mut self, diagnostic: Diagnostic) {
        self.errors.push(diagnostic);
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    /// Rendered error strings, exactly as they appear in the JSON report.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// First diagnostic raised in `stage`.
    pub fn diagnostic(&self, stage: Stage) -> Option<&Diagnostic> {
        self.errors.iter().find(|d| d.stage == stage)
    }

    /// True when `diagnostic` repeats an earlier recorded one.
    pub fn is_echo(&self, diagnostic: &Diagnostic) -> bool {
        self.errors
            .iter()
            .take_while(|d| !std::ptr::eq(*d, diagnostic))
            .any(|earlier| diagnostic.echoes(earlier))
    }

    /// JSON rendering: stable field order, 2-space indentation, non-ASCII kept.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn empty_object_if_none<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => Map::new().serialize(serializer),
    }
}
