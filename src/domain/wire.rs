//! Bot API wire shapes. What the provider sends, before normalization.
//!
//! Every field is optional: the report only relies on presence and type checks.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bot API method names used by the recon run.
pub mod method {
    pub const GET_ME: &str = "getMe";
    pub const GET_MY_DESCRIPTION: &str = "getMyDescription";
    pub const GET_MY_SHORT_DESCRIPTION: &str = "getMyShortDescription";
    pub const GET_MY_DEFAULT_ADMINISTRATOR_RIGHTS: &str = "getMyDefaultAdministratorRights";
    pub const GET_CHAT_MEMBER: &str = "getChatMember";
    pub const GET_CHAT: &str = "getChat";
    pub const EXPORT_CHAT_INVITE_LINK: &str = "exportChatInviteLink";
    pub const CREATE_CHAT_INVITE_LINK: &str = "createChatInviteLink";
    pub const GET_CHAT_MEMBER_COUNT: &str = "getChatMemberCount";
    pub const GET_CHAT_ADMINISTRATORS: &str = "getChatAdministrators";
}

/// Response envelope: `{ok, result?, description?, parameters?}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Option<ResponseParameters>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseParameters {
    #[serde(default)]
    pub migrate_to_chat_id: Option<i64>,
    #[serde(default)]
    pub retry_after: Option<i64>,
}

impl ApiResponse {
    /// Failed envelope carrying only a description (used for transport errors).
    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            description: Some(description.into()),
            parameters: None,
        }
    }

    /// Result value if it is usable (truthy).
    pub fn usable_result(&self) -> Option<&Value> {
        self.result.as_ref().filter(|v| is_truthy(v))
    }

    /// Decode a usable result into `T`. Type mismatches count as no result.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        self.usable_result()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Provider description, when non-empty.
    pub fn error_description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    pub fn migrate_to_chat_id(&self) -> Option<i64> {
        self.parameters.as_ref().and_then(|p| p.migrate_to_chat_id)
    }
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` are not usable values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// `User` as returned by `getMe` and inside chat members.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireUser {
    pub id: Option<i64>,
    pub is_bot: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub can_read_all_group_messages: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireBotDescription {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireBotShortDescription {
    pub short_description: Option<String>,
}

/// `ChatMember` in any status. Rights flags stay in `fields`, in provider order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireChatMember {
    pub status: Option<String>,
    pub user: Option<WireUser>,
    pub custom_title: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// `ChatFullInfo` as returned by `getChat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireChat {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub chat_type: Option<String>,
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub active_usernames: Option<Vec<String>>,
    pub description: Option<String>,
    pub bio: Option<String>,
    pub invite_link: Option<String>,
    pub is_forum: Option<bool>,
    pub is_direct_messages: Option<bool>,
    pub has_visible_history: Option<bool>,
    pub has_hidden_members: Option<bool>,
    pub has_protected_content: Option<bool>,
    pub join_to_send_messages: Option<bool>,
    pub join_by_request: Option<bool>,
    pub slow_mode_delay: Option<i64>,
    pub message_auto_delete_time: Option<i64>,
    pub linked_chat_id: Option<i64>,
    pub location: Option<Value>,
    pub permissions: Option<Map<String, Value>>,
    pub pinned_message: Option<WireMessage>,
    /// Every other `ChatFullInfo` key, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMessage {
    pub message_id: Option<i64>,
    pub date: Option<i64>,
    pub author_signature: Option<String>,
    pub text: Option<String>,
    pub from: Option<Value>,
    pub sender_chat: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `ChatInviteLink` as returned by `createChatInviteLink`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireInviteLink {
    pub invite_link: Option<String>,
}
