//! Wire shapes -> report sub-documents.

use crate::domain::format::normalized_text;
use crate::domain::wire::{WireChat, WireChatMember, WireMessage, WireUser};
use crate::domain::{AdminEntry, BotProfile, ChatProfile, LinkedChat, Permissions, PinnedMessage};
use serde_json::{Map, Value};

/// Boolean fields kept in an admin's rights map besides the `can_*` flags.
const EXTRA_PERMISSION_FIELDS: [&str; 2] = ["is_anonymous", "can_manage_direct_messages"];

pub fn bot_profile(me: &WireUser) -> BotProfile {
    BotProfile {
        first_name: me.first_name.clone(),
        username: me.username.clone(),
        user_id: me.id,
        can_read_all_group_messages: me.can_read_all_group_messages,
        ..Default::default()
    }
}

pub fn chat_profile(chat: WireChat) -> ChatProfile {
    ChatProfile {
        id: chat.id,
        chat_type: chat.chat_type,
        title: chat.title,
        username: chat.username,
        first_name: chat.first_name,
        last_name: chat.last_name,
        active_usernames: chat.active_usernames,
        description: normalized_text(chat.description.as_deref()),
        bio: normalized_text(chat.bio.as_deref()),
        invite_link: chat.invite_link,
        is_forum: chat.is_forum,
        is_direct_messages: chat.is_direct_messages,
        has_visible_history: chat.has_visible_history,
        has_hidden_members: chat.has_hidden_members,
        has_protected_content: chat.has_protected_content,
        join_to_send_messages: chat.join_to_send_messages,
        join_by_request: chat.join_by_request,
        slow_mode_delay: chat.slow_mode_delay,
        message_auto_delete_time: chat.message_auto_delete_time,
        linked_chat_id: chat.linked_chat_id.filter(|id| *id != 0),
        location: chat.location.filter(|v| !v.is_null()),
        permissions: chat.permissions,
        pinned_message: chat.pinned_message.map(pinned_message),
        extra: chat.extra,
        linked_chat: None,
        member_count: None,
    }
}

/// Keys `LinkedChat` carries as typed fields; everything else goes to `extra`.
const LINKED_CHAT_FIELDS: [&str; 7] = [
    "id",
    "type",
    "title",
    "username",
    "active_usernames",
    "description",
    "invite_link",
];

/// Typed identity fields plus the rest of the provider object as `extra`.
pub fn linked_chat(chat: WireChat) -> LinkedChat {
    let profile = chat_profile(chat);
    let mut extra = match serde_json::to_value(&profile) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    for key in LINKED_CHAT_FIELDS.iter().chain(&["member_count"]) {
        extra.remove(*key);
    }
    LinkedChat {
        id: profile.id,
        chat_type: profile.chat_type,
        title: profile.title,
        username: profile.username,
        active_usernames: profile.active_usernames,
        description: profile.description,
        invite_link: profile.invite_link,
        extra,
    }
}

fn pinned_message(message: WireMessage) -> PinnedMessage {
    PinnedMessage {
        message_id: message.message_id,
        date: message.date,
        author_signature: message.author_signature,
        text: message.text,
        from: message.from.filter(|v| !v.is_null()),
        sender_chat: message.sender_chat.filter(|v| !v.is_null()),
        extra: message.extra,
    }
}

/// Every boolean `can_*` field in provider order, then the extra named flags.
pub fn admin_permissions(member: &WireChatMember) -> Permissions {
    let mut permissions: Permissions = member
        .fields
        .iter()
        .filter(|(key, value)| key.starts_with("can_") && value.is_boolean())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    for key in EXTRA_PERMISSION_FIELDS {
        if let Some(value) = member.fields.get(key).filter(|v| v.is_boolean()) {
            permissions.insert(key.to_string(), value.clone());
        }
    }
    permissions
}

pub fn admin_entry(index: usize, member: &WireChatMember) -> AdminEntry {
    let user = member.user.clone().unwrap_or_default();
    AdminEntry {
        index,
        first_name: user.first_name,
        last_name: user.last_name,
        user_id: user.id,
        username: user.username,
        is_bot: user.is_bot,
        status: member.status.clone(),
        custom_title: member.custom_title.clone(),
        permissions: admin_permissions(member),
    }
}

/// One entry per listed member, indexed from 1 in provider order.
pub fn admin_entries(members: &[WireChatMember]) -> Vec<AdminEntry> {
    members
        .iter()
        .enumerate()
        .map(|(i, member)| admin_entry(i + 1, member))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member(value: Value) -> WireChatMember {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_admin_permissions_collects_flags() {
        let m = member(json!({
            "user": {"id": 9, "is_bot": true, "first_name": "Helper", "username": "helper_bot"},
            "status": "administrator",
            "can_be_edited": false,
            "can_manage_chat": true,
            "can_post_messages": "yes",
            "is_anonymous": true,
            "until_date": 0,
            "custom_title": "ops"
        }));
        let perms = admin_permissions(&m);
        assert_eq!(
            Value::Object(perms),
            json!({"can_be_edited": false, "can_manage_chat": true, "is_anonymous": true})
        );
    }

    #[test]
    fn test_admin_permissions_empty_for_creator_without_flags() {
        let m = member(json!({"user": {"id": 1}, "status": "creator", "is_anonymous": "no"}));
        assert!(admin_permissions(&m).is_empty());
    }

    #[test]
    fn test_admin_entries_indexed_in_order() {
        let members = vec![
            member(json!({"user": {"id": 30}, "status": "creator"})),
            member(json!({"user": {"id": 10}, "status": "administrator"})),
            member(json!({"status": "administrator"})),
        ];
        let entries = admin_entries(&members);
        let ids: Vec<(usize, Option<i64>)> = entries.iter().map(|e| (e.index, e.user_id)).collect();
        assert_eq!(ids, [(1, Some(30)), (2, Some(10)), (3, None)]);
    }

    #[test]
    fn test_chat_profile_normalizes_description() {
        let chat: WireChat = serde_json::from_value(json!({
            "id": -100,
            "type": "channel",
            "title": "News",
            "description": "Daily\n\nnews\tand   more ",
            "linked_chat_id": -200,
            "pinned_message": {"message_id": 3, "date": 1700000000, "text": "pinned"}
        }))
        .unwrap();
        let profile = chat_profile(chat);
        assert_eq!(profile.description.as_deref(), Some("Daily news and more"));
        assert_eq!(profile.linked_chat_id, Some(-200));
        assert_eq!(profile.pinned_message.unwrap().message_id, Some(3));
        assert!(profile.member_count.is_none());
    }

    #[test]
    fn test_blank_description_is_absent() {
        let chat: WireChat = serde_json::from_value(json!({"id": 1, "description": " \n "})).unwrap();
        assert!(chat_profile(chat).description.is_none());
    }

    #[test]
    fn test_unmodelled_chat_keys_pass_through() {
        let chat: WireChat = serde_json::from_value(json!({
            "id": -1001,
            "type": "supergroup",
            "title": "T",
            "has_aggressive_anti_spam_enabled": true,
            "has_restricted_voice_and_video_messages": true,
            "photo": {"small_file_id": "s", "big_file_id": "b"},
            "pinned_message": {
                "message_id": 3,
                "chat": {"id": -1001, "type": "supergroup"},
                "entities": [{"type": "url", "offset": 0, "length": 5}]
            }
        }))
        .unwrap();
        let v = serde_json::to_value(chat_profile(chat)).unwrap();
        assert_eq!(
            v,
            json!({
                "id": -1001,
                "type": "supergroup",
                "title": "T",
                "pinned_message": {
                    "message_id": 3,
                    "chat": {"id": -1001, "type": "supergroup"},
                    "entities": [{"type": "url", "offset": 0, "length": 5}]
                },
                "has_aggressive_anti_spam_enabled": true,
                "has_restricted_voice_and_video_messages": true,
                "photo": {"small_file_id": "s", "big_file_id": "b"},
                "member_count": null
            })
        );
    }

    #[test]
    fn test_linked_chat_keeps_whole_provider_object() {
        let chat: WireChat = serde_json::from_value(json!({
            "id": -1002,
            "type": "supergroup",
            "title": "Discussion",
            "description": "talk\nhere",
            "is_forum": true,
            "has_private_forwards": true
        }))
        .unwrap();
        let linked = linked_chat(chat);
        assert_eq!(linked.description.as_deref(), Some("talk here"));
        assert_eq!(
            Value::Object(linked.extra.clone()),
            json!({"is_forum": true, "has_private_forwards": true})
        );
        let v = serde_json::to_value(&linked).unwrap();
        assert_eq!(v["id"], -1002);
        assert_eq!(v["has_private_forwards"], true);
        assert!(v.get("member_count").is_none());
    }
}
