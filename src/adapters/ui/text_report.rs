//! Text rendering of a finished report: section headers and labeled lines.
//!
//! Diagnostics are placed next to the section of the stage that raised them.

use crate::domain::format::{FieldDisplay, normalize_single_line};
use crate::domain::{
    AdminEntry, BotProfile, ChatProfile, Diagnostic, InviteLinkSet, LinkedChat, PinnedMessage,
    Report, Stage,
};
use chrono::{DateTime, Utc};
use std::io::{self, Write};

/// Render `report` as the human-readable stream.
pub fn render_text<W: Write + ?Sized>(report: &Report, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Analysis of token: {} and chat id: {}",
        report.input.token, report.input.chat_id
    )?;
    writeln!(out)?;

    if let Some(d) = report.diagnostic(Stage::BotIdentity) {
        return attention(out, d);
    }
    let Some(bot) = &report.bot else {
        return Ok(());
    };
    section(out, "BOT")?;
    bot_summary(out, bot)?;
    if let Some(d) = report.diagnostic(Stage::BotMembership) {
        attention(out, d)?;
    }

    if let Some(d) = report.diagnostic(Stage::ChatProfile) {
        if !report.is_echo(d) {
            attention(out, d)?;
        }
    }
    let Some(chat) = &report.chat else {
        return Ok(());
    };
    section(out, "CHAT")?;
    chat_summary(out, chat)?;
    if let Some(linked) = &chat.linked_chat {
        linked_chat_summary(out, linked)?;
    } else if let Some(d) = report.diagnostic(Stage::LinkedChat) {
        attention(out, d)?;
    }
    if let Some(links) = &report.invite_links {
        invite_links(out, links)?;
    }
    field(out, "Number of users in the chat", &chat.member_count)?;

    if !report.admins.is_empty() {
        section(out, "ADMINS")?;
        writeln!(out, "Administrators in the chat:")?;
        for admin in &report.admins {
            admin_details(out, admin)?;
        }
    }
    Ok(())
}

fn section<W: Write + ?Sized>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "[{}]", title)
}

/// `ATTENTION`-prefixed line for a recorded diagnostic.
pub fn attention<W: Write + ?Sized>(out: &mut W, diagnostic: &Diagnostic) -> io::Result<()> {
    writeln!(out, "ATTENTION {}", diagnostic)
}

/// `label: value`, or nothing when the value is absent or blank.
fn field<W, T>(out: &mut W, label: &str, value: &T) -> io::Result<()>
where
    W: Write + ?Sized,
    T: FieldDisplay + ?Sized,
{
    match value.display() {
        Some(shown) => writeln!(out, "{}: {}", label, shown),
        None => Ok(()),
    }
}

fn bot_summary<W: Write + ?Sized>(out: &mut W, bot: &BotProfile) -> io::Result<()> {
    field(out, "Bot First Name", &bot.first_name)?;
    field(out, "Bot Username", &bot.username)?;
    field(out, "Bot User ID", &bot.user_id)?;
    field(
        out,
        "Bot Can Read Group Messages",
        &bot.can_read_all_group_messages,
    )?;
    field(out, "Bot Description", &bot.description)?;
    field(out, "Bot Short Description", &bot.short_description)?;
    field(
        out,
        "Bot Default Administrator Rights (groups)",
        &bot.default_admin_rights_groups,
    )?;
    field(
        out,
        "Bot Default Administrator Rights (channels)",
        &bot.default_admin_rights_channels,
    )?;
    field(out, "Bot In The Chat Is An", &bot.status_in_chat)
}

fn chat_summary<W: Write + ?Sized>(out: &mut W, chat: &ChatProfile) -> io::Result<()> {
    field(out, "Chat Title", &chat.title)?;
    field(out, "Chat Type", &chat.chat_type)?;
    field(out, "Chat ID", &chat.id)?;
    field(out, "Chat Username", &chat.username)?;
    field(out, "Chat Active Usernames", &chat.active_usernames)?;
    field(out, "Chat Description", &chat.description)?;
    field(out, "Chat Bio", &chat.bio)?;
    field(out, "Chat Is Forum", &chat.is_forum)?;
    field(out, "Chat Is Direct Messages", &chat.is_direct_messages)?;
    field(out, "Chat Has Visible History", &chat.has_visible_history)?;
    field(out, "Chat Has Hidden Members", &chat.has_hidden_members)?;
    field(out, "Chat Has Protected Content", &chat.has_protected_content)?;
    field(out, "Join Required To Send", &chat.join_to_send_messages)?;
    field(out, "Join Requires Admin Approval", &chat.join_by_request)?;
    field(out, "Slow Mode Delay (s)", &chat.slow_mode_delay)?;
    field(
        out,
        "Message Auto Delete Time (s)",
        &chat.message_auto_delete_time,
    )?;
    field(out, "Linked Chat ID", &chat.linked_chat_id)?;
    field(out, "Chat Location", &chat.location)?;
    field(out, "Default Chat Permissions", &chat.permissions)?;
    if let Some(pinned) = chat.pinned_message.as_ref().filter(|p| !p.is_empty()) {
        pinned_message(out, pinned)?;
    }
    Ok(())
}

fn pinned_message<W: Write + ?Sized>(out: &mut W, pinned: &PinnedMessage) -> io::Result<()> {
    writeln!(out, "Pinned Message:")?;
    field(out, "  Message ID", &pinned.message_id)?;
    if let Some(date) = pinned.date {
        match utc_timestamp(date) {
            Some(utc) => writeln!(out, "  Date (unix): {} ({})", date, utc)?,
            None => writeln!(out, "  Date (unix): {}", date)?,
        }
    }
    field(out, "  Author Signature", &pinned.author_signature)?;
    field(
        out,
        "  Text",
        &pinned.text.as_deref().map(normalize_single_line),
    )?;
    field(out, "  From", &pinned.from)?;
    field(out, "  Sender Chat", &pinned.sender_chat)
}

fn utc_timestamp(unix: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(unix, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

fn linked_chat_summary<W: Write + ?Sized>(out: &mut W, chat: &LinkedChat) -> io::Result<()> {
    writeln!(out, "Linked Chat Details:")?;
    field(out, "  Title", &chat.title)?;
    field(out, "  Type", &chat.chat_type)?;
    field(out, "  ID", &chat.id)?;
    field(out, "  Username", &chat.username)?;
    field(out, "  Active Usernames", &chat.active_usernames)?;
    field(out, "  Description", &chat.description)?;
    field(out, "  Invite Link", &chat.invite_link)
}

fn invite_links<W: Write + ?Sized>(out: &mut W, links: &InviteLinkSet) -> io::Result<()> {
    if links.is_empty() {
        return writeln!(out, "Invite Links: None");
    }
    writeln!(out, "Invite Links:")?;
    field(out, "  Chat Invite Link", &links.chat_invite_link)?;
    field(out, "  Chat Invite Link (exported)", &links.exported)?;
    field(out, "  Chat Invite Link (created)", &links.created)
}

fn admin_details<W: Write + ?Sized>(out: &mut W, admin: &AdminEntry) -> io::Result<()> {
    writeln!(out, "- #{}", admin.index)?;
    field(out, "  First Name", &admin.first_name)?;
    field(out, "  Last Name", &admin.last_name)?;
    field(out, "  User ID", &admin.user_id)?;
    field(out, "  Username", &admin.username)?;
    field(out, "  Is Bot", &admin.is_bot)?;
    field(out, "  Status", &admin.status)?;
    field(out, "  Custom Title", &admin.custom_title)?;
    field(out, "  Permissions", &admin.permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Permissions, ReportInput};
    use serde_json::{Value, json};

    fn render(report: &Report) -> String {
        let mut buf = Vec::new();
        render_text(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn base_report() -> Report {
        Report::new(ReportInput {
            token: "123:ABC".into(),
            chat_id: "-1001".into(),
        })
    }

    fn bot() -> BotProfile {
        BotProfile {
            first_name: Some("Shop".into()),
            username: Some("shop_bot".into()),
            user_id: Some(123),
            can_read_all_group_messages: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_token_renders_single_attention() {
        let mut report = base_report();
        report.push_error(Diagnostic::new(Stage::BotIdentity, crate::domain::TOKEN_INVALID));
        let text = render(&report);
        assert_eq!(
            text,
            "\nAnalysis of token: 123:ABC and chat id: -1001\n\nATTENTION Telegram token is invalid or revoked.\n"
        );
    }

    #[test]
    fn test_bot_section_lines() {
        let mut report = base_report();
        let mut profile = bot();
        profile.description = Some("Sells things".into());
        profile.status_in_chat = Some("administrator".into());
        report.bot = Some(profile);
        let text = render(&report);
        assert!(text.contains("\n[BOT]\nBot First Name: Shop\nBot Username: shop_bot\nBot User ID: 123\n"));
        assert!(text.contains("Bot Can Read Group Messages: false\n"));
        assert!(text.contains("Bot Description: Sells things\n"));
        assert!(text.contains("Bot In The Chat Is An: administrator\n"));
        assert!(!text.contains("Short Description"));
        assert!(!text.contains("[CHAT]"));
    }

    #[test]
    fn test_duplicate_chat_error_printed_once() {
        let mut report = base_report();
        report.bot = Some(bot());
        report.push_error(Diagnostic::new(Stage::BotMembership, "Bad Request: chat not found"));
        report.push_error(Diagnostic::new(Stage::ChatProfile, "Bad Request: chat not found"));
        let text = render(&report);
        assert_eq!(text.matches("ATTENTION Bad Request: chat not found").count(), 1);
    }

    #[test]
    fn test_distinct_chat_error_printed() {
        let mut report = base_report();
        report.bot = Some(bot());
        report.push_error(Diagnostic::new(Stage::BotMembership, "Forbidden: bot is not a member"));
        report.push_error(Diagnostic::new(Stage::ChatProfile, "Bad Request: chat not found"));
        let text = render(&report);
        assert!(text.contains("ATTENTION Forbidden: bot is not a member\n"));
        assert!(text.contains("ATTENTION Bad Request: chat not found\n"));
    }

    #[test]
    fn test_chat_section_full() {
        let mut report = base_report();
        report.bot = Some(bot());
        let mut permissions = Permissions::new();
        permissions.insert("can_manage_chat".into(), Value::Bool(true));
        report.chat = Some(ChatProfile {
            id: Some(-1001),
            chat_type: Some("supergroup".into()),
            title: Some("Shop chat".into()),
            active_usernames: Some(vec!["shopchat".into()]),
            has_protected_content: Some(true),
            slow_mode_delay: Some(30),
            location: Some(json!({})),
            pinned_message: Some(PinnedMessage {
                message_id: Some(7),
                date: Some(0),
                text: Some("hello\nworld".into()),
                from: Some(json!({"id": 5, "first_name": "Ann"})),
                ..Default::default()
            }),
            member_count: Some(42),
            ..Default::default()
        });
        report.invite_links = Some(InviteLinkSet::default());
        report.admins.push(AdminEntry {
            index: 1,
            first_name: Some("Ann".into()),
            status: Some("creator".into()),
            permissions,
            ..Default::default()
        });
        let text = render(&report);
        assert!(text.contains("\n[CHAT]\nChat Title: Shop chat\nChat Type: supergroup\nChat ID: -1001\n"));
        assert!(text.contains("Chat Active Usernames: [\"shopchat\"]\n"));
        assert!(text.contains("Chat Has Protected Content: true\n"));
        assert!(text.contains("Slow Mode Delay (s): 30\n"));
        assert!(!text.contains("Chat Location"));
        assert!(text.contains("Pinned Message:\n  Message ID: 7\n  Date (unix): 0 (1970-01-01 00:00:00 UTC)\n  Text: hello world\n  From: {\"id\":5,\"first_name\":\"Ann\"}\n"));
        assert!(text.contains("Invite Links: None\n"));
        assert!(text.contains("Number of users in the chat: 42\n"));
        assert!(text.contains("\n[ADMINS]\nAdministrators in the chat:\n- #1\n  First Name: Ann\n  Status: creator\n  Permissions: {\"can_manage_chat\":true}\n"));
    }

    #[test]
    fn test_linked_chat_error_and_links() {
        let mut report = base_report();
        report.bot = Some(bot());
        report.chat = Some(ChatProfile {
            title: Some("Channel".into()),
            linked_chat_id: Some(-1002),
            ..Default::default()
        });
        report.push_error(Diagnostic::new(Stage::LinkedChat, "Bad Request: chat not found"));
        report.invite_links = Some(InviteLinkSet {
            exported: Some("https://t.me/+exp".into()),
            created: Some("https://t.me/+new".into()),
            ..Default::default()
        });
        let text = render(&report);
        assert!(text.contains("Linked Chat ID: -1002\nATTENTION linked_chat_id getChat error: Bad Request: chat not found\n"));
        assert!(text.contains("Invite Links:\n  Chat Invite Link (exported): https://t.me/+exp\n  Chat Invite Link (created): https://t.me/+new\n"));
        assert!(!text.contains("Number of users"));
        assert!(!text.contains("[ADMINS]"));
    }
}
