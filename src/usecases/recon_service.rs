//! Recon run: ordered Bot API calls -> one Report.
//!
//! - `getMe` and the target `getChat` are the only fatal steps
//! - Membership status and linked chat failures are recorded and the run continues
//! - Every other enrichment is best-effort: failures only leave fields absent
//! - Calls are strictly sequential; nothing here retries or caches

use crate::domain::wire::{
    WireBotDescription, WireBotShortDescription, WireChat, WireChatMember, WireInviteLink,
    WireUser, method,
};
use crate::domain::{
    ApiResponse, BotProfile, CHAT_UNAVAILABLE, ChatProfile, Diagnostic, InviteLinkSet, Report,
    ReportInput, Stage, TOKEN_INVALID,
};
use crate::domain::format::normalized_text;
use crate::ports::{BotApiPort, ProgressPort};
use crate::usecases::normalize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Report builder. Drives the call sequence and accumulates diagnostics.
pub struct ReconService {
    api: Arc<dyn BotApiPort>,
    progress: Arc<dyn ProgressPort>,
}

impl ReconService {
    pub fn new(api: Arc<dyn BotApiPort>, progress: Arc<dyn ProgressPort>) -> Self {
        Self { api, progress }
    }

    /// Run the whole collection for `chat_id`. Never fails: problems end up in `errors`.
    pub async fn run(&self, input: ReportInput) -> Report {
        let chat_id = input.chat_id.clone();
        let mut report = Report::new(input);
        self.collect(&mut report, &chat_id).await;
        self.progress.on_finish();
        info!(
            errors = report.errors().len(),
            admins = report.admins.len(),
            chat = report.chat.is_some(),
            "recon run complete"
        );
        report
    }

    async fn collect(&self, report: &mut Report, chat_id: &str) {
        // 1. Bot identity (fatal)
        let Some((me, bot_id)) = self.fetch_identity().await else {
            record(report, Diagnostic::new(Stage::BotIdentity, TOKEN_INVALID));
            return;
        };
        let mut bot = normalize::bot_profile(&me);

        // 2-3. Cosmetic enrichments
        self.enrich_bot(&mut bot).await;

        // 4. Own membership (recoverable)
        let membership = self
            .call(
                method::GET_CHAT_MEMBER,
                &[("chat_id", chat_id.to_string()), ("user_id", bot_id.to_string())],
            )
            .await;
        if membership.usable_result().is_some() {
            bot.status_in_chat = membership
                .decode::<WireChatMember>()
                .and_then(|m| m.status);
        } else if let Some(description) = membership.error_description() {
            record(
                report,
                Diagnostic::new(Stage::BotMembership, description)
                    .with_migration(membership.migrate_to_chat_id()),
            );
        }
        report.bot = Some(bot);

        // 5. Target chat profile (fatal)
        let response = self
            .call(method::GET_CHAT, &[("chat_id", chat_id.to_string())])
            .await;
        let Some(wire_chat) = response.decode::<WireChat>() else {
            let description = response.error_description().unwrap_or(CHAT_UNAVAILABLE);
            record(report, Diagnostic::new(Stage::ChatProfile, description));
            return;
        };
        let advertised_link = wire_chat.invite_link.clone();
        let mut chat = normalize::chat_profile(wire_chat);
        if let Some(linked_id) = chat.linked_chat_id {
            self.attach_linked_chat(report, &mut chat, linked_id).await;
        }

        // 6. Invite links (best-effort)
        report.invite_links = Some(self.fetch_invite_links(chat_id, advertised_link).await);

        // 7. Member count (whatever comes back)
        let count = self
            .call(method::GET_CHAT_MEMBER_COUNT, &[("chat_id", chat_id.to_string())])
            .await;
        chat.member_count = count.result.as_ref().and_then(Value::as_i64);
        report.chat = Some(chat);

        // 8. Administrators (best-effort)
        let listing = self
            .call(method::GET_CHAT_ADMINISTRATORS, &[("chat_id", chat_id.to_string())])
            .await;
        match listing.decode::<Vec<WireChatMember>>() {
            Some(members) => report.admins = normalize::admin_entries(&members),
            None => match listing.error_description() {
                Some(description) => {
                    info!(description, "administrator listing unavailable")
                }
                None => debug!("no administrators visible to the bot"),
            },
        }
    }

    async fn fetch_identity(&self) -> Option<(WireUser, i64)> {
        let me = self.call(method::GET_ME, &[]).await.decode::<WireUser>()?;
        let id = me.id?;
        Some((me, id))
    }

    async fn enrich_bot(&self, bot: &mut BotProfile) {
        bot.description = self
            .call(method::GET_MY_DESCRIPTION, &[])
            .await
            .decode::<WireBotDescription>()
            .and_then(|d| normalized_text(d.description.as_deref()));

        bot.short_description = self
            .call(method::GET_MY_SHORT_DESCRIPTION, &[])
            .await
            .decode::<WireBotShortDescription>()
            .and_then(|d| normalized_text(d.short_description.as_deref()));

        bot.default_admin_rights_groups = self
            .call(method::GET_MY_DEFAULT_ADMINISTRATOR_RIGHTS, &[])
            .await
            .decode::<Map<String, Value>>();

        bot.default_admin_rights_channels = self
            .call(
                method::GET_MY_DEFAULT_ADMINISTRATOR_RIGHTS,
                &[("for_channels", "true".to_string())],
            )
            .await
            .decode::<Map<String, Value>>();
    }

    async fn attach_linked_chat(&self, report: &mut Report, chat: &mut ChatProfile, linked_id: i64) {
        let response = self
            .call(method::GET_CHAT, &[("chat_id", linked_id.to_string())])
            .await;
        match response.decode::<WireChat>() {
            Some(linked) => chat.linked_chat = Some(normalize::linked_chat(linked)),
            None => {
                let description = response.error_description().unwrap_or(CHAT_UNAVAILABLE);
                record(report, Diagnostic::new(Stage::LinkedChat, description));
            }
        }
    }

    async fn fetch_invite_links(&self, chat_id: &str, advertised: Option<String>) -> InviteLinkSet {
        let exported = self
            .call(method::EXPORT_CHAT_INVITE_LINK, &[("chat_id", chat_id.to_string())])
            .await
            .decode::<String>();
        let created = self
            .call(method::CREATE_CHAT_INVITE_LINK, &[("chat_id", chat_id.to_string())])
            .await
            .decode::<WireInviteLink>()
            .and_then(|link| link.invite_link);
        InviteLinkSet {
            chat_invite_link: advertised.filter(|l| !l.is_empty()),
            exported: exported.filter(|l| !l.is_empty()),
            created: created.filter(|l| !l.is_empty()),
        }
    }

    /// One Bot API call. Transport failures become failed envelopes.
    async fn call(&self, method: &str, params: &[(&str, String)]) -> ApiResponse {
        self.progress.on_call(method);
        match self.api.call(method, params).await {
            Ok(response) => {
                debug!(
                    method,
                    ok = response.ok,
                    description = response.description.as_deref().unwrap_or(""),
                    "bot api call"
                );
                response
            }
            Err(e) => {
                warn!(method, error = %e, "bot api call failed");
                ApiResponse::failure(e.to_string())
            }
        }
    }
}

fn record(report: &mut Report, diagnostic: Diagnostic) {
    warn!(stage = ?diagnostic.stage, error = %diagnostic, "recon step failed");
    report.push_error(diagnostic);
}
