// Paw Response Engine — Platform Adapters
//
// Builds the engine's `Event` and addressing flags from a Discord gateway
// `MESSAGE_CREATE` payload. Only the fields the engine reads are decoded;
// everything is optional so partial or unexpected payloads still produce a
// usable event (missing mention data stays `None`, never an error).

use crate::atoms::types::{count_from_value, Context, Event};
use serde_json::Value;

// ── Discord Payload Fields ─────────────────────────────────────────────
//
// Each field is read on its own so one malformed value only loses that
// field. A guild message with a bad nested id must still be a guild message.

fn message_content(payload: &Value) -> String {
    payload
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Snowflakes are strings on the wire; some bridges forward them as numbers.
fn snowflake(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_guild_message(payload: &Value) -> bool {
    payload.get("guild_id").is_some_and(|g| !g.is_null())
}

fn referenced_author_id(payload: &Value) -> Option<String> {
    payload
        .get("referenced_message")?
        .get("author")?
        .get("id")
        .and_then(snowflake)
}

/// How a Discord message addresses the bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Addressing {
    pub is_direct_message: bool,
    pub mentioned_engine: bool,
    pub replied_to_engine: bool,
}

impl Addressing {
    /// Copy the flags onto a caller-assembled context.
    pub fn apply_to(self, context: &mut Context) {
        context.is_direct_message = self.is_direct_message;
        context.mentioned_engine = self.mentioned_engine;
        context.replied_to_engine = self.replied_to_engine;
    }
}

// ── Conversion ─────────────────────────────────────────────────────────

fn mentioned_user_ids(payload: &Value) -> Option<Vec<String>> {
    payload.get("mentions")?.as_array().map(|users| {
        users
            .iter()
            .filter_map(|u| u.get("id").and_then(snowflake))
            .collect()
    })
}

/// Build an `Event` from a `MESSAGE_CREATE` payload. The bot's own mention
/// is stripped from the content and not counted against the mention limit.
pub fn event_from_discord_message(payload: &Value, bot_user_id: &str) -> Event {
    let mut content = message_content(payload);
    let mut user_count = payload.get("mentions").and_then(count_from_value);
    if let Some(ids) = mentioned_user_ids(payload) {
        if !bot_user_id.is_empty() && ids.iter().any(|id| id == bot_user_id) {
            user_count = user_count.map(|n| n.saturating_sub(1));
            content = content
                .replace(&format!("<@{}>", bot_user_id), "")
                .replace(&format!("<@!{}>", bot_user_id), "")
                .trim()
                .to_string();
        }
    }

    Event {
        content,
        attachment_count: payload.get("attachments").and_then(count_from_value).unwrap_or(0),
        mentioned_user_count: user_count,
        mentioned_role_count: payload.get("mention_roles").and_then(count_from_value),
        mentioned_channel_count: payload.get("mention_channels").and_then(count_from_value),
        mentions_everyone: payload.get("mention_everyone").and_then(Value::as_bool),
    }
}

/// Derive DM / mention / reply flags. Guild-less messages are DMs.
pub fn discord_addressing(payload: &Value, bot_user_id: &str) -> Addressing {
    let is_bot = |id: &str| !bot_user_id.is_empty() && id == bot_user_id;

    Addressing {
        is_direct_message: !is_guild_message(payload),
        mentioned_engine: mentioned_user_ids(payload).is_some_and(|ids| ids.iter().any(|id| is_bot(id))),
        replied_to_engine: referenced_author_id(payload).is_some_and(|id| is_bot(&id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BOT: &str = "1000";

    fn guild_message() -> Value {
        json!({
            "id": "1",
            "channel_id": "42",
            "guild_id": "7",
            "author": {"id": "55", "username": "bob"},
            "content": "<@1000> can you look at this?",
            "mentions": [{"id": "1000"}, {"id": "56"}],
            "mention_roles": ["900"],
            "mention_everyone": false,
            "attachments": [{"id": "a"}],
        })
    }

    #[test]
    fn guild_mention_builds_event() {
        let ev = event_from_discord_message(&guild_message(), BOT);
        assert_eq!(ev.content, "can you look at this?");
        assert_eq!(ev.mentioned_user_count, Some(1));
        assert_eq!(ev.mentioned_role_count, Some(1));
        assert_eq!(ev.mentioned_channel_count, None);
        assert_eq!(ev.attachment_count, 1);
        assert_eq!(ev.mentions_everyone, Some(false));
        assert_eq!(ev.total_mentions(), Some(2));
    }

    #[test]
    fn guild_mention_addressing() {
        let a = discord_addressing(&guild_message(), BOT);
        assert!(!a.is_direct_message);
        assert!(a.mentioned_engine);
        assert!(!a.replied_to_engine);
    }

    #[test]
    fn dm_reply_addressing() {
        let payload = json!({
            "content": "sure",
            "referenced_message": {"author": {"id": "1000"}},
        });
        let a = discord_addressing(&payload, BOT);
        assert!(a.is_direct_message);
        assert!(a.replied_to_engine);
        assert!(!a.mentioned_engine);

        let mut ctx = Context::opted_in();
        a.apply_to(&mut ctx);
        assert!(ctx.is_directly_addressed());
    }

    #[test]
    fn garbage_payload_degrades() {
        let payload = json!({"content": 12, "mentions": "nope", "attachments": null});
        let ev = event_from_discord_message(&payload, BOT);
        assert_eq!(ev.content, "");
        assert_eq!(ev.mentioned_user_count, None);
        assert_eq!(ev.attachment_count, 0);
        assert_eq!(ev.total_mentions(), None);

        let a = discord_addressing(&payload, BOT);
        assert_eq!(a, Addressing { is_direct_message: true, ..Addressing::default() });
    }

    #[test]
    fn malformed_guild_message_stays_in_guild() {
        let payload = json!({
            "guild_id": "7",
            "content": "nice weather today",
            "mentions": [],
            "referenced_message": {"author": {"id": 12345}},
            "attachments": "broken",
        });
        let a = discord_addressing(&payload, BOT);
        assert!(!a.is_direct_message);
        assert!(!a.replied_to_engine);
        assert!(!a.mentioned_engine);

        let ev = event_from_discord_message(&payload, BOT);
        assert_eq!(ev.content, "nice weather today");
        assert_eq!(ev.mentioned_user_count, Some(0));
        assert_eq!(ev.attachment_count, 0);
    }

    #[test]
    fn numeric_snowflakes_still_match_the_bot() {
        let payload = json!({
            "guild_id": 7,
            "content": "<@1000> ping",
            "mentions": [{"id": 1000}],
            "referenced_message": {"author": {"id": 1000}},
        });
        let a = discord_addressing(&payload, BOT);
        assert!(!a.is_direct_message);
        assert!(a.mentioned_engine);
        assert!(a.replied_to_engine);
        assert_eq!(event_from_discord_message(&payload, BOT).content, "ping");
    }
}
