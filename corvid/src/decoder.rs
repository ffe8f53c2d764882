//! Decoding of the entities nested inside event payloads.

use crate::errors::*;
use crate::model::audit_log::AuditLogEntry;
use crate::model::auto_mod::{AutoModAction, AutoModRule};
use crate::model::channel::{Channel, InviteWithMetadata, ThreadMember};
use crate::model::emoji::Emoji;
use crate::model::guild::*;
use crate::model::interaction::Interaction;
use crate::model::message::{Message, PartialMessage};
use crate::model::monetization::Entitlement;
use crate::model::presence::MemberPresence;
use crate::model::scheduled_event::ScheduledEvent;
use crate::model::types::*;
use crate::model::user::{OwnUser, PartialUser, User};
use crate::model::voice::VoiceState;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

/// Converts payload fragments into typed entities.
///
/// The event factory delegates every nested entity to an implementation of this trait. Where a
/// fragment does not carry the ID of the guild it belongs to, the factory passes it in so that it
/// can be filled in.
///
/// Implementations may consult or update a cache, but must not otherwise have side effects.
pub trait EntityDecoder: Send + Sync + 'static {
    fn decode_user(&self, fragment: &JsonValue) -> Result<User>;
    fn decode_own_user(&self, fragment: &JsonValue) -> Result<OwnUser>;
    fn decode_partial_user(&self, fragment: &JsonValue) -> Result<PartialUser>;
    fn decode_member(&self, fragment: &JsonValue, guild_id: Option<GuildId>) -> Result<Member>;
    fn decode_role(&self, fragment: &JsonValue, guild_id: GuildId) -> Result<Role>;
    fn decode_emoji(&self, fragment: &JsonValue) -> Result<Emoji>;
    fn decode_known_custom_emoji(
        &self, fragment: &JsonValue, guild_id: GuildId,
    ) -> Result<KnownCustomEmoji>;
    fn decode_sticker(&self, fragment: &JsonValue) -> Result<GuildSticker>;
    fn decode_presence(
        &self, fragment: &JsonValue, guild_id: Option<GuildId>,
    ) -> Result<MemberPresence>;
    fn decode_channel(&self, fragment: &JsonValue, guild_id: Option<GuildId>) -> Result<Channel>;
    fn decode_thread_member(&self, fragment: &JsonValue) -> Result<ThreadMember>;
    fn decode_gateway_guild(&self, fragment: &JsonValue) -> Result<GatewayGuild>;
    fn decode_message(&self, fragment: &JsonValue) -> Result<Message>;
    fn decode_partial_message(&self, fragment: &JsonValue) -> Result<PartialMessage>;
    fn decode_voice_state(&self, fragment: &JsonValue) -> Result<VoiceState>;
    fn decode_integration(&self, fragment: &JsonValue) -> Result<Integration>;
    fn decode_invite(&self, fragment: &JsonValue) -> Result<InviteWithMetadata>;
    fn decode_interaction(&self, fragment: &JsonValue) -> Result<Interaction>;
    fn decode_scheduled_event(&self, fragment: &JsonValue) -> Result<ScheduledEvent>;
    fn decode_auto_mod_rule(&self, fragment: &JsonValue) -> Result<AutoModRule>;
    fn decode_auto_mod_action(&self, fragment: &JsonValue) -> Result<AutoModAction>;
    fn decode_entitlement(&self, fragment: &JsonValue) -> Result<Entitlement>;
    fn decode_audit_log_entry(
        &self, fragment: &JsonValue, guild_id: GuildId,
    ) -> Result<AuditLogEntry>;
}

/// An [`EntityDecoder`] that decodes entities with their `serde` implementations.
#[derive(Copy, Clone, Default, Debug)]
pub struct SerdeEntityDecoder;

fn from_json<T: DeserializeOwned>(fragment: &JsonValue, what: &'static str) -> Result<T> {
    if !fragment.is_object() {
        bail!(InvalidField, what);
    }
    T::deserialize(fragment).invalid_field(what)
}

impl EntityDecoder for SerdeEntityDecoder {
    fn decode_user(&self, fragment: &JsonValue) -> Result<User> {
        from_json(fragment, "user")
    }
    fn decode_own_user(&self, fragment: &JsonValue) -> Result<OwnUser> {
        from_json(fragment, "user")
    }
    fn decode_partial_user(&self, fragment: &JsonValue) -> Result<PartialUser> {
        from_json(fragment, "user")
    }
    fn decode_member(&self, fragment: &JsonValue, guild_id: Option<GuildId>) -> Result<Member> {
        let mut member: Member = from_json(fragment, "member")?;
        if guild_id.is_some() {
            member.guild_id = guild_id;
        }
        Ok(member)
    }
    fn decode_role(&self, fragment: &JsonValue, guild_id: GuildId) -> Result<Role> {
        let mut role: Role = from_json(fragment, "role")?;
        role.guild_id = Some(guild_id);
        Ok(role)
    }
    fn decode_emoji(&self, fragment: &JsonValue) -> Result<Emoji> {
        from_json(fragment, "emoji")
    }
    fn decode_known_custom_emoji(
        &self, fragment: &JsonValue, guild_id: GuildId,
    ) -> Result<KnownCustomEmoji> {
        let mut emoji: KnownCustomEmoji = from_json(fragment, "emojis")?;
        emoji.guild_id = Some(guild_id);
        Ok(emoji)
    }
    fn decode_sticker(&self, fragment: &JsonValue) -> Result<GuildSticker> {
        from_json(fragment, "stickers")
    }
    fn decode_presence(
        &self, fragment: &JsonValue, guild_id: Option<GuildId>,
    ) -> Result<MemberPresence> {
        let mut presence: MemberPresence = from_json(fragment, "presence")?;
        if guild_id.is_some() {
            presence.guild_id = guild_id;
        }
        Ok(presence)
    }
    fn decode_channel(&self, fragment: &JsonValue, guild_id: Option<GuildId>) -> Result<Channel> {
        let mut channel: Channel = from_json(fragment, "channel")?;
        if guild_id.is_some() {
            channel.guild_id = guild_id;
        }
        Ok(channel)
    }
    fn decode_thread_member(&self, fragment: &JsonValue) -> Result<ThreadMember> {
        from_json(fragment, "thread_member")
    }
    fn decode_gateway_guild(&self, fragment: &JsonValue) -> Result<GatewayGuild> {
        let mut guild: GatewayGuild = from_json(fragment, "guild")?;
        guild.fill_guild_ids();
        Ok(guild)
    }
    fn decode_message(&self, fragment: &JsonValue) -> Result<Message> {
        from_json(fragment, "message")
    }
    fn decode_partial_message(&self, fragment: &JsonValue) -> Result<PartialMessage> {
        from_json(fragment, "message")
    }
    fn decode_voice_state(&self, fragment: &JsonValue) -> Result<VoiceState> {
        from_json(fragment, "voice_state")
    }
    fn decode_integration(&self, fragment: &JsonValue) -> Result<Integration> {
        from_json(fragment, "integration")
    }
    fn decode_invite(&self, fragment: &JsonValue) -> Result<InviteWithMetadata> {
        from_json(fragment, "invite")
    }
    fn decode_interaction(&self, fragment: &JsonValue) -> Result<Interaction> {
        from_json(fragment, "interaction")
    }
    fn decode_scheduled_event(&self, fragment: &JsonValue) -> Result<ScheduledEvent> {
        from_json(fragment, "scheduled_event")
    }
    fn decode_auto_mod_rule(&self, fragment: &JsonValue) -> Result<AutoModRule> {
        from_json(fragment, "rule")
    }
    fn decode_auto_mod_action(&self, fragment: &JsonValue) -> Result<AutoModAction> {
        from_json(fragment, "action")
    }
    fn decode_entitlement(&self, fragment: &JsonValue) -> Result<Entitlement> {
        from_json(fragment, "entitlement")
    }
    fn decode_audit_log_entry(
        &self, fragment: &JsonValue, guild_id: GuildId,
    ) -> Result<AuditLogEntry> {
        let mut entry: AuditLogEntry = from_json(fragment, "audit_log_entry")?;
        entry.guild_id = Some(guild_id);
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fills_guild_ids() {
        let role = SerdeEntityDecoder.decode_role(&json!({
            "id": "7",
            "name": "mods",
            "color": 0,
            "hoist": false,
            "position": 1,
            "permissions": "8",
            "managed": false,
            "mentionable": true,
        }), GuildId::from(2)).unwrap();
        assert_eq!(role.guild_id, Some(GuildId::from(2)));
        assert!(role.permissions.contains(Permissions::ADMINISTRATOR));
    }

    #[test]
    fn bad_fragments_are_decode_errors() {
        let err = SerdeEntityDecoder.decode_user(&json!({ "username": "x" })).unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::InvalidField("user"));
        assert!(err.is_decode());

        let err = SerdeEntityDecoder.decode_member(&json!("nope"), None).unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::InvalidField("member"));
    }

    #[test]
    fn emoji_shape() {
        let decoder = SerdeEntityDecoder;
        let custom = decoder.decode_emoji(&json!({ "id": "9", "name": "blob" })).unwrap();
        assert_eq!(custom.id(), Some(EmojiId::from(9)));
        let unicode = decoder.decode_emoji(&json!({ "id": null, "name": "👍" })).unwrap();
        assert_eq!(unicode.id(), None);
        assert_eq!(unicode.name(), Some("👍"));
    }
}
