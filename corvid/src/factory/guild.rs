//! Decoders for guild, member, role and presence events.

use super::payload::*;
use crate::decoder::EntityDecoder;
use crate::errors::*;
use crate::model::JsonObject;
use crate::model::event::*;
use crate::model::types::*;
use std::collections::BTreeMap;

/// A `Guild Create` for a guild that was already known to be unavailable carries the
/// `unavailable` key. Any other `Guild Create` means the bot joined a new guild.
pub fn guild_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild = decoder.decode_gateway_guild(&whole(payload))?;
    Ok(if payload.contains_key("unavailable") {
        GatewayEvent::GuildAvailable(GuildAvailableEvent { shard, guild })
    } else {
        GatewayEvent::GuildJoin(GuildJoinEvent { shard, guild })
    })
}

pub fn guild_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild = decoder.decode_gateway_guild(&whole(payload))?;
    Ok(GatewayEvent::GuildUpdate(GuildUpdateEvent { shard, guild }))
}

/// An outage is a `Guild Delete` with `unavailable` set. Otherwise, the bot left the guild.
pub fn guild_delete(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = snowflake(payload, "id")?;
    Ok(if opt_boolean(payload, "unavailable")?.unwrap_or(false) {
        GatewayEvent::GuildUnavailable(GuildUnavailableEvent { shard, guild_id })
    } else {
        GatewayEvent::GuildLeave(GuildLeaveEvent { shard, guild_id })
    })
}

pub fn ban_add(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::BanCreate(BanCreateEvent {
        shard,
        guild_id: require_guild(payload)?,
        user: decoder.decode_user(field(payload, "user")?)?,
    }))
}

pub fn ban_remove(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::BanDelete(BanDeleteEvent {
        shard,
        guild_id: require_guild(payload)?,
        user: decoder.decode_user(field(payload, "user")?)?,
    }))
}

pub fn emojis_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let emojis = array(payload, "emojis")?.iter()
        .map(|raw| decoder.decode_known_custom_emoji(raw, guild_id))
        .collect::<Result<Vec<_>>>()?;
    Ok(GatewayEvent::EmojisUpdate(EmojisUpdateEvent { shard, guild_id, emojis }))
}

pub fn stickers_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let stickers = array(payload, "stickers")?.iter()
        .map(|raw| decoder.decode_sticker(raw))
        .collect::<Result<Vec<_>>>()?;
    Ok(GatewayEvent::StickersUpdate(StickersUpdateEvent { shard, guild_id, stickers }))
}

pub fn integrations_update(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    Ok(GatewayEvent::IntegrationsUpdate(IntegrationsUpdateEvent { shard, guild_id }))
}

pub fn integration_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let integration = decoder.decode_integration(&whole(payload))?;
    Ok(GatewayEvent::IntegrationCreate(IntegrationCreateEvent { shard, guild_id, integration }))
}

pub fn integration_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let integration = decoder.decode_integration(&whole(payload))?;
    Ok(GatewayEvent::IntegrationUpdate(IntegrationUpdateEvent { shard, guild_id, integration }))
}

pub fn integration_delete(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::IntegrationDelete(IntegrationDeleteEvent {
        shard,
        guild_id: require_guild(payload)?,
        id: snowflake(payload, "id")?,
        application_id: opt_snowflake(payload, "application_id")?,
    }))
}

/// The `user` object of a presence update only carries more than an ID when the user itself
/// changed. In that case the other fields are decoded into a partial user.
pub fn presence_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let presence = decoder.decode_presence(&whole(payload), Some(guild_id))?;
    let user = if object(payload, "user")?.len() > 1 {
        Some(decoder.decode_partial_user(field(payload, "user")?)?)
    } else {
        None
    };
    Ok(GatewayEvent::PresenceUpdate(PresenceUpdateEvent { shard, guild_id, presence, user }))
}

pub fn audit_log_entry_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let entry = decoder.decode_audit_log_entry(&whole(payload), guild_id)?;
    Ok(GatewayEvent::AuditLogEntryCreate(AuditLogEntryCreateEvent { shard, guild_id, entry }))
}

pub fn member_add(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let member = decoder.decode_member(&whole(payload), Some(guild_id))?;
    Ok(GatewayEvent::MemberCreate(MemberCreateEvent { shard, guild_id, member }))
}

pub fn member_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let member = decoder.decode_member(&whole(payload), Some(guild_id))?;
    Ok(GatewayEvent::MemberUpdate(MemberUpdateEvent { shard, guild_id, member }))
}

pub fn member_remove(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::MemberDelete(MemberDeleteEvent {
        shard,
        guild_id: require_guild(payload)?,
        user: decoder.decode_user(field(payload, "user")?)?,
    }))
}

pub fn members_chunk(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;

    let mut members = BTreeMap::new();
    for raw in array(payload, "members")? {
        let member = decoder.decode_member(raw, Some(guild_id))?;
        members.insert(member.user.id, member);
    }
    let mut presences = BTreeMap::new();
    for raw in array_or_empty(payload, "presences")? {
        let presence = decoder.decode_presence(raw, Some(guild_id))?;
        presences.insert(presence.user_id, presence);
    }

    Ok(GatewayEvent::MemberChunk(MemberChunkEvent {
        shard, guild_id, members,
        chunk_index: uint(payload, "chunk_index")?,
        chunk_count: uint(payload, "chunk_count")?,
        not_found: snowflake_list(array_or_empty(payload, "not_found")?, "not_found")?,
        presences,
        nonce: opt_string(payload, "nonce")?,
    }))
}

pub fn role_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let role = decoder.decode_role(field(payload, "role")?, guild_id)?;
    Ok(GatewayEvent::RoleCreate(RoleCreateEvent { shard, guild_id, role }))
}

pub fn role_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let role = decoder.decode_role(field(payload, "role")?, guild_id)?;
    Ok(GatewayEvent::RoleUpdate(RoleUpdateEvent { shard, guild_id, role }))
}

pub fn role_delete(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::RoleDelete(RoleDeleteEvent {
        shard,
        guild_id: require_guild(payload)?,
        role_id: snowflake(payload, "role_id")?,
    }))
}
