//! Decoders for channel, thread, webhook and invite events.

use super::payload::*;
use crate::decoder::EntityDecoder;
use crate::errors::*;
use crate::model::JsonObject;
use crate::model::channel::{AddedThreadMember, Channel, ChannelType};
use crate::model::event::*;
use crate::model::types::*;
use std::collections::BTreeMap;

fn guild_channel(
    decoder: &dyn EntityDecoder, payload: &JsonObject,
) -> Result<(GuildId, Channel)> {
    let guild_id = require_guild(payload)?;
    let channel = decoder.decode_channel(&whole(payload), Some(guild_id))?;
    ensure!(!channel.kind.is_dm(), ProtocolViolation, "guild channel event for a DM channel");
    ensure!(!channel.kind.is_thread(), ProtocolViolation, "guild channel event for a thread");
    Ok((guild_id, channel))
}

fn guild_thread(
    decoder: &dyn EntityDecoder, payload: &JsonObject,
) -> Result<(GuildId, Channel)> {
    let guild_id = require_guild(payload)?;
    let thread = decoder.decode_channel(&whole(payload), Some(guild_id))?;
    ensure!(thread.kind.is_thread(), ProtocolViolation, "thread event for a non-thread channel");
    Ok((guild_id, thread))
}

pub fn channel_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let (guild_id, channel) = guild_channel(decoder, payload)?;
    Ok(GatewayEvent::GuildChannelCreate(GuildChannelCreateEvent { shard, guild_id, channel }))
}

pub fn channel_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let (guild_id, channel) = guild_channel(decoder, payload)?;
    Ok(GatewayEvent::GuildChannelUpdate(GuildChannelUpdateEvent { shard, guild_id, channel }))
}

pub fn channel_delete(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let (guild_id, channel) = guild_channel(decoder, payload)?;
    Ok(GatewayEvent::GuildChannelDelete(GuildChannelDeleteEvent { shard, guild_id, channel }))
}

/// `last_pin_timestamp` is `None` both when it is missing and when it is `null`.
pub fn channel_pins_update(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let channel_id = snowflake(payload, "channel_id")?;
    let last_pin_timestamp = opt_timestamp(payload, "last_pin_timestamp")?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) => GatewayEvent::GuildPinsUpdate(GuildPinsUpdateEvent {
            shard, guild_id, channel_id, last_pin_timestamp,
        }),
        None => GatewayEvent::DmPinsUpdate(DmPinsUpdateEvent {
            shard, channel_id, last_pin_timestamp,
        }),
    })
}

/// A thread the bot was added to is sent as a `Thread Create` without `newly_created`.
pub fn thread_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let (guild_id, thread) = guild_thread(decoder, payload)?;
    Ok(if opt_boolean(payload, "newly_created")?.unwrap_or(false) {
        GatewayEvent::GuildThreadCreate(GuildThreadCreateEvent { shard, guild_id, thread })
    } else {
        GatewayEvent::GuildThreadAccess(GuildThreadAccessEvent { shard, guild_id, thread })
    })
}

pub fn thread_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let (guild_id, thread) = guild_thread(decoder, payload)?;
    Ok(GatewayEvent::GuildThreadUpdate(GuildThreadUpdateEvent { shard, guild_id, thread }))
}

pub fn thread_delete(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let kind: ChannelType = value(payload, "type")?;
    ensure!(kind.is_thread(), ProtocolViolation, "thread event for a non-thread channel");
    Ok(GatewayEvent::GuildThreadDelete(GuildThreadDeleteEvent {
        shard, guild_id,
        thread_id: snowflake(payload, "id")?,
        parent_id: opt_snowflake(payload, "parent_id")?,
        kind,
    }))
}

pub fn thread_member_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let thread_member = decoder.decode_thread_member(&whole(payload))?;
    Ok(GatewayEvent::ThreadMemberUpdate(ThreadMemberUpdateEvent {
        shard, guild_id, thread_member,
    }))
}

pub fn thread_members_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let thread_id = snowflake(payload, "id")?;

    let mut added_members = BTreeMap::new();
    for raw in array_or_empty(payload, "added_members")? {
        let obj = raw.as_object().invalid_field("added_members")?;
        let user_id: UserId = snowflake(obj, "user_id")?;
        let mut thread_member = decoder.decode_thread_member(raw)?;
        if thread_member.thread_id.is_none() {
            thread_member.thread_id = Some(thread_id);
        }
        let member = match opt_field(obj, "member") {
            Some(m) => Some(decoder.decode_member(m, Some(guild_id))?),
            None => None,
        };
        let presence = match opt_field(obj, "presence") {
            Some(p) => Some(decoder.decode_presence(p, Some(guild_id))?),
            None => None,
        };
        added_members.insert(user_id, AddedThreadMember::new(thread_member, member, presence));
    }

    Ok(GatewayEvent::ThreadMembersUpdate(ThreadMembersUpdateEvent {
        shard, guild_id, thread_id,
        member_count: uint(payload, "member_count")?,
        added_members,
        removed_member_ids: snowflake_list(
            array_or_empty(payload, "removed_member_ids")?, "removed_member_ids",
        )?,
    }))
}

/// A missing `channel_ids` means the sync covers the whole guild, and is kept distinct from an
/// empty list.
pub fn thread_list_sync(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let channel_ids = match opt_field(payload, "channel_ids") {
        Some(raw) => {
            let list = raw.as_array().invalid_field("channel_ids")?;
            Some(snowflake_list(list, "channel_ids")?)
        }
        None => None,
    };

    let mut threads = BTreeMap::new();
    for raw in array_or_empty(payload, "threads")? {
        let thread = decoder.decode_channel(raw, Some(guild_id))?;
        threads.insert(thread.id, thread);
    }
    let mut members = BTreeMap::new();
    for raw in array_or_empty(payload, "members")? {
        let member = decoder.decode_thread_member(raw)?;
        let thread_id = member.thread_id.missing_field("id")?;
        members.insert(thread_id, member);
    }

    Ok(GatewayEvent::ThreadListSync(ThreadListSyncEvent {
        shard, guild_id, channel_ids, threads, members,
    }))
}

pub fn webhooks_update(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::WebhooksUpdate(WebhooksUpdateEvent {
        shard,
        guild_id: require_guild(payload)?,
        channel_id: snowflake(payload, "channel_id")?,
    }))
}

pub fn invite_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let invite = decoder.decode_invite(&whole(payload))?;
    Ok(GatewayEvent::InviteCreate(InviteCreateEvent { shard, invite }))
}

pub fn invite_delete(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::InviteDelete(InviteDeleteEvent {
        shard,
        guild_id: guild_scope(payload)?,
        channel_id: snowflake(payload, "channel_id")?,
        code: string(payload, "code")?,
    }))
}
