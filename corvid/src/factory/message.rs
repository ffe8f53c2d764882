//! Decoders for message, reaction, typing and poll events.
//!
//! All of these happen both in guilds and in direct messages, and are split on the presence of
//! `guild_id` in the payload.

use super::payload::*;
use crate::decoder::EntityDecoder;
use crate::errors::*;
use crate::model::JsonObject;
use crate::model::event::*;
use crate::model::types::*;
use std::collections::{BTreeMap, BTreeSet};

pub fn message_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let message = decoder.decode_message(&whole(payload))?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) =>
            GatewayEvent::GuildMessageCreate(GuildMessageCreateEvent { shard, guild_id, message }),
        None => GatewayEvent::DmMessageCreate(DmMessageCreateEvent { shard, message }),
    })
}

pub fn message_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let message = decoder.decode_partial_message(&whole(payload))?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) =>
            GatewayEvent::GuildMessageUpdate(GuildMessageUpdateEvent { shard, guild_id, message }),
        None => GatewayEvent::DmMessageUpdate(DmMessageUpdateEvent { shard, message }),
    })
}

pub fn message_delete(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let channel_id = snowflake(payload, "channel_id")?;
    let message_id = snowflake(payload, "id")?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) => GatewayEvent::GuildMessageDelete(GuildMessageDeleteEvent {
            shard, guild_id, channel_id, message_id,
        }),
        None => GatewayEvent::DmMessageDelete(DmMessageDeleteEvent {
            shard, channel_id, message_id,
        }),
    })
}

/// Bulk deletes only happen in guilds. Old messages are only known to a cache, so the map
/// produced here is always empty.
pub fn message_delete_bulk(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let guild_id = require_guild(payload)?;
    let channel_id = snowflake(payload, "channel_id")?;
    let message_ids: Vec<MessageId> = snowflake_list(array(payload, "ids")?, "ids")?;
    Ok(GatewayEvent::GuildBulkMessageDelete(GuildBulkMessageDeleteEvent {
        shard, guild_id, channel_id,
        message_ids: message_ids.into_iter().collect::<BTreeSet<_>>(),
        old_messages: BTreeMap::new(),
    }))
}

pub fn reaction_add(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let channel_id = snowflake(payload, "channel_id")?;
    let message_id = snowflake(payload, "message_id")?;
    let user_id = snowflake(payload, "user_id")?;
    let emoji = decoder.decode_emoji(field(payload, "emoji")?)?;
    let message_author_id = opt_snowflake(payload, "message_author_id")?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) => {
            let member = decoder.decode_member(field(payload, "member")?, Some(guild_id))?;
            GatewayEvent::GuildReactionAdd(GuildReactionAddEvent {
                shard, guild_id, channel_id, message_id, user_id, emoji, member, message_author_id,
            })
        }
        None => GatewayEvent::DmReactionAdd(DmReactionAddEvent {
            shard, channel_id, message_id, user_id, emoji, message_author_id,
        }),
    })
}

pub fn reaction_remove(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let channel_id = snowflake(payload, "channel_id")?;
    let message_id = snowflake(payload, "message_id")?;
    let user_id = snowflake(payload, "user_id")?;
    let emoji = decoder.decode_emoji(field(payload, "emoji")?)?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) => GatewayEvent::GuildReactionDelete(GuildReactionDeleteEvent {
            shard, guild_id, channel_id, message_id, user_id, emoji,
        }),
        None => GatewayEvent::DmReactionDelete(DmReactionDeleteEvent {
            shard, channel_id, message_id, user_id, emoji,
        }),
    })
}

pub fn reaction_remove_all(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let channel_id = snowflake(payload, "channel_id")?;
    let message_id = snowflake(payload, "message_id")?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) => GatewayEvent::GuildReactionDeleteAll(GuildReactionDeleteAllEvent {
            shard, guild_id, channel_id, message_id,
        }),
        None => GatewayEvent::DmReactionDeleteAll(DmReactionDeleteAllEvent {
            shard, channel_id, message_id,
        }),
    })
}

pub fn reaction_remove_emoji(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let channel_id = snowflake(payload, "channel_id")?;
    let message_id = snowflake(payload, "message_id")?;
    let emoji = decoder.decode_emoji(field(payload, "emoji")?)?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) => GatewayEvent::GuildReactionDeleteEmoji(GuildReactionDeleteEmojiEvent {
            shard, guild_id, channel_id, message_id, emoji,
        }),
        None => GatewayEvent::DmReactionDeleteEmoji(DmReactionDeleteEmojiEvent {
            shard, channel_id, message_id, emoji,
        }),
    })
}

/// The member of a guild typing event comes from the entity decoder. The DM variant only reads
/// the user ID.
pub fn typing_start(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let channel_id = snowflake(payload, "channel_id")?;
    let user_id = snowflake(payload, "user_id")?;
    let timestamp = unix_seconds(payload, "timestamp")?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) => {
            let member = decoder.decode_member(field(payload, "member")?, Some(guild_id))?;
            GatewayEvent::GuildTyping(GuildTypingEvent {
                shard, guild_id, channel_id, user_id, timestamp, member,
            })
        }
        None => GatewayEvent::DmTyping(DmTypingEvent { shard, channel_id, user_id, timestamp }),
    })
}

pub fn poll_vote_add(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let channel_id = snowflake(payload, "channel_id")?;
    let message_id = snowflake(payload, "message_id")?;
    let user_id = snowflake(payload, "user_id")?;
    let answer_id = uint(payload, "answer_id")?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) => GatewayEvent::GuildPollVoteAdd(GuildPollVoteAddEvent {
            shard, guild_id, channel_id, message_id, user_id, answer_id,
        }),
        None => GatewayEvent::DmPollVoteAdd(DmPollVoteAddEvent {
            shard, channel_id, message_id, user_id, answer_id,
        }),
    })
}

pub fn poll_vote_remove(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let channel_id = snowflake(payload, "channel_id")?;
    let message_id = snowflake(payload, "message_id")?;
    let user_id = snowflake(payload, "user_id")?;
    let answer_id = uint(payload, "answer_id")?;
    Ok(match guild_scope(payload)? {
        Some(guild_id) => GatewayEvent::GuildPollVoteRemove(GuildPollVoteRemoveEvent {
            shard, guild_id, channel_id, message_id, user_id, answer_id,
        }),
        None => GatewayEvent::DmPollVoteRemove(DmPollVoteRemoveEvent {
            shard, channel_id, message_id, user_id, answer_id,
        }),
    })
}
