//! Decoders for session, user and voice events.

use super::payload::*;
use crate::decoder::EntityDecoder;
use crate::errors::*;
use crate::model::JsonObject;
use crate::model::event::*;
use crate::model::types::*;

pub fn ready(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let unavailable_guilds = array(payload, "guilds")?.iter()
        .map(|raw| snowflake(raw.as_object().invalid_field("guilds")?, "id"))
        .collect::<Result<Vec<GuildId>>>()?;
    let application = object(payload, "application")?;
    Ok(GatewayEvent::ShardReady(ShardReadyEvent {
        shard,
        version: uint(payload, "v")?,
        session_id: string(payload, "session_id")?,
        resume_gateway_url: string(payload, "resume_gateway_url")?,
        user: decoder.decode_own_user(field(payload, "user")?)?,
        unavailable_guilds,
        application_id: snowflake(application, "id")?,
        application_flags: u64::try_from(integer(application, "flags")?).invalid_field("flags")?,
    }))
}

pub fn resumed(
    _: &dyn EntityDecoder, shard: ShardId, _: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::ShardResumed(ShardResumedEvent { shard }))
}

/// `User Update` is only ever sent for the bot's own user.
pub fn user_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let user = decoder.decode_own_user(&whole(payload))?;
    Ok(GatewayEvent::OwnUserUpdate(OwnUserUpdateEvent { shard, user }))
}

pub fn voice_state_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let state = decoder.decode_voice_state(&whole(payload))?;
    Ok(GatewayEvent::VoiceStateUpdate(VoiceStateUpdateEvent { shard, state }))
}

pub fn voice_server_update(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::VoiceServerUpdate(VoiceServerUpdateEvent {
        shard,
        guild_id: require_guild(payload)?,
        token: string(payload, "token")?,
        raw_endpoint: opt_string(payload, "endpoint")?,
    }))
}
