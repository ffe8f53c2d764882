//! Decoders for interactions, scheduled events, auto moderation and entitlements.

use super::payload::*;
use crate::decoder::EntityDecoder;
use crate::errors::*;
use crate::model::JsonObject;
use crate::model::event::*;
use crate::model::interaction::InteractionType;
use crate::model::types::*;

/// Interactions are split into separate events by their type. Pings are only sent to HTTP
/// interaction endpoints and are rejected here.
pub fn interaction_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let interaction = decoder.decode_interaction(&whole(payload))?;
    let kind = interaction.kind;
    let event = InteractionCreateEvent { shard, interaction };
    Ok(match kind {
        InteractionType::ApplicationCommand => GatewayEvent::CommandInteractionCreate(event),
        InteractionType::ApplicationCommandAutocomplete =>
            GatewayEvent::AutocompleteInteractionCreate(event),
        InteractionType::MessageComponent => GatewayEvent::ComponentInteractionCreate(event),
        InteractionType::ModalSubmit => GatewayEvent::ModalInteractionCreate(event),
        _ => bail!(InvalidField, "type"),
    })
}

pub fn scheduled_event_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let event = decoder.decode_scheduled_event(&whole(payload))?;
    Ok(GatewayEvent::ScheduledEventCreate(ScheduledEventCreateEvent { shard, event }))
}

pub fn scheduled_event_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let event = decoder.decode_scheduled_event(&whole(payload))?;
    Ok(GatewayEvent::ScheduledEventUpdate(ScheduledEventUpdateEvent { shard, event }))
}

pub fn scheduled_event_delete(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let event = decoder.decode_scheduled_event(&whole(payload))?;
    Ok(GatewayEvent::ScheduledEventDelete(ScheduledEventDeleteEvent { shard, event }))
}

pub fn scheduled_event_user_add(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::ScheduledEventUserAdd(ScheduledEventUserAddEvent {
        shard,
        guild_id: require_guild(payload)?,
        event_id: snowflake(payload, "guild_scheduled_event_id")?,
        user_id: snowflake(payload, "user_id")?,
    }))
}

pub fn scheduled_event_user_remove(
    _: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::ScheduledEventUserRemove(ScheduledEventUserRemoveEvent {
        shard,
        guild_id: require_guild(payload)?,
        event_id: snowflake(payload, "guild_scheduled_event_id")?,
        user_id: snowflake(payload, "user_id")?,
    }))
}

pub fn auto_mod_rule_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let rule = decoder.decode_auto_mod_rule(&whole(payload))?;
    Ok(GatewayEvent::AutoModRuleCreate(AutoModRuleCreateEvent { shard, rule }))
}

pub fn auto_mod_rule_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let rule = decoder.decode_auto_mod_rule(&whole(payload))?;
    Ok(GatewayEvent::AutoModRuleUpdate(AutoModRuleUpdateEvent { shard, rule }))
}

pub fn auto_mod_rule_delete(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let rule = decoder.decode_auto_mod_rule(&whole(payload))?;
    Ok(GatewayEvent::AutoModRuleDelete(AutoModRuleDeleteEvent { shard, rule }))
}

/// Discord sends empty strings rather than omitting `content` and `matched_content` when the
/// bot lacks the `MESSAGE_CONTENT` intent. Both are read as absent in that case.
pub fn auto_mod_action_execution(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    Ok(GatewayEvent::AutoModActionExecution(AutoModActionExecutionEvent {
        shard,
        guild_id: require_guild(payload)?,
        action: decoder.decode_auto_mod_action(field(payload, "action")?)?,
        rule_id: snowflake(payload, "rule_id")?,
        rule_trigger_type: value(payload, "rule_trigger_type")?,
        user_id: snowflake(payload, "user_id")?,
        channel_id: nonempty_snowflake(payload, "channel_id")?,
        message_id: nonempty_snowflake(payload, "message_id")?,
        alert_system_message_id: nonempty_snowflake(payload, "alert_system_message_id")?,
        content: nonempty_string(payload, "content")?,
        matched_keyword: opt_string(payload, "matched_keyword")?,
        matched_content: nonempty_string(payload, "matched_content")?,
    }))
}

pub fn entitlement_create(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let entitlement = decoder.decode_entitlement(&whole(payload))?;
    Ok(GatewayEvent::EntitlementCreate(EntitlementCreateEvent { shard, entitlement }))
}

pub fn entitlement_update(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let entitlement = decoder.decode_entitlement(&whole(payload))?;
    Ok(GatewayEvent::EntitlementUpdate(EntitlementUpdateEvent { shard, entitlement }))
}

pub fn entitlement_delete(
    decoder: &dyn EntityDecoder, shard: ShardId, payload: &JsonObject,
) -> Result<GatewayEvent> {
    let entitlement = decoder.decode_entitlement(&whole(payload))?;
    Ok(GatewayEvent::EntitlementDelete(EntitlementDeleteEvent { shard, entitlement }))
}
