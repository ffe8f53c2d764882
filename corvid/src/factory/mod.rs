//! Converts raw gateway payloads into typed events.
//!
//! Every wire event name has one decode function, found through [`decoder_for`]. Decode
//! functions are pure: they only extract fields from the payload and hand nested entities to an
//! [`EntityDecoder`].

use crate::decoder::EntityDecoder;
use crate::errors::*;
use crate::model::JsonObject;
use crate::model::event::*;
use crate::model::types::ShardId;
use std::sync::Arc;

mod channel;
mod guild;
mod interaction;
mod lifecycle;
mod message;
pub mod payload;

/// A function decoding the payload of one type of gateway event.
pub type DecodeFn = fn(&dyn EntityDecoder, ShardId, &JsonObject) -> Result<GatewayEvent>;

/// Returns the decode function registered for an event type.
///
/// Returns `None` for [`GatewayEventType::Unknown`] and other event types with no decoder.
pub fn decoder_for(ty: &GatewayEventType) -> Option<DecodeFn> {
    use self::GatewayEventType::*;
    let func: DecodeFn = match ty {
        Ready => lifecycle::ready,
        Resumed => lifecycle::resumed,
        UserUpdate => lifecycle::user_update,
        VoiceStateUpdate => lifecycle::voice_state_update,
        VoiceServerUpdate => lifecycle::voice_server_update,

        ChannelCreate => channel::channel_create,
        ChannelUpdate => channel::channel_update,
        ChannelDelete => channel::channel_delete,
        ChannelPinsUpdate => channel::channel_pins_update,
        ThreadCreate => channel::thread_create,
        ThreadUpdate => channel::thread_update,
        ThreadDelete => channel::thread_delete,
        ThreadListSync => channel::thread_list_sync,
        ThreadMemberUpdate => channel::thread_member_update,
        ThreadMembersUpdate => channel::thread_members_update,
        WebhooksUpdate => channel::webhooks_update,
        InviteCreate => channel::invite_create,
        InviteDelete => channel::invite_delete,

        GuildCreate => guild::guild_create,
        GuildUpdate => guild::guild_update,
        GuildDelete => guild::guild_delete,
        GuildAuditLogEntryCreate => guild::audit_log_entry_create,
        GuildBanAdd => guild::ban_add,
        GuildBanRemove => guild::ban_remove,
        GuildEmojisUpdate => guild::emojis_update,
        GuildStickersUpdate => guild::stickers_update,
        GuildIntegrationsUpdate => guild::integrations_update,
        IntegrationCreate => guild::integration_create,
        IntegrationUpdate => guild::integration_update,
        IntegrationDelete => guild::integration_delete,
        GuildMemberAdd => guild::member_add,
        GuildMemberUpdate => guild::member_update,
        GuildMemberRemove => guild::member_remove,
        GuildMembersChunk => guild::members_chunk,
        GuildRoleCreate => guild::role_create,
        GuildRoleUpdate => guild::role_update,
        GuildRoleDelete => guild::role_delete,
        PresenceUpdate => guild::presence_update,

        MessageCreate => message::message_create,
        MessageUpdate => message::message_update,
        MessageDelete => message::message_delete,
        MessageDeleteBulk => message::message_delete_bulk,
        MessageReactionAdd => message::reaction_add,
        MessageReactionRemove => message::reaction_remove,
        MessageReactionRemoveAll => message::reaction_remove_all,
        MessageReactionRemoveEmoji => message::reaction_remove_emoji,
        MessagePollVoteAdd => message::poll_vote_add,
        MessagePollVoteRemove => message::poll_vote_remove,
        TypingStart => message::typing_start,

        InteractionCreate => interaction::interaction_create,
        GuildScheduledEventCreate => interaction::scheduled_event_create,
        GuildScheduledEventUpdate => interaction::scheduled_event_update,
        GuildScheduledEventDelete => interaction::scheduled_event_delete,
        GuildScheduledEventUserAdd => interaction::scheduled_event_user_add,
        GuildScheduledEventUserRemove => interaction::scheduled_event_user_remove,
        AutoModerationRuleCreate => interaction::auto_mod_rule_create,
        AutoModerationRuleUpdate => interaction::auto_mod_rule_update,
        AutoModerationRuleDelete => interaction::auto_mod_rule_delete,
        AutoModerationActionExecution => interaction::auto_mod_action_execution,
        EntitlementCreate => interaction::entitlement_create,
        EntitlementUpdate => interaction::entitlement_update,
        EntitlementDelete => interaction::entitlement_delete,

        _ => return None,
    };
    Some(func)
}

/// Decodes gateway events using a shared [`EntityDecoder`].
///
/// The factory itself is stateless, and cloning it creates a new handle to the same decoder.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
pub struct EventFactory {
    #[derivative(Debug="ignore")]
    decoder: Arc<dyn EntityDecoder>,
}
impl EventFactory {
    /// Creates a new event factory.
    pub fn new(decoder: Arc<dyn EntityDecoder>) -> Self {
        EventFactory { decoder }
    }

    /// Returns the entity decoder used by this factory.
    pub fn entity_decoder(&self) -> &dyn EntityDecoder {
        &*self.decoder
    }

    /// Decodes an event given its wire name.
    ///
    /// Names with no registered decoder return [`ErrorKind::UnknownEvent`].
    pub fn decode(
        &self, shard: ShardId, name: &str, payload: &JsonObject,
    ) -> Result<GatewayEvent> {
        self.decode_event(shard, &GatewayEventType::from_name(name), payload)
    }

    /// Decodes an event given its parsed type.
    pub fn decode_event(
        &self, shard: ShardId, ty: &GatewayEventType, payload: &JsonObject,
    ) -> Result<GatewayEvent> {
        match decoder_for(ty) {
            Some(func) => {
                trace!("Decoding {} on shard #{}", ty.name(), shard);
                func(&*self.decoder, shard, payload)
            }
            None => bail!(UnknownEvent, ty.name().to_string()),
        }
    }

    /// Wraps a raw payload in a [`ShardPayloadEvent`].
    pub fn shard_payload(&self, shard: ShardId, name: &str, payload: JsonObject) -> GatewayEvent {
        GatewayEvent::ShardPayload(ShardPayloadEvent { shard, name: name.to_string(), payload })
    }

    /// Creates the event sent when a shard establishes a new session.
    pub fn shard_connected(&self, shard: ShardId) -> GatewayEvent {
        GatewayEvent::ShardConnected(ShardConnectedEvent { shard })
    }

    /// Creates the event sent when a shard loses its connection.
    pub fn shard_disconnected(&self, shard: ShardId) -> GatewayEvent {
        GatewayEvent::ShardDisconnected(ShardDisconnectedEvent { shard })
    }

    /// Creates the event sent when the client changes its lifecycle stage.
    pub fn lifecycle(&self, stage: LifecycleStage) -> GatewayEvent {
        GatewayEvent::Lifecycle(LifecycleEvent { stage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::SerdeEntityDecoder;

    #[test]
    fn every_known_event_has_a_decoder() {
        let names = [
            "READY", "RESUMED", "USER_UPDATE", "CHANNEL_CREATE", "CHANNEL_PINS_UPDATE",
            "THREAD_LIST_SYNC", "THREAD_MEMBERS_UPDATE", "GUILD_CREATE", "GUILD_MEMBERS_CHUNK",
            "GUILD_AUDIT_LOG_ENTRY_CREATE", "MESSAGE_DELETE_BULK", "MESSAGE_POLL_VOTE_REMOVE",
            "TYPING_START", "INTERACTION_CREATE", "GUILD_SCHEDULED_EVENT_USER_ADD",
            "AUTO_MODERATION_ACTION_EXECUTION", "ENTITLEMENT_DELETE", "VOICE_SERVER_UPDATE",
        ];
        for name in &names {
            let ty = GatewayEventType::from_name(name);
            assert!(decoder_for(&ty).is_some(), "no decoder for {}", name);
        }
        assert!(decoder_for(&GatewayEventType::from_name("NOT_AN_EVENT")).is_none());
    }

    #[test]
    fn unknown_events() {
        let factory = EventFactory::new(Arc::new(SerdeEntityDecoder));
        let err = factory.decode(ShardId(0, 1), "BRAND_NEW_EVENT", &JsonObject::new())
            .unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::UnknownEvent("BRAND_NEW_EVENT".to_string()));
        assert!(!err.is_decode());
    }

    #[test]
    fn synthetic_events() {
        let factory = EventFactory::new(Arc::new(SerdeEntityDecoder));
        let shard = ShardId(2, 4);
        assert_eq!(factory.shard_connected(shard).shard(), Some(shard));
        assert_eq!(factory.lifecycle(LifecycleStage::Started).shard(), None);
        match factory.shard_payload(shard, "RESUMED", JsonObject::new()) {
            GatewayEvent::ShardPayload(ev) => assert_eq!(ev.name, "RESUMED"),
            ev => panic!("unexpected event: {:?}", ev),
        }
        assert_eq!(
            factory.decode(shard, "RESUMED", &JsonObject::new()).unwrap(),
            GatewayEvent::ShardResumed(ShardResumedEvent { shard }),
        );
    }
}
