//! Types relating to Discord events.
//!
//! Events that can happen both in guilds and in direct messages are split into separate guild
//! and DM types. Fields common to both are exposed through the traits in this module.

use crate::intents::Intent;
use crate::serde::*;
use crate::types::*;
use std::fmt::{self, Formatter, Result as FmtResult};
use std::result::{Result as StdResult};
use std::str::FromStr;

/// An event produced by a particular shard.
pub trait ShardEvent {
    /// The shard that received this event.
    fn shard(&self) -> ShardId;
}

/// An event that happened in a guild.
pub trait GuildEvent: ShardEvent {
    /// The guild this event happened in.
    fn guild_id(&self) -> GuildId;
}

/// An event that happened in a channel.
pub trait ChannelEvent: ShardEvent {
    /// The channel this event happened in.
    fn channel_id(&self) -> ChannelId;
}

/// An event relating to a particular message.
pub trait MessageEvent: ChannelEvent {
    /// The message this event relates to.
    fn message_id(&self) -> MessageId;
}

macro_rules! shard_event {
    ($($ty:ty),* $(,)?) => {$(
        impl crate::event::ShardEvent for $ty {
            fn shard(&self) -> ShardId {
                self.shard
            }
        }
    )*}
}
macro_rules! guild_event {
    ($($ty:ty => $($field:ident).+),* $(,)?) => {$(
        impl crate::event::GuildEvent for $ty {
            fn guild_id(&self) -> GuildId {
                self.$($field).+
            }
        }
    )*}
}
macro_rules! channel_event {
    ($($ty:ty => $($field:ident).+),* $(,)?) => {$(
        impl crate::event::ChannelEvent for $ty {
            fn channel_id(&self) -> ChannelId {
                self.$($field).+
            }
        }
    )*}
}
macro_rules! message_event {
    ($($ty:ty => $($field:ident).+),* $(,)?) => {$(
        impl crate::event::MessageEvent for $ty {
            fn message_id(&self) -> MessageId {
                self.$($field).+
            }
        }
    )*}
}

mod channel;
mod guild;
mod interaction;
mod lifecycle;
mod message;

pub use self::channel::*;
pub use self::guild::*;
pub use self::interaction::*;
pub use self::lifecycle::*;
pub use self::message::*;

macro_rules! gateway_events {
    (
        sharded { $($variant:ident($ty:ty)),* $(,)? }
        unsharded { $($u_variant:ident($u_ty:ty)),* $(,)? }
    ) => {
        /// An enum representing any event delivered to user code.
        #[derive(Clone, PartialEq, Debug)]
        #[non_exhaustive]
        #[allow(missing_docs)]
        pub enum GatewayEvent {
            $($variant($ty),)*
            $($u_variant($u_ty),)*
        }
        impl GatewayEvent {
            /// Returns the shard that produced this event, if it came from a shard.
            pub fn shard(&self) -> Option<ShardId> {
                match self {
                    $(GatewayEvent::$variant(ev) => Some(ev.shard),)*
                    $(GatewayEvent::$u_variant(_) => None,)*
                }
            }

            /// Returns the name of this event's variant.
            pub fn variant_name(&self) -> &'static str {
                match self {
                    $(GatewayEvent::$variant(_) => stringify!($variant),)*
                    $(GatewayEvent::$u_variant(_) => stringify!($u_variant),)*
                }
            }
        }
    }
}

gateway_events! {
    sharded {
        ShardConnected(ShardConnectedEvent),
        ShardDisconnected(ShardDisconnectedEvent),
        ShardReady(ShardReadyEvent),
        ShardResumed(ShardResumedEvent),
        ShardPayload(ShardPayloadEvent),
        OwnUserUpdate(OwnUserUpdateEvent),

        GuildChannelCreate(GuildChannelCreateEvent),
        GuildChannelUpdate(GuildChannelUpdateEvent),
        GuildChannelDelete(GuildChannelDeleteEvent),
        GuildPinsUpdate(GuildPinsUpdateEvent),
        DmPinsUpdate(DmPinsUpdateEvent),
        GuildThreadCreate(GuildThreadCreateEvent),
        GuildThreadAccess(GuildThreadAccessEvent),
        GuildThreadUpdate(GuildThreadUpdateEvent),
        GuildThreadDelete(GuildThreadDeleteEvent),
        ThreadMemberUpdate(ThreadMemberUpdateEvent),
        ThreadMembersUpdate(ThreadMembersUpdateEvent),
        ThreadListSync(ThreadListSyncEvent),
        WebhooksUpdate(WebhooksUpdateEvent),
        InviteCreate(InviteCreateEvent),
        InviteDelete(InviteDeleteEvent),

        GuildAvailable(GuildAvailableEvent),
        GuildJoin(GuildJoinEvent),
        GuildUpdate(GuildUpdateEvent),
        GuildLeave(GuildLeaveEvent),
        GuildUnavailable(GuildUnavailableEvent),
        BanCreate(BanCreateEvent),
        BanDelete(BanDeleteEvent),
        EmojisUpdate(EmojisUpdateEvent),
        StickersUpdate(StickersUpdateEvent),
        IntegrationsUpdate(IntegrationsUpdateEvent),
        IntegrationCreate(IntegrationCreateEvent),
        IntegrationUpdate(IntegrationUpdateEvent),
        IntegrationDelete(IntegrationDeleteEvent),
        PresenceUpdate(PresenceUpdateEvent),
        AuditLogEntryCreate(AuditLogEntryCreateEvent),
        MemberCreate(MemberCreateEvent),
        MemberUpdate(MemberUpdateEvent),
        MemberDelete(MemberDeleteEvent),
        MemberChunk(MemberChunkEvent),
        RoleCreate(RoleCreateEvent),
        RoleUpdate(RoleUpdateEvent),
        RoleDelete(RoleDeleteEvent),

        GuildMessageCreate(GuildMessageCreateEvent),
        DmMessageCreate(DmMessageCreateEvent),
        GuildMessageUpdate(GuildMessageUpdateEvent),
        DmMessageUpdate(DmMessageUpdateEvent),
        GuildMessageDelete(GuildMessageDeleteEvent),
        DmMessageDelete(DmMessageDeleteEvent),
        GuildBulkMessageDelete(GuildBulkMessageDeleteEvent),
        GuildReactionAdd(GuildReactionAddEvent),
        DmReactionAdd(DmReactionAddEvent),
        GuildReactionDelete(GuildReactionDeleteEvent),
        DmReactionDelete(DmReactionDeleteEvent),
        GuildReactionDeleteAll(GuildReactionDeleteAllEvent),
        DmReactionDeleteAll(DmReactionDeleteAllEvent),
        GuildReactionDeleteEmoji(GuildReactionDeleteEmojiEvent),
        DmReactionDeleteEmoji(DmReactionDeleteEmojiEvent),
        GuildTyping(GuildTypingEvent),
        DmTyping(DmTypingEvent),
        GuildPollVoteAdd(GuildPollVoteAddEvent),
        DmPollVoteAdd(DmPollVoteAddEvent),
        GuildPollVoteRemove(GuildPollVoteRemoveEvent),
        DmPollVoteRemove(DmPollVoteRemoveEvent),

        VoiceStateUpdate(VoiceStateUpdateEvent),
        VoiceServerUpdate(VoiceServerUpdateEvent),

        CommandInteractionCreate(InteractionCreateEvent),
        AutocompleteInteractionCreate(InteractionCreateEvent),
        ComponentInteractionCreate(InteractionCreateEvent),
        ModalInteractionCreate(InteractionCreateEvent),
        ScheduledEventCreate(ScheduledEventCreateEvent),
        ScheduledEventUpdate(ScheduledEventUpdateEvent),
        ScheduledEventDelete(ScheduledEventDeleteEvent),
        ScheduledEventUserAdd(ScheduledEventUserAddEvent),
        ScheduledEventUserRemove(ScheduledEventUserRemoveEvent),
        AutoModRuleCreate(AutoModRuleCreateEvent),
        AutoModRuleUpdate(AutoModRuleUpdateEvent),
        AutoModRuleDelete(AutoModRuleDeleteEvent),
        AutoModActionExecution(AutoModActionExecutionEvent),
        EntitlementCreate(EntitlementCreateEvent),
        EntitlementUpdate(EntitlementUpdateEvent),
        EntitlementDelete(EntitlementDeleteEvent),
    }
    unsharded {
        Lifecycle(LifecycleEvent),
    }
}

/// An enum representing the name of an event sent over the gateway.
#[derive(Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[derive(EnumString, AsRefStr)]
#[strum(serialize_all = "shouty_snake_case")]
#[non_exhaustive]
#[allow(missing_docs)]
pub enum GatewayEventType {
    Ready,
    Resumed,
    UserUpdate,
    ChannelCreate,
    ChannelUpdate,
    ChannelDelete,
    ChannelPinsUpdate,
    ThreadCreate,
    ThreadUpdate,
    ThreadDelete,
    ThreadListSync,
    ThreadMemberUpdate,
    ThreadMembersUpdate,
    WebhooksUpdate,
    InviteCreate,
    InviteDelete,
    GuildCreate,
    GuildUpdate,
    GuildDelete,
    GuildAuditLogEntryCreate,
    GuildBanAdd,
    GuildBanRemove,
    GuildEmojisUpdate,
    GuildStickersUpdate,
    GuildIntegrationsUpdate,
    IntegrationCreate,
    IntegrationUpdate,
    IntegrationDelete,
    GuildMemberAdd,
    GuildMemberUpdate,
    GuildMemberRemove,
    GuildMembersChunk,
    GuildRoleCreate,
    GuildRoleUpdate,
    GuildRoleDelete,
    PresenceUpdate,
    MessageCreate,
    MessageUpdate,
    MessageDelete,
    MessageDeleteBulk,
    MessageReactionAdd,
    MessageReactionRemove,
    MessageReactionRemoveAll,
    MessageReactionRemoveEmoji,
    MessagePollVoteAdd,
    MessagePollVoteRemove,
    TypingStart,
    VoiceStateUpdate,
    VoiceServerUpdate,
    InteractionCreate,
    GuildScheduledEventCreate,
    GuildScheduledEventUpdate,
    GuildScheduledEventDelete,
    GuildScheduledEventUserAdd,
    GuildScheduledEventUserRemove,
    AutoModerationRuleCreate,
    AutoModerationRuleUpdate,
    AutoModerationRuleDelete,
    AutoModerationActionExecution,
    EntitlementCreate,
    EntitlementUpdate,
    EntitlementDelete,
    #[strum(disabled)]
    Unknown(String),
}
impl GatewayEventType {
    /// Parses a wire event name, returning [`GatewayEventType::Unknown`] for unrecognized names.
    pub fn from_name(name: &str) -> GatewayEventType {
        match GatewayEventType::from_str(name) {
            Ok(v) => v,
            Err(_) => GatewayEventType::Unknown(name.to_string()),
        }
    }

    /// Returns the wire name of this event type.
    pub fn name(&self) -> &str {
        match self {
            GatewayEventType::Unknown(name) => name,
            _ => self.as_ref(),
        }
    }

    /// Returns the groups of intents that allow a shard to receive this event.
    ///
    /// A shard receives the event if any one group is fully enabled. An empty list means the
    /// event is always sent.
    pub fn required_intents(&self) -> Vec<EnumSet<Intent>> {
        use self::GatewayEventType::*;
        let one = |intent: Intent| vec![EnumSet::only(intent)];
        let either = |guild: Intent, dm: Intent| vec![EnumSet::only(guild), EnumSet::only(dm)];
        match self {
            ChannelCreate | ChannelUpdate | ChannelDelete |
            ThreadCreate | ThreadUpdate | ThreadDelete | ThreadListSync | ThreadMemberUpdate |
            GuildCreate | GuildUpdate | GuildDelete |
            GuildRoleCreate | GuildRoleUpdate | GuildRoleDelete => one(Intent::Guilds),
            ChannelPinsUpdate => either(Intent::Guilds, Intent::DmMessages),
            ThreadMembersUpdate => one(Intent::GuildMembers),
            WebhooksUpdate => one(Intent::GuildWebhooks),
            InviteCreate | InviteDelete => one(Intent::GuildInvites),
            GuildAuditLogEntryCreate | GuildBanAdd | GuildBanRemove =>
                one(Intent::GuildModeration),
            GuildEmojisUpdate | GuildStickersUpdate => one(Intent::GuildEmojis),
            GuildIntegrationsUpdate | IntegrationCreate | IntegrationUpdate | IntegrationDelete =>
                one(Intent::GuildIntegrations),
            GuildMemberAdd | GuildMemberUpdate | GuildMemberRemove => one(Intent::GuildMembers),
            PresenceUpdate => one(Intent::GuildPresences),
            MessageCreate | MessageUpdate | MessageDelete =>
                either(Intent::GuildMessages, Intent::DmMessages),
            MessageDeleteBulk => one(Intent::GuildMessages),
            MessageReactionAdd | MessageReactionRemove |
            MessageReactionRemoveAll | MessageReactionRemoveEmoji =>
                either(Intent::GuildMessageReactions, Intent::DmMessageReactions),
            MessagePollVoteAdd | MessagePollVoteRemove =>
                either(Intent::GuildMessagePolls, Intent::DirectMessagePolls),
            TypingStart => either(Intent::GuildMessageTyping, Intent::DmMessageTyping),
            VoiceStateUpdate => one(Intent::GuildVoiceStates),
            GuildScheduledEventCreate | GuildScheduledEventUpdate | GuildScheduledEventDelete |
            GuildScheduledEventUserAdd | GuildScheduledEventUserRemove =>
                one(Intent::GuildScheduledEvents),
            AutoModerationRuleCreate | AutoModerationRuleUpdate | AutoModerationRuleDelete =>
                one(Intent::AutoModerationConfiguration),
            AutoModerationActionExecution => one(Intent::AutoModerationExecution),
            Ready | Resumed | UserUpdate | GuildMembersChunk | VoiceServerUpdate |
            InteractionCreate | EntitlementCreate | EntitlementUpdate | EntitlementDelete |
            Unknown(_) => Vec::new(),
        }
    }
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl Serialize for GatewayEventType {
    fn serialize<S>(&self, serializer: S) -> StdResult<S::Ok, S::Error> where S: Serializer {
        serializer.serialize_str(self.name())
    }
}

impl <'de> Deserialize<'de> for GatewayEventType {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error> where D: Deserializer<'de> {
        deserializer.deserialize_str(EventTypeVisitor)
    }
}

struct EventTypeVisitor;
impl <'de> Visitor<'de> for EventTypeVisitor {
    type Value = GatewayEventType;
    fn expecting(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        formatter.write_str("enum GatewayEventType")
    }
    fn visit_str<E>(self, v: &str) -> StdResult<Self::Value, E> where E: DeError {
        Ok(GatewayEventType::from_name(v))
    }
    fn visit_string<E>(self, v: String) -> StdResult<Self::Value, E> where E: DeError {
        Ok(match GatewayEventType::from_str(&v) {
            Ok(v) => v,
            Err(_) => GatewayEventType::Unknown(v),
        })
    }
    fn visit_bytes<E>(self, v: &[u8]) -> StdResult<Self::Value, E> where E: DeError {
        let s = ::std::str::from_utf8(v).map_err(|_| E::custom("byte string is not UTF-8"))?;
        self.visit_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names() {
        assert_eq!(GatewayEventType::from_name("MESSAGE_CREATE"), GatewayEventType::MessageCreate);
        assert_eq!(
            GatewayEventType::from_name("MESSAGE_POLL_VOTE_ADD"),
            GatewayEventType::MessagePollVoteAdd,
        );
        assert_eq!(
            GatewayEventType::from_name("GUILD_SCHEDULED_EVENT_USER_REMOVE"),
            GatewayEventType::GuildScheduledEventUserRemove,
        );
        assert_eq!(GatewayEventType::AutoModerationActionExecution.name(),
                   "AUTO_MODERATION_ACTION_EXECUTION");
        assert_eq!(GatewayEventType::GuildEmojisUpdate.to_string(), "GUILD_EMOJIS_UPDATE");

        let unknown = GatewayEventType::from_name("SOMETHING_NEW");
        assert_eq!(unknown, GatewayEventType::Unknown("SOMETHING_NEW".to_string()));
        assert_eq!(unknown.name(), "SOMETHING_NEW");
        assert_eq!(unknown.to_string(), "SOMETHING_NEW");
        assert!(GatewayEventType::from_str("Unknown").is_err());
        assert_eq!(GatewayEventType::VoiceServerUpdate.as_ref(), "VOICE_SERVER_UPDATE");
        assert!(unknown.required_intents().is_empty());
    }

    #[test]
    fn event_type_serde() {
        let ty: GatewayEventType = serde_json::from_str("\"TYPING_START\"").unwrap();
        assert_eq!(ty, GatewayEventType::TypingStart);
        let ty: GatewayEventType = serde_json::from_str("\"NOPE\"").unwrap();
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"NOPE\"");
    }

    #[test]
    fn dual_scope_requirements() {
        let groups = GatewayEventType::TypingStart.required_intents();
        assert_eq!(groups, vec![
            EnumSet::only(Intent::GuildMessageTyping),
            EnumSet::only(Intent::DmMessageTyping),
        ]);
        assert_eq!(GatewayEventType::GuildMemberAdd.required_intents(),
                   vec![EnumSet::only(Intent::GuildMembers)]);
    }
}
