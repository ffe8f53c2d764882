use crate::auto_mod::*;
use crate::interaction::Interaction;
use crate::monetization::Entitlement;
use crate::scheduled_event::ScheduledEvent;
use crate::types::*;

/// An `Interaction Create` event.
///
/// Interactions are delivered as different [`GatewayEvent`](crate::event::GatewayEvent)
/// variants depending on their type.
#[derive(Clone, PartialEq, Debug)]
pub struct InteractionCreateEvent {
    pub shard: ShardId,
    pub interaction: Interaction,
}

/// A `Guild Scheduled Event Create` event.
#[derive(Clone, PartialEq, Debug)]
pub struct ScheduledEventCreateEvent {
    pub shard: ShardId,
    pub event: ScheduledEvent,
}

/// A `Guild Scheduled Event Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct ScheduledEventUpdateEvent {
    pub shard: ShardId,
    pub event: ScheduledEvent,
}

/// A `Guild Scheduled Event Delete` event.
#[derive(Clone, PartialEq, Debug)]
pub struct ScheduledEventDeleteEvent {
    pub shard: ShardId,
    pub event: ScheduledEvent,
}

/// A `Guild Scheduled Event User Add` event.
#[derive(Clone, PartialEq, Debug)]
pub struct ScheduledEventUserAddEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub event_id: ScheduledEventId,
    pub user_id: UserId,
}

/// A `Guild Scheduled Event User Remove` event.
#[derive(Clone, PartialEq, Debug)]
pub struct ScheduledEventUserRemoveEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub event_id: ScheduledEventId,
    pub user_id: UserId,
}

/// An `Auto Moderation Rule Create` event.
#[derive(Clone, PartialEq, Debug)]
pub struct AutoModRuleCreateEvent {
    pub shard: ShardId,
    pub rule: AutoModRule,
}

/// An `Auto Moderation Rule Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct AutoModRuleUpdateEvent {
    pub shard: ShardId,
    pub rule: AutoModRule,
}

/// An `Auto Moderation Rule Delete` event.
#[derive(Clone, PartialEq, Debug)]
pub struct AutoModRuleDeleteEvent {
    pub shard: ShardId,
    pub rule: AutoModRule,
}

/// An `Auto Moderation Action Execution` event.
#[derive(Clone, PartialEq, Debug)]
pub struct AutoModActionExecutionEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub action: AutoModAction,
    pub rule_id: AutoModRuleId,
    pub rule_trigger_type: AutoModTriggerType,
    pub user_id: UserId,
    pub channel_id: Option<ChannelId>,
    pub message_id: Option<MessageId>,
    pub alert_system_message_id: Option<MessageId>,
    /// The content that triggered the rule.
    ///
    /// This is `None` without the `MESSAGE_CONTENT` intent.
    pub content: Option<String>,
    pub matched_keyword: Option<String>,
    pub matched_content: Option<String>,
}

/// An `Entitlement Create` event.
#[derive(Clone, PartialEq, Debug)]
pub struct EntitlementCreateEvent {
    pub shard: ShardId,
    pub entitlement: Entitlement,
}

/// An `Entitlement Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct EntitlementUpdateEvent {
    pub shard: ShardId,
    pub entitlement: Entitlement,
}

/// An `Entitlement Delete` event.
#[derive(Clone, PartialEq, Debug)]
pub struct EntitlementDeleteEvent {
    pub shard: ShardId,
    pub entitlement: Entitlement,
}

shard_event!(
    InteractionCreateEvent,
    ScheduledEventCreateEvent, ScheduledEventUpdateEvent, ScheduledEventDeleteEvent,
    ScheduledEventUserAddEvent, ScheduledEventUserRemoveEvent,
    AutoModRuleCreateEvent, AutoModRuleUpdateEvent, AutoModRuleDeleteEvent,
    AutoModActionExecutionEvent,
    EntitlementCreateEvent, EntitlementUpdateEvent, EntitlementDeleteEvent,
);
guild_event!(
    ScheduledEventCreateEvent => event.guild_id,
    ScheduledEventUpdateEvent => event.guild_id,
    ScheduledEventDeleteEvent => event.guild_id,
    ScheduledEventUserAddEvent => guild_id,
    ScheduledEventUserRemoveEvent => guild_id,
    AutoModRuleCreateEvent => rule.guild_id,
    AutoModRuleUpdateEvent => rule.guild_id,
    AutoModRuleDeleteEvent => rule.guild_id,
    AutoModActionExecutionEvent => guild_id,
);
