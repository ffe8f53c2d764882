use chrono::{DateTime, Utc};
use crate::channel::*;
use crate::types::*;
use std::collections::BTreeMap;

/// A `Channel Create` event for a guild channel.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildChannelCreateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    /// The channel that was created.
    pub channel: Channel,
}

/// A `Channel Update` event for a guild channel.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildChannelUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    /// The channel's new state.
    pub channel: Channel,
}

/// A `Channel Delete` event for a guild channel.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildChannelDeleteEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    /// The channel that was deleted.
    pub channel: Channel,
}

/// A `Channel Pins Update` event in a guild channel.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildPinsUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    /// When the most recent pinned message was pinned, if any message is still pinned.
    pub last_pin_timestamp: Option<DateTime<Utc>>,
}

/// A `Channel Pins Update` event in a direct message channel.
#[derive(Clone, PartialEq, Debug)]
pub struct DmPinsUpdateEvent {
    pub shard: ShardId,
    pub channel_id: ChannelId,
    pub last_pin_timestamp: Option<DateTime<Utc>>,
}

/// A `Thread Create` event for a thread that was just created.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildThreadCreateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub thread: Channel,
}

/// A `Thread Create` event for an existing thread the bot was given access to.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildThreadAccessEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub thread: Channel,
}

/// A `Thread Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildThreadUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub thread: Channel,
}

/// A `Thread Delete` event.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildThreadDeleteEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub thread_id: ChannelId,
    pub parent_id: Option<ChannelId>,
    pub kind: ChannelType,
}

/// A `Thread Member Update` event, sent when the bot's own thread membership changes.
#[derive(Clone, PartialEq, Debug)]
pub struct ThreadMemberUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub thread_member: ThreadMember,
}

/// A `Thread Members Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct ThreadMembersUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub thread_id: ChannelId,
    /// The approximate number of members in the thread, capped at 50.
    pub member_count: u32,
    pub added_members: BTreeMap<UserId, AddedThreadMember>,
    pub removed_member_ids: Vec<UserId>,
}

/// A `Thread List Sync` event.
#[derive(Clone, PartialEq, Debug)]
pub struct ThreadListSyncEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    /// The parent channels being synced.
    ///
    /// `None` means every channel in the guild is being synced. An empty list means no channels
    /// are.
    pub channel_ids: Option<Vec<ChannelId>>,
    pub threads: BTreeMap<ChannelId, Channel>,
    /// The bot's membership in the synced threads, keyed by thread.
    pub members: BTreeMap<ChannelId, ThreadMember>,
}

/// A `Webhooks Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct WebhooksUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
}

/// An `Invite Create` event.
#[derive(Clone, PartialEq, Debug)]
pub struct InviteCreateEvent {
    pub shard: ShardId,
    pub invite: InviteWithMetadata,
}

/// An `Invite Delete` event.
#[derive(Clone, PartialEq, Debug)]
pub struct InviteDeleteEvent {
    pub shard: ShardId,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub code: String,
}

shard_event!(
    GuildChannelCreateEvent, GuildChannelUpdateEvent, GuildChannelDeleteEvent,
    GuildPinsUpdateEvent, DmPinsUpdateEvent,
    GuildThreadCreateEvent, GuildThreadAccessEvent, GuildThreadUpdateEvent, GuildThreadDeleteEvent,
    ThreadMemberUpdateEvent, ThreadMembersUpdateEvent, ThreadListSyncEvent,
    WebhooksUpdateEvent, InviteCreateEvent, InviteDeleteEvent,
);
guild_event!(
    GuildChannelCreateEvent => guild_id,
    GuildChannelUpdateEvent => guild_id,
    GuildChannelDeleteEvent => guild_id,
    GuildPinsUpdateEvent => guild_id,
    GuildThreadCreateEvent => guild_id,
    GuildThreadAccessEvent => guild_id,
    GuildThreadUpdateEvent => guild_id,
    GuildThreadDeleteEvent => guild_id,
    ThreadMemberUpdateEvent => guild_id,
    ThreadMembersUpdateEvent => guild_id,
    ThreadListSyncEvent => guild_id,
    WebhooksUpdateEvent => guild_id,
);
channel_event!(
    GuildChannelCreateEvent => channel.id,
    GuildChannelUpdateEvent => channel.id,
    GuildChannelDeleteEvent => channel.id,
    GuildPinsUpdateEvent => channel_id,
    DmPinsUpdateEvent => channel_id,
    GuildThreadCreateEvent => thread.id,
    GuildThreadAccessEvent => thread.id,
    GuildThreadUpdateEvent => thread.id,
    GuildThreadDeleteEvent => thread_id,
    ThreadMembersUpdateEvent => thread_id,
    WebhooksUpdateEvent => channel_id,
    InviteCreateEvent => invite.channel_id,
    InviteDeleteEvent => channel_id,
);
