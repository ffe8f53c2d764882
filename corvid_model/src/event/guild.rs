use crate::audit_log::AuditLogEntry;
use crate::guild::*;
use crate::presence::MemberPresence;
use crate::types::*;
use crate::user::{PartialUser, User};
use std::collections::BTreeMap;

/// A `Guild Create` event for a guild that was already joined, but was unavailable.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildAvailableEvent {
    pub shard: ShardId,
    pub guild: GatewayGuild,
}

/// A `Guild Create` event for a guild the bot just joined.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildJoinEvent {
    pub shard: ShardId,
    pub guild: GatewayGuild,
}

/// A `Guild Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildUpdateEvent {
    pub shard: ShardId,
    pub guild: GatewayGuild,
}

/// A `Guild Delete` event for a guild the bot was removed from.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildLeaveEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
}

/// A `Guild Delete` event for a guild that became unavailable due to an outage.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildUnavailableEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
}

/// A `Guild Ban Add` event.
#[derive(Clone, PartialEq, Debug)]
pub struct BanCreateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    /// The user that was banned.
    pub user: User,
}

/// A `Guild Ban Remove` event.
#[derive(Clone, PartialEq, Debug)]
pub struct BanDeleteEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    /// The user that was unbanned.
    pub user: User,
}

/// A `Guild Emojis Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct EmojisUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    /// The full new list of the guild's emojis.
    pub emojis: Vec<KnownCustomEmoji>,
}

/// A `Guild Stickers Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct StickersUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    /// The full new list of the guild's stickers.
    pub stickers: Vec<GuildSticker>,
}

/// A `Guild Integrations Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct IntegrationsUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
}

/// An `Integration Create` event.
#[derive(Clone, PartialEq, Debug)]
pub struct IntegrationCreateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub integration: Integration,
}

/// An `Integration Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct IntegrationUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub integration: Integration,
}

/// An `Integration Delete` event.
#[derive(Clone, PartialEq, Debug)]
pub struct IntegrationDeleteEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub id: IntegrationId,
    /// The bot or OAuth2 application the integration belonged to, if any.
    pub application_id: Option<ApplicationId>,
}

/// A `Presence Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct PresenceUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub presence: MemberPresence,
    /// Changes to the user, if the payload contained any besides its ID.
    pub user: Option<PartialUser>,
}
impl PresenceUpdateEvent {
    /// The user whose presence changed.
    pub fn user_id(&self) -> UserId {
        self.presence.user_id
    }
}

/// A `Guild Audit Log Entry Create` event.
#[derive(Clone, PartialEq, Debug)]
pub struct AuditLogEntryCreateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub entry: AuditLogEntry,
}

/// A `Guild Member Add` event.
#[derive(Clone, PartialEq, Debug)]
pub struct MemberCreateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub member: Member,
}

/// A `Guild Member Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct MemberUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    /// The member's new state.
    pub member: Member,
}

/// A `Guild Member Remove` event.
#[derive(Clone, PartialEq, Debug)]
pub struct MemberDeleteEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    /// The user that left or was removed.
    pub user: User,
}

/// A `Guild Members Chunk` event, sent in response to a member request.
#[derive(Clone, PartialEq, Debug)]
pub struct MemberChunkEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub members: BTreeMap<UserId, Member>,
    pub chunk_index: u32,
    pub chunk_count: u32,
    /// IDs passed in the request that did not match a member.
    pub not_found: Vec<UserId>,
    /// Presences of the returned members, if they were requested.
    pub presences: BTreeMap<UserId, MemberPresence>,
    pub nonce: Option<String>,
}

/// A `Guild Role Create` event.
#[derive(Clone, PartialEq, Debug)]
pub struct RoleCreateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub role: Role,
}

/// A `Guild Role Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct RoleUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub role: Role,
}

/// A `Guild Role Delete` event.
#[derive(Clone, PartialEq, Debug)]
pub struct RoleDeleteEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub role_id: RoleId,
}

shard_event!(
    GuildAvailableEvent, GuildJoinEvent, GuildUpdateEvent, GuildLeaveEvent, GuildUnavailableEvent,
    BanCreateEvent, BanDeleteEvent, EmojisUpdateEvent, StickersUpdateEvent,
    IntegrationsUpdateEvent, IntegrationCreateEvent, IntegrationUpdateEvent,
    IntegrationDeleteEvent, PresenceUpdateEvent, AuditLogEntryCreateEvent,
    MemberCreateEvent, MemberUpdateEvent, MemberDeleteEvent, MemberChunkEvent,
    RoleCreateEvent, RoleUpdateEvent, RoleDeleteEvent,
);
guild_event!(
    GuildAvailableEvent => guild.id,
    GuildJoinEvent => guild.id,
    GuildUpdateEvent => guild.id,
    GuildLeaveEvent => guild_id,
    GuildUnavailableEvent => guild_id,
    BanCreateEvent => guild_id,
    BanDeleteEvent => guild_id,
    EmojisUpdateEvent => guild_id,
    StickersUpdateEvent => guild_id,
    IntegrationsUpdateEvent => guild_id,
    IntegrationCreateEvent => guild_id,
    IntegrationUpdateEvent => guild_id,
    IntegrationDeleteEvent => guild_id,
    PresenceUpdateEvent => guild_id,
    AuditLogEntryCreateEvent => guild_id,
    MemberCreateEvent => guild_id,
    MemberUpdateEvent => guild_id,
    MemberDeleteEvent => guild_id,
    MemberChunkEvent => guild_id,
    RoleCreateEvent => guild_id,
    RoleUpdateEvent => guild_id,
    RoleDeleteEvent => guild_id,
);
