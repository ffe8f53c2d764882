//! Types related to guild scheduled events.

use chrono::{DateTime, Utc};
use crate::serde::*;
use crate::types::*;
use crate::user::User;

/// Where a scheduled event takes place.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum ScheduledEventType {
    StageInstance = 1,
    Voice = 2,
    External = 3,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// The lifecycle state of a scheduled event.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum ScheduledEventStatus {
    Scheduled = 1,
    Active = 2,
    Completed = 3,
    Canceled = 4,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// Extra information about an external scheduled event.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct ScheduledEventMetadata {
    pub location: Option<String>,
}

/// A scheduled event in a guild.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct ScheduledEvent {
    pub id: ScheduledEventId,
    pub guild_id: GuildId,
    pub channel_id: Option<ChannelId>,
    pub creator_id: Option<UserId>,
    pub name: String,
    pub description: Option<String>,
    pub scheduled_start_time: DateTime<Utc>,
    pub scheduled_end_time: Option<DateTime<Utc>>,
    pub status: ScheduledEventStatus,
    pub entity_type: ScheduledEventType,
    pub entity_id: Option<Snowflake>,
    pub entity_metadata: Option<ScheduledEventMetadata>,
    pub creator: Option<User>,
    pub user_count: Option<u64>,
    pub image: Option<String>,
}
into_id!(ScheduledEvent, ScheduledEventId, id);
