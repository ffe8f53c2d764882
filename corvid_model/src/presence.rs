//! Types related to user presences.

use crate::serde::*;
use crate::types::*;

/// The online status of an user.
#[derive(Serialize, Deserialize, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Status {
    Online,
    #[serde(rename = "dnd")]
    DoNotDisturb,
    Idle,
    Invisible,
    Offline,
}
impl Default for Status {
    fn default() -> Self {
        Status::Offline
    }
}

/// The type of an activity.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum ActivityType {
    Playing = 0,
    Streaming = 1,
    Listening = 2,
    Watching = 3,
    Custom = 4,
    Competing = 5,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// An activity shown in a user's presence.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct Activity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub url: Option<String>,
    pub state: Option<String>,
    pub details: Option<String>,
    pub application_id: Option<ApplicationId>,
    pub created_at: Option<u64>,
}

/// The status of an user on each kind of client.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct ClientStatus {
    pub desktop: Option<Status>,
    pub mobile: Option<Status>,
    pub web: Option<Status>,
}

#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
struct PresenceUser {
    id: UserId,
}

/// The presence of a guild member.
///
/// The user fields of a presence update are handled separately, see
/// [`PartialUser`](crate::user::PartialUser).
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct MemberPresence {
    pub user_id: UserId,
    /// The guild this presence is in. Filled in from the surrounding payload if needed.
    pub guild_id: Option<GuildId>,
    pub status: Status,
    pub activities: Vec<Activity>,
    pub client_status: ClientStatus,
}
into_id!(MemberPresence, UserId, user_id);

#[derive(Serialize, Deserialize)]
struct RawMemberPresence {
    user: PresenceUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    guild_id: Option<GuildId>,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    activities: Vec<Activity>,
    #[serde(default)]
    client_status: ClientStatus,
}

impl Serialize for MemberPresence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawMemberPresence {
            user: PresenceUser { id: self.user_id },
            guild_id: self.guild_id,
            status: self.status,
            activities: self.activities.clone(),
            client_status: self.client_status,
        }.serialize(serializer)
    }
}
impl <'de> Deserialize<'de> for MemberPresence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawMemberPresence::deserialize(deserializer)?;
        Ok(MemberPresence {
            user_id: raw.user.id,
            guild_id: raw.guild_id,
            status: raw.status,
            activities: raw.activities,
            client_status: raw.client_status,
        })
    }
}
