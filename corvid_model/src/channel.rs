//! Types related to Discord channels, threads and invites.

use chrono::{DateTime, Utc};
use crate::guild::{Member, Permissions};
use crate::presence::MemberPresence;
use crate::serde::*;
use crate::types::*;
use crate::user::*;

/// The type of a channel.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum ChannelType {
    GuildText = 0,
    Dm = 1,
    GuildVoice = 2,
    GroupDm = 3,
    GuildCategory = 4,
    GuildNews = 5,
    GuildNewsThread = 10,
    GuildPublicThread = 11,
    GuildPrivateThread = 12,
    GuildStageVoice = 13,
    GuildDirectory = 14,
    GuildForum = 15,
    GuildMedia = 16,
    #[serde(other)]
    Unknown = i32::max_value(),
}
impl ChannelType {
    /// Returns `true` for direct message and group DM channels.
    pub fn is_dm(self) -> bool {
        matches!(self, ChannelType::Dm | ChannelType::GroupDm)
    }

    /// Returns `true` for thread channels.
    pub fn is_thread(self) -> bool {
        matches!(
            self,
            ChannelType::GuildNewsThread | ChannelType::GuildPublicThread |
                ChannelType::GuildPrivateThread
        )
    }

    /// Returns `true` for guild channels that are not threads.
    pub fn is_guild_channel(self) -> bool {
        !self.is_dm() && !self.is_thread() && self != ChannelType::Unknown
    }
}

/// The type of a permission overwrite.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum PermissionOverwriteType {
    Role = 0,
    Member = 1,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// A permission overwrite for a role or member in a channel.
#[derive(Serialize, Deserialize, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct PermissionOverwrite {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: PermissionOverwriteType,
    pub allow: Permissions,
    pub deny: Permissions,
}

/// Information specific to thread channels.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct ThreadMetadata {
    pub archived: bool,
    pub auto_archive_duration: u32,
    pub archive_timestamp: DateTime<Utc>,
    pub locked: bool,
    pub invitable: Option<bool>,
    pub create_timestamp: Option<DateTime<Utc>>,
}

/// A member of a thread.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct ThreadMember {
    /// The thread this member is in. Left out of some payloads, in which case it is filled in
    /// from the surrounding payload.
    #[serde(default, rename = "id")]
    pub thread_id: Option<ChannelId>,
    pub user_id: Option<UserId>,
    pub join_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub flags: u64,
}

/// A Discord channel, thread, or direct message channel.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct Channel {
    pub id: ChannelId,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    pub guild_id: Option<GuildId>,
    pub position: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permission_overwrites: Vec<PermissionOverwrite>,
    pub name: Option<String>,
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub nsfw: bool,
    pub last_message_id: Option<MessageId>,
    pub bitrate: Option<u32>,
    pub user_limit: Option<u32>,
    pub rate_limit_per_user: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<User>,
    pub owner_id: Option<UserId>,
    pub parent_id: Option<ChannelId>,
    pub last_pin_timestamp: Option<DateTime<Utc>>,
    pub message_count: Option<u32>,
    pub member_count: Option<u32>,
    pub thread_metadata: Option<ThreadMetadata>,
    /// The current user's membership in this thread, if any.
    pub member: Option<ThreadMember>,
}
into_id!(Channel, ChannelId, id);

/// The target of a voice channel invite.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum InviteTargetType {
    Stream = 1,
    EmbeddedApplication = 2,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// An invite, as sent in `INVITE_CREATE` events.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct InviteWithMetadata {
    pub code: String,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub inviter: Option<User>,
    pub target_type: Option<InviteTargetType>,
    pub target_user: Option<User>,
    #[serde(default)]
    pub uses: u32,
    /// The maximum number of uses, or `0` for unlimited.
    pub max_uses: u32,
    /// How long the invite is valid for in seconds, or `0` if it never expires.
    pub max_age: u32,
    pub temporary: bool,
    pub created_at: DateTime<Utc>,
}
impl InviteWithMetadata {
    /// Returns when this invite expires, if ever.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        if self.max_age == 0 {
            None
        } else {
            Some(self.created_at + chrono::Duration::seconds(self.max_age as i64))
        }
    }
}

/// A member added to a thread, along with guild information about them.
#[derive(Clone, PartialEq, Debug)]
#[non_exhaustive]
pub struct AddedThreadMember {
    pub thread_member: ThreadMember,
    pub member: Option<Member>,
    pub presence: Option<MemberPresence>,
}
impl AddedThreadMember {
    pub fn new(
        thread_member: ThreadMember, member: Option<Member>, presence: Option<MemberPresence>,
    ) -> Self {
        AddedThreadMember { thread_member, member, presence }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_kinds() {
        assert!(ChannelType::Dm.is_dm());
        assert!(ChannelType::GuildPublicThread.is_thread());
        assert!(ChannelType::GuildForum.is_guild_channel());
        assert!(!ChannelType::GroupDm.is_guild_channel());
        let unknown: ChannelType = serde_json::from_str("99").unwrap();
        assert_eq!(unknown, ChannelType::Unknown);
    }

    #[test]
    fn invite_expiry() {
        let invite: InviteWithMetadata = serde_json::from_value(serde_json::json!({
            "code": "abc",
            "channel_id": "1",
            "max_uses": 0,
            "max_age": 60,
            "temporary": false,
            "created_at": "2021-01-01T00:00:00+00:00",
        })).unwrap();
        assert_eq!(invite.expires_at().unwrap().to_rfc3339(), "2021-01-01T00:01:00+00:00");
        assert_eq!(invite.uses, 0);
    }
}
