//! Types related to Discord guilds.

use chrono::{DateTime, Utc};
use crate::channel::*;
use crate::emoji::*;
use crate::presence::*;
use crate::serde::*;
use crate::types::*;
use crate::user::*;
use crate::voice::*;

/// Represents an unavailable guild.
#[derive(Serialize, Deserialize, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct UnavailableGuild {
    pub id: GuildId,
    #[serde(default)]
    pub unavailable: bool,
}
into_id!(UnavailableGuild, GuildId, id);

/// The verification requirements of a guild.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum VerificationLevel {
    /// This guild has no restrictions.
    None = 0,
    /// This guild requires a verified email address.
    Low = 1,
    /// This guild requires users to be registered for longer than 5 minutes.
    Medium = 2,
    /// This guild requires users to have been a member for longer than 10 minutes.
    High = 3,
    /// This guild requires a verified phone number.
    VeryHigh = 4,
    /// An unknown verification level was set.
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// The default nofification settings for a server.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum NotificationLevel {
    /// This guild creates notifications on all messages.
    AllMessages = 0,
    /// This guild creates notifications only on mentions.
    OnlyMentions = 1,
    /// An unknown notification level was set.
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// The explicit content filter settings for a server.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum ExplicitContentFilterLevel {
    Disabled = 0,
    MembersWithoutRoles = 1,
    AllMembers = 2,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// The level of multi-factor authentication required on this server for moderators.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum MfaLevel {
    None = 0,
    Elevated = 1,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// The booster level of this guild.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum PremiumTier {
    None = 0,
    Tier1 = 1,
    Tier2 = 2,
    Tier3 = 3,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// A permission bitset, as used by roles and channel overwrites.
#[derive(Serialize, Deserialize, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[serde(transparent)]
pub struct Permissions(#[serde(with = "utils::stringly_u64")] pub u64);
impl Permissions {
    /// The bit granting every permission.
    pub const ADMINISTRATOR: Permissions = Permissions(1 << 3);

    /// Returns `true` if every bit in `other` is set in this bitset.
    pub fn contains(self, other: Permissions) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Information related to a Discord role.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct Role {
    pub id: RoleId,
    /// The guild this role belongs to. Filled in from the surrounding payload.
    pub guild_id: Option<GuildId>,
    pub name: String,
    pub color: Color,
    pub hoist: bool,
    pub icon: Option<String>,
    pub unicode_emoji: Option<String>,
    pub position: i64,
    pub permissions: Permissions,
    pub managed: bool,
    pub mentionable: bool,
}
into_id!(Role, RoleId, id);

/// A custom emoji that belongs to a guild.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct KnownCustomEmoji {
    pub id: EmojiId,
    /// The guild this emoji belongs to. Filled in from the surrounding payload.
    pub guild_id: Option<GuildId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleId>,
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub require_colons: bool,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub managed: bool,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub animated: bool,
    #[serde(default = "default_true")]
    pub available: bool,
}
into_id!(KnownCustomEmoji, EmojiId, id);
impl KnownCustomEmoji {
    /// Returns a reference to this emoji, as used in reactions.
    pub fn as_emoji(&self) -> Emoji {
        Emoji::Custom(CustomEmoji { id: self.id, name: Some(self.name.clone()), animated: self.animated })
    }
}

fn default_true() -> bool {
    true
}

/// Information related to a member in a Discord guild.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct Member {
    pub user: User,
    /// The guild this member belongs to. Filled in from the surrounding payload.
    pub guild_id: Option<GuildId>,
    pub nick: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    pub joined_at: Option<DateTime<Utc>>,
    pub premium_since: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub deaf: bool,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub mute: bool,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub pending: bool,
    pub communication_disabled_until: Option<DateTime<Utc>>,
}
impl Member {
    /// Returns the name shown for this member in the guild.
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or_else(|| self.user.display_name())
    }
}
impl From<&Member> for UserId {
    fn from(member: &Member) -> UserId {
        member.user.id
    }
}

/// The file format of a sticker.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum StickerFormatType {
    Png = 1,
    Apng = 2,
    Lottie = 3,
    Gif = 4,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// A sticker uploaded to a guild.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct GuildSticker {
    pub id: StickerId,
    pub guild_id: Option<GuildId>,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: String,
    pub format_type: StickerFormatType,
    #[serde(default = "default_true")]
    pub available: bool,
    pub user: Option<User>,
}
into_id!(GuildSticker, StickerId, id);

/// The account an integration is linked to.
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct IntegrationAccount {
    pub id: String,
    pub name: String,
}

/// The application a bot integration belongs to.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct IntegrationApplication {
    pub id: ApplicationId,
    pub name: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub description: String,
    pub bot: Option<User>,
}

/// A guild integration.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct Integration {
    pub id: IntegrationId,
    pub guild_id: Option<GuildId>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub enabled: bool,
    pub syncing: Option<bool>,
    pub role_id: Option<RoleId>,
    pub user: Option<User>,
    pub account: IntegrationAccount,
    pub synced_at: Option<DateTime<Utc>>,
    pub subscriber_count: Option<u64>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub revoked: bool,
    pub application: Option<IntegrationApplication>,
}
into_id!(Integration, IntegrationId, id);

/// A guild, as sent in `GUILD_CREATE` and `GUILD_UPDATE` events.
///
/// The collections at the end of this struct are only sent in `GUILD_CREATE`.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[non_exhaustive]
pub struct GatewayGuild {
    pub id: GuildId,
    pub name: String,
    pub icon: Option<String>,
    pub splash: Option<String>,
    pub discovery_splash: Option<String>,
    pub owner_id: UserId,
    pub afk_channel_id: Option<ChannelId>,
    #[serde(default)]
    pub afk_timeout: u64,
    pub verification_level: VerificationLevel,
    pub default_message_notifications: NotificationLevel,
    pub explicit_content_filter: ExplicitContentFilterLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    pub mfa_level: MfaLevel,
    pub application_id: Option<ApplicationId>,
    pub system_channel_id: Option<ChannelId>,
    pub rules_channel_id: Option<ChannelId>,
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub large: bool,
    pub member_count: Option<u64>,
    pub vanity_url_code: Option<String>,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub premium_tier: Option<PremiumTier>,
    pub premium_subscription_count: Option<u64>,
    pub preferred_locale: Option<String>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub nsfw: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emojis: Vec<KnownCustomEmoji>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stickers: Vec<GuildSticker>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threads: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presences: Vec<MemberPresence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub voice_states: Vec<VoiceState>,
}
into_id!(GatewayGuild, GuildId, id);
impl GatewayGuild {
    /// Gets the @everyone role for this guild.
    pub fn everyone_role(&self) -> RoleId {
        RoleId(self.id.0)
    }

    /// Fills in the guild ID of every nested entity that Discord leaves it out of.
    pub fn fill_guild_ids(&mut self) {
        let id = Some(self.id);
        for role in &mut self.roles {
            role.guild_id = id;
        }
        for emoji in &mut self.emojis {
            emoji.guild_id = id;
        }
        for sticker in &mut self.stickers {
            sticker.guild_id = id;
        }
        for channel in self.channels.iter_mut().chain(self.threads.iter_mut()) {
            channel.guild_id = id;
        }
        for member in &mut self.members {
            member.guild_id = id;
        }
        for presence in &mut self.presences {
            presence.guild_id = id;
        }
        for state in &mut self.voice_states {
            state.guild_id = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_role() {
        let role: Role = serde_json::from_value(serde_json::json!({
            "id": "41771983423143936",
            "name": "WE DEM BOYZZ!!!!!!",
            "color": 3447003,
            "hoist": true,
            "icon": null,
            "position": 1,
            "permissions": "66321471",
            "managed": false,
            "mentionable": false,
        })).unwrap();
        assert_eq!(role.permissions, Permissions(66321471));
        assert!(role.permissions.contains(Permissions::ADMINISTRATOR));
        assert_eq!(role.color.rgb(), (0x34, 0x98, 0xdb));
        assert_eq!(role.guild_id, None);
    }

    #[test]
    fn member_display_name() {
        let member: Member = serde_json::from_value(serde_json::json!({
            "user": { "id": "1", "username": "name", "global_name": "Global" },
            "roles": [],
            "joined_at": "2015-04-26T06:26:56.936000+00:00",
        })).unwrap();
        assert_eq!(member.display_name(), "Global");
        assert!(!member.deaf);
    }
}
