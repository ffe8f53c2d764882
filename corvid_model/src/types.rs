//! Basic types common to all payloads.

use chrono::{DateTime, Utc};
use crate::serde::*;
use crate::time;
use std::fmt;
use std::str::FromStr;

/// An untyped Discord snowflake used for IDs and some related things.
///
/// The upper 42 bits hold the number of milliseconds since the Discord epoch (see
/// [`time::DISCORD_EPOCH_MILLIS`]). The remaining bits are opaque.
#[derive(Serialize, Deserialize, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
#[serde(transparent)]
pub struct Snowflake(#[serde(with = "utils::snowflake")] pub u64);
impl fmt::Debug for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
impl FromStr for Snowflake {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Snowflake)
    }
}
impl Snowflake {
    /// Creates the smallest snowflake that could have been generated at the given time.
    ///
    /// Useful for pagination parameters. Times before the Discord epoch clamp to zero.
    pub fn from_datetime(at: DateTime<Utc>) -> Snowflake {
        let millis = time::datetime_to_discord_epoch(at).max(0) as u64;
        Snowflake((millis & 0x3FF_FFFF_FFFF) << 22)
    }

    /// Retrieves the raw timestamp component of this snowflake, in milliseconds since the
    /// Discord epoch.
    pub fn timestamp_raw(self) -> u64 {
        self.0 >> 22
    }

    /// Retrieves the time at which this snowflake was generated.
    pub fn created_at(self) -> DateTime<Utc> {
        time::discord_epoch_to_datetime(self.timestamp_raw() as i64)
    }
}
impl From<u64> for Snowflake {
    fn from(i: u64) -> Self {
        Snowflake(i)
    }
}
impl From<Snowflake> for u64 {
    fn from(i: Snowflake) -> Self {
        i.0
    }
}

macro_rules! id_structs {
    ($($(#[$meta:meta])* $name:ident;)*) => {$(
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
        #[serde(transparent)]
        pub struct $name(pub Snowflake);
        impl $name {
            /// Retrieves the time at which this ID was generated.
            pub fn created_at(self) -> DateTime<Utc> {
                self.0.created_at()
            }
        }
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
        impl From<Snowflake> for $name {
            fn from(s: Snowflake) -> $name {
                $name(s)
            }
        }
        impl From<$name> for Snowflake {
            fn from(id: $name) -> Snowflake {
                id.0
            }
        }
        impl From<u64> for $name {
            fn from(s: u64) -> $name {
                $name(s.into())
            }
        }
        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0.into()
            }
        }
    )*};
}

id_structs! {
    /// An application ID.
    ApplicationId;
    /// An attachment ID.
    AttachmentId;
    /// An audit log entry ID.
    AuditLogEntryId;
    /// An auto-moderation rule ID.
    AutoModRuleId;
    /// A channel ID.
    ChannelId;
    /// An emoji ID.
    EmojiId;
    /// An entitlement ID.
    EntitlementId;
    /// A guild ID.
    GuildId;
    /// An integration ID.
    IntegrationId;
    /// An interaction ID.
    InteractionId;
    /// A message ID.
    MessageId;
    /// A role ID.
    RoleId;
    /// A guild scheduled event ID.
    ScheduledEventId;
    /// A SKU ID.
    SkuId;
    /// A sticker ID.
    StickerId;
    /// An user ID.
    UserId;
    /// A webhook ID.
    WebhookId;
}

/// Identifies a shard, as an index and the total number of shards.
#[derive(Serialize, Deserialize, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub struct ShardId(pub u32, pub u32);
impl ShardId {
    /// Returns the shard that receives events for a guild.
    pub fn for_guild(guild: GuildId, shard_count: u32) -> ShardId {
        let shard_count = shard_count.max(1);
        ShardId((guild.0.timestamp_raw() % shard_count as u64) as u32, shard_count)
    }
    /// Whether this shard receives direct message events.
    pub fn handles_dms(&self) -> bool {
        self.0 == 0
    }
    /// Whether this shard receives events for the given guild.
    pub fn handles_guild(&self, guild: GuildId) -> bool {
        ShardId::for_guild(guild, self.1) == *self
    }
}
impl Default for ShardId {
    fn default() -> Self {
        ShardId(0, 1)
    }
}
impl fmt::Display for ShardId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}/{}", self.0 + 1, self.1)
    }
}

/// A color, as used for roles and embeds.
#[derive(Serialize, Deserialize, Default, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[serde(transparent)]
pub struct Color(pub u32);
impl Color {
    /// Returns the red, green and blue components of this color.
    pub fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn snowflake_timestamp() {
        // 2016-04-30 11:18:25.796 UTC
        let id = Snowflake(175928847299117063);
        assert_eq!(id.timestamp_raw(), 41944705796);
        assert_eq!(id.created_at(), Utc.timestamp_millis_opt(1462015105796).unwrap());
    }

    #[test]
    fn snowflake_from_datetime() {
        let at = Utc.timestamp_millis_opt(1462015105796).unwrap();
        let id = Snowflake::from_datetime(at);
        assert_eq!(id.created_at(), at);
        assert_eq!(id.0 & 0x3FFFFF, 0);
    }

    #[test]
    fn snowflake_parses_strings_and_ints() {
        let a: Snowflake = serde_json::from_str("\"175928847299117063\"").unwrap();
        let b: Snowflake = serde_json::from_str("175928847299117063").unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_str::<Snowflake>("-1").is_err());
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"175928847299117063\"");
    }

    #[test]
    fn guild_sharding() {
        let guild = GuildId::from(175928847299117063);
        let shard = ShardId::for_guild(guild, 4);
        assert_eq!(shard, ShardId((41944705796u64 % 4) as u32, 4));
        assert!(shard.handles_guild(guild));
        assert_eq!(ShardId(0, 2).to_string(), "1/2");
    }
}
