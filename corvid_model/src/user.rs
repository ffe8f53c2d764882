//! Types related to Discord users.

use crate::serde::*;
use crate::types::*;
use crate::undefined::Undefinable;

/// A Discord user.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub discriminator: String,
    pub global_name: Option<String>,
    pub avatar: Option<String>,
    pub banner: Option<String>,
    pub accent_color: Option<Color>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub bot: bool,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub system: bool,
    #[serde(default, rename = "public_flags", skip_serializing_if = "EnumSet::is_empty")]
    pub flags: EnumSet<UserFlags>,
}
into_id!(User, UserId, id);
impl User {
    /// Returns the name shown for this user, preferring their global display name.
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

/// The user the current session is logged in as.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct OwnUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub mfa_enabled: bool,
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub verified: bool,
    pub email: Option<String>,
    pub premium_type: Option<UserPremiumType>,
}
impl From<OwnUser> for UserId {
    fn from(user: OwnUser) -> UserId {
        user.user.id
    }
}

/// A user where any field other than the ID may have been left out.
///
/// Sent as part of presence updates when some of the user's information changed.
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct PartialUser {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub username: Undefinable<String>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub discriminator: Undefinable<String>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub global_name: Undefinable<String>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub avatar: Undefinable<String>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub banner: Undefinable<String>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub accent_color: Undefinable<Color>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub bot: Undefinable<bool>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub system: Undefinable<bool>,
    #[serde(default, rename = "public_flags", skip_serializing_if = "Undefinable::is_unchanged")]
    pub flags: Undefinable<EnumSet<UserFlags>>,
}
into_id!(PartialUser, UserId, id);
impl PartialUser {
    /// Creates a partial user where every field but the ID is unchanged.
    pub fn new(id: UserId) -> Self {
        PartialUser { id, ..Default::default() }
    }

    /// Applies the changed fields of this partial user to a full user.
    pub fn apply_to(&self, user: &mut User) {
        if let Undefinable::Value(v) = &self.username {
            user.username = v.clone();
        }
        if let Undefinable::Value(v) = &self.discriminator {
            user.discriminator = v.clone();
        }
        self.global_name.clone().apply_to(&mut user.global_name);
        self.avatar.clone().apply_to(&mut user.avatar);
        self.banner.clone().apply_to(&mut user.banner);
        self.accent_color.apply_to(&mut user.accent_color);
        if let Undefinable::Value(v) = self.bot {
            user.bot = v;
        }
        if let Undefinable::Value(v) = self.system {
            user.system = v;
        }
        if let Undefinable::Value(v) = self.flags {
            user.flags = v;
        }
    }
}

/// The public flags on an user's account.
#[derive(EnumSetType, Ord, PartialOrd, Debug, Hash)]
#[enumset(serialize_repr = "u64")]
pub enum UserFlags {
    DiscordEmployee = 0,
    DiscordPartner = 1,
    HypeSquadEvents = 2,
    BugHunter = 3,
    HouseBravery = 6,
    HouseBrilliance = 7,
    HouseBalance = 8,
    EarlySupporter = 9,
    TeamUser = 10,
    BugHunterLevel2 = 14,
    VerifiedBot = 16,
    VerifiedDeveloper = 17,
    CertifiedModerator = 18,
    BotHttpInteractions = 19,
    ActiveDeveloper = 22,
}

/// The kind of Nitro subscription a user has.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum UserPremiumType {
    None = 0,
    NitroClassic = 1,
    Nitro = 2,
    NitroBasic = 3,
    #[serde(other)]
    Unknown = i32::max_value(),
}
