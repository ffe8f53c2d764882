//! Types related to auto-moderation rules.

use crate::serde::*;
use crate::types::*;

/// What causes an auto-moderation rule to trigger.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum AutoModTriggerType {
    Keyword = 1,
    Spam = 3,
    KeywordPreset = 4,
    MentionSpam = 5,
    MemberProfile = 6,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// When an auto-moderation rule is checked.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum AutoModEventType {
    MessageSend = 1,
    MemberUpdate = 2,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// The type of action taken by an auto-moderation rule.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum AutoModActionType {
    BlockMessage = 1,
    SendAlertMessage = 2,
    Timeout = 3,
    BlockMemberInteraction = 4,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// Extra information about an auto-moderation action.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Default, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct AutoModActionMetadata {
    pub channel_id: Option<ChannelId>,
    pub duration_seconds: Option<u64>,
    pub custom_message: Option<String>,
}

/// An action taken when an auto-moderation rule triggers.
#[derive(Serialize, Deserialize, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct AutoModAction {
    #[serde(rename = "type")]
    pub kind: AutoModActionType,
    #[serde(default)]
    pub metadata: AutoModActionMetadata,
}

/// An auto-moderation rule.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[non_exhaustive]
pub struct AutoModRule {
    pub id: AutoModRuleId,
    pub guild_id: GuildId,
    pub name: String,
    pub creator_id: UserId,
    pub event_type: AutoModEventType,
    pub trigger_type: AutoModTriggerType,
    /// Trigger-specific settings, kept in their raw form.
    #[serde(default)]
    pub trigger_metadata: JsonValue,
    pub actions: Vec<AutoModAction>,
    pub enabled: bool,
    #[serde(default)]
    pub exempt_roles: Vec<RoleId>,
    #[serde(default)]
    pub exempt_channels: Vec<ChannelId>,
}
into_id!(AutoModRule, AutoModRuleId, id);
