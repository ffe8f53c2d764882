//! Types related to Discord messages.

use chrono::{DateTime, Utc};
use crate::embed::Embed;
use crate::emoji::Emoji;
use crate::serde::*;
use crate::types::*;
use crate::undefined::Undefinable;
use crate::user::*;

/// An attachment to a message.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct Attachment {
    pub id: AttachmentId,
    pub filename: String,
    pub content_type: Option<String>,
    pub size: u64,
    pub url: String,
    pub proxy_url: String,
    pub height: Option<u64>,
    pub width: Option<u64>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub ephemeral: bool,
}

/// An reaction attached to a message.
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct Reaction {
    pub count: u32,
    pub me: bool,
    pub emoji: Emoji,
}

/// The type of a message.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum MessageType {
    Default = 0,
    RecipientAdd = 1,
    RecipientRemove = 2,
    Call = 3,
    ChannelNameChange = 4,
    ChannelIconChange = 5,
    ChannelPinnedMessage = 6,
    GuildMemberJoin = 7,
    UserPremiumGuildSubscription = 8,
    UserPremiumGuildSubscriptionTier1 = 9,
    UserPremiumGuildSubscriptionTier2 = 10,
    UserPremiumGuildSubscriptionTier3 = 11,
    ChannelFollowAdd = 12,
    GuildDiscoveryDisqualified = 14,
    GuildDiscoveryRequalified = 15,
    ThreadCreated = 18,
    Reply = 19,
    ChatInputCommand = 20,
    ThreadStarterMessage = 21,
    ContextMenuCommand = 23,
    AutoModerationAction = 24,
    #[serde(other)]
    Unknown = i32::max_value(),
}
impl Default for MessageType {
    fn default() -> Self {
        MessageType::Default
    }
}

/// A flag that may be set on a message.
#[derive(EnumSetType, Ord, PartialOrd, Debug, Hash)]
#[enumset(serialize_repr = "u64")]
#[non_exhaustive]
pub enum MessageFlag {
    Crossposted = 0,
    IsCrosspost = 1,
    SuppressEmbeds = 2,
    SourceMessageDeleted = 3,
    Urgent = 4,
    HasThread = 5,
    Ephemeral = 6,
    Loading = 7,
    FailedToMentionSomeRolesInThread = 8,
    SuppressNotifications = 12,
    IsVoiceMessage = 13,
}

/// The origin of a crossposted message or reply.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct MessageReference {
    pub message_id: Option<MessageId>,
    pub channel_id: Option<ChannelId>,
    pub guild_id: Option<GuildId>,
}

/// Guild-specific information about the author of a message. Does not contain the user.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct MessageMember {
    pub nick: Option<String>,
    pub avatar: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    pub joined_at: Option<DateTime<Utc>>,
    pub premium_since: Option<DateTime<Utc>>,
}

/// A sticker sent in a message.
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct StickerItem {
    pub id: StickerId,
    pub name: String,
}

/// A message sent in a channel.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct Message {
    pub id: MessageId,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub author: User,
    pub member: Option<MessageMember>,
    #[serde(default)]
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub tts: bool,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub mention_everyone: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<User>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mention_roles: Vec<RoleId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Reaction>,
    #[serde(default, skip_serializing_if = "utils::if_false")]
    pub pinned: bool,
    pub webhook_id: Option<WebhookId>,
    #[serde(rename = "type", default)]
    pub kind: MessageType,
    pub application_id: Option<ApplicationId>,
    pub message_reference: Option<MessageReference>,
    #[serde(default, skip_serializing_if = "EnumSet::is_empty")]
    pub flags: EnumSet<MessageFlag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sticker_items: Vec<StickerItem>,
}
into_id!(Message, MessageId, id);
impl Message {
    /// Returns `true` if this message was sent by a webhook.
    pub fn is_webhook(&self) -> bool {
        self.webhook_id.is_some()
    }

    /// Returns `true` if this message was likely sent by a human.
    ///
    /// This is a heuristic: a message is considered human if its author is not a bot and it was
    /// not sent through a webhook.
    pub fn is_human(&self) -> bool {
        !self.author.bot && !self.is_webhook()
    }
}

/// A message where any field other than the message and channel IDs may be left out, as sent in
/// `MESSAGE_UPDATE` events.
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct PartialMessage {
    pub id: MessageId,
    pub channel_id: ChannelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<GuildId>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub author: Undefinable<User>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub member: Undefinable<MessageMember>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub content: Undefinable<String>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub edited_timestamp: Undefinable<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub mention_everyone: Undefinable<bool>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub mentions: Undefinable<Vec<User>>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub mention_roles: Undefinable<Vec<RoleId>>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub attachments: Undefinable<Vec<Attachment>>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub embeds: Undefinable<Vec<Embed>>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub pinned: Undefinable<bool>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub webhook_id: Undefinable<WebhookId>,
    #[serde(default, skip_serializing_if = "Undefinable::is_unchanged")]
    pub flags: Undefinable<EnumSet<MessageFlag>>,
}
into_id!(PartialMessage, MessageId, id);
impl PartialMessage {
    /// Returns `true` if this message was sent by a webhook, or `None` if that is unknown.
    pub fn is_webhook(&self) -> Option<bool> {
        self.webhook_id.as_ref().into_update().map(|id| id.is_some())
    }

    /// Returns `true` if the message was neither sent by a webhook nor by a bot, or `None` if
    /// the update carries neither the webhook ID nor the author.
    pub fn is_human(&self) -> Option<bool> {
        let not_bot = self.author.as_ref().value().map(|x| !x.bot);
        match self.webhook_id.as_ref().into_update() {
            Some(Some(_)) => Some(false),
            Some(None) => Some(not_bot.unwrap_or(true)),
            None => not_bot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_without_content_is_unchanged() {
        let update: PartialMessage = serde_json::from_value(json!({
            "id": "10",
            "channel_id": "20",
            "embeds": [],
        })).unwrap();
        assert!(update.content.is_unchanged());
        assert_eq!(update.embeds, Undefinable::Value(vec![]));
        assert_eq!(update.is_webhook(), None);
        assert_eq!(update.is_human(), None);
    }

    #[test]
    fn update_webhook_state() {
        let webhook: PartialMessage = serde_json::from_value(json!({
            "id": "10", "channel_id": "20", "webhook_id": "7",
        })).unwrap();
        assert_eq!(webhook.is_webhook(), Some(true));
        assert_eq!(webhook.is_human(), Some(false));

        let authored: PartialMessage = serde_json::from_value(json!({
            "id": "10", "channel_id": "20", "author": { "id": "1", "username": "a" },
        })).unwrap();
        assert_eq!(authored.is_webhook(), None);
        assert_eq!(authored.is_human(), Some(true));

        let cleared: PartialMessage = serde_json::from_value(json!({
            "id": "10", "channel_id": "20", "webhook_id": null,
            "author": { "id": "1", "username": "a", "bot": true },
        })).unwrap();
        assert_eq!(cleared.is_webhook(), Some(false));
        assert_eq!(cleared.is_human(), Some(false));
    }

    #[test]
    fn human_heuristic() {
        let mut message: Message = serde_json::from_value(json!({
            "id": "10",
            "channel_id": "20",
            "author": { "id": "1", "username": "a" },
            "content": "hello",
            "timestamp": "2021-01-01T00:00:00+00:00",
            "type": 0,
        })).unwrap();
        assert!(message.is_human());
        message.author.bot = true;
        assert!(!message.is_human());
        message.author.bot = false;
        message.webhook_id = Some(WebhookId::from(3));
        assert!(!message.is_human());
        assert!(message.is_webhook());
    }
}
