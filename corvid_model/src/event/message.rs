use chrono::{DateTime, Utc};
use crate::embed::Embed;
use crate::emoji::Emoji;
use crate::event::MessageEvent;
use crate::guild::Member;
use crate::message::{Message, PartialMessage};
use crate::types::*;
use crate::undefined::Undefinable;
use std::collections::{BTreeMap, BTreeSet};

/// Accessors shared by the guild and DM `Message Create` events.
pub trait MessageCreateEvent: MessageEvent {
    /// The message that was sent.
    fn message(&self) -> &Message;

    fn author_id(&self) -> UserId {
        self.message().author.id
    }
    fn is_bot(&self) -> bool {
        self.message().author.bot
    }
    fn is_webhook(&self) -> bool {
        self.message().is_webhook()
    }
    /// Returns `true` if the author is not a bot and the message was not sent by a webhook.
    fn is_human(&self) -> bool {
        self.message().is_human()
    }
    fn content(&self) -> &str {
        &self.message().content
    }
    fn embeds(&self) -> &[Embed] {
        &self.message().embeds
    }
}

/// Accessors shared by the guild and DM `Message Update` events.
///
/// Fields that were not part of the update are [`Undefinable::Unchanged`].
pub trait MessageUpdateEvent: MessageEvent {
    /// The fields of the message that changed.
    fn message(&self) -> &PartialMessage;

    fn author_id(&self) -> Option<UserId> {
        self.message().author.as_ref().value().map(|x| x.id)
    }
    fn is_bot(&self) -> Option<bool> {
        self.message().author.as_ref().value().map(|x| x.bot)
    }
    fn is_webhook(&self) -> Option<bool> {
        self.message().is_webhook()
    }
    fn is_human(&self) -> Option<bool> {
        self.message().is_human()
    }
    fn content(&self) -> Undefinable<&String> {
        self.message().content.as_ref()
    }
    fn embeds(&self) -> Undefinable<&Vec<Embed>> {
        self.message().embeds.as_ref()
    }
}

/// A `Message Create` event in a guild.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildMessageCreateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub message: Message,
}

/// A `Message Create` event in a direct message.
#[derive(Clone, PartialEq, Debug)]
pub struct DmMessageCreateEvent {
    pub shard: ShardId,
    pub message: Message,
}

/// A `Message Update` event in a guild.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildMessageUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub message: PartialMessage,
}

/// A `Message Update` event in a direct message.
#[derive(Clone, PartialEq, Debug)]
pub struct DmMessageUpdateEvent {
    pub shard: ShardId,
    pub message: PartialMessage,
}

/// A `Message Delete` event in a guild.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildMessageDeleteEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// A `Message Delete` event in a direct message.
#[derive(Clone, PartialEq, Debug)]
pub struct DmMessageDeleteEvent {
    pub shard: ShardId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// A `Message Delete Bulk` event. These are only sent in guilds.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildBulkMessageDeleteEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_ids: BTreeSet<MessageId>,
    /// Previously known state of the deleted messages, keyed by ID.
    pub old_messages: BTreeMap<MessageId, Message>,
}

/// A `Message Reaction Add` event in a guild.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildReactionAddEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub emoji: Emoji,
    /// The member that added the reaction.
    pub member: Member,
    pub message_author_id: Option<UserId>,
}

/// A `Message Reaction Add` event in a direct message.
#[derive(Clone, PartialEq, Debug)]
pub struct DmReactionAddEvent {
    pub shard: ShardId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub emoji: Emoji,
    pub message_author_id: Option<UserId>,
}

/// A `Message Reaction Remove` event in a guild.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildReactionDeleteEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub emoji: Emoji,
}

/// A `Message Reaction Remove` event in a direct message.
#[derive(Clone, PartialEq, Debug)]
pub struct DmReactionDeleteEvent {
    pub shard: ShardId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub emoji: Emoji,
}

/// A `Message Reaction Remove All` event in a guild.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildReactionDeleteAllEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// A `Message Reaction Remove All` event in a direct message.
#[derive(Clone, PartialEq, Debug)]
pub struct DmReactionDeleteAllEvent {
    pub shard: ShardId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// A `Message Reaction Remove Emoji` event in a guild.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildReactionDeleteEmojiEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub emoji: Emoji,
}

/// A `Message Reaction Remove Emoji` event in a direct message.
#[derive(Clone, PartialEq, Debug)]
pub struct DmReactionDeleteEmojiEvent {
    pub shard: ShardId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub emoji: Emoji,
}

/// A `Typing Start` event in a guild.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildTypingEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub user_id: UserId,
    pub timestamp: DateTime<Utc>,
    /// The member that started typing.
    pub member: Member,
}

/// A `Typing Start` event in a direct message.
#[derive(Clone, PartialEq, Debug)]
pub struct DmTypingEvent {
    pub shard: ShardId,
    pub channel_id: ChannelId,
    pub user_id: UserId,
    pub timestamp: DateTime<Utc>,
}

/// A `Message Poll Vote Add` event in a guild.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildPollVoteAddEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub answer_id: u32,
}

/// A `Message Poll Vote Add` event in a direct message.
#[derive(Clone, PartialEq, Debug)]
pub struct DmPollVoteAddEvent {
    pub shard: ShardId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub answer_id: u32,
}

/// A `Message Poll Vote Remove` event in a guild.
#[derive(Clone, PartialEq, Debug)]
pub struct GuildPollVoteRemoveEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub answer_id: u32,
}

/// A `Message Poll Vote Remove` event in a direct message.
#[derive(Clone, PartialEq, Debug)]
pub struct DmPollVoteRemoveEvent {
    pub shard: ShardId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub answer_id: u32,
}

impl MessageCreateEvent for GuildMessageCreateEvent {
    fn message(&self) -> &Message {
        &self.message
    }
}
impl MessageCreateEvent for DmMessageCreateEvent {
    fn message(&self) -> &Message {
        &self.message
    }
}
impl MessageUpdateEvent for GuildMessageUpdateEvent {
    fn message(&self) -> &PartialMessage {
        &self.message
    }
}
impl MessageUpdateEvent for DmMessageUpdateEvent {
    fn message(&self) -> &PartialMessage {
        &self.message
    }
}

shard_event!(
    GuildMessageCreateEvent, DmMessageCreateEvent, GuildMessageUpdateEvent, DmMessageUpdateEvent,
    GuildMessageDeleteEvent, DmMessageDeleteEvent, GuildBulkMessageDeleteEvent,
    GuildReactionAddEvent, DmReactionAddEvent, GuildReactionDeleteEvent, DmReactionDeleteEvent,
    GuildReactionDeleteAllEvent, DmReactionDeleteAllEvent,
    GuildReactionDeleteEmojiEvent, DmReactionDeleteEmojiEvent,
    GuildTypingEvent, DmTypingEvent,
    GuildPollVoteAddEvent, DmPollVoteAddEvent, GuildPollVoteRemoveEvent, DmPollVoteRemoveEvent,
);
guild_event!(
    GuildMessageCreateEvent => guild_id,
    GuildMessageUpdateEvent => guild_id,
    GuildMessageDeleteEvent => guild_id,
    GuildBulkMessageDeleteEvent => guild_id,
    GuildReactionAddEvent => guild_id,
    GuildReactionDeleteEvent => guild_id,
    GuildReactionDeleteAllEvent => guild_id,
    GuildReactionDeleteEmojiEvent => guild_id,
    GuildTypingEvent => guild_id,
    GuildPollVoteAddEvent => guild_id,
    GuildPollVoteRemoveEvent => guild_id,
);
channel_event!(
    GuildMessageCreateEvent => message.channel_id,
    DmMessageCreateEvent => message.channel_id,
    GuildMessageUpdateEvent => message.channel_id,
    DmMessageUpdateEvent => message.channel_id,
    GuildMessageDeleteEvent => channel_id,
    DmMessageDeleteEvent => channel_id,
    GuildBulkMessageDeleteEvent => channel_id,
    GuildReactionAddEvent => channel_id,
    DmReactionAddEvent => channel_id,
    GuildReactionDeleteEvent => channel_id,
    DmReactionDeleteEvent => channel_id,
    GuildReactionDeleteAllEvent => channel_id,
    DmReactionDeleteAllEvent => channel_id,
    GuildReactionDeleteEmojiEvent => channel_id,
    DmReactionDeleteEmojiEvent => channel_id,
    GuildTypingEvent => channel_id,
    DmTypingEvent => channel_id,
    GuildPollVoteAddEvent => channel_id,
    DmPollVoteAddEvent => channel_id,
    GuildPollVoteRemoveEvent => channel_id,
    DmPollVoteRemoveEvent => channel_id,
);
message_event!(
    GuildMessageCreateEvent => message.id,
    DmMessageCreateEvent => message.id,
    GuildMessageUpdateEvent => message.id,
    DmMessageUpdateEvent => message.id,
    GuildMessageDeleteEvent => message_id,
    DmMessageDeleteEvent => message_id,
    GuildReactionAddEvent => message_id,
    DmReactionAddEvent => message_id,
    GuildReactionDeleteEvent => message_id,
    DmReactionDeleteEvent => message_id,
    GuildReactionDeleteAllEvent => message_id,
    DmReactionDeleteAllEvent => message_id,
    GuildReactionDeleteEmojiEvent => message_id,
    DmReactionDeleteEmojiEvent => message_id,
    GuildPollVoteAddEvent => message_id,
    DmPollVoteAddEvent => message_id,
    GuildPollVoteRemoveEvent => message_id,
    DmPollVoteRemoveEvent => message_id,
);
