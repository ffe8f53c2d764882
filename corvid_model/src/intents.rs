//! Gateway intents, which control which events Discord sends to a shard.

use crate::event::GatewayEventType;
use crate::serde::*;

/// A gateway intent.
///
/// Sets of intents are represented with [`EnumSet<Intent>`]. Commonly used sets are available as
/// associated constants, such as [`Intent::ALL_UNPRIVILEGED`].
#[derive(EnumSetType, Ord, PartialOrd, Debug, Hash)]
#[enumset(serialize_repr = "u32")]
#[non_exhaustive]
pub enum Intent {
    /// Guild, role, channel and thread lifecycle events.
    Guilds = 0,
    /// Member add, update and remove events. Privileged.
    GuildMembers = 1,
    /// Bans and audit log entries.
    GuildModeration = 2,
    /// Emoji and sticker updates.
    GuildEmojis = 3,
    GuildIntegrations = 4,
    GuildWebhooks = 5,
    GuildInvites = 6,
    GuildVoiceStates = 7,
    /// Presence updates. Privileged.
    GuildPresences = 8,
    GuildMessages = 9,
    GuildMessageReactions = 10,
    GuildMessageTyping = 11,
    DmMessages = 12,
    DmMessageReactions = 13,
    DmMessageTyping = 14,
    /// Access to message content, embeds, attachments and components outside of DMs and
    /// mentions. Privileged.
    MessageContent = 15,
    GuildScheduledEvents = 16,
    AutoModerationConfiguration = 20,
    AutoModerationExecution = 21,
    GuildMessagePolls = 24,
    DirectMessagePolls = 25,
}

impl Intent {
    /// All unprivileged guild intents.
    pub const ALL_GUILDS_UNPRIVILEGED: EnumSet<Intent> = enum_set!(
        Intent::Guilds | Intent::GuildEmojis | Intent::GuildIntegrations |
        Intent::GuildWebhooks | Intent::GuildInvites | Intent::GuildVoiceStates |
        Intent::GuildMessages | Intent::GuildMessageReactions | Intent::GuildMessageTyping |
        Intent::GuildModeration | Intent::GuildScheduledEvents | Intent::GuildMessagePolls
    );
    /// All privileged guild intents.
    pub const ALL_GUILDS_PRIVILEGED: EnumSet<Intent> = enum_set!(
        Intent::GuildMembers | Intent::GuildPresences
    );
    /// All guild intents.
    pub const ALL_GUILDS: EnumSet<Intent> = enum_set!(
        Intent::Guilds | Intent::GuildEmojis | Intent::GuildIntegrations |
        Intent::GuildWebhooks | Intent::GuildInvites | Intent::GuildVoiceStates |
        Intent::GuildMessages | Intent::GuildMessageReactions | Intent::GuildMessageTyping |
        Intent::GuildModeration | Intent::GuildScheduledEvents | Intent::GuildMessagePolls |
        Intent::GuildMembers | Intent::GuildPresences
    );
    /// All direct message intents.
    pub const ALL_DMS: EnumSet<Intent> = enum_set!(
        Intent::DmMessages | Intent::DmMessageTyping | Intent::DmMessageReactions |
        Intent::DirectMessagePolls
    );
    /// Messages in both guilds and direct messages.
    pub const ALL_MESSAGES: EnumSet<Intent> = enum_set!(
        Intent::DmMessages | Intent::GuildMessages
    );
    /// Polls in both guilds and direct messages.
    pub const ALL_POLLS: EnumSet<Intent> = enum_set!(
        Intent::GuildMessagePolls | Intent::DirectMessagePolls
    );
    /// Reactions in both guilds and direct messages.
    pub const ALL_MESSAGE_REACTIONS: EnumSet<Intent> = enum_set!(
        Intent::DmMessageReactions | Intent::GuildMessageReactions
    );
    /// Typing indicators in both guilds and direct messages.
    pub const ALL_MESSAGE_TYPING: EnumSet<Intent> = enum_set!(
        Intent::DmMessageTyping | Intent::GuildMessageTyping
    );
    /// All auto-moderation intents.
    pub const ALL_AUTO_MODERATION: EnumSet<Intent> = enum_set!(
        Intent::AutoModerationConfiguration | Intent::AutoModerationExecution
    );
    /// Every intent that does not need to be enabled for the application.
    pub const ALL_UNPRIVILEGED: EnumSet<Intent> = enum_set!(
        Intent::Guilds | Intent::GuildEmojis | Intent::GuildIntegrations |
        Intent::GuildWebhooks | Intent::GuildInvites | Intent::GuildVoiceStates |
        Intent::GuildMessages | Intent::GuildMessageReactions | Intent::GuildMessageTyping |
        Intent::GuildModeration | Intent::GuildScheduledEvents | Intent::GuildMessagePolls |
        Intent::DmMessages | Intent::DmMessageTyping | Intent::DmMessageReactions |
        Intent::DirectMessagePolls |
        Intent::AutoModerationConfiguration | Intent::AutoModerationExecution
    );
    /// Every intent that must be enabled for the application in the developer portal.
    pub const ALL_PRIVILEGED: EnumSet<Intent> = enum_set!(
        Intent::GuildMembers | Intent::GuildPresences | Intent::MessageContent
    );
    /// Every known intent.
    pub const ALL: EnumSet<Intent> = enum_set!(
        Intent::Guilds | Intent::GuildEmojis | Intent::GuildIntegrations |
        Intent::GuildWebhooks | Intent::GuildInvites | Intent::GuildVoiceStates |
        Intent::GuildMessages | Intent::GuildMessageReactions | Intent::GuildMessageTyping |
        Intent::GuildModeration | Intent::GuildScheduledEvents | Intent::GuildMessagePolls |
        Intent::DmMessages | Intent::DmMessageTyping | Intent::DmMessageReactions |
        Intent::DirectMessagePolls |
        Intent::AutoModerationConfiguration | Intent::AutoModerationExecution |
        Intent::GuildMembers | Intent::GuildPresences | Intent::MessageContent
    );

    /// Returns whether a shard with the given intents can receive an event type.
    pub fn can_receive(intents: EnumSet<Intent>, event: &GatewayEventType) -> bool {
        intents.can_receive(event)
    }
}

/// Operations on sets of intents.
pub trait IntentSet {
    /// Returns `true` if any intent in this set is privileged.
    fn is_privileged(&self) -> bool;

    /// Returns `true` if a shard with these intents can receive an event type.
    ///
    /// Events that need no intents can always be received. Otherwise, at least one of the intent
    /// groups returned by [`GatewayEventType::required_intents`] must be fully contained in
    /// this set.
    fn can_receive(&self, event: &GatewayEventType) -> bool;
}
impl IntentSet for EnumSet<Intent> {
    fn is_privileged(&self) -> bool {
        !self.is_disjoint(Intent::ALL_PRIVILEGED)
    }

    fn can_receive(&self, event: &GatewayEventType) -> bool {
        let groups = event.required_intents();
        groups.is_empty() || groups.iter().any(|group| self.is_superset(*group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composites_partition() {
        assert_eq!(Intent::ALL_GUILDS, Intent::ALL_GUILDS_UNPRIVILEGED | Intent::ALL_GUILDS_PRIVILEGED);
        assert_eq!(
            Intent::ALL_UNPRIVILEGED,
            Intent::ALL_GUILDS_UNPRIVILEGED | Intent::ALL_DMS | Intent::ALL_AUTO_MODERATION,
        );
        assert_eq!(
            Intent::ALL_PRIVILEGED,
            Intent::ALL_GUILDS_PRIVILEGED | Intent::MessageContent,
        );
        assert_eq!(Intent::ALL, Intent::ALL_UNPRIVILEGED | Intent::ALL_PRIVILEGED);
        assert!(Intent::ALL_UNPRIVILEGED.is_disjoint(Intent::ALL_PRIVILEGED));
    }

    #[test]
    fn privileged() {
        assert!(!Intent::ALL_UNPRIVILEGED.is_privileged());
        assert!(Intent::ALL.is_privileged());
        assert!((Intent::Guilds | Intent::MessageContent).is_privileged());
        assert!(EnumSet::only(Intent::GuildPresences).is_privileged());
        assert!(!EnumSet::<Intent>::empty().is_privileged());
    }

    #[test]
    fn bit_layout() {
        assert_eq!(EnumSet::only(Intent::Guilds).as_u32(), 1);
        assert_eq!(EnumSet::only(Intent::MessageContent).as_u32(), 1 << 15);
        assert_eq!(EnumSet::only(Intent::DirectMessagePolls).as_u32(), 1 << 25);
        assert_eq!(serde_json::to_string(&Intent::ALL_PRIVILEGED).unwrap(), "33026");
        let parsed: EnumSet<Intent> = serde_json::from_str("513").unwrap();
        assert_eq!(parsed, Intent::Guilds | Intent::GuildMessages);
    }

    #[test]
    fn event_requirements() {
        let messages = GatewayEventType::MessageCreate;
        assert!(Intent::can_receive(EnumSet::only(Intent::GuildMessages), &messages));
        assert!(Intent::can_receive(EnumSet::only(Intent::DmMessages), &messages));
        assert!(!Intent::can_receive(EnumSet::only(Intent::Guilds), &messages));
        assert!(Intent::can_receive(EnumSet::empty(), &GatewayEventType::Ready));
        assert!(!Intent::can_receive(Intent::ALL_UNPRIVILEGED, &GatewayEventType::PresenceUpdate));
    }
}
