use crate::serde::*;
use crate::types::*;
use crate::user::OwnUser;
use crate::voice::VoiceState;

/// A stage in the lifetime of the whole client.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
pub enum LifecycleStage {
    Starting,
    Started,
    Stopping,
    Stopped,
}

/// Sent when the client as a whole changes its lifecycle stage.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct LifecycleEvent {
    pub stage: LifecycleStage,
}

/// Sent when a shard establishes a new session.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct ShardConnectedEvent {
    pub shard: ShardId,
}

/// Sent when a shard loses its connection.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct ShardDisconnectedEvent {
    pub shard: ShardId,
}

/// A `Resumed` event.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct ShardResumedEvent {
    pub shard: ShardId,
}

/// A `Ready` event.
#[derive(Clone, PartialEq, Debug)]
pub struct ShardReadyEvent {
    pub shard: ShardId,
    /// The gateway protocol version.
    pub version: u32,
    pub session_id: String,
    /// The URL to connect to when resuming this session.
    pub resume_gateway_url: String,
    /// The bot's user.
    pub user: OwnUser,
    /// Guilds the bot is in. These are delivered later as `Guild Create` events.
    pub unavailable_guilds: Vec<GuildId>,
    pub application_id: ApplicationId,
    pub application_flags: u64,
}

/// The raw form of any event received by a shard.
#[derive(Clone, PartialEq, Debug)]
pub struct ShardPayloadEvent {
    pub shard: ShardId,
    /// The wire name of the event.
    pub name: String,
    pub payload: JsonObject,
}

/// A `User Update` event for the bot's own user.
#[derive(Clone, PartialEq, Debug)]
pub struct OwnUserUpdateEvent {
    pub shard: ShardId,
    pub user: OwnUser,
}

/// A `Voice State Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct VoiceStateUpdateEvent {
    pub shard: ShardId,
    pub state: VoiceState,
}

/// A `Voice Server Update` event.
#[derive(Clone, PartialEq, Debug)]
pub struct VoiceServerUpdateEvent {
    pub shard: ShardId,
    pub guild_id: GuildId,
    pub token: String,
    /// The voice server's host, without a scheme.
    ///
    /// `None` means the voice server is unavailable and a new one is being allocated.
    pub raw_endpoint: Option<String>,
}
impl VoiceServerUpdateEvent {
    /// Returns the websocket URL of the voice server, if one is allocated.
    pub fn endpoint(&self) -> Option<String> {
        self.raw_endpoint.as_ref().map(|host| format!("wss://{}", host))
    }
}

shard_event!(
    ShardConnectedEvent, ShardDisconnectedEvent, ShardResumedEvent, ShardReadyEvent,
    ShardPayloadEvent, OwnUserUpdateEvent, VoiceStateUpdateEvent, VoiceServerUpdateEvent,
);
guild_event!(VoiceServerUpdateEvent => guild_id);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::*;

    #[test]
    fn voice_endpoint() {
        let mut event = VoiceServerUpdateEvent {
            shard: ShardId(0, 1),
            guild_id: GuildId::from(5),
            token: "tok".to_string(),
            raw_endpoint: Some("us-east1.discord.media:443".to_string()),
        };
        assert_eq!(event.endpoint().as_deref(), Some("wss://us-east1.discord.media:443"));
        assert_eq!(event.guild_id(), GuildId::from(5));
        event.raw_endpoint = None;
        assert_eq!(event.endpoint(), None);
    }

    #[test]
    fn lifecycle_has_no_shard() {
        let event = GatewayEvent::Lifecycle(LifecycleEvent { stage: LifecycleStage::Stopping });
        assert_eq!(event.shard(), None);
        assert_eq!(event.variant_name(), "Lifecycle");
        let event = GatewayEvent::ShardResumed(ShardResumedEvent { shard: ShardId(1, 2) });
        assert_eq!(event.shard(), Some(ShardId(1, 2)));
    }
}
