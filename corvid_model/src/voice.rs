//! Types related to voice connections.

use chrono::{DateTime, Utc};
use crate::guild::Member;
use crate::serde::*;
use crate::types::*;

/// Information related to a voice connection state in a Discord guild.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialOrd, Ord, Eq, PartialEq, Debug, Hash)]
#[non_exhaustive]
pub struct VoiceState {
    pub guild_id: Option<GuildId>,
    pub channel_id: Option<ChannelId>,
    pub user_id: UserId,
    pub member: Option<Member>,
    pub session_id: String,
    pub deaf: bool,
    pub mute: bool,
    pub self_deaf: bool,
    pub self_mute: bool,
    pub self_stream: Option<bool>,
    #[serde(default)]
    pub self_video: bool,
    pub suppress: bool,
    pub request_to_speak_timestamp: Option<DateTime<Utc>>,
}
impl VoiceState {
    /// Returns `true` if this state represents the user leaving voice.
    pub fn is_disconnect(&self) -> bool {
        self.channel_id.is_none()
    }
}
