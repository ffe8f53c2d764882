//! Types related to interactions, such as slash commands and message components.

use crate::guild::Member;
use crate::message::Message;
use crate::serde::*;
use crate::types::*;
use crate::user::User;

/// The type of an interaction.
#[derive(Serialize_repr, Deserialize_repr)]
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Debug, Hash)]
#[repr(i32)]
#[non_exhaustive]
pub enum InteractionType {
    Ping = 1,
    ApplicationCommand = 2,
    MessageComponent = 3,
    ApplicationCommandAutocomplete = 4,
    ModalSubmit = 5,
    #[serde(other)]
    Unknown = i32::max_value(),
}

/// An interaction received through the gateway.
///
/// The type-specific `data` field is kept in its raw form.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[non_exhaustive]
pub struct Interaction {
    pub id: InteractionId,
    pub application_id: ApplicationId,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub data: Option<JsonValue>,
    pub guild_id: Option<GuildId>,
    pub channel_id: Option<ChannelId>,
    /// The member that caused this interaction, if it happened in a guild.
    pub member: Option<Member>,
    /// The user that caused this interaction, if it happened in a direct message.
    pub user: Option<User>,
    pub token: String,
    pub version: u32,
    pub message: Option<Message>,
    pub locale: Option<String>,
    pub guild_locale: Option<String>,
}
into_id!(Interaction, InteractionId, id);
impl Interaction {
    /// Returns the user that caused this interaction.
    pub fn user(&self) -> Option<&User> {
        match &self.member {
            Some(member) => Some(&member.user),
            None => self.user.as_ref(),
        }
    }
}
