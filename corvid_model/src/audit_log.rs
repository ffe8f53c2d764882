//! Types related to guild audit logs.

use crate::serde::*;
use crate::types::*;

/// A change to a single property recorded in an audit log entry.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[non_exhaustive]
pub struct AuditLogChange {
    pub key: String,
    pub new_value: Option<JsonValue>,
    pub old_value: Option<JsonValue>,
}

/// An entry in a guild's audit log.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[non_exhaustive]
pub struct AuditLogEntry {
    pub id: AuditLogEntryId,
    pub guild_id: Option<GuildId>,
    pub target_id: Option<String>,
    pub user_id: Option<UserId>,
    /// The raw audit log event type.
    pub action_type: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<AuditLogChange>,
    pub options: Option<JsonValue>,
    pub reason: Option<String>,
}
into_id!(AuditLogEntry, AuditLogEntryId, id);
