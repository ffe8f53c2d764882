//! Field extraction from raw event payloads.
//!
//! A key that is missing is a [`ErrorKind::MissingField`]. A key with a value of the wrong shape
//! is a [`ErrorKind::InvalidField`]. The `opt_` variants treat a missing key and `null` alike.

use chrono::{DateTime, Utc};
use crate::errors::*;
use crate::model::JsonObject;
use crate::model::time;
use crate::model::types::*;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

/// Wraps a whole payload so it can be passed to the entity decoder as a fragment.
pub fn whole(payload: &JsonObject) -> JsonValue {
    JsonValue::Object(payload.clone())
}

pub fn field<'a>(payload: &'a JsonObject, key: &'static str) -> Result<&'a JsonValue> {
    payload.get(key).missing_field(key)
}

pub fn opt_field<'a>(payload: &'a JsonObject, key: &'static str) -> Option<&'a JsonValue> {
    match payload.get(key) {
        None | Some(JsonValue::Null) => None,
        Some(v) => Some(v),
    }
}

pub fn object<'a>(payload: &'a JsonObject, key: &'static str) -> Result<&'a JsonObject> {
    field(payload, key)?.as_object().invalid_field(key)
}

pub fn array<'a>(payload: &'a JsonObject, key: &'static str) -> Result<&'a Vec<JsonValue>> {
    field(payload, key)?.as_array().invalid_field(key)
}

/// Returns the array at a key, treating a missing key or `null` as an empty array.
pub fn array_or_empty<'a>(payload: &'a JsonObject, key: &'static str) -> Result<&'a [JsonValue]> {
    match opt_field(payload, key) {
        Some(v) => Ok(v.as_array().invalid_field(key)?.as_slice()),
        None => Ok(&[][..]),
    }
}

fn parse_snowflake(value: &JsonValue, key: &'static str) -> Result<Snowflake> {
    match value {
        JsonValue::String(s) => s.parse::<Snowflake>().invalid_field(key),
        JsonValue::Number(n) => n.as_u64().map(Snowflake).invalid_field(key),
        _ => bail!(InvalidField, key),
    }
}

pub fn snowflake<T: From<Snowflake>>(payload: &JsonObject, key: &'static str) -> Result<T> {
    parse_snowflake(field(payload, key)?, key).map(T::from)
}

pub fn opt_snowflake<T: From<Snowflake>>(
    payload: &JsonObject, key: &'static str,
) -> Result<Option<T>> {
    match opt_field(payload, key) {
        Some(v) => Ok(Some(parse_snowflake(v, key)?.into())),
        None => Ok(None),
    }
}

/// Like [`opt_snowflake`], but also treats `0` and empty strings as absent.
pub fn nonempty_snowflake<T: From<Snowflake>>(
    payload: &JsonObject, key: &'static str,
) -> Result<Option<T>> {
    match opt_field(payload, key) {
        Some(JsonValue::String(s)) if s.is_empty() => Ok(None),
        Some(v) => match parse_snowflake(v, key)? {
            Snowflake(0) => Ok(None),
            id => Ok(Some(id.into())),
        },
        None => Ok(None),
    }
}

pub fn snowflake_list<T: From<Snowflake>>(
    values: &[JsonValue], key: &'static str,
) -> Result<Vec<T>> {
    values.iter().map(|v| parse_snowflake(v, key).map(T::from)).collect()
}

/// Decodes a plain value, such as an enum, with its `serde` implementation.
pub fn value<T: DeserializeOwned>(payload: &JsonObject, key: &'static str) -> Result<T> {
    T::deserialize(field(payload, key)?).invalid_field(key)
}

pub fn string(payload: &JsonObject, key: &'static str) -> Result<String> {
    Ok(field(payload, key)?.as_str().invalid_field(key)?.to_string())
}

pub fn opt_string(payload: &JsonObject, key: &'static str) -> Result<Option<String>> {
    match opt_field(payload, key) {
        Some(v) => Ok(Some(v.as_str().invalid_field(key)?.to_string())),
        None => Ok(None),
    }
}

/// Returns the string at a key, treating a missing key, `null` and `""` alike.
pub fn nonempty_string(payload: &JsonObject, key: &'static str) -> Result<Option<String>> {
    Ok(opt_string(payload, key)?.filter(|s| !s.is_empty()))
}

fn parse_integer(value: &JsonValue, key: &'static str) -> Result<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64().invalid_field(key),
        JsonValue::String(s) => s.parse::<i64>().invalid_field(key),
        _ => bail!(InvalidField, key),
    }
}

pub fn integer(payload: &JsonObject, key: &'static str) -> Result<i64> {
    parse_integer(field(payload, key)?, key)
}

pub fn uint(payload: &JsonObject, key: &'static str) -> Result<u32> {
    let value = integer(payload, key)?;
    ensure!(value >= 0 && value <= u32::max_value() as i64, InvalidField, key);
    Ok(value as u32)
}

pub fn boolean(payload: &JsonObject, key: &'static str) -> Result<bool> {
    field(payload, key)?.as_bool().invalid_field(key)
}

pub fn opt_boolean(payload: &JsonObject, key: &'static str) -> Result<Option<bool>> {
    match opt_field(payload, key) {
        Some(v) => Ok(Some(v.as_bool().invalid_field(key)?)),
        None => Ok(None),
    }
}

pub fn opt_timestamp(payload: &JsonObject, key: &'static str) -> Result<Option<DateTime<Utc>>> {
    match opt_field(payload, key) {
        Some(v) => {
            let raw = v.as_str().invalid_field(key)?;
            Ok(Some(time::parse_iso8601(raw).ok().invalid_field(key)?))
        }
        None => Ok(None),
    }
}

/// Reads a timestamp sent as seconds since the UNIX epoch.
pub fn unix_seconds(payload: &JsonObject, key: &'static str) -> Result<DateTime<Utc>> {
    Ok(time::unix_epoch_to_datetime(integer(payload, key)?, false))
}

/// Determines whether an event happened in a guild.
///
/// The presence of the `guild_id` key selects the guild variant of an event. The key being
/// present but `null` is a protocol violation.
pub fn guild_scope(payload: &JsonObject) -> Result<Option<GuildId>> {
    match payload.get("guild_id") {
        None => Ok(None),
        Some(JsonValue::Null) => bail!(ProtocolViolation, "guild event with a null `guild_id`"),
        Some(v) => Ok(Some(parse_snowflake(v, "guild_id")?.into())),
    }
}

/// Reads the ID of the guild an event that only happens in guilds was sent for.
pub fn require_guild(payload: &JsonObject) -> Result<GuildId> {
    match guild_scope(payload)? {
        Some(id) => Ok(id),
        None => bail!(ProtocolViolation, "guild event without a `guild_id`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: JsonValue) -> JsonObject {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn snowflakes() {
        let p = obj(json!({ "a": "10", "b": 11, "c": null, "d": true, "e": "", "f": "0" }));
        assert_eq!(snowflake::<MessageId>(&p, "a").unwrap(), MessageId::from(10));
        assert_eq!(snowflake::<MessageId>(&p, "b").unwrap(), MessageId::from(11));
        assert_eq!(opt_snowflake::<MessageId>(&p, "c").unwrap(), None);
        assert_eq!(opt_snowflake::<MessageId>(&p, "missing").unwrap(), None);
        assert_eq!(nonempty_snowflake::<MessageId>(&p, "e").unwrap(), None);
        assert_eq!(nonempty_snowflake::<MessageId>(&p, "f").unwrap(), None);
        assert_eq!(nonempty_snowflake::<MessageId>(&p, "a").unwrap(), Some(MessageId::from(10)));

        let err = snowflake::<MessageId>(&p, "missing").unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::MissingField("missing"));
        let err = snowflake::<MessageId>(&p, "d").unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::InvalidField("d"));
    }

    #[test]
    fn guild_discriminator() {
        assert_eq!(guild_scope(&obj(json!({}))).unwrap(), None);
        assert_eq!(guild_scope(&obj(json!({ "guild_id": "2" }))).unwrap(), Some(GuildId::from(2)));

        let err = guild_scope(&obj(json!({ "guild_id": null }))).unwrap_err();
        assert!(matches!(err.error_kind(), ErrorKind::ProtocolViolation(_)));
        assert!(err.is_error());
        let err = require_guild(&obj(json!({}))).unwrap_err();
        assert!(matches!(err.error_kind(), ErrorKind::ProtocolViolation(_)));
    }

    #[test]
    fn timestamps() {
        let p = obj(json!({
            "absent_later": null,
            "iso": "2021-05-01T12:00:00.000000+00:00",
            "secs": 1_600_000_000,
            "bad": "yesterday",
        }));
        assert_eq!(opt_timestamp(&p, "absent_later").unwrap(), None);
        assert_eq!(opt_timestamp(&p, "missing").unwrap(), None);
        assert_eq!(opt_timestamp(&p, "iso").unwrap().unwrap().timestamp(), 1_619_870_400);
        assert_eq!(unix_seconds(&p, "secs").unwrap().timestamp(), 1_600_000_000);
        let err = opt_timestamp(&p, "bad").unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::InvalidField("bad"));
    }

    #[test]
    fn optional_strings() {
        let p = obj(json!({ "a": "", "b": "x", "c": 1 }));
        assert_eq!(nonempty_string(&p, "a").unwrap(), None);
        assert_eq!(nonempty_string(&p, "b").unwrap().as_deref(), Some("x"));
        assert_eq!(opt_string(&p, "a").unwrap().as_deref(), Some(""));
        assert!(opt_string(&p, "c").is_err());
        assert_eq!(uint(&p, "c").unwrap(), 1);
    }
}
