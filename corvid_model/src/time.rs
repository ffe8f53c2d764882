//! Conversions between Discord's time representations and [`DateTime`]s.

use chrono::{DateTime, Duration, TimeZone, Utc};
use corvid_errors::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// The start of the Discord epoch, `2015-01-01T00:00:00Z`, in seconds since the UNIX epoch.
pub const DISCORD_EPOCH: i64 = 1_420_070_400;

/// The start of the Discord epoch, in milliseconds since the UNIX epoch.
pub const DISCORD_EPOCH_MILLIS: i64 = DISCORD_EPOCH * 1000;

/// Converts a number of milliseconds since the Discord epoch into a [`DateTime`].
///
/// Saturates in the same way as [`unix_epoch_to_datetime`].
pub fn discord_epoch_to_datetime(epoch: i64) -> DateTime<Utc> {
    unix_epoch_to_datetime(epoch.saturating_add(DISCORD_EPOCH_MILLIS), true)
}

/// Converts a [`DateTime`] into a number of milliseconds since the Discord epoch.
pub fn datetime_to_discord_epoch(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_millis() - DISCORD_EPOCH_MILLIS
}

/// Converts an UNIX timestamp into a [`DateTime`].
///
/// `is_millis` selects whether `epoch` is measured in milliseconds or seconds. Timestamps that
/// cannot be represented saturate to the largest or smallest representable time, depending on
/// their sign.
pub fn unix_epoch_to_datetime(epoch: i64, is_millis: bool) -> DateTime<Utc> {
    let parsed = if is_millis {
        Utc.timestamp_millis_opt(epoch).single()
    } else {
        Utc.timestamp_opt(epoch, 0).single()
    };
    match parsed {
        Some(time) => time,
        None if epoch > 0 => DateTime::<Utc>::MAX_UTC,
        None => DateTime::<Utc>::MIN_UTC,
    }
}

/// Parses a RFC 3339 timestamp, the ISO 8601 profile used by Discord.
pub fn parse_iso8601(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw).invalid_field("timestamp")?;
    Ok(parsed.with_timezone(&Utc))
}

/// Converts a span of time into a whole number of seconds. Negative spans become zero.
pub fn timespan_to_secs(span: Duration) -> u64 {
    span.num_seconds().max(0) as u64
}

/// Returns the current time.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// Generates an unique identifier suitable for tagging requests, such as a member chunk nonce.
///
/// Identifiers are 32 lowercase hex digits. Two identifiers returned by the same process are
/// never equal.
pub fn request_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|x| x.as_nanos()).unwrap_or(0);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    let high = (nanos as u64) ^ (count << 48);
    let low = rand::random::<u64>().wrapping_add(count);
    format!("{:016x}{:016x}", high, low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discord_epoch_round_trips() {
        for &x in &[0, 1, 41944705796, 1_000_000_000_000, 4_000_000_000_000_000] {
            assert_eq!(datetime_to_discord_epoch(discord_epoch_to_datetime(x)), x);
        }
    }

    #[test]
    fn discord_epoch_start() {
        let start = discord_epoch_to_datetime(0);
        assert_eq!(start.to_rfc3339(), "2015-01-01T00:00:00+00:00");
    }

    #[test]
    fn out_of_range_saturates() {
        assert_eq!(unix_epoch_to_datetime(i64::MAX, true), DateTime::<Utc>::MAX_UTC);
        assert_eq!(unix_epoch_to_datetime(i64::MIN, true), DateTime::<Utc>::MIN_UTC);
        assert_eq!(unix_epoch_to_datetime(i64::MAX, false), DateTime::<Utc>::MAX_UTC);
        assert_eq!(unix_epoch_to_datetime(i64::MIN, false), DateTime::<Utc>::MIN_UTC);
        assert_eq!(discord_epoch_to_datetime(i64::MAX), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn seconds_and_millis() {
        let secs = unix_epoch_to_datetime(1_600_000_000, false);
        let millis = unix_epoch_to_datetime(1_600_000_000_000, true);
        assert_eq!(secs, millis);
    }

    #[test]
    fn parses_discord_timestamps() {
        let time = parse_iso8601("2021-03-04T05:06:07.123000+00:00").unwrap();
        assert_eq!(time.timestamp_millis(), 1614834367123);
        let zulu = parse_iso8601("2021-03-04T05:06:07.123Z").unwrap();
        assert_eq!(time, zulu);
        let err = parse_iso8601("yesterday").unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn timespans_clamp() {
        assert_eq!(timespan_to_secs(Duration::milliseconds(2500)), 2);
        assert_eq!(timespan_to_secs(Duration::seconds(-5)), 0);
    }

    #[test]
    fn request_ids_are_unique() {
        let a = request_id();
        let b = request_id();
        assert_eq!(a.len(), 32);
        assert_ne!(a, b);
    }
}
