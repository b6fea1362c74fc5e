//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC timestamp stamped onto every outbound envelope.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp as ISO-8601 with microsecond precision and an explicit
/// `+00:00` offset (e.g. `2024-05-01T12:30:00.123456+00:00`).
#[must_use]
pub fn to_iso8601(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// `serialize_with` adapter for [`to_iso8601`].
///
/// # Errors
///
/// Propagates the serializer's own error.
pub fn serialize_iso8601<S>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&to_iso8601(ts))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_render_explicit_utc_offset_with_micros() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(to_iso8601(&ts), "2024-05-01T12:30:00.000000+00:00");
    }

    #[test]
    fn should_parse_back_as_rfc3339() {
        let ts = now();
        let rendered = to_iso8601(&ts);
        let parsed = DateTime::parse_from_rfc3339(&rendered).unwrap();
        assert_eq!(parsed.timestamp_micros(), ts.timestamp_micros());
    }
}
