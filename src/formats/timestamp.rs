//! Timestamp rendering configuration
//!
//! Entries carry a `DateTime<Utc>` capture time; transports choose how to
//! render it with a [`TimestampFormat`].

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,
    /// Full RFC 3339 with offset
    Rfc3339,
    /// Milliseconds since the Unix epoch
    UnixMillis,
    /// A strftime-compatible pattern
    Custom(String),
}

impl TimestampFormat {
    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => {
                timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
            }
            TimestampFormat::Rfc3339 => timestamp.to_rfc3339(),
            TimestampFormat::UnixMillis => timestamp.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => timestamp.format(pattern).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap()
    }

    #[test]
    fn test_iso8601() {
        assert_eq!(
            TimestampFormat::Iso8601.format(&fixed()),
            "2025-01-08T10:30:45.000Z"
        );
    }

    #[test]
    fn test_unix_millis() {
        let rendered = TimestampFormat::UnixMillis.format(&fixed());
        assert_eq!(rendered, fixed().timestamp_millis().to_string());
    }

    #[test]
    fn test_custom_pattern() {
        let format = TimestampFormat::Custom("%Y/%m/%d".to_string());
        assert_eq!(format.format(&fixed()), "2025/01/08");
    }
}
