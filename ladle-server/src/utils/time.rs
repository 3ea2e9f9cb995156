//! Time helpers

use chrono::{SecondsFormat, Utc};

/// Current UTC timestamp, RFC 3339 with millisecond precision
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
