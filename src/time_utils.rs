// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for epoch-millis timestamps.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as Unix epoch millis.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format epoch millis for logs; out-of-range values are printed raw.
pub fn format_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(format_utc_rfc3339)
        .unwrap_or_else(|| format!("{}ms", millis))
}
