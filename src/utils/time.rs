//! Wall-clock helpers
//!
//! Claims carry NumericDate seconds; validators compare against milliseconds.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Current Unix time in milliseconds
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_millis() as i64
}

/// Current Unix time in whole seconds
pub fn now_seconds() -> i64 {
    now_millis().div_euclid(1000)
}
