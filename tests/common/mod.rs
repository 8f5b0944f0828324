//! Shared utilities for integration tests.

pub mod harness;

use chrono::{DateTime, TimeZone, Utc};

/// Returns a fixed UTC timestamp on the given day of January 2024.
#[allow(dead_code)]
pub fn jan(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0)
        .single()
        .expect("valid test date")
}
