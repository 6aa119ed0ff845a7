//! Clock Port
//!
//! Injectable current-time dependency. Day rollover and the time-of-day
//! badges depend on the player's local wall clock, so tests need to
//! simulate arbitrary clock values instead of reading the system time.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Local wall-clock time (drives day rollover and time-of-day badges)
    fn now_local(&self) -> NaiveDateTime;

    /// UTC instant (recorded as badge unlock time)
    fn now_utc(&self) -> DateTime<Utc>;
}
