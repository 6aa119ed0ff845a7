//! System clock - production implementation of the Clock port

use chrono::{DateTime, Local, NaiveDateTime, Utc};

use seicho::ports::Clock;

/// Wall-clock time from the host system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
