use chrono::{DateTime, FixedOffset, Local, Utc};
use chrono_tz::Tz;

/// Source of the timestamps attached to readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    Local,
    Zone(Tz),
}

impl Clock {
    pub fn new(timezone: Option<Tz>) -> Self {
        timezone.map_or(Clock::Local, Clock::Zone)
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            Clock::Local => Local::now().fixed_offset(),
            Clock::Zone(tz) => Utc::now().with_timezone(tz).fixed_offset(),
        }
    }
}
