use time::OffsetDateTime;

use crate::dialog::ports::ClockPort;

#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: OffsetDateTime,
}

impl FixedClock {
    pub fn new(instant: OffsetDateTime) -> Self {
        Self { instant }
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.instant
    }
}
