use chrono::{DateTime, Local, NaiveDate};

/// Represents an entity responsible for providing dates across the
/// application. Streak and view computations take plain dates, so this
/// trait only matters at the presentation boundary, where it keeps
/// commands testable without touching the system clock.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
