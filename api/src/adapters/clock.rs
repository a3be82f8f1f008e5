//! System clock adapter

use chrono::{NaiveDate, Utc};

use crate::domain::ports::Clock;

/// Reads today's date from the system clock (UTC calendar date)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}
