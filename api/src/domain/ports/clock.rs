//! Clock port
//!
//! "Today" is injected so stay validation can be tested against a fixed date.

use chrono::NaiveDate;

pub trait Clock: Send + Sync {
    /// The current calendar date
    fn today(&self) -> NaiveDate;
}
