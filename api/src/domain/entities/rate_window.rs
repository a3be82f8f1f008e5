//! Rate window domain entity
//!
//! A rate window is a recurring weekly segment ("Friday through Sunday") with a
//! nightly price. Segments may wrap across the week boundary, so Friday→Monday
//! covers Friday, Saturday, Sunday and Monday.
//!
//! Weekday arithmetic works on the Sunday-based ordinal (0–6) modulo 7.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::unit::UnitId;
use crate::error::DomainError;

/// Unique identifier for a rate window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateWindowId(pub Uuid);

impl RateWindowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RateWindowId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RateWindowId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RateWindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A weekly recurring nightly rate attached to a unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateWindow {
    pub id: RateWindowId,
    pub unit_id: UnitId,
    pub start_day: Weekday,
    pub end_day: Weekday,
    pub price_per_night: Decimal,
}

impl RateWindow {
    /// Number of weekdays in the span, 1..=7
    pub fn span_len(&self) -> u32 {
        days_forward(self.start_day, self.end_day) + 1
    }

    /// Weekdays spanned, walking forward from `start_day` to `end_day` inclusive
    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> {
        std::iter::successors(Some(self.start_day), |day| Some(day.succ()))
            .take(self.span_len() as usize)
    }

    /// Whether `day` falls inside the window's span
    pub fn covers(&self, day: Weekday) -> bool {
        days_forward(self.start_day, day) <= days_forward(self.start_day, self.end_day)
    }

    /// Whether any weekday is covered by both windows
    pub fn shares_day_with(&self, other: &RateWindow) -> bool {
        self.weekdays().any(|day| other.covers(day))
    }
}

/// Data needed to attach a rate window to a unit
#[derive(Debug, Clone, Deserialize)]
pub struct NewRateWindow {
    pub start_day: Weekday,
    pub end_day: Weekday,
    pub price_per_night: Decimal,
}

impl NewRateWindow {
    /// Build the stored window, rejecting negative prices
    pub fn into_window(self, unit_id: UnitId) -> Result<RateWindow, DomainError> {
        if self.price_per_night < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "Price per night must not be negative (got {})",
                self.price_per_night
            )));
        }

        Ok(RateWindow {
            id: RateWindowId::new(),
            unit_id,
            start_day: self.start_day,
            end_day: self.end_day,
            price_per_night: self.price_per_night,
        })
    }
}

/// Steps needed to walk forward from `from` to `to`, 0..=6
fn days_forward(from: Weekday, to: Weekday) -> u32 {
    (to.num_days_from_sunday() + 7 - from.num_days_from_sunday()) % 7
}

/// Find the rate window applicable to `date`.
///
/// First match in stored order wins. Windows overlapping by weekday are not
/// disambiguated here; see [`overlapping_windows`].
pub fn resolve_rate(date: NaiveDate, windows: &[RateWindow]) -> Option<&RateWindow> {
    let day = date.weekday();
    windows.iter().find(|window| window.covers(day))
}

/// Every pair of windows that share at least one weekday
pub fn overlapping_windows(windows: &[RateWindow]) -> Vec<(RateWindowId, RateWindowId)> {
    let mut pairs = Vec::new();
    for (i, first) in windows.iter().enumerate() {
        for second in &windows[i + 1..] {
            if first.shares_day_with(second) {
                pairs.push((first.id, second.id));
            }
        }
    }
    pairs
}

/// Earliest date on or after `date` that falls on `day`
pub fn first_occurrence_on_or_after(day: Weekday, date: NaiveDate) -> NaiveDate {
    let offset = days_forward(date.weekday(), day);
    date.checked_add_days(Days::new(u64::from(offset)))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start_day: Weekday, end_day: Weekday, price: i64) -> RateWindow {
        RateWindow {
            id: RateWindowId::new(),
            unit_id: UnitId::new(),
            start_day,
            end_day,
            price_per_night: Decimal::new(price, 0),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const ALL_DAYS: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    #[test]
    fn plain_window_spans_forward() {
        let w = window(Weekday::Fri, Weekday::Sun, 100);
        let days: Vec<_> = w.weekdays().collect();
        assert_eq!(days, vec![Weekday::Fri, Weekday::Sat, Weekday::Sun]);
        assert!(!w.covers(Weekday::Mon));
        assert!(!w.covers(Weekday::Thu));
    }

    #[test]
    fn wrapping_window_crosses_week_boundary() {
        let w = window(Weekday::Fri, Weekday::Mon, 100);
        let days: Vec<_> = w.weekdays().collect();
        assert_eq!(
            days,
            vec![Weekday::Fri, Weekday::Sat, Weekday::Sun, Weekday::Mon]
        );
        assert!(!w.covers(Weekday::Tue));
    }

    #[test]
    fn single_day_window() {
        let w = window(Weekday::Wed, Weekday::Wed, 80);
        assert_eq!(w.span_len(), 1);
        for day in ALL_DAYS {
            assert_eq!(w.covers(day), day == Weekday::Wed);
        }
    }

    #[test]
    fn sunday_to_saturday_covers_whole_week() {
        let w = window(Weekday::Sun, Weekday::Sat, 50);
        assert_eq!(w.span_len(), 7);
        assert!(ALL_DAYS.iter().all(|d| w.covers(*d)));
    }

    #[test]
    fn covers_agrees_with_weekday_walk() {
        for start in ALL_DAYS {
            for end in ALL_DAYS {
                let w = window(start, end, 1);
                let walked: Vec<_> = w.weekdays().collect();
                for day in ALL_DAYS {
                    assert_eq!(w.covers(day), walked.contains(&day), "{start}->{end} {day}");
                }
            }
        }
    }

    #[test]
    fn resolve_rate_first_match_wins() {
        let weekend = window(Weekday::Fri, Weekday::Sun, 100);
        let week = window(Weekday::Sun, Weekday::Sat, 60);
        let windows = vec![weekend.clone(), week.clone()];

        // 2030-06-08 is a Saturday, covered by both
        let resolved = resolve_rate(date(2030, 6, 8), &windows).unwrap();
        assert_eq!(resolved.id, weekend.id);

        // 2030-06-11 is a Tuesday, only the full-week window
        let resolved = resolve_rate(date(2030, 6, 11), &windows).unwrap();
        assert_eq!(resolved.id, week.id);
    }

    #[test]
    fn resolve_rate_with_no_windows() {
        assert!(resolve_rate(date(2030, 6, 8), &[]).is_none());
    }

    #[test]
    fn resolve_rate_returns_none_for_uncovered_day() {
        let windows = vec![window(Weekday::Fri, Weekday::Sun, 100)];
        // 2030-06-12 is a Wednesday
        assert!(resolve_rate(date(2030, 6, 12), &windows).is_none());
    }

    #[test]
    fn overlapping_windows_reports_shared_days() {
        let weekend = window(Weekday::Fri, Weekday::Sun, 100);
        let midweek = window(Weekday::Mon, Weekday::Thu, 70);
        let long_weekend = window(Weekday::Sat, Weekday::Mon, 120);

        let pairs = overlapping_windows(&[weekend.clone(), midweek.clone(), long_weekend.clone()]);
        assert_eq!(
            pairs,
            vec![(weekend.id, long_weekend.id), (midweek.id, long_weekend.id)]
        );
    }

    #[test]
    fn disjoint_windows_report_nothing() {
        let weekend = window(Weekday::Fri, Weekday::Sun, 100);
        let midweek = window(Weekday::Mon, Weekday::Thu, 70);
        assert!(overlapping_windows(&[weekend, midweek]).is_empty());
    }

    #[test]
    fn first_occurrence_same_day_is_identity() {
        // 2030-06-07 is a Friday
        assert_eq!(
            first_occurrence_on_or_after(Weekday::Fri, date(2030, 6, 7)),
            date(2030, 6, 7)
        );
    }

    #[test]
    fn first_occurrence_wraps_into_next_week() {
        // From Saturday 2030-06-08 the next Friday is 2030-06-14
        assert_eq!(
            first_occurrence_on_or_after(Weekday::Fri, date(2030, 6, 8)),
            date(2030, 6, 14)
        );
    }

    #[test]
    fn negative_price_is_rejected() {
        let new = NewRateWindow {
            start_day: Weekday::Mon,
            end_day: Weekday::Fri,
            price_per_night: Decimal::new(-1, 0),
        };
        assert!(matches!(
            new.into_window(UnitId::new()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn zero_price_is_allowed() {
        let new = NewRateWindow {
            start_day: Weekday::Mon,
            end_day: Weekday::Fri,
            price_per_night: Decimal::ZERO,
        };
        assert!(new.into_window(UnitId::new()).is_ok());
    }
}
