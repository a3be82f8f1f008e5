//! Reservation domain entity
//!
//! A stay is the half-open range `[check_in, check_out)`: the night of
//! `check_out` is neither occupied nor charged.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::unit::UnitId;

/// Unique identifier for a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(pub Uuid);

impl ReservationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReservationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the guest or administrator acting on a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "pending"),
            ReservationStatus::Confirmed => write!(f, "confirmed"),
            ReservationStatus::Cancelled => write!(f, "cancelled"),
            ReservationStatus::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" | "canceled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            _ => Err(format!("Unknown reservation status: {}", s)),
        }
    }
}

/// A booking of one unit for a stay
#[derive(Debug, Clone, Serialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub unit_id: UnitId,
    pub user_id: UserId,
    pub check_in: NaiveDate,
    /// Exclusive
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Cancelled reservations never block a unit
    pub fn is_active(&self) -> bool {
        self.status != ReservationStatus::Cancelled
    }

    /// Whether the night of `date` belongs to this stay
    pub fn occupies(&self, date: NaiveDate) -> bool {
        date >= self.check_in && date < self.check_out
    }

    /// Whether `[check_in, check_out)` intersects this stay
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        stays_overlap(check_in, check_out, self.check_in, self.check_out)
    }

    /// Whether this reservation blocks a new stay on the same unit
    pub fn conflicts_with(&self, unit_id: UnitId, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.unit_id == unit_id && self.is_active() && self.overlaps(check_in, check_out)
    }

    pub fn can_be_confirmed(&self) -> bool {
        self.status == ReservationStatus::Pending
    }
}

/// Half-open overlap test. Adjacent stays (`a_out == b_in`) do not overlap.
pub fn stays_overlap(a_in: NaiveDate, a_out: NaiveDate, b_in: NaiveDate, b_out: NaiveDate) -> bool {
    !(a_out <= b_in || a_in >= b_out)
}

/// Data needed to request a new reservation
#[derive(Debug, Clone, Deserialize)]
pub struct NewReservation {
    pub user_id: UserId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_reservation(status: ReservationStatus) -> Reservation {
        Reservation {
            id: ReservationId::new(),
            unit_id: UnitId::new(),
            user_id: UserId(Uuid::new_v4()),
            check_in: date(2030, 6, 10),
            check_out: date(2030, 6, 15),
            status,
            total_price: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn checkout_night_is_not_occupied() {
        let r = make_reservation(ReservationStatus::Confirmed);
        assert!(r.occupies(date(2030, 6, 10)));
        assert!(r.occupies(date(2030, 6, 14)));
        assert!(!r.occupies(date(2030, 6, 15)));
        assert!(!r.occupies(date(2030, 6, 9)));
    }

    #[test]
    fn adjacent_stays_do_not_overlap() {
        let r = make_reservation(ReservationStatus::Confirmed);
        assert!(!r.overlaps(date(2030, 6, 15), date(2030, 6, 18)));
        assert!(!r.overlaps(date(2030, 6, 5), date(2030, 6, 10)));
    }

    #[test]
    fn partial_and_enclosing_stays_overlap() {
        let r = make_reservation(ReservationStatus::Confirmed);
        assert!(r.overlaps(date(2030, 6, 14), date(2030, 6, 18)));
        assert!(r.overlaps(date(2030, 6, 8), date(2030, 6, 11)));
        assert!(r.overlaps(date(2030, 6, 11), date(2030, 6, 12)));
        assert!(r.overlaps(date(2030, 6, 1), date(2030, 6, 30)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let ranges = [
            (date(2030, 6, 10), date(2030, 6, 15)),
            (date(2030, 6, 14), date(2030, 6, 18)),
            (date(2030, 6, 15), date(2030, 6, 16)),
            (date(2030, 6, 1), date(2030, 6, 30)),
            (date(2030, 6, 3), date(2030, 6, 4)),
        ];
        for (a_in, a_out) in ranges {
            for (b_in, b_out) in ranges {
                assert_eq!(
                    stays_overlap(a_in, a_out, b_in, b_out),
                    stays_overlap(b_in, b_out, a_in, a_out)
                );
            }
        }
    }

    #[test]
    fn cancelled_reservation_never_conflicts() {
        let r = make_reservation(ReservationStatus::Cancelled);
        assert!(!r.conflicts_with(r.unit_id, date(2030, 6, 11), date(2030, 6, 12)));
    }

    #[test]
    fn other_unit_never_conflicts() {
        let r = make_reservation(ReservationStatus::Pending);
        assert!(!r.conflicts_with(UnitId::new(), date(2030, 6, 11), date(2030, 6, 12)));
        assert!(r.conflicts_with(r.unit_id, date(2030, 6, 11), date(2030, 6, 12)));
    }

    #[test]
    fn only_pending_can_be_confirmed() {
        assert!(make_reservation(ReservationStatus::Pending).can_be_confirmed());
        assert!(!make_reservation(ReservationStatus::Confirmed).can_be_confirmed());
        assert!(!make_reservation(ReservationStatus::Cancelled).can_be_confirmed());
        assert!(!make_reservation(ReservationStatus::Completed).can_be_confirmed());
    }

    #[test]
    fn reservation_status_display() {
        assert_eq!(ReservationStatus::Pending.to_string(), "pending");
        assert_eq!(ReservationStatus::Confirmed.to_string(), "confirmed");
        assert_eq!(ReservationStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(ReservationStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn reservation_status_from_str() {
        assert_eq!(
            "pending".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Pending
        );
        assert_eq!(
            "Canceled".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Cancelled
        );
        assert!("archived".parse::<ReservationStatus>().is_err());
    }
}
