//! Unit domain entity
//!
//! A bookable residential unit with its weekly rate windows attached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::complex::ComplexId;
use super::rate_window::{NewRateWindow, RateWindow};

/// Unique identifier for a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UnitId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A residential unit
#[derive(Debug, Clone, Serialize)]
pub struct Unit {
    pub id: UnitId,
    pub complex_id: Option<ComplexId>,
    pub title: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub bedroom_count: i32,
    /// Stays must start on the applicable window's start day and end on its end day
    pub mandatory_check_in_out: bool,
    /// Cached flag, recomputed when a reservation is cancelled.
    /// Not authoritative for any specific date.
    pub is_available: bool,
    /// Rate windows in stored order; resolution is first-match
    pub rate_windows: Vec<RateWindow>,
    pub created_at: DateTime<Utc>,
}

impl Unit {
    pub fn has_rates(&self) -> bool {
        !self.rate_windows.is_empty()
    }
}

/// Data needed to create a new unit
#[derive(Debug, Clone, Deserialize)]
pub struct NewUnit {
    #[serde(default)]
    pub complex_id: Option<ComplexId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    #[serde(default = "default_bedroom_count")]
    pub bedroom_count: i32,
    #[serde(default)]
    pub mandatory_check_in_out: bool,
    #[serde(default)]
    pub rate_windows: Vec<NewRateWindow>,
}

/// Partial update of a unit's attributes; absent fields are left unchanged.
/// Rate windows are replaced separately.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitChanges {
    pub complex_id: Option<ComplexId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub bedroom_count: Option<i32>,
    pub mandatory_check_in_out: Option<bool>,
}

impl UnitChanges {
    pub fn apply_to(self, unit: &mut Unit) {
        if let Some(complex_id) = self.complex_id {
            unit.complex_id = Some(complex_id);
        }
        if let Some(title) = self.title {
            unit.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            unit.description = Some(description);
        }
        if let Some(capacity) = self.capacity {
            unit.capacity = capacity;
        }
        if let Some(bedroom_count) = self.bedroom_count {
            unit.bedroom_count = bedroom_count;
        }
        if let Some(mandatory) = self.mandatory_check_in_out {
            unit.mandatory_check_in_out = mandatory;
        }
    }
}

fn default_capacity() -> i32 {
    2
}

fn default_bedroom_count() -> i32 {
    1
}
