//! Complex domain entity
//!
//! A residential complex groups units at one address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a complex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplexId(pub Uuid);

impl ComplexId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ComplexId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ComplexId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ComplexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A residential complex
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Complex {
    pub id: ComplexId,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create or rename a complex
#[derive(Debug, Clone, Deserialize)]
pub struct NewComplex {
    pub name: String,
    #[serde(default)]
    pub address: String,
}
