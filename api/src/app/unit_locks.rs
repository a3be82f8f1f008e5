//! Per-unit serialization
//!
//! Creating or cancelling a reservation reads the unit's bookings, decides,
//! then writes. Changing a unit's rate windows or attributes does the same
//! with the unit itself. Two such sections on the same unit must not
//! interleave, while sections on different units run freely.
//!
//! Entries live only while someone holds or waits for the lock, so the map
//! stays bounded by the number of units in use.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entities::UnitId;

type LockMap = DashMap<UnitId, Arc<Mutex<()>>>;

/// One async mutex per unit, created on first use and dropped on last release
#[derive(Default)]
pub struct UnitLocks {
    locks: Arc<LockMap>,
}

impl UnitLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a unit
    pub async fn acquire(&self, unit_id: UnitId) -> UnitGuard {
        // Clone the Arc out so the map shard is not held across the await
        let lock = self.locks.entry(unit_id).or_default().clone();
        let guard = lock.lock_owned().await;
        UnitGuard {
            unit_id,
            guard: Some(guard),
            locks: self.locks.clone(),
        }
    }

    /// Number of units with a live lock entry
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locks.len()
    }
}

/// Exclusive access to one unit; releasing the last user evicts the entry
pub struct UnitGuard {
    unit_id: UnitId,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
}

impl Drop for UnitGuard {
    fn drop(&mut self) {
        self.guard.take();
        // Only the map's own reference left: nobody holds or waits for it
        self.locks
            .remove_if(&self.unit_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
