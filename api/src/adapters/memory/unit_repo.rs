//! In-memory adapter for UnitRepository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::entities::{ComplexId, NewUnit, Unit, UnitId};
use crate::domain::ports::UnitRepository;
use crate::error::DomainError;

/// In-memory implementation of UnitRepository
#[derive(Default, Clone)]
pub struct InMemoryUnitRepository {
    units: Arc<RwLock<HashMap<UnitId, Unit>>>,
}

impl InMemoryUnitRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a unit
    #[cfg(test)]
    pub fn with_unit(self, unit: Unit) -> Self {
        self.units.write().insert(unit.id, unit);
        self
    }
}

#[async_trait]
impl UnitRepository for InMemoryUnitRepository {
    async fn find_by_id(&self, id: &UnitId) -> Result<Option<Unit>, DomainError> {
        Ok(self.units.read().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Unit>, DomainError> {
        let mut units: Vec<Unit> = self.units.read().values().cloned().collect();
        units.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(units)
    }

    async fn list_by_complex(&self, complex_id: &ComplexId) -> Result<Vec<Unit>, DomainError> {
        let mut units = self.list().await?;
        units.retain(|u| u.complex_id == Some(*complex_id));
        Ok(units)
    }

    async fn create(&self, new_unit: &NewUnit) -> Result<Unit, DomainError> {
        let id = UnitId::new();
        let rate_windows = new_unit
            .rate_windows
            .iter()
            .cloned()
            .map(|w| w.into_window(id))
            .collect::<Result<Vec<_>, _>>()?;

        let unit = Unit {
            id,
            complex_id: new_unit.complex_id,
            title: new_unit.title.trim().to_string(),
            description: new_unit.description.clone(),
            capacity: new_unit.capacity,
            bedroom_count: new_unit.bedroom_count,
            mandatory_check_in_out: new_unit.mandatory_check_in_out,
            is_available: true,
            rate_windows,
            created_at: Utc::now(),
        };

        self.units.write().insert(unit.id, unit.clone());
        Ok(unit)
    }

    async fn update(&self, unit: &Unit) -> Result<(), DomainError> {
        let mut units = self.units.write();
        match units.get_mut(&unit.id) {
            Some(stored) => {
                *stored = unit.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("Unit {} not found", unit.id))),
        }
    }

    async fn set_available(&self, id: &UnitId, is_available: bool) -> Result<(), DomainError> {
        match self.units.write().get_mut(id) {
            Some(stored) => {
                stored.is_available = is_available;
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("Unit {} not found", id))),
        }
    }

    async fn delete(&self, id: &UnitId) -> Result<(), DomainError> {
        match self.units.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Unit {} not found", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_unit;

    #[tokio::test]
    async fn set_available_leaves_rate_windows_alone() {
        let unit = test_unit();
        let repo = InMemoryUnitRepository::new().with_unit(unit.clone());

        repo.set_available(&unit.id, false).await.unwrap();

        let stored = repo.find_by_id(&unit.id).await.unwrap().unwrap();
        assert!(!stored.is_available);
        assert_eq!(stored.rate_windows, unit.rate_windows);
    }

    #[tokio::test]
    async fn list_by_complex_filters() {
        let complex_id = ComplexId::new();
        let mut inside = test_unit();
        inside.complex_id = Some(complex_id);
        let repo = InMemoryUnitRepository::new()
            .with_unit(inside.clone())
            .with_unit(test_unit());

        let units = repo.list_by_complex(&complex_id).await.unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].id, inside.id);
    }

    #[tokio::test]
    async fn delete_missing_unit_fails() {
        let repo = InMemoryUnitRepository::new();
        assert!(matches!(
            repo.delete(&UnitId::new()).await,
            Err(DomainError::NotFound(_))
        ));
        assert!(matches!(
            repo.set_available(&UnitId::new(), true).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
