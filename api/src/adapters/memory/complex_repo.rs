//! In-memory adapter for ComplexRepository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::entities::{Complex, ComplexId, NewComplex};
use crate::domain::ports::ComplexRepository;
use crate::error::DomainError;

/// In-memory implementation of ComplexRepository
#[derive(Default, Clone)]
pub struct InMemoryComplexRepository {
    complexes: Arc<RwLock<HashMap<ComplexId, Complex>>>,
}

impl InMemoryComplexRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a complex
    #[cfg(test)]
    pub fn with_complex(self, complex: Complex) -> Self {
        self.complexes.write().insert(complex.id, complex);
        self
    }
}

#[async_trait]
impl ComplexRepository for InMemoryComplexRepository {
    async fn find_by_id(&self, id: &ComplexId) -> Result<Option<Complex>, DomainError> {
        Ok(self.complexes.read().get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Complex>, DomainError> {
        let mut complexes: Vec<Complex> = self.complexes.read().values().cloned().collect();
        complexes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(complexes)
    }

    async fn create(&self, new_complex: &NewComplex) -> Result<Complex, DomainError> {
        let complex = Complex {
            id: ComplexId::new(),
            name: new_complex.name.trim().to_string(),
            address: new_complex.address.trim().to_string(),
            created_at: Utc::now(),
        };
        self.complexes.write().insert(complex.id, complex.clone());
        Ok(complex)
    }

    async fn update(&self, complex: &Complex) -> Result<(), DomainError> {
        match self.complexes.write().get_mut(&complex.id) {
            Some(stored) => {
                *stored = complex.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!(
                "Complex {} not found",
                complex.id
            ))),
        }
    }

    async fn delete(&self, id: &ComplexId) -> Result<(), DomainError> {
        match self.complexes.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Complex {} not found", id))),
        }
    }
}
