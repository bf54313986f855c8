//! In-process repository.

use super::{Entity, Repository};
use crate::{EntityId, Result};

/// Vector-backed table with an auto-increment id counter
#[derive(Clone, Debug)]
pub struct MemoryRepository<T> {
    rows: Vec<T>,
    last_id: u32,
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryRepository<T> {
    fn position(&self, id: EntityId) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == Some(id))
    }
}

impl<T: Entity> Repository<T> for MemoryRepository<T> {
    fn create(&mut self, entity: T) -> Result<T> {
        self.last_id += 1;
        let stored = entity.with_id(EntityId(self.last_id));
        self.rows.push(stored.clone());
        tracing::debug!("Inserted {} row {}", T::TABLE, self.last_id);
        Ok(stored)
    }

    fn get_all(&self) -> Result<Vec<T>> {
        Ok(self.rows.clone())
    }

    fn get_by_id(&self, id: EntityId) -> Result<Option<T>> {
        Ok(self.position(id).map(|idx| self.rows[idx].clone()))
    }

    fn update(&mut self, id: EntityId, entity: T) -> Result<()> {
        if let Some(idx) = self.position(id) {
            self.rows[idx] = entity.with_id(id);
            tracing::debug!("Updated {} row {}", T::TABLE, id);
        }
        Ok(())
    }

    fn delete(&mut self, id: EntityId) -> Result<()> {
        if let Some(idx) = self.position(id) {
            self.rows.remove(idx);
            tracing::debug!("Deleted {} row {}", T::TABLE, id);
        }
        Ok(())
    }
}
