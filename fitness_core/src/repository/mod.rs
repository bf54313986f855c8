//! Persistence contract and its implementations.
//!
//! Services depend on [`Repository`] only; which store sits behind it is
//! chosen by the caller:
//!
//! | Type | Backing |
//! |------|---------|
//! | [`MemoryRepository`] | in-process table, lost on exit |
//! | [`JsonTableRepository`] | one locked JSON file per table in a data directory |
//!
//! Repositories report absence as `Ok(None)` and wrap every storage failure
//! into [`crate::Error::Database`]. Translating absence into a not-found
//! failure is the service layer's job.

mod json_table;
mod memory;

pub use json_table::JsonTableRepository;
pub use memory::MemoryRepository;

use crate::{CardioWorkout, EntityId, Exercise, Result, StrengthWorkout};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A storable row type
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Table name in the store
    const TABLE: &'static str;
    /// Human-readable singular label, capitalized ("Cardio workout")
    const LABEL: &'static str;

    fn id(&self) -> Option<EntityId>;

    /// Return the same entity carrying `id`
    fn with_id(self, id: EntityId) -> Self;

    /// Name used for duplicate detection
    fn name(&self) -> &str;
}

/// CRUD access to the rows of one entity type
pub trait Repository<T: Entity> {
    /// Store `entity` and return it with its assigned id
    fn create(&mut self, entity: T) -> Result<T>;

    /// All rows in id order
    fn get_all(&self) -> Result<Vec<T>>;

    fn get_by_id(&self, id: EntityId) -> Result<Option<T>>;

    /// Replace the fields of row `id`; a missing row is left alone
    fn update(&mut self, id: EntityId, entity: T) -> Result<()>;

    /// Remove row `id`; a missing row is left alone
    fn delete(&mut self, id: EntityId) -> Result<()>;
}

/// Lets callers pick the backend at runtime via `Box<dyn Repository<T>>`
impl<T: Entity, R: Repository<T> + ?Sized> Repository<T> for Box<R> {
    fn create(&mut self, entity: T) -> Result<T> {
        (**self).create(entity)
    }

    fn get_all(&self) -> Result<Vec<T>> {
        (**self).get_all()
    }

    fn get_by_id(&self, id: EntityId) -> Result<Option<T>> {
        (**self).get_by_id(id)
    }

    fn update(&mut self, id: EntityId, entity: T) -> Result<()> {
        (**self).update(id, entity)
    }

    fn delete(&mut self, id: EntityId) -> Result<()> {
        (**self).delete(id)
    }
}

impl Entity for CardioWorkout {
    const TABLE: &'static str = "cardio_workouts";
    const LABEL: &'static str = "Cardio workout";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    fn name(&self) -> &str {
        &self.common.name
    }
}

impl Entity for StrengthWorkout {
    const TABLE: &'static str = "strength_workouts";
    const LABEL: &'static str = "Strength workout";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    fn name(&self) -> &str {
        &self.common.name
    }
}

impl Entity for Exercise {
    const TABLE: &'static str = "exercises";
    const LABEL: &'static str = "Exercise";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    fn name(&self) -> &str {
        &self.name
    }
}
