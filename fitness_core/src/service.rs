//! Validation and existence checks in front of the repositories.
//!
//! Services receive their repositories at construction time and never touch
//! storage directly. Each write passes through the same gate:
//! 1. the entity must validate (`InvalidInput`)
//! 2. updates and deletes must target an existing row (`NotFound`)
//! 3. optionally, created names must be unique (`Duplicate`)

use crate::repository::{Entity, Repository};
use crate::{CardioWorkout, EntityId, Error, Exercise, Result, StrengthWorkout, Validate};
use serde::{Deserialize, Serialize};

/// Behavior switches shared by all services
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Reject a create whose name matches an existing row, ignoring case
    /// (Unicode lowercase folding).
    /// Costs one full-table read per create.
    #[serde(default)]
    pub reject_duplicate_names: bool,
}

fn create_checked<T, R>(
    repo: &mut R,
    entity: T,
    options: ServiceOptions,
    invalid: &str,
) -> Result<T>
where
    T: Entity + Validate,
    R: Repository<T>,
{
    if !entity.validate() {
        tracing::warn!("Rejected {}: {}", T::LABEL.to_lowercase(), invalid);
        return Err(Error::InvalidInput(invalid.to_string()));
    }

    if options.reject_duplicate_names {
        let name = entity.name().to_lowercase();
        let taken = repo
            .get_all()?
            .iter()
            .any(|row| row.name().to_lowercase() == name);
        if taken {
            return Err(Error::Duplicate {
                entity: T::LABEL,
                name: entity.name().to_string(),
            });
        }
    }

    let created = repo.create(entity)?;
    if let Some(id) = created.id() {
        tracing::info!("Created {} {} ({})", T::LABEL.to_lowercase(), id, created.name());
    }
    Ok(created)
}

fn require<T, R>(repo: &R, id: EntityId) -> Result<T>
where
    T: Entity,
    R: Repository<T>,
{
    repo.get_by_id(id)?.ok_or(Error::NotFound {
        entity: T::LABEL,
        id,
    })
}

fn update_checked<T, R>(repo: &mut R, id: EntityId, entity: T, invalid: &str) -> Result<()>
where
    T: Entity + Validate,
    R: Repository<T>,
{
    if !entity.validate() {
        tracing::warn!("Rejected update of {} {}: {}", T::LABEL.to_lowercase(), id, invalid);
        return Err(Error::InvalidInput(invalid.to_string()));
    }
    require(repo, id)?;
    repo.update(id, entity)?;
    tracing::info!("Updated {} {}", T::LABEL.to_lowercase(), id);
    Ok(())
}

fn delete_checked<T, R>(repo: &mut R, id: EntityId) -> Result<()>
where
    T: Entity,
    R: Repository<T>,
{
    require(repo, id)?;
    repo.delete(id)?;
    tracing::info!("Deleted {} {}", T::LABEL.to_lowercase(), id);
    Ok(())
}

/// First row with the smallest key; later rows win only on a strict `<`
pub fn first_min_by<T, K, F>(rows: Vec<T>, key: F) -> Option<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let mut rows = rows.into_iter();
    let mut min = rows.next()?;
    let mut min_key = key(&min);
    for row in rows {
        let row_key = key(&row);
        if row_key < min_key {
            min = row;
            min_key = row_key;
        }
    }
    Some(min)
}

// ============================================================================
// Workouts
// ============================================================================

/// Cardio and strength workout operations
pub struct WorkoutService<C, S> {
    cardio: C,
    strength: S,
    options: ServiceOptions,
}

impl<C, S> WorkoutService<C, S>
where
    C: Repository<CardioWorkout>,
    S: Repository<StrengthWorkout>,
{
    pub fn new(cardio: C, strength: S) -> Self {
        Self::with_options(cardio, strength, ServiceOptions::default())
    }

    pub fn with_options(cardio: C, strength: S, options: ServiceOptions) -> Self {
        Self {
            cardio,
            strength,
            options,
        }
    }

    pub fn create_cardio_workout(&mut self, workout: CardioWorkout) -> Result<CardioWorkout> {
        create_checked(
            &mut self.cardio,
            workout,
            self.options,
            "Invalid cardio workout data: check name, duration, calories, distance, heart rate",
        )
    }

    pub fn get_all_cardio_workouts(&self) -> Result<Vec<CardioWorkout>> {
        self.cardio.get_all()
    }

    pub fn get_cardio_workout_by_id(&self, id: EntityId) -> Result<CardioWorkout> {
        require(&self.cardio, id)
    }

    pub fn update_cardio_workout(&mut self, id: EntityId, workout: CardioWorkout) -> Result<()> {
        update_checked(&mut self.cardio, id, workout, "Invalid cardio workout data")
    }

    pub fn delete_cardio_workout(&mut self, id: EntityId) -> Result<()> {
        delete_checked::<CardioWorkout, _>(&mut self.cardio, id)
    }

    /// Cardio workout with the shortest duration, if any are stored
    pub fn cardio_with_min_duration(&self) -> Result<Option<CardioWorkout>> {
        let all = self.cardio.get_all()?;
        Ok(first_min_by(all, |w| w.common.duration_minutes))
    }

    pub fn create_strength_workout(&mut self, workout: StrengthWorkout) -> Result<StrengthWorkout> {
        create_checked(
            &mut self.strength,
            workout,
            self.options,
            "Invalid strength workout data: check name, duration, calories, sets, reps, weight",
        )
    }

    pub fn get_all_strength_workouts(&self) -> Result<Vec<StrengthWorkout>> {
        self.strength.get_all()
    }

    pub fn get_strength_workout_by_id(&self, id: EntityId) -> Result<StrengthWorkout> {
        require(&self.strength, id)
    }

    pub fn update_strength_workout(
        &mut self,
        id: EntityId,
        workout: StrengthWorkout,
    ) -> Result<()> {
        update_checked(&mut self.strength, id, workout, "Invalid strength workout data")
    }

    pub fn delete_strength_workout(&mut self, id: EntityId) -> Result<()> {
        delete_checked::<StrengthWorkout, _>(&mut self.strength, id)
    }

    /// Strength workout with the lightest weight, if any are stored
    pub fn strength_with_min_weight(&self) -> Result<Option<StrengthWorkout>> {
        let all = self.strength.get_all()?;
        Ok(first_min_by(all, |w| w.weight_kg))
    }
}

// ============================================================================
// Exercises
// ============================================================================

/// Exercise catalogue operations
pub struct ExerciseService<E> {
    exercises: E,
    options: ServiceOptions,
}

impl<E: Repository<Exercise>> ExerciseService<E> {
    pub fn new(exercises: E) -> Self {
        Self::with_options(exercises, ServiceOptions::default())
    }

    pub fn with_options(exercises: E, options: ServiceOptions) -> Self {
        Self { exercises, options }
    }

    pub fn create_exercise(&mut self, exercise: Exercise) -> Result<Exercise> {
        create_checked(
            &mut self.exercises,
            exercise,
            self.options,
            "Exercise name and muscle group cannot be empty",
        )
    }

    pub fn get_all_exercises(&self) -> Result<Vec<Exercise>> {
        self.exercises.get_all()
    }

    pub fn get_exercise_by_id(&self, id: EntityId) -> Result<Exercise> {
        require(&self.exercises, id)
    }

    pub fn update_exercise(&mut self, id: EntityId, exercise: Exercise) -> Result<()> {
        update_checked(
            &mut self.exercises,
            id,
            exercise,
            "Exercise name and muscle group cannot be empty",
        )
    }

    pub fn delete_exercise(&mut self, id: EntityId) -> Result<()> {
        delete_checked::<Exercise, _>(&mut self.exercises, id)
    }
}
