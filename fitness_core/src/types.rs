//! Core domain types for the fitness tracker.
//!
//! This module defines the entities stored by the repositories:
//! - Identifiers assigned by the store
//! - Workouts (cardio, strength) sharing a common base
//! - Exercises
//!
//! Constructors named `new` do not validate, so that the service layer can
//! act as the validation gate. `try_new` and the setters enforce their
//! preconditions and report [`Error::InvalidInput`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Row identifier assigned by the store on creation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// ============================================================================
// Workout Types
// ============================================================================

/// Discriminant of the workout variants
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    Cardio,
    Strength,
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutKind::Cardio => f.write_str("Cardio"),
            WorkoutKind::Strength => f.write_str("Strength"),
        }
    }
}

/// Fields shared by every workout variant
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutCommon {
    pub name: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
}

impl WorkoutCommon {
    pub fn new(name: impl Into<String>, duration_minutes: i32, calories_burned: i32) -> Self {
        Self {
            name: name.into(),
            duration_minutes,
            calories_burned,
        }
    }

    /// Base invariant: non-blank name, positive duration and calories
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.duration_minutes > 0 && self.calories_burned > 0
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidInput("Name must not be empty".into()));
        }
        self.name = name;
        Ok(())
    }

    pub fn set_duration_minutes(&mut self, duration_minutes: i32) -> Result<()> {
        require_positive("Duration", duration_minutes)?;
        self.duration_minutes = duration_minutes;
        Ok(())
    }

    pub fn set_calories_burned(&mut self, calories_burned: i32) -> Result<()> {
        require_positive("Calories", calories_burned)?;
        self.calories_burned = calories_burned;
        Ok(())
    }

    /// Divide by the duration, yielding 0.0 when the duration is not positive
    fn per_minute(&self, amount: f64) -> f64 {
        if self.duration_minutes <= 0 {
            return 0.0;
        }
        amount / f64::from(self.duration_minutes)
    }
}

impl AsRef<WorkoutCommon> for WorkoutCommon {
    fn as_ref(&self) -> &WorkoutCommon {
        self
    }
}

/// A cardio session (running, cycling, swimming, ...)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CardioWorkout {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(flatten)]
    pub common: WorkoutCommon,
    pub distance_km: f64,
    pub average_heart_rate: i32,
}

impl CardioWorkout {
    pub fn new(
        name: impl Into<String>,
        duration_minutes: i32,
        calories_burned: i32,
        distance_km: f64,
        average_heart_rate: i32,
    ) -> Self {
        Self {
            id: None,
            common: WorkoutCommon::new(name, duration_minutes, calories_burned),
            distance_km,
            average_heart_rate,
        }
    }

    /// Build a cardio workout, rejecting values that would not validate
    pub fn try_new(
        name: impl Into<String>,
        duration_minutes: i32,
        calories_burned: i32,
        distance_km: f64,
        average_heart_rate: i32,
    ) -> Result<Self> {
        let workout = Self::new(
            name,
            duration_minutes,
            calories_burned,
            distance_km,
            average_heart_rate,
        );
        if !workout.is_valid() {
            return Err(Error::InvalidInput(
                "Invalid cardio workout data: check name, duration, calories, distance, heart rate"
                    .into(),
            ));
        }
        Ok(workout)
    }

    /// Intensity = (heart rate / duration) * distance
    pub fn intensity(&self) -> f64 {
        self.common.per_minute(f64::from(self.average_heart_rate)) * self.distance_km
    }

    pub fn is_valid(&self) -> bool {
        self.common.is_valid()
            && is_positive_finite(self.distance_km)
            && self.average_heart_rate > 0
    }

    pub fn set_distance_km(&mut self, distance_km: f64) -> Result<()> {
        require_positive_finite("Distance", distance_km)?;
        self.distance_km = distance_km;
        Ok(())
    }

    pub fn set_average_heart_rate(&mut self, average_heart_rate: i32) -> Result<()> {
        require_positive("Heart rate", average_heart_rate)?;
        self.average_heart_rate = average_heart_rate;
        Ok(())
    }
}

impl AsRef<WorkoutCommon> for CardioWorkout {
    fn as_ref(&self) -> &WorkoutCommon {
        &self.common
    }
}

/// A resistance training session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StrengthWorkout {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(flatten)]
    pub common: WorkoutCommon,
    pub sets: i32,
    pub reps: i32,
    pub weight_kg: f64,
}

impl StrengthWorkout {
    pub fn new(
        name: impl Into<String>,
        duration_minutes: i32,
        calories_burned: i32,
        sets: i32,
        reps: i32,
        weight_kg: f64,
    ) -> Self {
        Self {
            id: None,
            common: WorkoutCommon::new(name, duration_minutes, calories_burned),
            sets,
            reps,
            weight_kg,
        }
    }

    /// Build a strength workout, rejecting values that would not validate
    pub fn try_new(
        name: impl Into<String>,
        duration_minutes: i32,
        calories_burned: i32,
        sets: i32,
        reps: i32,
        weight_kg: f64,
    ) -> Result<Self> {
        let workout = Self::new(name, duration_minutes, calories_burned, sets, reps, weight_kg);
        if !workout.is_valid() {
            return Err(Error::InvalidInput(
                "Invalid strength workout data: check name, duration, calories, sets, reps, weight"
                    .into(),
            ));
        }
        Ok(workout)
    }

    /// Intensity = (sets * reps * weight) / duration
    pub fn intensity(&self) -> f64 {
        let volume = f64::from(self.sets) * f64::from(self.reps) * self.weight_kg;
        self.common.per_minute(volume)
    }

    pub fn is_valid(&self) -> bool {
        self.common.is_valid()
            && self.sets > 0
            && self.reps > 0
            && is_positive_finite(self.weight_kg)
    }

    pub fn set_sets(&mut self, sets: i32) -> Result<()> {
        require_positive("Sets", sets)?;
        self.sets = sets;
        Ok(())
    }

    pub fn set_reps(&mut self, reps: i32) -> Result<()> {
        require_positive("Reps", reps)?;
        self.reps = reps;
        Ok(())
    }

    pub fn set_weight_kg(&mut self, weight_kg: f64) -> Result<()> {
        require_positive_finite("Weight", weight_kg)?;
        self.weight_kg = weight_kg;
        Ok(())
    }
}

impl AsRef<WorkoutCommon> for StrengthWorkout {
    fn as_ref(&self) -> &WorkoutCommon {
        &self.common
    }
}

/// Any workout, dispatching type-specific behavior in one place
#[derive(Clone, Debug, PartialEq)]
pub enum Workout {
    Cardio(CardioWorkout),
    Strength(StrengthWorkout),
}

impl Workout {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Workout::Cardio(_) => WorkoutKind::Cardio,
            Workout::Strength(_) => WorkoutKind::Strength,
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        match self {
            Workout::Cardio(w) => w.id,
            Workout::Strength(w) => w.id,
        }
    }

    pub fn common(&self) -> &WorkoutCommon {
        match self {
            Workout::Cardio(w) => &w.common,
            Workout::Strength(w) => &w.common,
        }
    }

    pub fn name(&self) -> &str {
        &self.common().name
    }

    pub fn intensity(&self) -> f64 {
        match self {
            Workout::Cardio(w) => w.intensity(),
            Workout::Strength(w) => w.intensity(),
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            Workout::Cardio(w) => w.is_valid(),
            Workout::Strength(w) => w.is_valid(),
        }
    }

    /// One-line description shared by all variants
    pub fn overview(&self) -> String {
        let common = self.common();
        format!(
            "[{}] {} | Duration: {} min | Calories: {} | Intensity: {:.2}",
            self.kind(),
            common.name,
            common.duration_minutes,
            common.calories_burned,
            self.intensity()
        )
    }
}

impl AsRef<WorkoutCommon> for Workout {
    fn as_ref(&self) -> &WorkoutCommon {
        self.common()
    }
}

impl From<CardioWorkout> for Workout {
    fn from(workout: CardioWorkout) -> Self {
        Workout::Cardio(workout)
    }
}

impl From<StrengthWorkout> for Workout {
    fn from(workout: StrengthWorkout) -> Self {
        Workout::Strength(workout)
    }
}

// ============================================================================
// Exercise Type
// ============================================================================

/// A catalogued exercise; independent of workouts
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub name: String,
    pub muscle_group: String,
    pub equipment: String,
}

impl Exercise {
    pub fn new(
        name: impl Into<String>,
        muscle_group: impl Into<String>,
        equipment: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            muscle_group: muscle_group.into(),
            equipment: equipment.into(),
        }
    }

    /// Name and muscle group must not be blank
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.muscle_group.trim().is_empty()
    }
}

fn require_positive(field: &str, value: i32) -> Result<()> {
    if value <= 0 {
        return Err(Error::InvalidInput(format!("{} must be greater than 0", field)));
    }
    Ok(())
}

/// Rejects NaN and infinities along with non-positive values; JSON cannot
/// hold non-finite numbers.
fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn require_positive_finite(field: &str, value: f64) -> Result<()> {
    if !is_positive_finite(value) {
        return Err(Error::InvalidInput(format!(
            "{} must be a finite number greater than 0",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rstest::rstest;

    fn running() -> CardioWorkout {
        CardioWorkout::new("Morning Running", 30, 300, 5.0, 145)
    }

    fn bench_press() -> StrengthWorkout {
        StrengthWorkout::new("Bench Press", 20, 150, 4, 10, 60.0)
    }

    #[test]
    fn test_cardio_intensity() {
        assert_approx_eq!(running().intensity(), 145.0 / 30.0 * 5.0);
        assert_approx_eq!(running().intensity(), 24.166_666, 1e-5);
    }

    #[test]
    fn test_strength_intensity() {
        assert_approx_eq!(bench_press().intensity(), 120.0);
    }

    #[test]
    fn test_intensity_with_zero_duration_is_zero() {
        let cardio = CardioWorkout::new("Broken", 0, 300, 5.0, 145);
        let strength = StrengthWorkout::new("Broken", 0, 150, 4, 10, 60.0);

        assert_eq!(cardio.intensity(), 0.0);
        assert_eq!(strength.intensity(), 0.0);
    }

    #[rstest]
    #[case::valid(running(), true)]
    #[case::blank_name(CardioWorkout::new("   ", 30, 300, 5.0, 145), false)]
    #[case::zero_duration(CardioWorkout::new("Run", 0, 300, 5.0, 145), false)]
    #[case::negative_calories(CardioWorkout::new("Run", 30, -1, 5.0, 145), false)]
    #[case::zero_distance(CardioWorkout::new("Run", 30, 300, 0.0, 145), false)]
    #[case::negative_heart_rate(CardioWorkout::new("Run", 30, 300, 5.0, -10), false)]
    #[case::infinite_distance(CardioWorkout::new("Run", 30, 300, f64::INFINITY, 145), false)]
    #[case::nan_distance(CardioWorkout::new("Run", 30, 300, f64::NAN, 145), false)]
    fn test_cardio_validity(#[case] workout: CardioWorkout, #[case] expected: bool) {
        assert_eq!(workout.is_valid(), expected);
    }

    #[rstest]
    #[case::valid(bench_press(), true)]
    #[case::empty_name(StrengthWorkout::new("", 20, 150, 4, 10, 60.0), false)]
    #[case::negative_duration(StrengthWorkout::new("Bench", -5, 150, 4, 10, 60.0), false)]
    #[case::zero_calories(StrengthWorkout::new("Bench", 20, 0, 4, 10, 60.0), false)]
    #[case::zero_sets(StrengthWorkout::new("Bench", 20, 150, 0, 10, 60.0), false)]
    #[case::zero_reps(StrengthWorkout::new("Bench", 20, 150, 4, 0, 60.0), false)]
    #[case::negative_weight(StrengthWorkout::new("Bench", 20, 150, 4, 10, -60.0), false)]
    #[case::infinite_weight(StrengthWorkout::new("Bench", 20, 150, 4, 10, f64::INFINITY), false)]
    #[case::nan_weight(StrengthWorkout::new("Bench", 20, 150, 4, 10, f64::NAN), false)]
    fn test_strength_validity(#[case] workout: StrengthWorkout, #[case] expected: bool) {
        assert_eq!(workout.is_valid(), expected);
    }

    #[test]
    fn test_try_new_rejects_invalid() {
        assert!(CardioWorkout::try_new("Run", 30, 300, 5.0, 145).is_ok());
        assert!(matches!(
            CardioWorkout::try_new("Run", 30, 300, -1.0, 145),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            StrengthWorkout::try_new("Squats", 25, 200, 5, 12, 0.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_setters_enforce_preconditions() {
        let mut workout = running();

        assert!(workout.common.set_duration_minutes(0).is_err());
        assert!(workout.common.set_calories_burned(-5).is_err());
        assert!(workout.common.set_name("  ").is_err());
        assert!(workout.set_distance_km(0.0).is_err());
        assert!(workout.set_distance_km(f64::NAN).is_err());
        assert!(workout.set_distance_km(f64::INFINITY).is_err());
        assert!(workout.set_average_heart_rate(0).is_err());
        assert_eq!(workout, running());

        workout.common.set_duration_minutes(35).unwrap();
        workout.common.set_calories_burned(320).unwrap();
        assert_eq!(workout.common.duration_minutes, 35);
        assert_eq!(workout.common.calories_burned, 320);

        let mut strength = bench_press();
        assert!(strength.set_sets(0).is_err());
        assert!(strength.set_reps(-1).is_err());
        assert!(strength.set_weight_kg(0.0).is_err());
        assert!(strength.set_weight_kg(f64::INFINITY).is_err());
        strength.set_weight_kg(62.5).unwrap();
        assert_eq!(strength.weight_kg, 62.5);
    }

    #[test]
    fn test_workout_dispatch() {
        let workouts: Vec<Workout> = vec![running().into(), bench_press().into()];

        assert_eq!(workouts[0].kind(), WorkoutKind::Cardio);
        assert_eq!(workouts[1].kind(), WorkoutKind::Strength);
        assert_eq!(workouts[1].name(), "Bench Press");
        assert_approx_eq!(workouts[1].intensity(), 120.0);
        assert_eq!(
            workouts[1].overview(),
            "[Strength] Bench Press | Duration: 20 min | Calories: 150 | Intensity: 120.00"
        );
    }

    #[test]
    fn test_exercise_validity() {
        assert!(Exercise::new("Push-ups", "Chest", "None").is_valid());
        assert!(Exercise::new("Plank", "Core", "").is_valid());
        assert!(!Exercise::new(" ", "Chest", "None").is_valid());
        assert!(!Exercise::new("Push-ups", "", "None").is_valid());
    }

    #[test]
    fn test_cardio_json_layout_is_flat() {
        let mut workout = running();
        workout.id = Some(EntityId(3));
        let json = serde_json::to_value(&workout).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Morning Running");
        assert_eq!(json["duration_minutes"], 30);
        assert_eq!(json["average_heart_rate"], 145);
    }
}
