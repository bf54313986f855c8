//! Cross-cutting behavior shared by the entities: validation and tracking.

use crate::{CardioWorkout, Exercise, StrengthWorkout, Workout};

/// Entities that can check their own invariants
pub trait Validate {
    fn validate(&self) -> bool;

    /// Coarse-grained outcome; does not name the failing field
    fn validation_message(&self) -> &'static str {
        if self.validate() {
            "Data is valid"
        } else {
            "Data is invalid"
        }
    }
}

/// Entities that can describe themselves for a log or console
pub trait Track {
    fn summary(&self) -> String;

    fn tracking_line(&self) -> String {
        format!("[Tracking] {}", self.summary())
    }
}

/// Render the validation outcome of a single item
pub fn validation_result<T: Validate + ?Sized>(item: &T) -> String {
    format!("Validation result: {}", item.validation_message())
}

/// Render tracking lines for a list of items under a common header
pub fn tracking_report<T: Track>(items: &[T]) -> String {
    let mut report = String::from("=== All Tracking Info ===");
    for item in items {
        report.push('\n');
        report.push_str(&item.tracking_line());
    }
    report
}

impl Validate for CardioWorkout {
    fn validate(&self) -> bool {
        self.is_valid()
    }
}

impl Validate for StrengthWorkout {
    fn validate(&self) -> bool {
        self.is_valid()
    }
}

impl Validate for Workout {
    fn validate(&self) -> bool {
        self.is_valid()
    }
}

impl Validate for Exercise {
    fn validate(&self) -> bool {
        self.is_valid()
    }
}

impl Track for CardioWorkout {
    fn summary(&self) -> String {
        format!(
            "Cardio: {} | Distance: {:.2} km | HR: {} bpm | Intensity: {:.2}",
            self.common.name,
            self.distance_km,
            self.average_heart_rate,
            self.intensity()
        )
    }
}

impl Track for StrengthWorkout {
    fn summary(&self) -> String {
        format!(
            "Strength: {} | {}x{} sets | Weight: {:.1} kg | Intensity: {:.2}",
            self.common.name,
            self.sets,
            self.reps,
            self.weight_kg,
            self.intensity()
        )
    }
}

impl Track for Workout {
    fn summary(&self) -> String {
        match self {
            Workout::Cardio(w) => w.summary(),
            Workout::Strength(w) => w.summary(),
        }
    }
}

impl Track for Exercise {
    fn summary(&self) -> String {
        format!(
            "[Exercise] {} | Muscle: {} | Equipment: {}",
            self.name, self.muscle_group, self.equipment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_message() {
        let valid = CardioWorkout::new("Morning Running", 30, 300, 5.0, 145);
        let invalid = CardioWorkout::new("", 30, 300, 5.0, 145);

        assert_eq!(valid.validation_message(), "Data is valid");
        assert_eq!(invalid.validation_message(), "Data is invalid");
        assert_eq!(validation_result(&valid), "Validation result: Data is valid");
    }

    #[test]
    fn test_validation_through_trait_object() {
        let items: Vec<Box<dyn Validate>> = vec![
            Box::new(StrengthWorkout::new("Squats", 25, 200, 5, 12, 80.0)),
            Box::new(Exercise::new("", "Chest", "None")),
        ];

        let outcomes: Vec<bool> = items.iter().map(|item| item.validate()).collect();
        assert_eq!(outcomes, vec![true, false]);
        assert_eq!(
            validation_result(&*items[1]),
            "Validation result: Data is invalid"
        );
    }

    #[test]
    fn test_cardio_summary() {
        let workout = CardioWorkout::new("Morning Running", 30, 300, 5.0, 145);
        assert_eq!(
            workout.summary(),
            "Cardio: Morning Running | Distance: 5.00 km | HR: 145 bpm | Intensity: 24.17"
        );
    }

    #[test]
    fn test_strength_summary() {
        let workout = StrengthWorkout::new("Bench Press", 20, 150, 4, 10, 60.0);
        assert_eq!(
            workout.summary(),
            "Strength: Bench Press | 4x10 sets | Weight: 60.0 kg | Intensity: 120.00"
        );
        assert_eq!(
            workout.tracking_line(),
            "[Tracking] Strength: Bench Press | 4x10 sets | Weight: 60.0 kg | Intensity: 120.00"
        );
    }

    #[test]
    fn test_exercise_summary() {
        let exercise = Exercise::new("Push-ups", "Chest", "None");
        assert_eq!(
            exercise.summary(),
            "[Exercise] Push-ups | Muscle: Chest | Equipment: None"
        );
    }

    #[test]
    fn test_tracking_report() {
        let workouts = vec![
            CardioWorkout::new("Swimming", 40, 350, 2.0, 120),
            CardioWorkout::new("Evening Cycling", 45, 400, 15.0, 130),
        ];

        let report = tracking_report(&workouts);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "=== All Tracking Info ===");
        assert!(lines[1].starts_with("[Tracking] Cardio: Swimming"));
        assert!(lines[2].starts_with("[Tracking] Cardio: Evening Cycling"));
    }

    #[test]
    fn test_tracking_report_empty() {
        let empty: Vec<Exercise> = Vec::new();
        assert_eq!(tracking_report(&empty), "=== All Tracking Info ===");
    }
}
