//! Scripted walkthrough of every service operation.
//!
//! The walkthrough can be rerun against a persistent store. When duplicate
//! names are rejected, sample rows left by an earlier run are reused instead
//! of created again.

use crate::{display_id, print_created, App};
use fitness_core::sorting;
use fitness_core::*;

pub fn run(app: &mut App) -> Result<()> {
    println!("   FITNESS TRACKER - DEMO   ");

    // 1. Create
    println!("\n--- 1. CREATING ENTITIES ---\n");

    let workouts = &mut app.workouts;
    let created =
        workouts.create_cardio_workout(CardioWorkout::new("Morning Running", 30, 300, 5.0, 145));
    let mut running = stored(created, "Morning Running", || workouts.get_all_cardio_workouts())?;

    let created =
        workouts.create_cardio_workout(CardioWorkout::new("Evening Cycling", 45, 400, 15.0, 130));
    let cycling = stored(created, "Evening Cycling", || workouts.get_all_cardio_workouts())?;

    let created = workouts.create_cardio_workout(CardioWorkout::new("Swimming", 40, 350, 2.0, 120));
    let swimming = stored(created, "Swimming", || workouts.get_all_cardio_workouts())?;

    let created =
        workouts.create_strength_workout(StrengthWorkout::new("Bench Press", 20, 150, 4, 10, 60.0));
    let bench_press = stored(created, "Bench Press", || workouts.get_all_strength_workouts())?;

    let created =
        workouts.create_strength_workout(StrengthWorkout::new("Squats", 25, 200, 5, 12, 80.0));
    let squats = stored(created, "Squats", || workouts.get_all_strength_workouts())?;

    let exercises = &mut app.exercises;
    let created = exercises.create_exercise(Exercise::new("Push-ups", "Chest", "None"));
    stored(created, "Push-ups", || exercises.get_all_exercises())?;

    // 2. Read all
    println!("\n--- 2. READ ALL WORKOUTS ---\n");

    let workouts = &mut app.workouts;
    let all_cardio = workouts.get_all_cardio_workouts()?;
    println!("All Cardio Workouts:");
    for workout in &all_cardio {
        println!("{}", workout.summary());
    }

    println!("\nAll Strength Workouts:");
    for workout in workouts.get_all_strength_workouts()? {
        println!("{}", workout.summary());
    }

    println!("\nAll Exercises:");
    for exercise in app.exercises.get_all_exercises()? {
        println!("{}", exercise.summary());
    }

    // 3. One dispatch point for every workout variant
    println!("\n--- 3. POLYMORPHISM DEMO ---\n");

    let mixed: Vec<Workout> = vec![
        running.clone().into(),
        cycling.clone().into(),
        swimming.clone().into(),
        bench_press.clone().into(),
        squats.clone().into(),
    ];
    for workout in &mixed {
        println!(
            "Type: {} | Name: {} | Intensity: {:.2}",
            workout.kind(),
            workout.name(),
            workout.intensity()
        );
    }

    // 4. Capabilities
    println!("\n--- 4. VALIDATION AND TRACKING ---\n");

    println!("{}", validation_result(&running));
    println!("{}", validation_result(&bench_press));
    println!("Running: {}", running.validation_message());
    println!("Bench Press: {}", bench_press.validation_message());
    println!();
    println!("{}", running.tracking_line());
    println!("{}", bench_press.tracking_line());
    println!();
    println!("{}", tracking_report(&all_cardio));

    // 5. Sorting
    println!("\n--- 5. SORTING ---\n");

    let workouts = &mut app.workouts;
    let mut cardio = workouts.get_all_cardio_workouts()?;
    sorting::sort_by_calories_desc(&mut cardio);
    println!("Cardio sorted by calories (high → low):");
    for workout in &cardio {
        println!("  {} | Calories: {}", workout.common.name, workout.common.calories_burned);
    }

    sorting::sort_by_duration_asc(&mut cardio);
    println!("\nCardio sorted by duration (low → high):");
    for workout in &cardio {
        println!("  {} | Duration: {} min", workout.common.name, workout.common.duration_minutes);
    }

    let mut strength = workouts.get_all_strength_workouts()?;
    sorting::sort_by_weight_desc(&mut strength);
    println!("\nStrength sorted by weight (high → low):");
    for workout in &strength {
        println!("  {} | Weight: {} kg", workout.common.name, workout.weight_kg);
    }

    let mut by_intensity = mixed;
    sorting::sort_by_intensity_desc(&mut by_intensity);
    println!("\nAll workouts sorted by intensity (high → low):");
    for workout in &by_intensity {
        println!("  {} | Intensity: {:.2}", workout.name(), workout.intensity());
    }

    // 6. Minimum scans
    println!("\n--- 6. FINDING MINIMUM ---\n");

    if let Some(min) = workouts.cardio_with_min_duration()? {
        println!("Cardio with minimum duration:");
        println!("{}", min.summary());
        println!("Minimum duration: {} minutes", min.common.duration_minutes);
    }

    if let Some(min) = workouts.strength_with_min_weight()? {
        println!("\nStrength with minimum weight:");
        println!("{}", min.summary());
        println!("Minimum weight: {} kg", min.weight_kg);
    }

    // 7. Update
    println!("\n--- 7. UPDATE WORKOUT ---\n");

    let running_id = stored_id(&running)?;
    running.common.set_duration_minutes(35)?;
    running.common.set_calories_burned(320)?;
    workouts.update_cardio_workout(running_id, running.clone())?;
    println!("Updated Running workout:");
    println!("{}", workouts.get_cardio_workout_by_id(running_id)?.summary());

    // 8. Delete
    println!("\n--- 8. DELETE WORKOUT ---\n");

    let cycling_id = stored_id(&cycling)?;
    workouts.delete_cardio_workout(cycling_id)?;
    println!("Deleted: {} (ID: {})", cycling.common.name, cycling_id);

    println!("\nRemaining Cardio Workouts:");
    for workout in workouts.get_all_cardio_workouts()? {
        println!("{}", workout.summary());
    }

    // 9. Each failure kind the services raise
    println!("\n--- 9. ERROR HANDLING DEMO ---\n");

    match workouts.create_cardio_workout(CardioWorkout::new("", 30, 300, 5.0, 145)) {
        Err(Error::InvalidInput(message)) => println!("Caught invalid input: {}", message),
        Err(e) => return Err(e),
        Ok(created) => println!("Unexpectedly accepted: {}", created.summary()),
    }

    match workouts.create_cardio_workout(CardioWorkout::new("Morning Running", 30, 300, 5.0, 145)) {
        Err(e @ Error::Duplicate { .. }) => println!("Caught duplicate: {}", e),
        Err(Error::InvalidInput(message)) => println!("Caught invalid input: {}", message),
        Err(e) => return Err(e),
        Ok(created) => println!(
            "Duplicate names allowed: created {} (ID: {})",
            created.common.name,
            display_id(created.id)
        ),
    }

    match workouts.get_cardio_workout_by_id(EntityId(9999)) {
        Err(e @ Error::NotFound { .. }) => println!("Caught not found: {}", e),
        Err(e) => return Err(e),
        Ok(found) => println!("Found: {}", found.summary()),
    }

    println!("\n   DEMO COMPLETED SUCCESSFULLY!   ");
    Ok(())
}

fn stored_id<T: Entity>(entity: &T) -> Result<EntityId> {
    entity
        .id()
        .ok_or_else(|| Error::InvalidInput(format!("{} has not been stored", T::LABEL)))
}

/// Report a sample row as created, or fall back to the stored row of the same
/// name when the service rejected it as a duplicate
fn stored<T: Entity>(
    created: Result<T>,
    name: &str,
    rows: impl FnOnce() -> Result<Vec<T>>,
) -> Result<T> {
    match created {
        Ok(row) => {
            print_created(row.name(), row.id());
            Ok(row)
        }
        Err(e @ Error::Duplicate { .. }) => {
            let name = name.to_lowercase();
            let existing = rows()?
                .into_iter()
                .find(|row| row.name().to_lowercase() == name)
                .ok_or(e)?;
            println!(
                "Already stored: {} (ID: {})",
                existing.name(),
                display_id(existing.id())
            );
            Ok(existing)
        }
        Err(e) => Err(e),
    }
}
