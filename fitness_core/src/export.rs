//! CSV export of the stored tables.
//!
//! Each table is written to `<out_dir>/<table>.csv` with a header row. Files
//! are replaced, not appended to, and synced to disk before returning.

use crate::repository::Entity;
use crate::{CardioWorkout, Exercise, Result, StrengthWorkout};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A CSV row type with its column names, in field order
trait ExportRow: Serialize {
    const HEADER: &'static [&'static str];
}

/// A row in cardio_workouts.csv
#[derive(Debug, Serialize)]
struct CardioRow<'a> {
    id: Option<u32>,
    name: &'a str,
    duration_minutes: i32,
    calories_burned: i32,
    distance_km: f64,
    average_heart_rate: i32,
    intensity: f64,
}

impl ExportRow for CardioRow<'_> {
    const HEADER: &'static [&'static str] = &[
        "id",
        "name",
        "duration_minutes",
        "calories_burned",
        "distance_km",
        "average_heart_rate",
        "intensity",
    ];
}

impl<'a> From<&'a CardioWorkout> for CardioRow<'a> {
    fn from(workout: &'a CardioWorkout) -> Self {
        CardioRow {
            id: workout.id.map(|id| id.0),
            name: &workout.common.name,
            duration_minutes: workout.common.duration_minutes,
            calories_burned: workout.common.calories_burned,
            distance_km: workout.distance_km,
            average_heart_rate: workout.average_heart_rate,
            intensity: workout.intensity(),
        }
    }
}

/// A row in strength_workouts.csv
#[derive(Debug, Serialize)]
struct StrengthRow<'a> {
    id: Option<u32>,
    name: &'a str,
    duration_minutes: i32,
    calories_burned: i32,
    sets: i32,
    reps: i32,
    weight_kg: f64,
    intensity: f64,
}

impl ExportRow for StrengthRow<'_> {
    const HEADER: &'static [&'static str] = &[
        "id",
        "name",
        "duration_minutes",
        "calories_burned",
        "sets",
        "reps",
        "weight_kg",
        "intensity",
    ];
}

impl<'a> From<&'a StrengthWorkout> for StrengthRow<'a> {
    fn from(workout: &'a StrengthWorkout) -> Self {
        StrengthRow {
            id: workout.id.map(|id| id.0),
            name: &workout.common.name,
            duration_minutes: workout.common.duration_minutes,
            calories_burned: workout.common.calories_burned,
            sets: workout.sets,
            reps: workout.reps,
            weight_kg: workout.weight_kg,
            intensity: workout.intensity(),
        }
    }
}

/// A row in exercises.csv
#[derive(Debug, Serialize)]
struct ExerciseRow<'a> {
    id: Option<u32>,
    name: &'a str,
    muscle_group: &'a str,
    equipment: &'a str,
}

impl ExportRow for ExerciseRow<'_> {
    const HEADER: &'static [&'static str] = &["id", "name", "muscle_group", "equipment"];
}

impl<'a> From<&'a Exercise> for ExerciseRow<'a> {
    fn from(exercise: &'a Exercise) -> Self {
        ExerciseRow {
            id: exercise.id.map(|id| id.0),
            name: &exercise.name,
            muscle_group: &exercise.muscle_group,
            equipment: &exercise.equipment,
        }
    }
}

/// Number of rows written per table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub cardio_workouts: usize,
    pub strength_workouts: usize,
    pub exercises: usize,
}

/// Write all three tables as CSV files into `out_dir`
pub fn export_csv(
    out_dir: &Path,
    cardio: &[CardioWorkout],
    strength: &[StrengthWorkout],
    exercises: &[Exercise],
) -> Result<ExportSummary> {
    std::fs::create_dir_all(out_dir)?;

    let summary = ExportSummary {
        cardio_workouts: write_table(
            &table_path::<CardioWorkout>(out_dir),
            cardio.iter().map(CardioRow::from),
        )?,
        strength_workouts: write_table(
            &table_path::<StrengthWorkout>(out_dir),
            strength.iter().map(StrengthRow::from),
        )?,
        exercises: write_table(
            &table_path::<Exercise>(out_dir),
            exercises.iter().map(ExerciseRow::from),
        )?,
    };

    tracing::info!("Exported {:?} to {:?}", summary, out_dir);
    Ok(summary)
}

/// Path of the CSV file for the table of `T`
pub fn table_path<T: Entity>(out_dir: &Path) -> PathBuf {
    out_dir.join(format!("{}.csv", T::TABLE))
}

fn write_table<R: ExportRow>(path: &Path, rows: impl Iterator<Item = R>) -> Result<usize> {
    let file = File::create(path)?;
    // Serde only emits headers alongside the first row; empty tables still get one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer.write_record(R::HEADER)?;

    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }

    // Flush and sync to disk
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::debug!("Wrote {} rows to {:?}", count, path);
    Ok(count)
}
