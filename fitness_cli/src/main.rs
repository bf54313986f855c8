mod demo;

use clap::{Parser, Subcommand, ValueEnum};
use fitness_core::sorting;
use fitness_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "Fitness tracker for cardio and strength workouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep all data in memory for this run (nothing is persisted)
    #[arg(long, global = true)]
    in_memory: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the labeled walkthrough of every operation (default)
    Demo,

    /// Manage cardio workouts
    Cardio {
        #[command(subcommand)]
        action: CardioAction,
    },

    /// Manage strength workouts
    Strength {
        #[command(subcommand)]
        action: StrengthAction,
    },

    /// Manage exercises
    Exercise {
        #[command(subcommand)]
        action: ExerciseAction,
    },

    /// Write every table as CSV
    Export {
        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
enum CardioAction {
    /// Record a cardio workout
    Add {
        #[arg(long)]
        name: String,
        /// Duration in minutes
        #[arg(long)]
        duration: i32,
        #[arg(long)]
        calories: i32,
        /// Distance in kilometres
        #[arg(long)]
        distance: f64,
        /// Average heart rate in bpm
        #[arg(long)]
        heart_rate: i32,
    },
    /// List cardio workouts
    List {
        #[arg(long, value_enum)]
        sort: Option<CardioSort>,
    },
    /// Show one cardio workout
    Show { id: u32 },
    /// Change fields of a cardio workout
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        duration: Option<i32>,
        #[arg(long)]
        calories: Option<i32>,
        #[arg(long)]
        distance: Option<f64>,
        #[arg(long)]
        heart_rate: Option<i32>,
    },
    /// Delete a cardio workout
    Delete { id: u32 },
    /// Show the cardio workout with the shortest duration
    MinDuration,
}

#[derive(Subcommand)]
enum StrengthAction {
    /// Record a strength workout
    Add {
        #[arg(long)]
        name: String,
        /// Duration in minutes
        #[arg(long)]
        duration: i32,
        #[arg(long)]
        calories: i32,
        #[arg(long)]
        sets: i32,
        #[arg(long)]
        reps: i32,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
    },
    /// List strength workouts
    List {
        #[arg(long, value_enum)]
        sort: Option<StrengthSort>,
    },
    /// Show one strength workout
    Show { id: u32 },
    /// Change fields of a strength workout
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        duration: Option<i32>,
        #[arg(long)]
        calories: Option<i32>,
        #[arg(long)]
        sets: Option<i32>,
        #[arg(long)]
        reps: Option<i32>,
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Delete a strength workout
    Delete { id: u32 },
    /// Show the strength workout with the lightest weight
    MinWeight,
}

#[derive(Subcommand)]
enum ExerciseAction {
    /// Add an exercise to the catalogue
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        muscle_group: String,
        #[arg(long, default_value = "None")]
        equipment: String,
    },
    /// List exercises
    List,
    /// Show one exercise
    Show { id: u32 },
    /// Change fields of an exercise
    Update {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        muscle_group: Option<String>,
        #[arg(long)]
        equipment: Option<String>,
    },
    /// Delete an exercise
    Delete { id: u32 },
}

#[derive(Clone, Copy, ValueEnum)]
enum CardioSort {
    CaloriesAsc,
    CaloriesDesc,
    DurationAsc,
    DurationDesc,
    DistanceAsc,
    Name,
    Intensity,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrengthSort {
    CaloriesAsc,
    CaloriesDesc,
    DurationAsc,
    DurationDesc,
    WeightDesc,
    Name,
    Intensity,
}

type Repo<T> = Box<dyn Repository<T>>;
type Workouts = WorkoutService<Repo<CardioWorkout>, Repo<StrengthWorkout>>;
type Exercises = ExerciseService<Repo<Exercise>>;

/// Services wired to the configured store
pub struct App {
    pub workouts: Workouts,
    pub exercises: Exercises,
}

impl App {
    fn open(
        backend: StoreBackend,
        data_dir: &std::path::Path,
        options: ServiceOptions,
    ) -> Result<Self> {
        tracing::info!("Opening {:?} store at {:?}", backend, data_dir);
        Ok(Self {
            workouts: WorkoutService::with_options(
                open_repo(backend, data_dir)?,
                open_repo(backend, data_dir)?,
                options,
            ),
            exercises: ExerciseService::with_options(open_repo(backend, data_dir)?, options),
        })
    }
}

fn open_repo<T: Entity + 'static>(
    backend: StoreBackend,
    data_dir: &std::path::Path,
) -> Result<Repo<T>> {
    Ok(match backend {
        StoreBackend::Json => Box::new(JsonTableRepository::<T>::open(data_dir)?),
        StoreBackend::Memory => Box::new(MemoryRepository::<T>::new()),
    })
}

fn main() {
    // Initialize logging
    fitness_core::logging::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        report_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let backend = if cli.in_memory {
        StoreBackend::Memory
    } else {
        config.store.backend
    };

    let mut app = App::open(backend, &data_dir, config.service)?;

    match cli.command {
        None | Some(Commands::Demo) => {
            // Failures inside the walkthrough are reported, not propagated
            if let Err(e) = demo::run(&mut app) {
                eprintln!("Unexpected error: {}", e);
                print_causes(&e);
            }
            Ok(())
        }
        Some(Commands::Cardio { action }) => cmd_cardio(&mut app.workouts, action),
        Some(Commands::Strength { action }) => cmd_strength(&mut app.workouts, action),
        Some(Commands::Exercise { action }) => cmd_exercise(&mut app.exercises, action),
        Some(Commands::Export { out }) => cmd_export(&app, out),
    }
}

fn cmd_cardio(service: &mut Workouts, action: CardioAction) -> Result<()> {
    match action {
        CardioAction::Add {
            name,
            duration,
            calories,
            distance,
            heart_rate,
        } => {
            let workout = CardioWorkout::new(name, duration, calories, distance, heart_rate);
            let created = service.create_cardio_workout(workout)?;
            print_created(&created.common.name, created.id);
        }
        CardioAction::List { sort } => {
            let mut list = service.get_all_cardio_workouts()?;
            match sort {
                Some(CardioSort::CaloriesAsc) => sorting::sort_by_calories_asc(&mut list),
                Some(CardioSort::CaloriesDesc) => sorting::sort_by_calories_desc(&mut list),
                Some(CardioSort::DurationAsc) => sorting::sort_by_duration_asc(&mut list),
                Some(CardioSort::DurationDesc) => sorting::sort_by_duration_desc(&mut list),
                Some(CardioSort::DistanceAsc) => sorting::sort_by_distance_asc(&mut list),
                Some(CardioSort::Name) => sorting::sort_by_name_asc(&mut list),
                Some(CardioSort::Intensity) | None => {}
            }
            let mut rows: Vec<Workout> = list.into_iter().map(Workout::from).collect();
            if matches!(sort, Some(CardioSort::Intensity)) {
                sorting::sort_by_intensity_desc(&mut rows);
            }
            print_workouts(&rows, "No cardio workouts recorded.");
        }
        CardioAction::Show { id } => {
            let workout = service.get_cardio_workout_by_id(EntityId(id))?;
            print_details(&Workout::from(workout));
        }
        CardioAction::Update {
            id,
            name,
            duration,
            calories,
            distance,
            heart_rate,
        } => {
            let id = EntityId(id);
            let mut workout = service.get_cardio_workout_by_id(id)?;
            apply_common(&mut workout.common, name, duration, calories)?;
            if let Some(distance) = distance {
                workout.set_distance_km(distance)?;
            }
            if let Some(heart_rate) = heart_rate {
                workout.set_average_heart_rate(heart_rate)?;
            }
            service.update_cardio_workout(id, workout)?;
            println!("✓ Updated cardio workout {}", id);
            println!("  {}", service.get_cardio_workout_by_id(id)?.summary());
        }
        CardioAction::Delete { id } => {
            service.delete_cardio_workout(EntityId(id))?;
            println!("✓ Deleted cardio workout {}", id);
        }
        CardioAction::MinDuration => match service.cardio_with_min_duration()? {
            Some(workout) => {
                println!("{}", workout.summary());
                println!("Minimum duration: {} minutes", workout.common.duration_minutes);
            }
            None => println!("No cardio workouts recorded."),
        },
    }
    Ok(())
}

fn cmd_strength(service: &mut Workouts, action: StrengthAction) -> Result<()> {
    match action {
        StrengthAction::Add {
            name,
            duration,
            calories,
            sets,
            reps,
            weight,
        } => {
            let workout = StrengthWorkout::new(name, duration, calories, sets, reps, weight);
            let created = service.create_strength_workout(workout)?;
            print_created(&created.common.name, created.id);
        }
        StrengthAction::List { sort } => {
            let mut list = service.get_all_strength_workouts()?;
            match sort {
                Some(StrengthSort::CaloriesAsc) => sorting::sort_by_calories_asc(&mut list),
                Some(StrengthSort::CaloriesDesc) => sorting::sort_by_calories_desc(&mut list),
                Some(StrengthSort::DurationAsc) => sorting::sort_by_duration_asc(&mut list),
                Some(StrengthSort::DurationDesc) => sorting::sort_by_duration_desc(&mut list),
                Some(StrengthSort::WeightDesc) => sorting::sort_by_weight_desc(&mut list),
                Some(StrengthSort::Name) => sorting::sort_by_name_asc(&mut list),
                Some(StrengthSort::Intensity) | None => {}
            }
            let mut rows: Vec<Workout> = list.into_iter().map(Workout::from).collect();
            if matches!(sort, Some(StrengthSort::Intensity)) {
                sorting::sort_by_intensity_desc(&mut rows);
            }
            print_workouts(&rows, "No strength workouts recorded.");
        }
        StrengthAction::Show { id } => {
            let workout = service.get_strength_workout_by_id(EntityId(id))?;
            print_details(&Workout::from(workout));
        }
        StrengthAction::Update {
            id,
            name,
            duration,
            calories,
            sets,
            reps,
            weight,
        } => {
            let id = EntityId(id);
            let mut workout = service.get_strength_workout_by_id(id)?;
            apply_common(&mut workout.common, name, duration, calories)?;
            if let Some(sets) = sets {
                workout.set_sets(sets)?;
            }
            if let Some(reps) = reps {
                workout.set_reps(reps)?;
            }
            if let Some(weight) = weight {
                workout.set_weight_kg(weight)?;
            }
            service.update_strength_workout(id, workout)?;
            println!("✓ Updated strength workout {}", id);
            println!("  {}", service.get_strength_workout_by_id(id)?.summary());
        }
        StrengthAction::Delete { id } => {
            service.delete_strength_workout(EntityId(id))?;
            println!("✓ Deleted strength workout {}", id);
        }
        StrengthAction::MinWeight => match service.strength_with_min_weight()? {
            Some(workout) => {
                println!("{}", workout.summary());
                println!("Minimum weight: {} kg", workout.weight_kg);
            }
            None => println!("No strength workouts recorded."),
        },
    }
    Ok(())
}

fn cmd_exercise(service: &mut Exercises, action: ExerciseAction) -> Result<()> {
    match action {
        ExerciseAction::Add {
            name,
            muscle_group,
            equipment,
        } => {
            let created = service.create_exercise(Exercise::new(name, muscle_group, equipment))?;
            print_created(&created.name, created.id);
        }
        ExerciseAction::List => {
            let list = service.get_all_exercises()?;
            if list.is_empty() {
                println!("No exercises recorded.");
            }
            for exercise in &list {
                println!("{:>4}  {}", display_id(exercise.id), exercise.summary());
            }
        }
        ExerciseAction::Show { id } => {
            let exercise = service.get_exercise_by_id(EntityId(id))?;
            println!("{}", exercise.summary());
            println!("{}", validation_result(&exercise));
        }
        ExerciseAction::Update {
            id,
            name,
            muscle_group,
            equipment,
        } => {
            let id = EntityId(id);
            let mut exercise = service.get_exercise_by_id(id)?;
            if let Some(name) = name {
                exercise.name = name;
            }
            if let Some(muscle_group) = muscle_group {
                exercise.muscle_group = muscle_group;
            }
            if let Some(equipment) = equipment {
                exercise.equipment = equipment;
            }
            service.update_exercise(id, exercise)?;
            println!("✓ Updated exercise {}", id);
            println!("  {}", service.get_exercise_by_id(id)?.summary());
        }
        ExerciseAction::Delete { id } => {
            service.delete_exercise(EntityId(id))?;
            println!("✓ Deleted exercise {}", id);
        }
    }
    Ok(())
}

fn cmd_export(app: &App, out: PathBuf) -> Result<()> {
    let summary = export_csv(
        &out,
        &app.workouts.get_all_cardio_workouts()?,
        &app.workouts.get_all_strength_workouts()?,
        &app.exercises.get_all_exercises()?,
    )?;

    println!(
        "✓ Exported {} cardio workouts, {} strength workouts, {} exercises",
        summary.cardio_workouts, summary.strength_workouts, summary.exercises
    );
    println!("  Directory: {}", out.display());
    Ok(())
}

/// Apply the optional shared-field edits through the validating setters
fn apply_common(
    common: &mut WorkoutCommon,
    name: Option<String>,
    duration: Option<i32>,
    calories: Option<i32>,
) -> Result<()> {
    if let Some(name) = name {
        common.set_name(name)?;
    }
    if let Some(duration) = duration {
        common.set_duration_minutes(duration)?;
    }
    if let Some(calories) = calories {
        common.set_calories_burned(calories)?;
    }
    Ok(())
}

fn display_id(id: Option<EntityId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".into())
}

fn print_created(name: &str, id: Option<EntityId>) {
    println!("Created: {} (ID: {})", name, display_id(id));
}

fn print_workouts(rows: &[Workout], empty_message: &str) {
    if rows.is_empty() {
        println!("{}", empty_message);
    }
    for workout in rows {
        println!("{:>4}  {}", display_id(workout.id()), workout.summary());
    }
}

fn print_details(workout: &Workout) {
    println!("{}", workout.overview());
    println!("{}", workout.summary());
    println!("{}", validation_result(workout));
}

fn report_error(e: &Error) {
    eprintln!("Error: {}", e);
    print_causes(e);
}

fn print_causes(e: &Error) {
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
