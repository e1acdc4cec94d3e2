use chrono::Utc;
use clap::{Parser, Subcommand};
use repbook_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "repbook")]
#[command(about = "Workout and routine tracking system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a workout draft
    Start {
        /// Workout name
        name: Option<String>,

        /// Derive the draft from a saved routine
        #[arg(long, conflicts_with = "repeat_last")]
        routine: Option<String>,

        /// Derive the draft by repeating the most recent workout
        #[arg(long, conflicts_with = "routine")]
        repeat_last: bool,

        /// Discard any existing draft first
        #[arg(long)]
        force: bool,
    },

    /// Edit the exercises of the active workout draft
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },

    /// Edit the sets of an exercise in the active workout draft
    Set {
        #[command(subcommand)]
        command: SetCommands,
    },

    /// Show the active workout draft
    Show,

    /// Complete the active workout and move it into the log
    Finish {
        /// Notes to store with the workout
        #[arg(long)]
        notes: Option<String>,
    },

    /// Discard the active workout draft
    Cancel,

    /// List logged workouts, newest first
    List {
        /// Maximum number of workouts to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show a metric series over the logged workouts
    Stats {
        /// Metric name (volume, duration, reps; with --exercise: heaviest,
        /// one-rep-max, best-set-volume, volume, total-reps, most-reps,
        /// best-time, total-time)
        #[arg(long, default_value = "volume")]
        metric: String,

        /// Chart a single exercise by name instead of whole workouts
        #[arg(long)]
        exercise: Option<String>,

        /// Time range (3m, year, all)
        #[arg(long, default_value = "3m")]
        range: String,
    },

    /// Summarize the last 7 days
    Week,

    /// Manage routines
    Routine {
        #[command(subcommand)]
        command: RoutineCommands,
    },

    /// Export the workout log to CSV
    Export {
        /// Output path (defaults to history.csv in the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// Add an exercise to the draft
    Add {
        name: String,

        /// Number of blank sets to create (defaults from config)
        #[arg(long)]
        sets: Option<usize>,
    },

    /// Remove an exercise from the draft
    Remove { name: String },

    /// Rename an exercise in the draft
    Rename { name: String, new_name: String },

    /// Move an exercise to another exercise's position
    Move { name: String, before: String },
}

#[derive(Subcommand)]
enum SetCommands {
    /// Add a set to an exercise
    Add {
        exercise: String,

        #[arg(long, default_value_t = 0)]
        reps: u32,

        #[arg(long, default_value_t = 0.0)]
        weight: f64,

        /// Seconds, for duration-based exercises
        #[arg(long)]
        duration: Option<u32>,

        /// Meters, for distance-based exercises
        #[arg(long)]
        distance: Option<f64>,

        /// Set kind (normal, warmup, failure, drop)
        #[arg(long, default_value = "normal")]
        kind: String,

        /// Mark the set completed immediately
        #[arg(long)]
        done: bool,
    },

    /// Edit a set by its 1-based position
    Edit {
        exercise: String,
        number: usize,

        #[arg(long)]
        reps: Option<u32>,

        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        duration: Option<u32>,

        #[arg(long)]
        distance: Option<f64>,

        /// Mark the set completed
        #[arg(long, conflicts_with = "not_done")]
        done: bool,

        /// Mark the set not completed
        #[arg(long, conflicts_with = "done")]
        not_done: bool,
    },

    /// Remove a set by its 1-based position
    Remove { exercise: String, number: usize },
}

#[derive(Subcommand)]
enum RoutineCommands {
    /// List saved routines
    List,

    /// Start a routine draft
    New { name: String },

    /// Add an exercise to the routine draft
    Add {
        name: String,

        #[arg(long)]
        sets: Option<usize>,
    },

    /// Show the routine draft
    Show,

    /// Save the routine draft into the routine book
    Save,

    /// Capture the active workout as a saved routine
    FromActive { name: String },

    /// Delete a saved routine by name
    Delete { name: String },
}

struct Paths {
    workouts: PathBuf,
    routines: PathBuf,
    drafts: PathBuf,
}

impl Paths {
    fn new(data_dir: &Path) -> Self {
        Self {
            workouts: data_dir.join("workouts.json"),
            routines: data_dir.join("routines.json"),
            drafts: data_dir.join("drafts.json"),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    repbook_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    std::fs::create_dir_all(&data_dir)?;
    let paths = Paths::new(&data_dir);

    match cli.command {
        Commands::Start {
            name,
            routine,
            repeat_last,
            force,
        } => cmd_start(&paths, name, routine, repeat_last, force),
        Commands::Exercise { command } => cmd_exercise(&paths, &config, command),
        Commands::Set { command } => cmd_set(&paths, command),
        Commands::Show => cmd_show(&paths, &config),
        Commands::Finish { notes } => cmd_finish(&paths, notes),
        Commands::Cancel => cmd_cancel(&paths),
        Commands::List { limit } => cmd_list(&paths, limit),
        Commands::Stats {
            metric,
            exercise,
            range,
        } => cmd_stats(&paths, &metric, exercise.as_deref(), &range),
        Commands::Week => cmd_week(&paths),
        Commands::Routine { command } => cmd_routine(&paths, &config, command),
        Commands::Export { out } => cmd_export(&paths, out.unwrap_or_else(|| data_dir.join("history.csv"))),
    }
}

// ============================================================================
// Draft helpers
// ============================================================================

fn load_active(paths: &Paths) -> Result<(DraftState, Workout)> {
    let drafts = DraftState::load(&paths.drafts)?;
    match drafts.active_workout.clone() {
        Some(workout) => Ok((drafts, workout)),
        None => Err(Error::Store(
            "No active workout. Start one with `repbook start`.".into(),
        )),
    }
}

fn save_active(paths: &Paths, mut drafts: DraftState, workout: Workout) -> Result<()> {
    drafts.active_workout = Some(workout);
    drafts.save(&paths.drafts)
}

/// Resolve an exercise in an entity by name, case-insensitively (first match)
fn resolve_exercise<E: WorkoutEntity>(entity: &E, name: &str) -> Result<Exercise> {
    entity
        .exercises()
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name))
        .cloned()
        .ok_or_else(|| Error::ExerciseNotFound(name.to_string()))
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_start(
    paths: &Paths,
    name: Option<String>,
    routine: Option<String>,
    repeat_last: bool,
    force: bool,
) -> Result<()> {
    let drafts = DraftState::load(&paths.drafts)?;
    if drafts.active_workout.is_some() && !force {
        return Err(Error::Store(
            "A workout is already in progress. Finish it, cancel it, or pass --force.".into(),
        ));
    }

    let now = Utc::now();
    let workout = if let Some(routine_name) = routine {
        let book = RoutineBook::load(&paths.routines)?;
        let routine = book
            .find_by_name(&routine_name)
            .ok_or_else(|| Error::Store(format!("No routine named '{}'", routine_name)))?;
        let mut workout = workout_from_routine(routine, now);
        if let Some(name) = name {
            workout.name = name;
        }
        workout
    } else if repeat_last {
        let log = WorkoutLog::load(&paths.workouts)?;
        let last = log
            .recent_first()
            .first()
            .copied()
            .cloned()
            .ok_or_else(|| Error::Store("No logged workouts to repeat".into()))?;
        let mut workout = workout_from_workout(&last, now);
        if let Some(name) = name {
            workout.name = name;
        }
        workout
    } else {
        new_workout(name.as_deref().unwrap_or("Workout"), now)
    };

    println!("Started '{}' with {} exercises", workout.name, workout.exercises.len());
    save_active(paths, drafts, workout)
}

fn cmd_exercise(paths: &Paths, config: &Config, command: ExerciseCommands) -> Result<()> {
    let (drafts, workout) = load_active(paths)?;

    let workout = match command {
        ExerciseCommands::Add { name, sets } => {
            let (mut workout, exercise) = add_exercise(&workout, &name);
            let library = ExerciseLibrary::with_custom(&config.library);
            if let Some(slot) = workout.exercises.iter_mut().find(|e| e.id == exercise.id) {
                library.classify(slot);
            }
            let count = sets.unwrap_or(config.defaults.sets_per_exercise);
            let workout = add_default_sets(&workout, &exercise.id, count);
            println!("Added '{}' with {} sets", name, count);
            workout
        }
        ExerciseCommands::Remove { name } => {
            let exercise = resolve_exercise(&workout, &name)?;
            println!("Removed '{}'", exercise.name);
            remove_exercise(&workout, &exercise.id)
        }
        ExerciseCommands::Rename { name, new_name } => {
            let exercise = resolve_exercise(&workout, &name)?;
            println!("Renamed '{}' to '{}'", exercise.name, new_name);
            rename_exercise(&workout, &exercise.id, &new_name)
        }
        ExerciseCommands::Move { name, before } => {
            let dragged = resolve_exercise(&workout, &name)?;
            let target = resolve_exercise(&workout, &before)?;
            println!("Moved '{}' to '{}'s position", dragged.name, target.name);
            reorder_exercises(&workout, &dragged.id, &target.id)
        }
    };

    save_active(paths, drafts, workout)
}

fn cmd_set(paths: &Paths, command: SetCommands) -> Result<()> {
    let (drafts, workout) = load_active(paths)?;

    let workout = match command {
        SetCommands::Add {
            exercise,
            reps,
            weight,
            duration,
            distance,
            kind,
            done,
        } => {
            let parent = resolve_exercise(&workout, &exercise)?;
            let (workout, set) = add_set(&workout, &parent.id);
            // A missing parent here means the draft changed under us
            let blank = set.ok_or_else(|| Error::ExerciseNotFound(exercise.clone()))?;

            let logged = repbook_core::Set {
                reps,
                weight,
                completed: done,
                kind: parse_set_kind(&kind)?,
                duration_seconds: duration,
                distance_meters: distance,
                ..blank
            };
            println!(
                "Logged set {} x {} on '{}'",
                logged.reps, logged.weight, parent.name
            );
            update_set(&workout, &parent.id, &logged)
        }
        SetCommands::Edit {
            exercise,
            number,
            reps,
            weight,
            duration,
            distance,
            done,
            not_done,
        } => {
            let parent = resolve_exercise(&workout, &exercise)?;
            let mut set = nth_set(&parent, number)?.clone();

            if let Some(reps) = reps {
                set.reps = reps;
            }
            if let Some(weight) = weight {
                set.weight = weight;
            }
            if duration.is_some() {
                set.duration_seconds = duration;
            }
            if distance.is_some() {
                set.distance_meters = distance;
            }
            if done {
                set.completed = true;
            }
            if not_done {
                set.completed = false;
            }
            println!("Updated set {} on '{}'", number, parent.name);
            update_set(&workout, &parent.id, &set)
        }
        SetCommands::Remove { exercise, number } => {
            let parent = resolve_exercise(&workout, &exercise)?;
            let set = nth_set(&parent, number)?;
            println!("Removed set {} from '{}'", number, parent.name);
            remove_set(&workout, &parent.id, &set.id)
        }
    };

    save_active(paths, drafts, workout)
}

fn nth_set(exercise: &Exercise, number: usize) -> Result<&Set> {
    number
        .checked_sub(1)
        .and_then(|i| exercise.sets.get(i))
        .ok_or_else(|| {
            Error::Store(format!(
                "'{}' has {} sets, no set {}",
                exercise.name,
                exercise.sets.len(),
                number
            ))
        })
}

fn cmd_show(paths: &Paths, config: &Config) -> Result<()> {
    let (_, workout) = load_active(paths)?;
    let unit = config.units.weight.label();

    println!("{} ({})", workout.name, workout.date.format("%Y-%m-%d"));
    if workout.exercises.is_empty() {
        println!("  (no exercises yet)");
    }
    for exercise in &workout.exercises {
        println!("  {}", exercise.name);
        for (index, set) in exercise.sets.iter().enumerate() {
            let mark = if set.completed { "x" } else { " " };
            println!(
                "    [{}] {}. {} {} x {} reps",
                mark,
                index + 1,
                set.weight,
                unit,
                set.reps
            );
        }
    }
    Ok(())
}

fn cmd_finish(paths: &Paths, notes: Option<String>) -> Result<()> {
    let (mut drafts, mut workout) = load_active(paths)?;

    let now = Utc::now();
    workout.end_time = Some(now);
    workout.completed = true;
    workout.duration_minutes = Some(workout_metric(&workout, WorkoutMetric::Duration) as i64);
    if let Some(notes) = notes {
        workout.notes = notes;
    }

    WorkoutLog::update(&paths.workouts, |log| {
        log.put(workout.clone());
        Ok(())
    })?;

    drafts.active_workout = None;
    drafts.save(&paths.drafts)?;

    println!(
        "Finished '{}': {} min, {} volume",
        workout.name,
        workout.duration_minutes.unwrap_or(0),
        workout_metric(&workout, WorkoutMetric::Volume)
    );
    Ok(())
}

fn cmd_cancel(paths: &Paths) -> Result<()> {
    let (mut drafts, workout) = load_active(paths)?;
    drafts.active_workout = None;
    drafts.save(&paths.drafts)?;
    println!("Discarded draft '{}'", workout.name);
    Ok(())
}

fn cmd_list(paths: &Paths, limit: usize) -> Result<()> {
    let log = WorkoutLog::load(&paths.workouts)?;
    if log.workouts.is_empty() {
        println!("No workouts logged yet.");
        return Ok(());
    }

    for workout in log.recent_first().into_iter().take(limit) {
        println!(
            "{}  {}  ({} exercises, {} volume)",
            workout.date.format("%Y-%m-%d"),
            workout.name,
            workout.exercises.len(),
            workout_metric(workout, WorkoutMetric::Volume)
        );
    }
    Ok(())
}

fn cmd_stats(paths: &Paths, metric: &str, exercise: Option<&str>, range: &str) -> Result<()> {
    let log = WorkoutLog::load(&paths.workouts)?;
    let range = parse_range(range)?;
    let now = Utc::now();

    let points = match exercise {
        Some(name) => {
            let metric = parse_exercise_metric(metric)?;
            exercise_metric_series(&log.workouts, name, metric, range, now)
        }
        None => {
            let metric = parse_workout_metric(metric)?;
            workout_metric_series(&log.workouts, metric, range, now)
        }
    };

    if points.is_empty() {
        println!("No data in range.");
        return Ok(());
    }
    for point in points {
        println!("{:>8}  {}", point.date, point.value);
    }
    Ok(())
}

fn cmd_week(paths: &Paths) -> Result<()> {
    let log = WorkoutLog::load(&paths.workouts)?;
    let now = Utc::now();

    println!(
        "This week: {}, {}, {}",
        week_summary(&log.workouts, WorkoutMetric::Duration, now),
        week_summary(&log.workouts, WorkoutMetric::Volume, now),
        week_summary(&log.workouts, WorkoutMetric::Reps, now),
    );
    Ok(())
}

fn cmd_routine(paths: &Paths, config: &Config, command: RoutineCommands) -> Result<()> {
    match command {
        RoutineCommands::List => {
            let book = RoutineBook::load(&paths.routines)?;
            if book.routines.is_empty() {
                println!("No routines saved yet.");
            }
            for routine in &book.routines {
                println!("{}  ({} exercises)", routine.name, routine.exercises.len());
            }
            Ok(())
        }
        RoutineCommands::New { name } => {
            let drafts = DraftState::load(&paths.drafts)?;
            if drafts.routine_draft.is_some() {
                return Err(Error::Store(
                    "A routine draft already exists. Save or finish it first.".into(),
                ));
            }
            let routine = new_routine(&name);
            println!("Drafting routine '{}'", routine.name);
            let mut drafts = drafts;
            drafts.routine_draft = Some(routine);
            drafts.save(&paths.drafts)
        }
        RoutineCommands::Add { name, sets } => {
            let mut drafts = DraftState::load(&paths.drafts)?;
            let routine = drafts
                .routine_draft
                .clone()
                .ok_or_else(|| Error::Store("No routine draft. Start one with `repbook routine new`.".into()))?;

            let (mut routine, exercise) = add_exercise(&routine, &name);
            let library = ExerciseLibrary::with_custom(&config.library);
            if let Some(slot) = routine.exercises.iter_mut().find(|e| e.id == exercise.id) {
                library.classify(slot);
            }
            let count = sets.unwrap_or(config.defaults.sets_per_exercise);
            let routine = add_default_sets(&routine, &exercise.id, count);

            println!("Added '{}' with {} sets", name, count);
            drafts.routine_draft = Some(routine);
            drafts.save(&paths.drafts)
        }
        RoutineCommands::Show => {
            let drafts = DraftState::load(&paths.drafts)?;
            let routine = drafts
                .routine_draft
                .ok_or_else(|| Error::Store("No routine draft.".into()))?;
            println!("{}", routine.name);
            for exercise in &routine.exercises {
                println!("  {} ({} sets)", exercise.name, exercise.sets.len());
            }
            Ok(())
        }
        RoutineCommands::Save => {
            let mut drafts = DraftState::load(&paths.drafts)?;
            let routine = drafts
                .routine_draft
                .clone()
                .ok_or_else(|| Error::Store("No routine draft to save.".into()))?;

            RoutineBook::update(&paths.routines, |book| {
                book.put(routine.clone());
                Ok(())
            })?;
            drafts.routine_draft = None;
            drafts.save(&paths.drafts)?;
            println!("Saved routine '{}'", routine.name);
            Ok(())
        }
        RoutineCommands::FromActive { name } => {
            let (_, workout) = load_active(paths)?;
            let routine = routine_from_workout(&workout, &name);
            RoutineBook::update(&paths.routines, |book| {
                book.put(routine.clone());
                Ok(())
            })?;
            println!("Saved routine '{}' from '{}'", routine.name, workout.name);
            Ok(())
        }
        RoutineCommands::Delete { name } => {
            let book = RoutineBook::load(&paths.routines)?;
            let routine = book
                .find_by_name(&name)
                .ok_or_else(|| Error::Store(format!("No routine named '{}'", name)))?;
            let id = routine.id.clone();

            RoutineBook::update(&paths.routines, |book| {
                book.remove(&id);
                Ok(())
            })?;
            println!("Deleted routine '{}'", name);
            Ok(())
        }
    }
}

fn cmd_export(paths: &Paths, out: PathBuf) -> Result<()> {
    let log = WorkoutLog::load(&paths.workouts)?;
    let count = export_workouts_csv(&log, &out)?;
    println!("Exported {} set rows to {}", count, out.display());
    Ok(())
}

// ============================================================================
// Argument parsing helpers
// ============================================================================

fn parse_workout_metric(s: &str) -> Result<WorkoutMetric> {
    match s.to_lowercase().as_str() {
        "volume" => Ok(WorkoutMetric::Volume),
        "duration" => Ok(WorkoutMetric::Duration),
        "reps" => Ok(WorkoutMetric::Reps),
        other => Err(Error::Other(format!(
            "Unknown workout metric '{}'. Try volume, duration, or reps.",
            other
        ))),
    }
}

fn parse_exercise_metric(s: &str) -> Result<ExerciseMetric> {
    match s.to_lowercase().as_str() {
        "heaviest" => Ok(ExerciseMetric::Heaviest),
        "one-rep-max" | "1rm" => Ok(ExerciseMetric::OneRepMax),
        "best-set-volume" => Ok(ExerciseMetric::BestSetVolume),
        "volume" => Ok(ExerciseMetric::WorkoutVolume),
        "total-reps" => Ok(ExerciseMetric::TotalReps),
        "most-reps" => Ok(ExerciseMetric::MostReps),
        "best-time" => Ok(ExerciseMetric::BestTime),
        "total-time" => Ok(ExerciseMetric::TotalTime),
        other => Err(Error::Other(format!(
            "Unknown exercise metric '{}'.",
            other
        ))),
    }
}

fn parse_range(s: &str) -> Result<TimeRange> {
    match s.to_lowercase().as_str() {
        "3m" | "3months" => Ok(TimeRange::LastThreeMonths),
        "year" | "1y" => Ok(TimeRange::Year),
        "all" => Ok(TimeRange::AllTime),
        other => Err(Error::Other(format!(
            "Unknown range '{}'. Try 3m, year, or all.",
            other
        ))),
    }
}

fn parse_set_kind(s: &str) -> Result<SetKind> {
    match s.to_lowercase().as_str() {
        "normal" => Ok(SetKind::Normal),
        "warmup" => Ok(SetKind::Warmup),
        "failure" => Ok(SetKind::Failure),
        "drop" => Ok(SetKind::Drop),
        other => Err(Error::Other(format!(
            "Unknown set kind '{}'. Try normal, warmup, failure, or drop.",
            other
        ))),
    }
}
