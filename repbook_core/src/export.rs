//! CSV export of the workout log.
//!
//! Flattens the log to one row per set so the history opens cleanly in a
//! spreadsheet. The export rewrites the target file; it is a snapshot, not
//! an append log.

use crate::store::WorkoutLog;
use crate::types::{Workout, WorkoutEntity};
use crate::Result;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    workout_id: String,
    workout_name: String,
    date: String,
    completed: bool,
    exercise: String,
    set_number: usize,
    set_kind: String,
    reps: u32,
    weight: f64,
    set_completed: bool,
    duration_seconds: Option<u32>,
    distance_meters: Option<f64>,
}

fn rows_for(workout: &Workout) -> Vec<CsvRow> {
    let mut rows = Vec::new();
    for exercise in workout.exercises() {
        for (index, set) in exercise.sets.iter().enumerate() {
            rows.push(CsvRow {
                workout_id: workout.id.clone(),
                workout_name: workout.name.clone(),
                date: workout.date.to_rfc3339(),
                completed: workout.completed,
                exercise: exercise.name.clone(),
                set_number: index + 1,
                set_kind: format!("{:?}", set.kind).to_lowercase(),
                reps: set.reps,
                weight: set.weight,
                set_completed: set.completed,
                duration_seconds: set.duration_seconds,
                distance_meters: set.distance_meters,
            });
        }
    }
    rows
}

/// Write the whole workout log to a CSV file, newest workout first.
/// Returns the number of set rows written.
pub fn export_workouts_csv(log: &WorkoutLog, csv_path: &Path) -> Result<usize> {
    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(csv_path)?;
    let mut count = 0;

    for workout in log.recent_first() {
        for row in rows_for(workout) {
            writer.serialize(row)?;
            count += 1;
        }
    }

    writer.flush()?;
    tracing::info!("Exported {} set rows to {:?}", count, csv_path);
    Ok(count)
}
