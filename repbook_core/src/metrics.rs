//! Metric calculator: single numeric summaries over one workout or one
//! exercise.
//!
//! Workout-level metrics run over every set, completed or not; a draft's
//! planned volume is still its volume. Exercise-level metrics count only
//! completed sets and return 0 when none exist.

use crate::types::{Exercise, Set, Workout};

/// Metric computed over a whole workout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkoutMetric {
    /// Minutes between start and end, rounded; 0 if either is missing
    Duration,
    /// Sum of weight x reps over all sets
    Volume,
    /// Sum of reps over all sets
    Reps,
}

/// Metric computed over one exercise's completed sets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseMetric {
    /// Max weight in a single set
    Heaviest,
    /// Max Brzycki one-rep-max estimate across sets
    OneRepMax,
    /// Max weight x reps in a single set
    BestSetVolume,
    /// Sum of weight x reps across sets
    WorkoutVolume,
    /// Sum of reps
    TotalReps,
    /// Max reps in a single set
    MostReps,
    /// Max duration field value, seconds
    BestTime,
    /// Sum of duration field values, seconds
    TotalTime,
}

/// Compute a workout-level metric
pub fn workout_metric(workout: &Workout, metric: WorkoutMetric) -> f64 {
    match metric {
        WorkoutMetric::Duration => workout_duration_minutes(workout),
        WorkoutMetric::Volume => all_sets(workout).map(Set::volume).sum(),
        WorkoutMetric::Reps => all_sets(workout).map(|s| f64::from(s.reps)).sum(),
    }
}

/// Minutes between a workout's start and end timestamps, rounded to the
/// nearest minute. 0 when either timestamp is missing.
pub fn workout_duration_minutes(workout: &Workout) -> f64 {
    match (workout.start_time, workout.end_time) {
        (Some(start), Some(end)) => ((end - start).num_seconds() as f64 / 60.0).round(),
        _ => 0.0,
    }
}

/// Compute an exercise-level metric over completed sets. 0 when the
/// exercise has no completed sets.
pub fn exercise_metric(exercise: &Exercise, metric: ExerciseMetric) -> f64 {
    let done = exercise.completed_sets();
    match metric {
        ExerciseMetric::Heaviest => fold_max(done.map(|s| s.weight)),
        ExerciseMetric::OneRepMax => fold_max(done.map(|s| one_rep_max(s.weight, s.reps))),
        ExerciseMetric::BestSetVolume => fold_max(done.map(Set::volume)),
        ExerciseMetric::WorkoutVolume => done.map(Set::volume).sum(),
        ExerciseMetric::TotalReps => done.map(|s| f64::from(s.reps)).sum(),
        ExerciseMetric::MostReps => fold_max(done.map(|s| f64::from(s.reps))),
        ExerciseMetric::BestTime => {
            fold_max(done.filter_map(|s| s.duration_seconds).map(f64::from))
        }
        ExerciseMetric::TotalTime => done.filter_map(|s| s.duration_seconds).map(f64::from).sum(),
    }
}

/// Brzycki one-rep-max estimate: weight / (1.0278 - 0.0278 x reps).
///
/// The denominator goes non-positive at 37 reps; past that the estimate
/// clamps to the raw set weight, which is a proven single at minimum.
pub fn one_rep_max(weight: f64, reps: u32) -> f64 {
    let denominator = 1.0278 - 0.0278 * f64::from(reps);
    if denominator <= 0.0 {
        weight
    } else {
        weight / denominator
    }
}

fn all_sets(workout: &Workout) -> impl Iterator<Item = &Set> {
    workout.exercises.iter().flat_map(|e| e.sets.iter())
}

fn fold_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}
