#![forbid(unsafe_code)]

//! Core domain model and business logic for the Repbook workout tracker.
//!
//! This crate provides:
//! - Domain types (workouts, routines, exercises, sets)
//! - Pure entity mutation operations
//! - Metric calculation and analytics aggregation
//! - Exercise library
//! - Persistence (workout log, routine book, draft state)

pub mod types;
pub mod error;
pub mod ident;
pub mod mutation;
pub mod metrics;
pub mod analytics;
pub mod library;
pub mod config;
pub mod logging;
pub mod store;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use ident::generate_id;
pub use mutation::{
    add_default_sets, add_exercise, add_set, new_routine, new_workout, remove_exercise,
    remove_set, rename_exercise, reorder_exercises, routine_from_workout, update_set,
    workout_from_routine, workout_from_workout,
};
pub use metrics::{exercise_metric, workout_metric, ExerciseMetric, WorkoutMetric};
pub use analytics::{
    exercise_metric_series, filter_by_range, week_summary, workout_metric_series, MetricPoint,
    TimeRange,
};
pub use library::{builtin_library, ExerciseLibrary};
pub use config::Config;
pub use store::{DraftState, RoutineBook, WorkoutLog};
pub use export::export_workouts_csv;
