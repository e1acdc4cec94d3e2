//! Core domain types for the Repbook workout tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workouts and routines (the two root aggregates)
//! - Exercises and sets
//! - Classification metadata (equipment, muscle groups, exercise kind)
//! - The shared `WorkoutEntity` shape both aggregates expose

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ident::generate_id;

// ============================================================================
// Set Types
// ============================================================================

/// Kind of a recorded set.
///
/// Informational only: it affects display and lets callers distinguish
/// warmup work, but no aggregate excludes a set because of its kind.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SetKind {
    #[default]
    Normal,
    Warmup,
    Failure,
    Drop,
}

/// One recorded unit of work within an exercise.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Set {
    pub id: String,
    pub reps: u32,
    pub weight: f64,
    pub completed: bool,
    #[serde(default)]
    pub kind: SetKind,
    /// Seconds, for duration-based exercises
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// Meters, for distance-based exercises
    #[serde(default)]
    pub distance_meters: Option<f64>,
}

impl Set {
    /// Create a blank set with a fresh id (reps 0, weight 0, not completed)
    pub fn blank() -> Self {
        Self {
            id: generate_id(),
            reps: 0,
            weight: 0.0,
            completed: false,
            kind: SetKind::Normal,
            duration_seconds: None,
            distance_meters: None,
        }
    }

    /// Weight x reps for this set
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

// ============================================================================
// Classification Types
// ============================================================================

/// Equipment category for an exercise
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    #[default]
    None,
    Barbell,
    Dumbbell,
    Kettlebell,
    Machine,
    Cable,
    Band,
    Bodyweight,
}

/// Muscle group targeted by an exercise
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Forearms,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
    Core,
    #[default]
    Other,
}

/// Which numeric fields of a set are meaningful for an exercise.
///
/// Decides what editing screens show and which metrics apply; it never
/// changes how stored values are aggregated.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    #[default]
    WeightAndReps,
    RepsOnly,
    Duration,
    DurationAndDistance,
}

// ============================================================================
// Exercise Type
// ============================================================================

/// A named movement within a workout or routine, with its ordered sets.
///
/// Exercises are matched against the exercise library by name, not by a
/// foreign key; the classification fields here are display metadata copied
/// from the library (or its defaults) at creation time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub primary_muscle: MuscleGroup,
    #[serde(default)]
    pub secondary_muscles: Vec<MuscleGroup>,
    #[serde(default)]
    pub kind: ExerciseKind,
    #[serde(default)]
    pub sets: Vec<Set>,
}

impl Exercise {
    /// Create an exercise with a fresh id, the given name, default
    /// classification, and no sets
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            equipment: Equipment::None,
            primary_muscle: MuscleGroup::Other,
            secondary_muscles: Vec::new(),
            kind: ExerciseKind::WeightAndReps,
            sets: Vec::new(),
        }
    }

    /// Iterate over completed sets only
    pub fn completed_sets(&self) -> impl Iterator<Item = &Set> {
        self.sets.iter().filter(|s| s.completed)
    }

    pub fn find_set(&self, set_id: &str) -> Option<&Set> {
        self.sets.iter().find(|s| s.id == set_id)
    }
}

// ============================================================================
// Root Aggregates
// ============================================================================

/// A logged (or in-progress) workout: the dated root aggregate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Stored duration in minutes; derived from start/end when finished
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A reusable workout template: an undated root aggregate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Routine {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// The shape shared by `Workout` and `Routine`: an ordered exercise list.
///
/// Mutation operations are generic over this trait so one implementation
/// serves both aggregates. Order is significant and preserved by every
/// operation except an explicit reorder.
pub trait WorkoutEntity: Clone {
    fn id(&self) -> &str;
    fn exercises(&self) -> &[Exercise];
    fn exercises_mut(&mut self) -> &mut Vec<Exercise>;

    fn find_exercise(&self, exercise_id: &str) -> Option<&Exercise> {
        self.exercises().iter().find(|e| e.id == exercise_id)
    }
}

impl WorkoutEntity for Workout {
    fn id(&self) -> &str {
        &self.id
    }

    fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    fn exercises_mut(&mut self) -> &mut Vec<Exercise> {
        &mut self.exercises
    }
}

impl WorkoutEntity for Routine {
    fn id(&self) -> &str {
        &self.id
    }

    fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    fn exercises_mut(&mut self) -> &mut Vec<Exercise> {
        &mut self.exercises
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_set_defaults() {
        let set = Set::blank();
        assert_eq!(set.reps, 0);
        assert_eq!(set.weight, 0.0);
        assert!(!set.completed);
        assert_eq!(set.kind, SetKind::Normal);
        assert!(set.duration_seconds.is_none());
        assert!(set.distance_meters.is_none());
    }

    #[test]
    fn test_named_exercise_defaults() {
        let exercise = Exercise::named("Bench Press");
        assert_eq!(exercise.name, "Bench Press");
        assert_eq!(exercise.equipment, Equipment::None);
        assert_eq!(exercise.primary_muscle, MuscleGroup::Other);
        assert_eq!(exercise.kind, ExerciseKind::WeightAndReps);
        assert!(exercise.sets.is_empty());
    }

    #[test]
    fn test_set_volume() {
        let mut set = Set::blank();
        set.weight = 80.0;
        set.reps = 8;
        assert_eq!(set.volume(), 640.0);
    }

    #[test]
    fn test_completed_sets_filter() {
        let mut exercise = Exercise::named("Squat");
        let mut done = Set::blank();
        done.completed = true;
        exercise.sets.push(done);
        exercise.sets.push(Set::blank());

        assert_eq!(exercise.completed_sets().count(), 1);
    }

    #[test]
    fn test_set_kind_serde_roundtrip() {
        let json = serde_json::to_string(&SetKind::Warmup).unwrap();
        assert_eq!(json, "\"warmup\"");
        let parsed: SetKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SetKind::Warmup);
    }

    #[test]
    fn test_exercise_missing_sets_deserializes_empty() {
        let json = r#"{"id": "x1", "name": "Plank"}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert!(exercise.sets.is_empty());
        assert_eq!(exercise.kind, ExerciseKind::WeightAndReps);
    }
}
