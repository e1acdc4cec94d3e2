//! Entity mutation engine: pure edit operations over workouts and routines.
//!
//! Every operation borrows the current entity and returns a new one; the
//! input is never modified. Callers own the swap: read a snapshot from
//! whichever store holds it, apply one operation, write the result back.
//! Exercises and sets not targeted by an operation come back value-equal.
//!
//! Not-found handling is deliberately asymmetric: remove/rename/reorder and
//! the set operations silently return the input unchanged when an id does
//! not match, while `add_set` reports a missing parent exercise through its
//! `Option` result, since pretending a set was created would mislead the
//! caller.

use chrono::{DateTime, Utc};

use crate::ident::generate_id;
use crate::types::{Exercise, Routine, Set, Workout, WorkoutEntity};

// ============================================================================
// Lifecycle Constructors
// ============================================================================

/// Create a blank workout draft dated `now`
pub fn new_workout(name: &str, now: DateTime<Utc>) -> Workout {
    Workout {
        id: generate_id(),
        name: name.to_string(),
        date: now,
        start_time: Some(now),
        end_time: None,
        completed: false,
        duration_minutes: None,
        notes: String::new(),
        exercises: Vec::new(),
    }
}

/// Create a blank routine draft
pub fn new_routine(name: &str) -> Routine {
    Routine {
        id: generate_id(),
        name: name.to_string(),
        exercises: Vec::new(),
    }
}

/// Derive a workout draft from a routine template.
///
/// Every node in the derived graph gets a fresh id; nothing is shared with
/// the source. Sets come back uncompleted so the draft starts as a plan,
/// keeping the template's weights and reps as targets.
pub fn workout_from_routine(routine: &Routine, now: DateTime<Utc>) -> Workout {
    let mut workout = new_workout(&routine.name, now);
    workout.exercises = routine.exercises.iter().map(rebuild_exercise).collect();
    workout
}

/// Derive a workout draft by repeating a prior workout.
pub fn workout_from_workout(source: &Workout, now: DateTime<Utc>) -> Workout {
    let mut workout = new_workout(&source.name, now);
    workout.exercises = source.exercises.iter().map(rebuild_exercise).collect();
    workout
}

/// Capture a workout's exercise plan as a reusable routine.
pub fn routine_from_workout(workout: &Workout, name: &str) -> Routine {
    let mut routine = new_routine(name);
    routine.exercises = workout.exercises.iter().map(rebuild_exercise).collect();
    routine
}

/// Copy an exercise with fresh ids for itself and all its sets, carrying
/// classification and targets through but resetting completion.
fn rebuild_exercise(source: &Exercise) -> Exercise {
    Exercise {
        id: generate_id(),
        name: source.name.clone(),
        equipment: source.equipment,
        primary_muscle: source.primary_muscle,
        secondary_muscles: source.secondary_muscles.clone(),
        kind: source.kind,
        sets: source
            .sets
            .iter()
            .map(|set| Set {
                id: generate_id(),
                completed: false,
                ..set.clone()
            })
            .collect(),
    }
}

// ============================================================================
// Exercise Operations
// ============================================================================

/// Append a new exercise with the given name to the end of the entity.
///
/// The exercise gets default classification and no sets. The name is not
/// validated here; the caller decides what counts as a usable name.
pub fn add_exercise<E: WorkoutEntity>(entity: &E, name: &str) -> (E, Exercise) {
    let exercise = Exercise::named(name);
    let mut next = entity.clone();
    next.exercises_mut().push(exercise.clone());
    (next, exercise)
}

/// Remove the exercise with the given id. No-op if absent.
pub fn remove_exercise<E: WorkoutEntity>(entity: &E, exercise_id: &str) -> E {
    let mut next = entity.clone();
    next.exercises_mut().retain(|e| e.id != exercise_id);
    next
}

/// Rename the exercise with the given id in place, keeping its position and
/// sets. No-op if absent.
pub fn rename_exercise<E: WorkoutEntity>(entity: &E, exercise_id: &str, new_name: &str) -> E {
    let mut next = entity.clone();
    if let Some(exercise) = next.exercises_mut().iter_mut().find(|e| e.id == exercise_id) {
        exercise.name = new_name.to_string();
    }
    next
}

/// Move the dragged exercise to the position currently occupied by the
/// target: remove, then insert at the target's pre-removal index. No-op
/// unless both ids are present.
pub fn reorder_exercises<E: WorkoutEntity>(entity: &E, dragged_id: &str, target_id: &str) -> E {
    let mut next = entity.clone();
    let list = next.exercises_mut();

    let from = list.iter().position(|e| e.id == dragged_id);
    let to = list.iter().position(|e| e.id == target_id);

    if let (Some(from), Some(to)) = (from, to) {
        let moved = list.remove(from);
        list.insert(to, moved);
    }
    next
}

// ============================================================================
// Set Operations
// ============================================================================

/// Append a blank set to the given exercise.
///
/// Returns the new entity and the created set, or the entity unchanged and
/// `None` when the exercise does not exist. A missing parent is the one
/// not-found case the caller must be able to see.
pub fn add_set<E: WorkoutEntity>(entity: &E, exercise_id: &str) -> (E, Option<Set>) {
    let mut next = entity.clone();
    let Some(exercise) = next
        .exercises_mut()
        .iter_mut()
        .find(|e| e.id == exercise_id)
    else {
        return (next, None);
    };

    let set = Set::blank();
    exercise.sets.push(set.clone());
    (next, Some(set))
}

/// Append `count` blank sets to the given exercise, threading the entity
/// through each addition. No-op when the exercise is absent.
pub fn add_default_sets<E: WorkoutEntity>(entity: &E, exercise_id: &str, count: usize) -> E {
    let mut current = entity.clone();
    for _ in 0..count {
        current = add_set(&current, exercise_id).0;
    }
    current
}

/// Replace the set whose id matches `updated.id` within the given exercise.
/// Full replacement, not a patch. No-op if exercise or set is absent.
pub fn update_set<E: WorkoutEntity>(entity: &E, exercise_id: &str, updated: &Set) -> E {
    let mut next = entity.clone();
    if let Some(exercise) = next
        .exercises_mut()
        .iter_mut()
        .find(|e| e.id == exercise_id)
    {
        if let Some(set) = exercise.sets.iter_mut().find(|s| s.id == updated.id) {
            *set = updated.clone();
        }
    }
    next
}

/// Remove the set with the given id from the given exercise. No-op if
/// exercise or set is absent.
pub fn remove_set<E: WorkoutEntity>(entity: &E, exercise_id: &str, set_id: &str) -> E {
    let mut next = entity.clone();
    if let Some(exercise) = next
        .exercises_mut()
        .iter_mut()
        .find(|e| e.id == exercise_id)
    {
        exercise.sets.retain(|s| s.id != set_id);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn draft_with_exercises() -> Workout {
        let workout = new_workout("Push Day", Utc::now());
        let (workout, _) = add_exercise(&workout, "Bench Press");
        let (workout, _) = add_exercise(&workout, "Overhead Press");
        let (workout, _) = add_exercise(&workout, "Dips");
        workout
    }

    #[test]
    fn test_add_exercise_appends_with_fresh_id() {
        let workout = new_workout("Legs", Utc::now());
        let (updated, exercise) = add_exercise(&workout, "Squat");

        assert_eq!(updated.exercises.len(), workout.exercises.len() + 1);
        assert_eq!(updated.find_exercise(&exercise.id), Some(&exercise));
        assert_eq!(updated.exercises.last().unwrap().name, "Squat");
        // Input untouched
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn test_remove_exercise_unknown_id_is_noop() {
        let workout = draft_with_exercises();
        let updated = remove_exercise(&workout, "no-such-id");
        assert_eq!(updated, workout);
    }

    #[test]
    fn test_remove_after_add_round_trips() {
        let workout = draft_with_exercises();
        let (added, exercise) = add_exercise(&workout, "Cable Fly");
        let removed = remove_exercise(&added, &exercise.id);
        assert_eq!(removed, workout);
    }

    #[test]
    fn test_rename_preserves_position_and_sets() {
        let workout = draft_with_exercises();
        let target = workout.exercises[1].clone();
        let workout = add_default_sets(&workout, &target.id, 3);

        let renamed = rename_exercise(&workout, &target.id, "Seated Press");

        assert_eq!(renamed.exercises[1].id, target.id);
        assert_eq!(renamed.exercises[1].name, "Seated Press");
        assert_eq!(renamed.exercises[1].sets, workout.exercises[1].sets);
        assert_eq!(renamed.exercises[0], workout.exercises[0]);
        assert_eq!(renamed.exercises[2], workout.exercises[2]);
    }

    #[test]
    fn test_reorder_moves_dragged_to_target_position() {
        let workout = draft_with_exercises();
        let dragged = workout.exercises[0].id.clone();
        let target = workout.exercises[2].id.clone();

        let reordered = reorder_exercises(&workout, &dragged, &target);

        let order: Vec<&str> = reordered.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, vec!["Overhead Press", "Dips", "Bench Press"]);
    }

    #[test]
    fn test_reorder_preserves_multiset() {
        let workout = draft_with_exercises();
        let a = workout.exercises[2].id.clone();
        let b = workout.exercises[0].id.clone();

        let reordered = reorder_exercises(&workout, &a, &b);

        assert_eq!(reordered.exercises.len(), workout.exercises.len());
        for exercise in &workout.exercises {
            assert!(reordered.exercises.contains(exercise));
        }
    }

    #[test]
    fn test_reorder_unknown_id_is_noop() {
        let workout = draft_with_exercises();
        let known = workout.exercises[0].id.clone();

        assert_eq!(reorder_exercises(&workout, &known, "missing"), workout);
        assert_eq!(reorder_exercises(&workout, "missing", &known), workout);
    }

    #[test]
    fn test_add_set_appends_blank_set() {
        let workout = draft_with_exercises();
        let exercise_id = workout.exercises[0].id.clone();

        let (updated, set) = add_set(&workout, &exercise_id);
        let set = set.expect("exercise exists");

        let sets = &updated.find_exercise(&exercise_id).unwrap().sets;
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0], set);
        assert_eq!(set.reps, 0);
        assert!(!set.completed);
    }

    #[test]
    fn test_add_set_missing_exercise_returns_none() {
        let workout = draft_with_exercises();
        let (updated, set) = add_set(&workout, "missing");

        assert!(set.is_none());
        assert_eq!(updated, workout);
    }

    #[test]
    fn test_add_default_sets_threads_entity() {
        let workout = draft_with_exercises();
        let exercise_id = workout.exercises[1].id.clone();

        let updated = add_default_sets(&workout, &exercise_id, 4);

        assert_eq!(updated.find_exercise(&exercise_id).unwrap().sets.len(), 4);
        // Other exercises untouched
        assert_eq!(updated.exercises[0], workout.exercises[0]);
        assert_eq!(updated.exercises[2], workout.exercises[2]);
    }

    #[test]
    fn test_update_set_replaces_exactly_one() {
        let workout = draft_with_exercises();
        let exercise_id = workout.exercises[0].id.clone();
        let workout = add_default_sets(&workout, &exercise_id, 2);

        let mut updated_set = workout.exercises[0].sets[0].clone();
        updated_set.reps = 8;
        updated_set.weight = 80.0;
        updated_set.completed = true;

        let updated = update_set(&workout, &exercise_id, &updated_set);

        assert_eq!(updated.exercises[0].sets[0], updated_set);
        assert_eq!(updated.exercises[0].sets[1], workout.exercises[0].sets[1]);
        assert_eq!(updated.exercises[1], workout.exercises[1]);
        assert_eq!(updated.exercises[2], workout.exercises[2]);
    }

    #[test]
    fn test_update_set_unknown_set_is_noop() {
        let workout = draft_with_exercises();
        let exercise_id = workout.exercises[0].id.clone();
        let workout = add_default_sets(&workout, &exercise_id, 1);

        let stray = Set::blank();
        assert_eq!(update_set(&workout, &exercise_id, &stray), workout);
    }

    #[test]
    fn test_remove_set_filters_matching_only() {
        let workout = draft_with_exercises();
        let exercise_id = workout.exercises[0].id.clone();
        let workout = add_default_sets(&workout, &exercise_id, 3);
        let victim = workout.exercises[0].sets[1].id.clone();

        let updated = remove_set(&workout, &exercise_id, &victim);

        let sets = &updated.exercises[0].sets;
        assert_eq!(sets.len(), 2);
        assert!(sets.iter().all(|s| s.id != victim));
    }

    #[test]
    fn test_operations_work_on_routines() {
        let routine = new_routine("Upper Body");
        let (routine, exercise) = add_exercise(&routine, "Pull-up");
        let routine = add_default_sets(&routine, &exercise.id, 3);

        assert_eq!(routine.exercises.len(), 1);
        assert_eq!(routine.exercises[0].sets.len(), 3);

        let routine = remove_exercise(&routine, &exercise.id);
        assert!(routine.exercises.is_empty());
    }

    #[test]
    fn test_workout_from_routine_gets_fresh_ids() {
        let routine = new_routine("Pull Day");
        let (routine, exercise) = add_exercise(&routine, "Barbell Row");
        let routine = add_default_sets(&routine, &exercise.id, 2);

        let workout = workout_from_routine(&routine, Utc::now());

        assert_ne!(workout.id, routine.id);
        assert_eq!(workout.name, routine.name);
        assert_eq!(workout.exercises.len(), 1);
        assert_ne!(workout.exercises[0].id, routine.exercises[0].id);
        for (derived, source) in workout.exercises[0]
            .sets
            .iter()
            .zip(&routine.exercises[0].sets)
        {
            assert_ne!(derived.id, source.id);
            assert!(!derived.completed);
        }
    }

    #[test]
    fn test_workout_from_workout_resets_completion() {
        let source = draft_with_exercises();
        let exercise_id = source.exercises[0].id.clone();
        let source = add_default_sets(&source, &exercise_id, 1);
        let mut done = source.exercises[0].sets[0].clone();
        done.completed = true;
        done.weight = 100.0;
        done.reps = 5;
        let source = update_set(&source, &exercise_id, &done);

        let repeat = workout_from_workout(&source, Utc::now());

        let set = &repeat.exercises[0].sets[0];
        assert!(!set.completed);
        assert_eq!(set.weight, 100.0);
        assert_eq!(set.reps, 5);
        assert_ne!(set.id, done.id);
    }

    #[test]
    fn test_routine_from_workout_carries_plan() {
        let workout = draft_with_exercises();
        let routine = routine_from_workout(&workout, "Push Template");

        assert_eq!(routine.name, "Push Template");
        assert_eq!(routine.exercises.len(), workout.exercises.len());
        let workout_ids: Vec<&String> = workout.exercises.iter().map(|e| &e.id).collect();
        assert!(routine.exercises.iter().all(|e| !workout_ids.contains(&&e.id)));
    }
}
