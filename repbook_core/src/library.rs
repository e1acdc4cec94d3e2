//! Exercise library: built-in templates resolving a name to classification
//! metadata.
//!
//! The library only feeds display metadata (equipment, muscle groups, which
//! set fields apply). Lookup is by name, case-insensitively; the mutation
//! engine never depends on it.

use crate::config::LibraryConfig;
use crate::types::{Equipment, Exercise, ExerciseKind, MuscleGroup};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Classification metadata for a known exercise name
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseTemplate {
    pub name: String,
    pub equipment: Equipment,
    pub primary_muscle: MuscleGroup,
    pub secondary_muscles: Vec<MuscleGroup>,
    pub kind: ExerciseKind,
}

/// The catalog of exercise templates, keyed by lowercased name
#[derive(Clone, Debug, Default)]
pub struct ExerciseLibrary {
    templates: HashMap<String, ExerciseTemplate>,
}

/// Cached built-in library - built once and reused across all operations
static BUILTIN_LIBRARY: Lazy<ExerciseLibrary> = Lazy::new(build_builtin_library);

/// Get a reference to the cached built-in library
pub fn builtin_library() -> &'static ExerciseLibrary {
    &BUILTIN_LIBRARY
}

impl ExerciseLibrary {
    /// Look up a template by exercise name, case-insensitively
    pub fn lookup(&self, name: &str) -> Option<&ExerciseTemplate> {
        self.templates.get(&name.to_lowercase())
    }

    /// Number of known templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// All templates, sorted by name for stable listings
    pub fn all(&self) -> Vec<&ExerciseTemplate> {
        let mut templates: Vec<&ExerciseTemplate> = self.templates.values().collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        templates
    }

    fn insert(&mut self, template: ExerciseTemplate) {
        self.templates
            .insert(template.name.to_lowercase(), template);
    }

    /// Build a library with the built-ins plus config-supplied custom
    /// entries; a custom entry with a known name overrides the built-in.
    pub fn with_custom(config: &LibraryConfig) -> Self {
        let mut library = builtin_library().clone();
        for custom in &config.custom {
            tracing::debug!("Adding custom library exercise: {}", custom.name);
            library.insert(ExerciseTemplate {
                name: custom.name.clone(),
                equipment: custom.equipment,
                primary_muscle: custom.primary_muscle,
                secondary_muscles: custom.secondary_muscles.clone(),
                kind: custom.kind,
            });
        }
        library
    }

    /// Validate library contents, returning human-readable problems
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for template in self.templates.values() {
            if template.name.trim().is_empty() {
                errors.push("Template with empty name".to_string());
            }
            if template.secondary_muscles.contains(&template.primary_muscle) {
                errors.push(format!(
                    "{}: primary muscle repeated in secondary list",
                    template.name
                ));
            }
        }
        errors
    }

    /// Copy a template's classification onto an exercise, matched by the
    /// exercise's current name. Leaves the exercise untouched when the name
    /// is unknown.
    pub fn classify(&self, exercise: &mut Exercise) {
        if let Some(template) = self.lookup(&exercise.name) {
            exercise.equipment = template.equipment;
            exercise.primary_muscle = template.primary_muscle;
            exercise.secondary_muscles = template.secondary_muscles.clone();
            exercise.kind = template.kind;
        }
    }
}

/// Build the built-in template catalog
pub fn build_builtin_library() -> ExerciseLibrary {
    let mut library = ExerciseLibrary::default();

    let entries: Vec<(&str, Equipment, MuscleGroup, Vec<MuscleGroup>, ExerciseKind)> = vec![
        (
            "Bench Press",
            Equipment::Barbell,
            MuscleGroup::Chest,
            vec![MuscleGroup::Triceps, MuscleGroup::Shoulders],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Squat",
            Equipment::Barbell,
            MuscleGroup::Quads,
            vec![MuscleGroup::Glutes, MuscleGroup::Hamstrings],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Deadlift",
            Equipment::Barbell,
            MuscleGroup::Back,
            vec![MuscleGroup::Glutes, MuscleGroup::Hamstrings, MuscleGroup::Forearms],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Overhead Press",
            Equipment::Barbell,
            MuscleGroup::Shoulders,
            vec![MuscleGroup::Triceps],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Barbell Row",
            Equipment::Barbell,
            MuscleGroup::Back,
            vec![MuscleGroup::Biceps],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Romanian Deadlift",
            Equipment::Barbell,
            MuscleGroup::Hamstrings,
            vec![MuscleGroup::Glutes],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Dumbbell Curl",
            Equipment::Dumbbell,
            MuscleGroup::Biceps,
            vec![MuscleGroup::Forearms],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Lateral Raise",
            Equipment::Dumbbell,
            MuscleGroup::Shoulders,
            vec![],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Kettlebell Swing",
            Equipment::Kettlebell,
            MuscleGroup::Glutes,
            vec![MuscleGroup::Hamstrings, MuscleGroup::Core],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Lat Pulldown",
            Equipment::Cable,
            MuscleGroup::Back,
            vec![MuscleGroup::Biceps],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Leg Press",
            Equipment::Machine,
            MuscleGroup::Quads,
            vec![MuscleGroup::Glutes],
            ExerciseKind::WeightAndReps,
        ),
        (
            "Pull-up",
            Equipment::Bodyweight,
            MuscleGroup::Back,
            vec![MuscleGroup::Biceps],
            ExerciseKind::RepsOnly,
        ),
        (
            "Push-up",
            Equipment::Bodyweight,
            MuscleGroup::Chest,
            vec![MuscleGroup::Triceps, MuscleGroup::Core],
            ExerciseKind::RepsOnly,
        ),
        (
            "Plank",
            Equipment::Bodyweight,
            MuscleGroup::Core,
            vec![],
            ExerciseKind::Duration,
        ),
        (
            "Running",
            Equipment::None,
            MuscleGroup::Quads,
            vec![MuscleGroup::Calves],
            ExerciseKind::DurationAndDistance,
        ),
        (
            "Rowing Machine",
            Equipment::Machine,
            MuscleGroup::Back,
            vec![MuscleGroup::Quads, MuscleGroup::Core],
            ExerciseKind::DurationAndDistance,
        ),
    ];

    for (name, equipment, primary_muscle, secondary_muscles, kind) in entries {
        library.insert(ExerciseTemplate {
            name: name.to_string(),
            equipment,
            primary_muscle,
            secondary_muscles,
            kind,
        });
    }

    library
}
