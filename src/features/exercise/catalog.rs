//! The exercise definition table.
//!
//! Built-in exercises are defined once in a static table. Custom exercises
//! from the config file are validated and merged over them at startup; the
//! resulting catalog is never mutated afterwards.

use once_cell::sync::Lazy;
use tracing::debug;

use super::definition::{BreathPattern, ExerciseDefinition};
use super::recommend::Mood;
use crate::error::BreatheError;

static BUILTIN: Lazy<Vec<ExerciseDefinition>> = Lazy::new(|| {
    vec![
        builtin(
            "box",
            "Box Breathing",
            "Four equal counts in, hold, out and hold. Steadies attention under pressure.",
            BreathPattern::new(4, 4, 4, 4),
            4,
            &[Mood::Stressed, Mood::Unfocused],
        ),
        builtin(
            "relaxing-478",
            "4-7-8 Breathing",
            "A long hold and slow exhale that helps the body wind down.",
            BreathPattern::new(4, 7, 8, 0),
            4,
            &[Mood::Anxious, Mood::Sleepless],
        ),
        builtin(
            "coherent",
            "Coherent Breathing",
            "Even five-second breaths, around six breaths a minute.",
            BreathPattern::new(5, 0, 5, 0),
            6,
            &[Mood::Calm, Mood::Stressed],
        ),
        builtin(
            "calm",
            "Calming Breath",
            "A short pause after the inhale and an exhale longer than the inhale.",
            BreathPattern::new(4, 2, 6, 0),
            6,
            &[Mood::Anxious, Mood::Stressed],
        ),
        builtin(
            "energize",
            "Energizing Breath",
            "Long inhales and quick exhales to lift alertness.",
            BreathPattern::new(6, 0, 2, 0),
            8,
            &[Mood::Tired, Mood::Unfocused],
        ),
        builtin(
            "deep-calm",
            "Deep Calm",
            "Slow exhales with a gentle rest at the bottom of each breath.",
            BreathPattern::new(4, 4, 8, 2),
            5,
            &[Mood::Sleepless, Mood::Calm],
        ),
    ]
});

fn builtin(
    id: &str,
    name: &str,
    description: &str,
    pattern: BreathPattern,
    default_rounds: u32,
    moods: &[Mood],
) -> ExerciseDefinition {
    ExerciseDefinition {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        pattern,
        default_rounds,
        moods: moods.to_vec(),
    }
}

/// Read-only table of exercise definitions, looked up by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    exercises: Vec<ExerciseDefinition>,
}

impl Catalog {
    /// Catalog with only the built-in exercises.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            exercises: BUILTIN.clone(),
        }
    }

    /// Built-in exercises plus custom ones.
    ///
    /// A custom exercise with the id of a built-in one replaces it. Ids are
    /// compared ignoring ASCII case, the same way lookups are.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidExercise` if any custom definition is
    /// invalid or two custom definitions share an id.
    pub fn with_custom(custom: Vec<ExerciseDefinition>) -> Result<Self, BreatheError> {
        let mut catalog = Self::builtin();
        let mut seen: Vec<String> = Vec::with_capacity(custom.len());

        for exercise in custom {
            exercise.validate()?;
            if seen.iter().any(|id| id.eq_ignore_ascii_case(&exercise.id)) {
                return Err(BreatheError::InvalidExercise {
                    id: exercise.id,
                    reason: "id is defined more than once".to_string(),
                });
            }
            seen.push(exercise.id.clone());

            if let Some(existing) = catalog
                .exercises
                .iter_mut()
                .find(|e| e.id.eq_ignore_ascii_case(&exercise.id))
            {
                debug!(id = %exercise.id, "custom exercise overrides built-in");
                *existing = exercise;
            } else {
                debug!(id = %exercise.id, "custom exercise added");
                catalog.exercises.push(exercise);
            }
        }

        Ok(catalog)
    }

    /// Look up an exercise by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|e| e.id.eq_ignore_ascii_case(id))
    }

    /// Look up an exercise that must exist.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::NotFound` if no exercise has this id.
    pub fn require(&self, id: &str) -> Result<&ExerciseDefinition, BreatheError> {
        self.get(id).ok_or_else(|| {
            BreatheError::NotFound(format!(
                "Exercise '{id}' (available: {})",
                self.ids().join(", ")
            ))
        })
    }

    /// Iterate over all exercises in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseDefinition> {
        self.exercises.iter()
    }

    /// All exercise ids.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.exercises.iter().map(|e| e.id.as_str()).collect()
    }

    /// Number of exercises.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
