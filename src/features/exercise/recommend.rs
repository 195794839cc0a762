//! Mood-based exercise recommendation.

use serde::{Deserialize, Serialize};

use super::catalog::Catalog;
use super::definition::ExerciseDefinition;
use crate::error::BreatheError;

/// How the user is feeling before an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Worried or on edge
    Anxious,
    /// Under pressure
    Stressed,
    /// Low on energy
    Tired,
    /// Scattered attention
    Unfocused,
    /// Trouble falling asleep
    Sleepless,
    /// Already settled, wants maintenance practice
    Calm,
}

impl Mood {
    /// All moods in display order.
    pub const ALL: [Self; 6] = [
        Self::Anxious,
        Self::Stressed,
        Self::Tired,
        Self::Unfocused,
        Self::Sleepless,
        Self::Calm,
    ];

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Anxious => "Anxious",
            Self::Stressed => "Stressed",
            Self::Tired => "Tired",
            Self::Unfocused => "Unfocused",
            Self::Sleepless => "Sleepless",
            Self::Calm => "Calm",
        }
    }

    /// Exercises to suggest when none in the catalog are tagged with this mood.
    const fn fallback_ids(&self) -> &'static [&'static str] {
        match self {
            Self::Anxious => &["calm", "relaxing-478", "coherent"],
            Self::Stressed => &["box", "coherent"],
            Self::Tired => &["energize", "box"],
            Self::Unfocused => &["box", "energize"],
            Self::Sleepless => &["relaxing-478", "deep-calm"],
            Self::Calm => &["coherent"],
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = BreatheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anxious" | "anxiety" | "nervous" | "worried" => Ok(Self::Anxious),
            "stressed" | "stress" | "overwhelmed" => Ok(Self::Stressed),
            "tired" | "sleepy" | "low" | "exhausted" => Ok(Self::Tired),
            "unfocused" | "distracted" | "scattered" => Ok(Self::Unfocused),
            "sleepless" | "insomnia" | "restless" => Ok(Self::Sleepless),
            "calm" | "relaxed" | "ok" | "fine" => Ok(Self::Calm),
            other => Err(BreatheError::Parse(format!(
                "Unknown mood '{other}' (try: anxious, stressed, tired, unfocused, sleepless, calm)"
            ))),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Exercises for a mood, best match first.
///
/// Exercises tagged with the mood come first in catalog order, followed by
/// the mood's fallback list. Each exercise appears once.
#[must_use]
pub fn recommend(catalog: &Catalog, mood: Mood) -> Vec<&ExerciseDefinition> {
    let mut picks: Vec<&ExerciseDefinition> =
        catalog.iter().filter(|e| e.moods.contains(&mood)).collect();

    for id in mood.fallback_ids() {
        if let Some(exercise) = catalog.get(id) {
            if !picks.iter().any(|p| p.id == exercise.id) {
                picks.push(exercise);
            }
        }
    }

    picks
}
