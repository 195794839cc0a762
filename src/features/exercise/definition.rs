//! Breathing patterns and exercise definitions.
//!
//! A pattern is four phase durations in whole seconds. `hold` and
//! `hold_empty` are optional; absent or zero means the phase is skipped.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::recommend::Mood;
use crate::error::BreatheError;

/// One of the four phases of a breathing round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Breathing in
    Inhale,
    /// Holding with full lungs
    Hold,
    /// Breathing out
    Exhale,
    /// Holding with empty lungs
    HoldEmpty,
}

impl Phase {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Inhale => "Inhale",
            Self::Hold => "Hold",
            Self::Exhale => "Exhale",
            Self::HoldEmpty => "Hold (empty)",
        }
    }

    /// Instruction shown to the user while the phase is active.
    #[must_use]
    pub const fn instruction(&self) -> &'static str {
        match self {
            Self::Inhale => "Breathe in slowly",
            Self::Hold => "Hold your breath",
            Self::Exhale => "Breathe out gently",
            Self::HoldEmpty => "Rest before the next breath",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Phase durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathPattern {
    /// Inhale duration, must be positive
    pub inhale: u32,
    /// Hold after inhale, skipped when absent or zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold: Option<u32>,
    /// Exhale duration, must be positive
    pub exhale: u32,
    /// Hold after exhale, skipped when absent or zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_empty: Option<u32>,
}

/// Longest allowed single phase, in seconds.
pub const MAX_PHASE_SECONDS: u32 = 3600;

impl BreathPattern {
    /// Create a pattern. Zero holds are stored as absent.
    #[must_use]
    pub fn new(inhale: u32, hold: u32, exhale: u32, hold_empty: u32) -> Self {
        Self {
            inhale,
            hold: (hold > 0).then_some(hold),
            exhale,
            hold_empty: (hold_empty > 0).then_some(hold_empty),
        }
    }

    /// Duration of a phase in seconds (zero for skipped phases).
    #[must_use]
    pub fn duration_of(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Inhale => self.inhale,
            Phase::Hold => self.hold.unwrap_or(0),
            Phase::Exhale => self.exhale,
            Phase::HoldEmpty => self.hold_empty.unwrap_or(0),
        }
    }

    /// Active phases of one round, in order, with their durations.
    #[must_use]
    pub fn phases(&self) -> Vec<(Phase, u32)> {
        [Phase::Inhale, Phase::Hold, Phase::Exhale, Phase::HoldEmpty]
            .into_iter()
            .map(|p| (p, self.duration_of(p)))
            .filter(|(_, secs)| *secs > 0)
            .collect()
    }

    /// Length of one full round in seconds.
    #[must_use]
    pub fn cycle_seconds(&self) -> u32 {
        self.phases().iter().map(|(_, secs)| secs).sum()
    }

    /// Length of one full round in milliseconds.
    #[must_use]
    pub fn cycle_millis(&self) -> u64 {
        u64::from(self.cycle_seconds()) * 1000
    }

    /// Phase active `elapsed_ms` into a round.
    ///
    /// Positions at or past the end of the cycle report the last phase.
    #[must_use]
    pub fn phase_at_millis(&self, elapsed_ms: u64) -> Phase {
        let mut boundary = 0u64;
        let mut last = Phase::Inhale;
        for (phase, secs) in self.phases() {
            boundary += u64::from(secs) * 1000;
            last = phase;
            if elapsed_ms < boundary {
                return phase;
            }
        }
        last
    }

    /// Phase active at a fraction (0.0 - 1.0) of the round cycle.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn phase_at(&self, fraction: f64) -> Phase {
        let fraction = fraction.clamp(0.0, 1.0);
        let elapsed_ms = (fraction * self.cycle_millis() as f64) as u64;
        self.phase_at_millis(elapsed_ms)
    }

    /// Check the pattern rules, returning the first violation.
    ///
    /// # Errors
    ///
    /// Returns a description of the violated rule.
    pub fn check(&self) -> Result<(), String> {
        if self.inhale == 0 {
            return Err("inhale must be greater than zero".to_string());
        }
        if self.exhale == 0 {
            return Err("exhale must be greater than zero".to_string());
        }
        if let Some((phase, secs)) = self
            .phases()
            .into_iter()
            .find(|(_, secs)| *secs > MAX_PHASE_SECONDS)
        {
            return Err(format!(
                "{} of {secs}s exceeds the {MAX_PHASE_SECONDS}s limit",
                phase.display_name().to_lowercase()
            ));
        }
        Ok(())
    }

    /// Parse a pattern from dash notation.
    ///
    /// Accepts `inhale-exhale`, `inhale-hold-exhale` or
    /// `inhale-hold-exhale-holdEmpty`, e.g. `4-7-8` or `4-4-4-4`.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::Parse` for malformed notation or a pattern
    /// that breaks the inhale/exhale rules.
    pub fn parse(s: &str) -> Result<Self, BreatheError> {
        let parts = s
            .trim()
            .split(['-', '/'])
            .map(|p| {
                p.trim()
                    .parse::<u32>()
                    .map_err(|_| BreatheError::Parse(format!("Invalid pattern '{s}': '{p}' is not a number")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pattern = match parts.as_slice() {
            [inhale, exhale] => Self::new(*inhale, 0, *exhale, 0),
            [inhale, hold, exhale] => Self::new(*inhale, *hold, *exhale, 0),
            [inhale, hold, exhale, hold_empty] => Self::new(*inhale, *hold, *exhale, *hold_empty),
            _ => {
                return Err(BreatheError::Parse(format!(
                    "Invalid pattern '{s}': expected 2 to 4 durations"
                )))
            }
        };

        pattern
            .check()
            .map_err(|reason| BreatheError::Parse(format!("Invalid pattern '{s}': {reason}")))?;
        Ok(pattern)
    }

    /// Four-part dash notation, e.g. `4-7-8-0`.
    #[must_use]
    pub fn notation(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.inhale,
            self.hold.unwrap_or(0),
            self.exhale,
            self.hold_empty.unwrap_or(0)
        )
    }
}

impl std::fmt::Display for BreathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notation())
    }
}

/// A breathing exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Phase durations
    pub pattern: BreathPattern,
    /// Rounds suggested when starting
    pub default_rounds: u32,
    /// Moods this exercise helps with
    #[serde(default)]
    pub moods: Vec<Mood>,
}

impl ExerciseDefinition {
    /// Validate the definition.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidExercise` naming the first broken rule.
    pub fn validate(&self) -> Result<(), BreatheError> {
        let invalid = |reason: String| BreatheError::InvalidExercise {
            id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty".to_string()));
        }
        self.pattern.check().map_err(invalid)?;
        if self.default_rounds == 0 {
            return Err(invalid("default_rounds must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Estimated length of a run with the given number of rounds.
    #[must_use]
    pub fn estimated_duration(&self, rounds: u32) -> Duration {
        Duration::seconds(i64::from(self.pattern.cycle_seconds()) * i64::from(rounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_breathing() -> ExerciseDefinition {
        ExerciseDefinition {
            id: "box".to_string(),
            name: "Box Breathing".to_string(),
            description: "Equal four-count phases".to_string(),
            pattern: BreathPattern::new(4, 4, 4, 4),
            default_rounds: 4,
            moods: Vec::new(),
        }
    }

    #[test]
    fn test_phases_skip_absent_holds() {
        let pattern = BreathPattern::new(4, 7, 8, 0);
        assert_eq!(
            pattern.phases(),
            vec![(Phase::Inhale, 4), (Phase::Hold, 7), (Phase::Exhale, 8)]
        );
        assert_eq!(pattern.cycle_seconds(), 19);
        assert_eq!(pattern.hold_empty, None);
    }

    #[test]
    fn test_phase_at_boundaries() {
        let pattern = BreathPattern::new(4, 4, 4, 4);
        assert_eq!(pattern.phase_at(0.0), Phase::Inhale);
        assert_eq!(pattern.phase_at(0.24), Phase::Inhale);
        assert_eq!(pattern.phase_at(0.25), Phase::Hold);
        assert_eq!(pattern.phase_at(0.5), Phase::Exhale);
        assert_eq!(pattern.phase_at(0.75), Phase::HoldEmpty);
        assert_eq!(pattern.phase_at(1.0), Phase::HoldEmpty);
    }

    #[test]
    fn test_phase_at_without_holds() {
        let pattern = BreathPattern::new(5, 0, 5, 0);
        assert_eq!(pattern.phase_at_millis(4_999), Phase::Inhale);
        assert_eq!(pattern.phase_at_millis(5_000), Phase::Exhale);
        assert_eq!(pattern.phase_at_millis(20_000), Phase::Exhale);
    }

    #[test]
    fn test_parse_notation() {
        assert_eq!(BreathPattern::parse("4-7-8").unwrap(), BreathPattern::new(4, 7, 8, 0));
        assert_eq!(BreathPattern::parse("5-5").unwrap(), BreathPattern::new(5, 0, 5, 0));
        assert_eq!(BreathPattern::parse("4/4/4/4").unwrap(), BreathPattern::new(4, 4, 4, 4));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(BreathPattern::parse("").is_err());
        assert!(BreathPattern::parse("4").is_err());
        assert!(BreathPattern::parse("4-a-4").is_err());
        assert!(BreathPattern::parse("0-4-4").is_err());
        assert!(BreathPattern::parse("4-4-0").is_err());
        assert!(BreathPattern::parse("1-2-3-4-5").is_err());
    }

    #[test]
    fn test_phase_length_limit() {
        let err = BreathPattern::parse("4294967295-1").unwrap_err();
        assert!(err.to_string().contains("exceeds"));

        let mut long_hold = box_breathing();
        long_hold.pattern = BreathPattern::new(4, MAX_PHASE_SECONDS + 1, 4, 0);
        assert!(matches!(
            long_hold.validate(),
            Err(BreatheError::InvalidExercise { .. })
        ));

        let longest = BreathPattern::new(
            MAX_PHASE_SECONDS,
            MAX_PHASE_SECONDS,
            MAX_PHASE_SECONDS,
            MAX_PHASE_SECONDS,
        );
        assert!(longest.check().is_ok());
        assert_eq!(longest.cycle_seconds(), 4 * MAX_PHASE_SECONDS);
    }

    #[test]
    fn test_notation_round_trip() {
        let pattern = BreathPattern::new(4, 7, 8, 0);
        assert_eq!(pattern.notation(), "4-7-8-0");
        assert_eq!(BreathPattern::parse(&pattern.notation()).unwrap(), pattern);
    }

    #[test]
    fn test_validate_definition() {
        assert!(box_breathing().validate().is_ok());

        let mut no_rounds = box_breathing();
        no_rounds.default_rounds = 0;
        assert!(matches!(
            no_rounds.validate(),
            Err(BreatheError::InvalidExercise { .. })
        ));

        let mut no_exhale = box_breathing();
        no_exhale.pattern.exhale = 0;
        assert!(no_exhale.validate().is_err());
    }

    #[test]
    fn test_estimated_duration() {
        assert_eq!(box_breathing().estimated_duration(4).num_seconds(), 64);
    }
}
