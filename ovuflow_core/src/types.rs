//! Core domain types for the Ovuflow cycle calculator.
//!
//! This module defines the closed categories that select hormone curves:
//! - Health conditions (waveform formula set)
//! - Exercise levels (post-generation scaling)
//! - Hormone identifiers

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Health Condition
// ============================================================================

/// Health condition category selecting the hormone waveform set
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HealthCondition {
    #[default]
    Normal,
    Pcos,
    ThyroidIssues,
}

impl HealthCondition {
    /// All conditions in menu order
    pub const ALL: [HealthCondition; 3] = [
        HealthCondition::Normal,
        HealthCondition::Pcos,
        HealthCondition::ThyroidIssues,
    ];

    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            HealthCondition::Normal => "Normal",
            HealthCondition::Pcos => "PCOS",
            HealthCondition::ThyroidIssues => "Thyroid Issues",
        }
    }
}

impl fmt::Display for HealthCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HealthCondition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "normal" => Ok(HealthCondition::Normal),
            "pcos" => Ok(HealthCondition::Pcos),
            "thyroid_issues" | "thyroid" => Ok(HealthCondition::ThyroidIssues),
            _ => Err(Error::UnknownHealthCondition(s.to_string())),
        }
    }
}

// ============================================================================
// Exercise Level
// ============================================================================

/// Exercise level category selecting a multiplicative hormone scaling
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseLevel {
    VeryActive,
    #[default]
    Normal,
    Sedentary,
}

impl ExerciseLevel {
    /// All levels in menu order
    pub const ALL: [ExerciseLevel; 3] = [
        ExerciseLevel::VeryActive,
        ExerciseLevel::Normal,
        ExerciseLevel::Sedentary,
    ];

    /// User-facing label
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseLevel::VeryActive => "Very Active",
            ExerciseLevel::Normal => "Normal",
            ExerciseLevel::Sedentary => "Sedentary",
        }
    }
}

impl fmt::Display for ExerciseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExerciseLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "very_active" => Ok(ExerciseLevel::VeryActive),
            "normal" => Ok(ExerciseLevel::Normal),
            "sedentary" => Ok(ExerciseLevel::Sedentary),
            _ => Err(Error::UnknownExerciseLevel(s.to_string())),
        }
    }
}

// ============================================================================
// Hormones
// ============================================================================

/// The three hormones tracked in a series
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Hormone {
    Estrogen,
    Progesterone,
    Lh,
}

impl Hormone {
    pub const ALL: [Hormone; 3] = [Hormone::Estrogen, Hormone::Progesterone, Hormone::Lh];

    pub fn label(&self) -> &'static str {
        match self {
            Hormone::Estrogen => "Estrogen",
            Hormone::Progesterone => "Progesterone",
            Hormone::Lh => "LH",
        }
    }
}

impl fmt::Display for Hormone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase and fold spaces/hyphens into underscores: "Very Active" -> "very_active"
fn normalize(s: &str) -> String {
    s.trim()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_health_condition_variants() {
        assert_eq!("Normal".parse::<HealthCondition>().unwrap(), HealthCondition::Normal);
        assert_eq!("pcos".parse::<HealthCondition>().unwrap(), HealthCondition::Pcos);
        assert_eq!(
            "Thyroid Issues".parse::<HealthCondition>().unwrap(),
            HealthCondition::ThyroidIssues
        );
        assert_eq!(
            "thyroid-issues".parse::<HealthCondition>().unwrap(),
            HealthCondition::ThyroidIssues
        );
    }

    #[test]
    fn test_unknown_health_condition_is_error() {
        let err = "diabetes".parse::<HealthCondition>().unwrap_err();
        assert!(matches!(err, Error::UnknownHealthCondition(ref s) if s == "diabetes"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_exercise_level_variants() {
        assert_eq!(
            "Very Active".parse::<ExerciseLevel>().unwrap(),
            ExerciseLevel::VeryActive
        );
        assert_eq!(
            "very-active".parse::<ExerciseLevel>().unwrap(),
            ExerciseLevel::VeryActive
        );
        assert_eq!("SEDENTARY".parse::<ExerciseLevel>().unwrap(), ExerciseLevel::Sedentary);
        assert!("lazy".parse::<ExerciseLevel>().is_err());
        assert!("".parse::<ExerciseLevel>().is_err());
    }

    #[test]
    fn test_labels_roundtrip_through_from_str() {
        for condition in HealthCondition::ALL {
            assert_eq!(condition.label().parse::<HealthCondition>().unwrap(), condition);
        }
        for level in ExerciseLevel::ALL {
            assert_eq!(level.to_string().parse::<ExerciseLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&HealthCondition::ThyroidIssues).unwrap();
        assert_eq!(json, "\"thyroid_issues\"");
        let level: ExerciseLevel = serde_json::from_str("\"very_active\"").unwrap();
        assert_eq!(level, ExerciseLevel::VeryActive);
    }

    #[test]
    fn test_defaults_are_normal() {
        assert_eq!(HealthCondition::default(), HealthCondition::Normal);
        assert_eq!(ExerciseLevel::default(), ExerciseLevel::Normal);
    }
}
