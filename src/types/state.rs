//! Emotional state buckets

use serde::{Deserialize, Serialize};
use crate::{
    PURE_LUST_MAX, HIGH_LUST_MAX, MODERATE_LUST_MAX,
    BALANCED_MAX, MODERATE_WORK_MAX, HIGH_WORK_MAX,
};

/// The seven named buckets of the emotional level, ordered lust → work
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalState {
    /// level ≤ 0.10
    PureLust,
    /// (0.10, 0.30]
    HighLust,
    /// (0.30, 0.40]
    ModerateLust,
    /// (0.40, 0.60]
    Balanced,
    /// (0.60, 0.70]
    ModerateWork,
    /// (0.70, 0.90]
    HighWork,
    /// level > 0.90
    PureWork,
}

impl EmotionalState {
    /// All states in ascending order
    pub const ALL: [EmotionalState; 7] = [
        EmotionalState::PureLust,
        EmotionalState::HighLust,
        EmotionalState::ModerateLust,
        EmotionalState::Balanced,
        EmotionalState::ModerateWork,
        EmotionalState::HighWork,
        EmotionalState::PureWork,
    ];

    /// Classify a level. The level is not clamped here.
    pub fn from_level(level: f64) -> Self {
        if level <= PURE_LUST_MAX {
            EmotionalState::PureLust
        } else if level <= HIGH_LUST_MAX {
            EmotionalState::HighLust
        } else if level <= MODERATE_LUST_MAX {
            EmotionalState::ModerateLust
        } else if level <= BALANCED_MAX {
            EmotionalState::Balanced
        } else if level <= MODERATE_WORK_MAX {
            EmotionalState::ModerateWork
        } else if level <= HIGH_WORK_MAX {
            EmotionalState::HighWork
        } else {
            EmotionalState::PureWork
        }
    }

    /// Human-readable description used in update results
    pub fn description(&self) -> &'static str {
        match self {
            EmotionalState::PureLust => "Consumed by desire",
            EmotionalState::HighLust => "Strongly drawn to desire",
            EmotionalState::ModerateLust => "Leaning toward desire",
            EmotionalState::Balanced => "Balanced between desire and focus",
            EmotionalState::ModerateWork => "Leaning toward focus",
            EmotionalState::HighWork => "Strongly focused on work",
            EmotionalState::PureWork => "Completely absorbed in work",
        }
    }

    /// Is this one of the lust-side buckets?
    pub fn is_lust(&self) -> bool {
        *self < EmotionalState::Balanced
    }

    /// Is this one of the work-side buckets?
    pub fn is_work(&self) -> bool {
        *self > EmotionalState::Balanced
    }

    /// Terminal color name for `colored`
    pub fn color(&self) -> colored::Color {
        use colored::Color;
        match self {
            EmotionalState::PureLust => Color::BrightMagenta,
            EmotionalState::HighLust => Color::Magenta,
            EmotionalState::ModerateLust => Color::Red,
            EmotionalState::Balanced => Color::Green,
            EmotionalState::ModerateWork => Color::Cyan,
            EmotionalState::HighWork => Color::Blue,
            EmotionalState::PureWork => Color::BrightBlue,
        }
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            EmotionalState::PureLust => "🔥",
            EmotionalState::HighLust => "💋",
            EmotionalState::ModerateLust => "💗",
            EmotionalState::Balanced => "⚖️",
            EmotionalState::ModerateWork => "📝",
            EmotionalState::HighWork => "💼",
            EmotionalState::PureWork => "🏆",
        }
    }
}

impl std::fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EmotionalState::PureLust => "PURE_LUST",
            EmotionalState::HighLust => "HIGH_LUST",
            EmotionalState::ModerateLust => "MODERATE_LUST",
            EmotionalState::Balanced => "BALANCED",
            EmotionalState::ModerateWork => "MODERATE_WORK",
            EmotionalState::HighWork => "HIGH_WORK",
            EmotionalState::PureWork => "PURE_WORK",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_belong_to_lower_bucket() {
        assert_eq!(EmotionalState::from_level(0.10), EmotionalState::PureLust);
        assert_eq!(EmotionalState::from_level(0.30), EmotionalState::HighLust);
        assert_eq!(EmotionalState::from_level(0.40), EmotionalState::ModerateLust);
        assert_eq!(EmotionalState::from_level(0.60), EmotionalState::Balanced);
        assert_eq!(EmotionalState::from_level(0.70), EmotionalState::ModerateWork);
        assert_eq!(EmotionalState::from_level(0.90), EmotionalState::HighWork);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(EmotionalState::from_level(0.0), EmotionalState::PureLust);
        assert_eq!(EmotionalState::from_level(1.0), EmotionalState::PureWork);
        assert_eq!(EmotionalState::from_level(0.5), EmotionalState::Balanced);
    }

    #[test]
    fn test_classification_is_monotone() {
        // Sweeping the interval never steps backwards and visits every bucket
        let mut seen = Vec::new();
        let mut previous = EmotionalState::PureLust;
        for i in 0..=1000 {
            let state = EmotionalState::from_level(i as f64 / 1000.0);
            assert!(state >= previous);
            if !seen.contains(&state) {
                seen.push(state);
            }
            previous = state;
        }
        assert_eq!(seen, EmotionalState::ALL.to_vec());
    }

    #[test]
    fn test_sides() {
        assert!(EmotionalState::HighLust.is_lust());
        assert!(!EmotionalState::Balanced.is_lust());
        assert!(!EmotionalState::Balanced.is_work());
        assert!(EmotionalState::PureWork.is_work());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&EmotionalState::ModerateWork).unwrap();
        assert_eq!(json, "\"moderate_work\"");
    }
}
