//! Coarse interaction-type vocabulary

use serde::{Deserialize, Serialize};

/// Interaction kinds accepted by `EmotionalMeter::update_with_interaction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// lustful | sexual | desire | passion
    Lust,
    /// work | achievement | focus | creation
    Work,
    /// release
    Release,
    /// Anything else, one decay step toward balance
    Neutral,
}

impl InteractionKind {
    /// Map a free-form label onto the vocabulary. Unknown labels are neutral.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "lustful" | "sexual" | "desire" | "passion" => InteractionKind::Lust,
            "work" | "achievement" | "focus" | "creation" => InteractionKind::Work,
            "release" => InteractionKind::Release,
            _ => InteractionKind::Neutral,
        }
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InteractionKind::Lust => "lust",
            InteractionKind::Work => "work",
            InteractionKind::Release => "release",
            InteractionKind::Neutral => "neutral",
        };
        write!(f, "{}", name)
    }
}
