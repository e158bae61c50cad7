//! Reason codes for meter updates
//! One code per update outcome, stable strings for logs and API clients

use serde::{Deserialize, Serialize};

/// Reason codes for every level change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // M001: Message scoring
    // =========================================================================
    /// No lexicon keyword matched, level unchanged
    M001_NO_SIGNAL,
    /// Only lust keywords matched
    M001_LUST_PULL,
    /// Only work keywords matched
    M001_WORK_PULL,
    /// Both lexicons matched, differential applied
    M001_MIXED_SIGNAL,

    // =========================================================================
    // M002: Interaction types
    // =========================================================================
    /// Lust interaction lowered the level
    M002_INTERACTION_LUST,
    /// Work interaction raised the level
    M002_INTERACTION_WORK,
    /// Neutral interaction, one decay step toward balance
    M002_NATURAL_DECAY,
    /// Neutral interaction, already at balance
    M002_AT_BALANCE,

    // =========================================================================
    // M003: Releases
    // =========================================================================
    /// Crossed into pure lust, reset to balance
    M003_SEXUAL_RELEASE,
    /// Crossed into pure work, reset to balance
    M003_ACHIEVEMENT_RELEASE,
    /// Forced release away from the poles
    M003_NATURAL_RELEASE,
    /// Pole crossed but no satisfaction phrase, release withheld
    M003_RELEASE_WITHHELD,

    // =========================================================================
    // M004: Direct level changes
    // =========================================================================
    /// Explicit reset or set
    M004_LEVEL_SET,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::M001_NO_SIGNAL => "M001_NO_SIGNAL",
            Self::M001_LUST_PULL => "M001_LUST_PULL",
            Self::M001_WORK_PULL => "M001_WORK_PULL",
            Self::M001_MIXED_SIGNAL => "M001_MIXED_SIGNAL",
            Self::M002_INTERACTION_LUST => "M002_INTERACTION_LUST",
            Self::M002_INTERACTION_WORK => "M002_INTERACTION_WORK",
            Self::M002_NATURAL_DECAY => "M002_NATURAL_DECAY",
            Self::M002_AT_BALANCE => "M002_AT_BALANCE",
            Self::M003_SEXUAL_RELEASE => "M003_SEXUAL_RELEASE",
            Self::M003_ACHIEVEMENT_RELEASE => "M003_ACHIEVEMENT_RELEASE",
            Self::M003_NATURAL_RELEASE => "M003_NATURAL_RELEASE",
            Self::M003_RELEASE_WITHHELD => "M003_RELEASE_WITHHELD",
            Self::M004_LEVEL_SET => "M004_LEVEL_SET",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::M001_NO_SIGNAL => "No keywords matched",
            Self::M001_LUST_PULL => "Pulled toward desire",
            Self::M001_WORK_PULL => "Pulled toward work",
            Self::M001_MIXED_SIGNAL => "Mixed signals weighed",
            Self::M002_INTERACTION_LUST => "Lust interaction",
            Self::M002_INTERACTION_WORK => "Work interaction",
            Self::M002_NATURAL_DECAY => "Drifting back to balance",
            Self::M002_AT_BALANCE => "Already balanced",
            Self::M003_SEXUAL_RELEASE => "Sexual release",
            Self::M003_ACHIEVEMENT_RELEASE => "Achievement release",
            Self::M003_NATURAL_RELEASE => "Natural release",
            Self::M003_RELEASE_WITHHELD => "Release withheld until satisfied",
            Self::M004_LEVEL_SET => "Level set directly",
        }
    }

    /// Did this update end in a release?
    pub fn is_release(&self) -> bool {
        matches!(
            self,
            Self::M003_SEXUAL_RELEASE | Self::M003_ACHIEVEMENT_RELEASE | Self::M003_NATURAL_RELEASE
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
