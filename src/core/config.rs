//! Meter configuration: lexicons, matching, release policy, history cap
//!
//! Loaded from a JSON file where every field is optional:
//!
//! ```json
//! {
//!   "lust_words": { "sexy": 0.5 },
//!   "work_words": { "focus": 0.4 },
//!   "match_mode": "substring",
//!   "release_policy": { "mode": "immediate" },
//!   "history_limit": null
//! }
//! ```

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::core::lexicon::{Lexicon, MatchMode};
use crate::types::{MeterError, Result};

/// Phrases that count as satisfaction under the user-aware policy
pub const DEFAULT_SATISFACTION_PHRASES: [&str; 8] = [
    "that was amazing",
    "i'm satisfied",
    "i feel satisfied",
    "that felt good",
    "mission accomplished",
    "i did it",
    "all done",
    "finished it",
];

/// When a pole crossing is allowed to fire a release
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// Fire as soon as the pole is crossed
    #[default]
    Immediate,
    /// Message-driven releases only fire if the message carries a satisfaction phrase
    UserAware {
        #[serde(default = "default_phrases")]
        phrases: Vec<String>,
    },
}

fn default_phrases() -> Vec<String> {
    DEFAULT_SATISFACTION_PHRASES.iter().map(|p| p.to_string()).collect()
}

impl ReleasePolicy {
    /// User-aware policy with the default phrases
    pub fn user_aware() -> Self {
        ReleasePolicy::UserAware {
            phrases: default_phrases(),
        }
    }

    /// May a crossing caused by `message` fire? `None` means no message text.
    pub fn allows(&self, message: Option<&str>) -> bool {
        match (self, message) {
            (ReleasePolicy::Immediate, _) => true,
            (ReleasePolicy::UserAware { .. }, None) => true,
            (ReleasePolicy::UserAware { phrases }, Some(text)) => {
                let lowered = text.to_lowercase();
                phrases.iter().any(|p| lowered.contains(&p.to_lowercase()))
            }
        }
    }
}

/// Full meter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    pub lust_words: Lexicon,
    pub work_words: Lexicon,
    pub match_mode: MatchMode,
    pub release_policy: ReleasePolicy,
    /// Keep at most this many releases in memory, oldest evicted first
    pub history_limit: Option<usize>,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            lust_words: Lexicon::default_lust(),
            work_words: Lexicon::default_work(),
            match_mode: MatchMode::default(),
            release_policy: ReleasePolicy::default(),
            history_limit: None,
        }
    }
}

impl MeterConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MeterConfig = serde_json::from_str(json).map_err(MeterError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| MeterError::io(path, e))?;
        let config = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            lust_words = config.lust_words.len(),
            work_words = config.work_words.len(),
            "loaded meter config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.lust_words.validate()?;
        self.work_words.validate()?;
        if self.history_limit == Some(0) {
            return Err(MeterError::Config("history_limit must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = MeterConfig::from_json_str("{}").unwrap();
        assert_eq!(config, MeterConfig::default());
    }

    #[test]
    fn test_lexicon_override_is_wholesale() {
        let config = MeterConfig::from_json_str(r#"{"work_words": {"Essay": 0.45}}"#).unwrap();
        assert_eq!(config.work_words.len(), 1);
        assert_eq!(config.work_words.get("essay"), Some(0.45));
        assert_eq!(config.lust_words, Lexicon::default_lust());
    }

    #[test]
    fn test_user_aware_default_phrases() {
        let config = MeterConfig::from_json_str(r#"{"release_policy": {"mode": "user_aware"}}"#).unwrap();
        assert_eq!(config.release_policy, ReleasePolicy::user_aware());
    }

    #[test]
    fn test_match_mode_parse() {
        let config = MeterConfig::from_json_str(r#"{"match_mode": "word_boundary"}"#).unwrap();
        assert_eq!(config.match_mode, MatchMode::WordBoundary);
    }

    #[test]
    fn test_invalid_weight_rejected() {
        let err = MeterConfig::from_json_str(r#"{"lust_words": {"kiss": -1.0}}"#).unwrap_err();
        assert!(matches!(err, MeterError::Config(_)));
    }

    #[test]
    fn test_zero_history_limit_rejected() {
        assert!(MeterConfig::from_json_str(r#"{"history_limit": 0}"#).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(MeterConfig::from_json_str("{"), Err(MeterError::Parse(_))));
    }

    #[test]
    fn test_policy_allows() {
        let policy = ReleasePolicy::user_aware();
        assert!(policy.allows(None));
        assert!(policy.allows(Some("Mission accomplished, finally")));
        assert!(!policy.allows(Some("keep going")));
        assert!(ReleasePolicy::Immediate.allows(Some("keep going")));
    }
}
