//! Update results and status views handed to presentation layers

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use colored::Colorize;
use crate::types::{EmotionalState, ReasonCode, ReleaseEvent};

/// A lexicon keyword found in a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconHit {
    pub keyword: String,
    pub weight: f64,
}

/// Per-lexicon scoring detail for one message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexiconBreakdown {
    /// Mean weight of matched lust keywords (0 when none)
    pub lust_average: f64,
    /// Mean weight of matched work keywords (0 when none)
    pub work_average: f64,
    pub lust_hits: Vec<LexiconHit>,
    pub work_hits: Vec<LexiconHit>,
}

impl LexiconBreakdown {
    /// No keyword matched on either side
    pub fn is_empty(&self) -> bool {
        self.lust_hits.is_empty() && self.work_hits.is_empty()
    }
}

/// Result bundle of every update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResult {
    pub timestamp: DateTime<Utc>,
    pub old_level: f64,
    /// Level after the update (0.5 if a release fired)
    pub new_level: f64,
    pub state: EmotionalState,
    pub description: String,
    pub reason: ReasonCode,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub release_event: Option<ReleaseEvent>,
    pub breakdown: LexiconBreakdown,
}

impl UpdateResult {
    /// Create new result, state and description derived from `new_level`
    pub fn new(
        old_level: f64,
        new_level: f64,
        reason: ReasonCode,
        release_event: Option<ReleaseEvent>,
        breakdown: LexiconBreakdown,
    ) -> Self {
        let state = EmotionalState::from_level(new_level);
        Self {
            timestamp: Utc::now(),
            old_level,
            new_level,
            state,
            description: state.description().to_string(),
            reason,
            release_event,
            breakdown,
        }
    }

    /// Did this update fire a release?
    pub fn released(&self) -> bool {
        self.reason.is_release()
    }

    /// Signed change of level, measured before any release reset
    pub fn delta(&self) -> f64 {
        let reached = self
            .release_event
            .as_ref()
            .map(|e| e.from_level)
            .unwrap_or(self.new_level);
        reached - self.old_level
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = format!(
            "{} level={:.3} ({:+.3}) | state={} | {}",
            self.state.emoji(),
            self.new_level,
            self.delta(),
            self.state,
            self.reason.code(),
        );
        line.color(self.state.color()).to_string()
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "level={:.3} | delta={:+.3} | state={} | reason={}",
            self.new_level,
            self.delta(),
            self.state,
            self.reason.code()
        )
    }
}

/// Point-in-time view of the meter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterStatus {
    pub level: f64,
    pub state: EmotionalState,
    pub description: String,
    /// Unix epoch seconds
    pub last_update: f64,
    pub release_count: usize,
    pub update_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReleaseKind;

    #[test]
    fn test_state_follows_new_level() {
        let result = UpdateResult::new(0.5, 0.35, ReasonCode::M001_LUST_PULL, None, LexiconBreakdown::default());
        assert_eq!(result.state, EmotionalState::ModerateLust);
        assert_eq!(result.description, "Leaning toward desire");
        assert!(!result.released());
    }

    #[test]
    fn test_withheld_release_is_not_released() {
        let result = UpdateResult::new(0.12, 0.08, ReasonCode::M003_RELEASE_WITHHELD, None, LexiconBreakdown::default());
        assert!(!result.released());
        assert_eq!(result.state, EmotionalState::PureLust);
    }

    #[test]
    fn test_delta_uses_pre_reset_level() {
        let event = ReleaseEvent {
            timestamp: 0.0,
            from_level: 0.05,
            to_level: 0.5,
            kind: ReleaseKind::Sexual,
            trigger: "pure_lust_release".to_string(),
            duration: 0.0,
        };
        let result = UpdateResult::new(0.15, 0.5, ReasonCode::M003_SEXUAL_RELEASE, Some(event), LexiconBreakdown::default());
        assert!((result.delta() + 0.10).abs() < 1e-9);
        assert!(result.released());
    }

    #[test]
    fn test_parseable_string() {
        let result = UpdateResult::new(0.5, 0.5, ReasonCode::M001_NO_SIGNAL, None, LexiconBreakdown::default());
        assert_eq!(
            result.to_parseable_string(),
            "level=0.500 | delta=+0.000 | state=BALANCED | reason=M001_NO_SIGNAL"
        );
    }

    #[test]
    fn test_release_event_omitted_when_absent() {
        let result = UpdateResult::new(0.5, 0.5, ReasonCode::M001_NO_SIGNAL, None, LexiconBreakdown::default());
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("release_event"));
    }
}
