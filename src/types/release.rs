//! Release events and history statistics

use serde::{Deserialize, Serialize};

/// Trigger label for a release fired by crossing into pure lust
pub const TRIGGER_PURE_LUST: &str = "pure_lust_release";

/// Trigger label for a release fired by crossing into pure work
pub const TRIGGER_PURE_WORK: &str = "pure_work_release";

/// Trigger label for a release requested through the `release` interaction
pub const TRIGGER_FORCED: &str = "forced_release";

/// Kind of release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseKind {
    /// Level crossed down into pure lust
    Sexual,
    /// Level crossed up into pure work
    Achievement,
    /// Forced release away from either pole
    Natural,
}

impl std::fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReleaseKind::Sexual => "sexual",
            ReleaseKind::Achievement => "achievement",
            ReleaseKind::Natural => "natural",
        };
        write!(f, "{}", name)
    }
}

/// A single release. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEvent {
    /// Unix epoch seconds
    pub timestamp: f64,
    /// Level that triggered the release (before reset)
    pub from_level: f64,
    /// Level after reset
    pub to_level: f64,
    #[serde(rename = "release_type")]
    pub kind: ReleaseKind,
    pub trigger: String,
    /// Seconds since the previous update
    pub duration: f64,
}

/// Aggregate view over the release history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseStats {
    pub total: usize,
    pub sexual: usize,
    pub achievement: usize,
    pub natural: usize,
    /// Seconds since the most recent release, if any
    pub seconds_since_last: Option<f64>,
}

impl ReleaseStats {
    /// Build stats from an ordered history
    pub fn from_history<'a, I>(history: I, now: f64) -> Self
    where
        I: IntoIterator<Item = &'a ReleaseEvent>,
    {
        let mut stats = ReleaseStats::default();
        let mut last: Option<f64> = None;

        for event in history {
            stats.total += 1;
            match event.kind {
                ReleaseKind::Sexual => stats.sexual += 1,
                ReleaseKind::Achievement => stats.achievement += 1,
                ReleaseKind::Natural => stats.natural += 1,
            }
            last = Some(event.timestamp);
        }

        stats.seconds_since_last = last.map(|t| (now - t).max(0.0));
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: ReleaseKind, timestamp: f64) -> ReleaseEvent {
        ReleaseEvent {
            timestamp,
            from_level: 0.05,
            to_level: 0.5,
            kind,
            trigger: TRIGGER_PURE_LUST.to_string(),
            duration: 1.0,
        }
    }

    #[test]
    fn test_release_type_field_name() {
        let json = serde_json::to_string(&event(ReleaseKind::Sexual, 10.0)).unwrap();
        assert!(json.contains("\"release_type\":\"sexual\""));
        assert!(!json.contains("\"kind\""));
    }

    #[test]
    fn test_stats_counts() {
        let history = vec![
            event(ReleaseKind::Sexual, 10.0),
            event(ReleaseKind::Achievement, 20.0),
            event(ReleaseKind::Sexual, 30.0),
        ];
        let stats = ReleaseStats::from_history(&history, 45.0);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.sexual, 2);
        assert_eq!(stats.achievement, 1);
        assert_eq!(stats.natural, 0);
        assert_eq!(stats.seconds_since_last, Some(15.0));
    }

    #[test]
    fn test_stats_empty() {
        let history: Vec<ReleaseEvent> = Vec::new();
        let stats = ReleaseStats::from_history(&history, 45.0);
        assert_eq!(stats, ReleaseStats::default());
    }
}
