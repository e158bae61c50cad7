//! Emotional meter: bounded mood scalar with dual release transitions
//!
//! Level moves in [0, 1]:
//! - lust keywords pull toward 0.0, work keywords toward 1.0
//! - crossing down to ≤ 0.1 fires a sexual release → 0.5
//! - crossing up to ≥ 0.9 fires an achievement release → 0.5
//! - neutral interactions decay one step toward 0.5
//!
//! Releases are edge-triggered: the previous level must have been on the
//! other side of the threshold.

use std::collections::VecDeque;
use std::path::Path;
use chrono::Utc;
use tracing::{debug, info, warn};
use crate::{
    BALANCED_LEVEL, MIN_LEVEL, MAX_LEVEL,
    SEXUAL_RELEASE_THRESHOLD, ACHIEVEMENT_RELEASE_THRESHOLD,
    SINGLE_SIGNAL_SCALE, MIXED_SIGNAL_SCALE, DECAY_STEP, DECAY_TOLERANCE,
};
use crate::core::config::{MeterConfig, ReleasePolicy};
use crate::core::lexicon::{average_weight, Lexicon, LexiconMatcher};
use crate::core::persist::{self, MeterSnapshot};
use crate::types::{
    EmotionalState, InteractionKind, LexiconBreakdown, MeterStatus, ReasonCode,
    ReleaseEvent, ReleaseKind, ReleaseStats, Result, UpdateResult,
    TRIGGER_FORCED, TRIGGER_PURE_LUST, TRIGGER_PURE_WORK,
};

/// Current wall-clock time as Unix epoch seconds
pub fn now_epoch() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Apply the lexicon averages to a level.
///
/// - no hits: unchanged
/// - lust only: `level − L × 0.2`, floored at 0
/// - work only: `level + W × 0.2`, capped at 1
/// - both: `level + (W − L) × 0.3`, clamped
///
/// A non-finite result leaves the level unchanged.
pub fn adjusted_level(level: f64, lust_average: f64, work_average: f64) -> (f64, ReasonCode) {
    let (next, reason) = raw_adjusted_level(level, lust_average, work_average);
    if next.is_finite() {
        (next, reason)
    } else {
        (level, reason)
    }
}

fn raw_adjusted_level(level: f64, lust_average: f64, work_average: f64) -> (f64, ReasonCode) {
    match (lust_average > 0.0, work_average > 0.0) {
        (false, false) => (level, ReasonCode::M001_NO_SIGNAL),
        (true, false) => (
            (level - lust_average * SINGLE_SIGNAL_SCALE).max(MIN_LEVEL),
            ReasonCode::M001_LUST_PULL,
        ),
        (false, true) => (
            (level + work_average * SINGLE_SIGNAL_SCALE).min(MAX_LEVEL),
            ReasonCode::M001_WORK_PULL,
        ),
        (true, true) => {
            let adjustment = (work_average - lust_average) * MIXED_SIGNAL_SCALE;
            (
                (level + adjustment).clamp(MIN_LEVEL, MAX_LEVEL),
                ReasonCode::M001_MIXED_SIGNAL,
            )
        }
    }
}

/// The emotional meter
#[derive(Debug, Clone)]
pub struct EmotionalMeter {
    level: f64,
    /// Unix epoch seconds of the last mutation
    last_update: f64,
    history: VecDeque<ReleaseEvent>,
    lust: LexiconMatcher,
    work: LexiconMatcher,
    policy: ReleasePolicy,
    history_limit: Option<usize>,
    update_count: u64,
}

impl Default for EmotionalMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionalMeter {
    /// Balanced meter with the default lexicons and immediate releases
    pub fn new() -> Self {
        Self {
            level: BALANCED_LEVEL,
            last_update: now_epoch(),
            history: VecDeque::new(),
            lust: LexiconMatcher::substring(Lexicon::default_lust()),
            work: LexiconMatcher::substring(Lexicon::default_work()),
            policy: ReleasePolicy::Immediate,
            history_limit: None,
            update_count: 0,
        }
    }

    /// Balanced meter built from a configuration
    pub fn with_config(config: MeterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            level: BALANCED_LEVEL,
            last_update: now_epoch(),
            history: VecDeque::new(),
            lust: LexiconMatcher::new(config.lust_words, config.match_mode)?,
            work: LexiconMatcher::new(config.work_words, config.match_mode)?,
            policy: config.release_policy,
            history_limit: config.history_limit,
            update_count: 0,
        })
    }

    /// Classify a level into its bucket (no clamping)
    pub fn classify(level: f64) -> EmotionalState {
        EmotionalState::from_level(level)
    }

    // =========================================================================
    // Scoring
    // =========================================================================

    /// Lexicon hits and averages for a message
    pub fn breakdown(&self, message: &str) -> LexiconBreakdown {
        let lust_hits = self.lust.hits(message);
        let work_hits = self.work.hits(message);
        LexiconBreakdown {
            lust_average: average_weight(&lust_hits),
            work_average: average_weight(&work_hits),
            lust_hits,
            work_hits,
        }
    }

    /// Level the meter would move to for this message, without mutating
    pub fn compute_adjusted_level(&self, message: &str) -> f64 {
        let breakdown = self.breakdown(message);
        adjusted_level(self.level, breakdown.lust_average, breakdown.work_average).0
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Score a chat message, move the level and fire a release if a pole was crossed
    pub fn update_with_message(&mut self, message: &str) -> UpdateResult {
        let now = now_epoch();
        let old_level = self.level;
        let breakdown = self.breakdown(message);
        let (new_level, reason) =
            adjusted_level(old_level, breakdown.lust_average, breakdown.work_average);

        let (release_event, release_reason) = self.settle(old_level, new_level, Some(message), now);
        self.touch(now);

        let result = UpdateResult::new(
            old_level,
            self.level,
            release_reason.unwrap_or(reason),
            release_event,
            breakdown,
        );
        debug!(
            old = old_level,
            new = result.new_level,
            reason = result.reason.code(),
            "message update"
        );
        result
    }

    /// Coarse update from an interaction kind. `intensity` is the step size.
    pub fn update_with_interaction(&mut self, kind: InteractionKind, intensity: f64) -> UpdateResult {
        let intensity = if intensity.is_finite() && intensity >= 0.0 {
            intensity
        } else {
            warn!(intensity, "ignoring invalid interaction intensity");
            0.0
        };

        let now = now_epoch();
        let old_level = self.level;

        let (release_event, reason) = match kind {
            InteractionKind::Lust => {
                let new_level = (old_level - intensity).max(MIN_LEVEL);
                let (event, release_reason) = self.settle(old_level, new_level, None, now);
                (event, release_reason.unwrap_or(ReasonCode::M002_INTERACTION_LUST))
            }
            InteractionKind::Work => {
                let new_level = (old_level + intensity).min(MAX_LEVEL);
                let (event, release_reason) = self.settle(old_level, new_level, None, now);
                (event, release_reason.unwrap_or(ReasonCode::M002_INTERACTION_WORK))
            }
            InteractionKind::Release => {
                let (event, release_reason) = self.force_release(now);
                (Some(event), release_reason)
            }
            InteractionKind::Neutral => (None, self.decay_step()),
        };
        self.touch(now);

        let result = UpdateResult::new(old_level, self.level, reason, release_event, LexiconBreakdown::default());
        debug!(
            kind = %kind,
            old = old_level,
            new = result.new_level,
            reason = result.reason.code(),
            "interaction update"
        );
        result
    }

    /// Interaction update from a free-form label, default intensity when `None`
    pub fn update_with_interaction_label(&mut self, label: &str, intensity: Option<f64>) -> UpdateResult {
        self.update_with_interaction(
            InteractionKind::parse(label),
            intensity.unwrap_or(crate::DEFAULT_INTENSITY),
        )
    }

    /// One natural decay step toward balance. Never fires a release.
    pub fn decay_toward_balance(&mut self) -> UpdateResult {
        self.update_with_interaction(InteractionKind::Neutral, 0.0)
    }

    /// Move one step toward balance without overshooting
    fn decay_step(&mut self) -> ReasonCode {
        let distance = self.level - BALANCED_LEVEL;
        if distance.abs() <= DECAY_TOLERANCE {
            return ReasonCode::M002_AT_BALANCE;
        }
        self.level = if distance > 0.0 {
            (self.level - DECAY_STEP).max(BALANCED_LEVEL)
        } else {
            (self.level + DECAY_STEP).min(BALANCED_LEVEL)
        };
        ReasonCode::M002_NATURAL_DECAY
    }

    /// Commit a new level and fire an edge-triggered release if a pole was crossed
    fn settle(
        &mut self,
        old_level: f64,
        new_level: f64,
        message: Option<&str>,
        now: f64,
    ) -> (Option<ReleaseEvent>, Option<ReasonCode>) {
        self.level = new_level.clamp(MIN_LEVEL, MAX_LEVEL);

        let crossed = if self.level <= SEXUAL_RELEASE_THRESHOLD && old_level > SEXUAL_RELEASE_THRESHOLD {
            Some((ReleaseKind::Sexual, TRIGGER_PURE_LUST, ReasonCode::M003_SEXUAL_RELEASE))
        } else if self.level >= ACHIEVEMENT_RELEASE_THRESHOLD && old_level < ACHIEVEMENT_RELEASE_THRESHOLD {
            Some((ReleaseKind::Achievement, TRIGGER_PURE_WORK, ReasonCode::M003_ACHIEVEMENT_RELEASE))
        } else {
            None
        };

        match crossed {
            None => (None, None),
            Some((kind, _, _)) if !self.policy.allows(message) => {
                warn!(kind = %kind, at = self.level, "release withheld, no satisfaction phrase");
                (None, Some(ReasonCode::M003_RELEASE_WITHHELD))
            }
            Some((kind, trigger, reason)) => (Some(self.release(kind, trigger, now)), Some(reason)),
        }
    }

    /// Release regardless of thresholds. Kind follows the side the level is on.
    fn force_release(&mut self, now: f64) -> (ReleaseEvent, ReasonCode) {
        let (kind, reason) = if self.level <= SEXUAL_RELEASE_THRESHOLD {
            (ReleaseKind::Sexual, ReasonCode::M003_SEXUAL_RELEASE)
        } else if self.level >= ACHIEVEMENT_RELEASE_THRESHOLD {
            (ReleaseKind::Achievement, ReasonCode::M003_ACHIEVEMENT_RELEASE)
        } else {
            (ReleaseKind::Natural, ReasonCode::M003_NATURAL_RELEASE)
        };
        (self.release(kind, TRIGGER_FORCED, now), reason)
    }

    /// Record a release and snap back to balance
    fn release(&mut self, kind: ReleaseKind, trigger: &str, now: f64) -> ReleaseEvent {
        let event = ReleaseEvent {
            timestamp: now,
            from_level: self.level,
            to_level: BALANCED_LEVEL,
            kind,
            trigger: trigger.to_string(),
            duration: (now - self.last_update).max(0.0),
        };
        info!(
            kind = %kind,
            from = event.from_level,
            trigger = trigger,
            duration = event.duration,
            "release"
        );

        self.level = BALANCED_LEVEL;
        self.history.push_back(event.clone());
        self.enforce_history_limit();
        event
    }

    fn enforce_history_limit(&mut self) {
        if let Some(limit) = self.history_limit {
            while self.history.len() > limit {
                self.history.pop_front();
            }
        }
    }

    fn touch(&mut self, now: f64) {
        self.last_update = now;
        self.update_count += 1;
    }

    // =========================================================================
    // Direct level changes
    // =========================================================================

    /// Back to balance (0.5). No release is recorded.
    pub fn reset(&mut self) -> UpdateResult {
        self.set_level(BALANCED_LEVEL)
    }

    /// Straight to pure lust (0.0). No release is recorded.
    pub fn reset_to_lust(&mut self) -> UpdateResult {
        self.set_level(MIN_LEVEL)
    }

    /// Straight to pure work (1.0). No release is recorded.
    pub fn reset_to_work(&mut self) -> UpdateResult {
        self.set_level(MAX_LEVEL)
    }

    /// Set an arbitrary level, clamped. Non-finite values are ignored.
    pub fn set_level(&mut self, level: f64) -> UpdateResult {
        let old_level = self.level;
        if level.is_finite() {
            self.level = level.clamp(MIN_LEVEL, MAX_LEVEL);
        } else {
            warn!(value = level, "ignoring non-finite level");
        }
        self.last_update = now_epoch();
        UpdateResult::new(old_level, self.level, ReasonCode::M004_LEVEL_SET, None, LexiconBreakdown::default())
    }

    // =========================================================================
    // Lexicon configuration
    // =========================================================================

    /// Replace both lexicons wholesale, keeping the current match mode
    pub fn set_lexicons(&mut self, lust: Lexicon, work: Lexicon) -> Result<()> {
        let mode = self.lust.mode();
        let lust = LexiconMatcher::new(lust, mode)?;
        let work = LexiconMatcher::new(work, mode)?;
        self.lust = lust;
        self.work = work;
        info!(lust_words = self.lust.lexicon().len(), work_words = self.work.lexicon().len(), "lexicons replaced");
        Ok(())
    }

    pub fn set_lust_words(&mut self, lust: Lexicon) -> Result<()> {
        self.lust = LexiconMatcher::new(lust, self.lust.mode())?;
        Ok(())
    }

    pub fn set_work_words(&mut self, work: Lexicon) -> Result<()> {
        self.work = LexiconMatcher::new(work, self.work.mode())?;
        Ok(())
    }

    pub fn lust_words(&self) -> &Lexicon {
        self.lust.lexicon()
    }

    pub fn work_words(&self) -> &Lexicon {
        self.work.lexicon()
    }

    pub fn set_release_policy(&mut self, policy: ReleasePolicy) {
        self.policy = policy;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn state(&self) -> EmotionalState {
        EmotionalState::from_level(self.level)
    }

    /// Unix epoch seconds of the last mutation
    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Full in-memory history, oldest first
    pub fn release_history(&self) -> &VecDeque<ReleaseEvent> {
        &self.history
    }

    /// The last `n` releases, oldest first
    pub fn recent_releases(&self, n: usize) -> Vec<ReleaseEvent> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).cloned().collect()
    }

    pub fn release_stats(&self) -> ReleaseStats {
        ReleaseStats::from_history(&self.history, now_epoch())
    }

    pub fn status(&self) -> MeterStatus {
        let state = self.state();
        MeterStatus {
            level: self.level,
            state,
            description: state.description().to_string(),
            last_update: self.last_update,
            release_count: self.history.len(),
            update_count: self.update_count,
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Persistable view of the meter
    pub fn snapshot(&self) -> MeterSnapshot {
        MeterSnapshot {
            current_level: self.level,
            last_update: self.last_update,
            release_history: self.history.iter().cloned().collect(),
        }
    }

    /// Replace level, timestamp and history from a snapshot
    pub fn restore(&mut self, snapshot: MeterSnapshot) {
        self.level = snapshot.current_level.clamp(MIN_LEVEL, MAX_LEVEL);
        self.last_update = snapshot.last_update;
        self.history = snapshot.release_history.into();
        self.enforce_history_limit();
    }

    /// Write the meter state to a JSON file
    pub fn save_state(&self, path: impl AsRef<Path>) -> Result<()> {
        persist::save_state(&self.snapshot(), path)
    }

    /// Load state from a JSON file. Missing file keeps the current state and returns `false`.
    pub fn load_state(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        match persist::load_state(path)? {
            Some(snapshot) => {
                self.restore(snapshot);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
