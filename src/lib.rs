//! Luna Meter: emotional meter for the Luna writing companion
//!
//! A single mood scalar in [0, 1] pulled toward "lust" (0.0) or "work" (1.0)
//! by keyword-weighted scoring of chat messages. Crossing either pole fires a
//! release that snaps the level back to balance.

pub mod core;
pub mod types;

// =============================================================================
// LEVELS
// =============================================================================

/// Resting level, target of releases and natural decay
pub const BALANCED_LEVEL: f64 = 0.5;

/// Lowest possible level (pure lust)
pub const MIN_LEVEL: f64 = 0.0;

/// Highest possible level (pure work)
pub const MAX_LEVEL: f64 = 1.0;

// =============================================================================
// STATE BUCKETS - upper bound of each bucket, boundary belongs to the lower one
// =============================================================================

pub const PURE_LUST_MAX: f64 = 0.10;
pub const HIGH_LUST_MAX: f64 = 0.30;
pub const MODERATE_LUST_MAX: f64 = 0.40;
pub const BALANCED_MAX: f64 = 0.60;
pub const MODERATE_WORK_MAX: f64 = 0.70;
pub const HIGH_WORK_MAX: f64 = 0.90;

// =============================================================================
// RELEASE THRESHOLDS
// =============================================================================

/// Crossing down to or below this fires a sexual release
pub const SEXUAL_RELEASE_THRESHOLD: f64 = 0.1;

/// Crossing up to or above this fires an achievement release
pub const ACHIEVEMENT_RELEASE_THRESHOLD: f64 = 0.9;

// =============================================================================
// ADJUSTMENT CALIBRATION
// =============================================================================

/// Scale applied when only one lexicon fires
pub const SINGLE_SIGNAL_SCALE: f64 = 0.2;

/// Scale applied to (work - lust) when both lexicons fire
pub const MIXED_SIGNAL_SCALE: f64 = 0.3;

/// Step size of one natural decay toward balance
pub const DECAY_STEP: f64 = 0.05;

/// Decay is skipped when already this close to balance
pub const DECAY_TOLERANCE: f64 = 0.01;

/// Default intensity for interaction-type updates
pub const DEFAULT_INTENSITY: f64 = 0.1;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
