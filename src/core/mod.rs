//! Core modules for Luna Meter

pub mod lexicon;
pub mod config;
pub mod meter;
pub mod persist;
pub mod api;

pub use lexicon::{Lexicon, LexiconMatcher, MatchMode, score_lexicon, average_weight};
pub use config::{MeterConfig, ReleasePolicy, DEFAULT_SATISFACTION_PHRASES};
pub use meter::{EmotionalMeter, adjusted_level, now_epoch};
pub use persist::{MeterSnapshot, save_state, load_state};
pub use api::{create_router, run_server};
