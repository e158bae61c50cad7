//! Core types for Luna Meter

mod state;
mod release;
mod interaction;
mod output;
mod reason;
mod error;

pub use state::EmotionalState;
pub use release::{ReleaseKind, ReleaseEvent, ReleaseStats, TRIGGER_PURE_LUST, TRIGGER_PURE_WORK, TRIGGER_FORCED};
pub use interaction::InteractionKind;
pub use output::{UpdateResult, LexiconBreakdown, LexiconHit, MeterStatus};
pub use reason::ReasonCode;
pub use error::{MeterError, Result};
