//! Lexicon scoring: keyword → weight tables for the lust and work poles
//!
//! Matching is plain substring containment on the lowercased message, so
//! "hot" also matches inside "photograph". Word-boundary matching exists as an
//! opt-in mode and is never the default.

use std::collections::BTreeMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::types::{LexiconHit, MeterError, Result};

lazy_static! {
    // =========================================================================
    // Lust words: pull the level toward 0.0
    // =========================================================================
    static ref DEFAULT_LUST_WORDS: Lexicon = Lexicon::from_pairs([
        ("beautiful", 0.3),
        ("sexy", 0.5),
        ("hot", 0.3),
        ("desire", 0.5),
        ("passion", 0.4),
        ("kiss", 0.4),
        ("touch", 0.4),
        ("body", 0.3),
        ("want you", 0.4),
        ("need you", 0.4),
        ("badly", 0.3),
        ("love", 0.2),
        ("lust", 0.5),
        ("tease", 0.3),
        ("naughty", 0.4),
    ]);

    // =========================================================================
    // Work words: pull the level toward 1.0
    // =========================================================================
    static ref DEFAULT_WORK_WORDS: Lexicon = Lexicon::from_pairs([
        ("work", 0.3),
        ("project", 0.3),
        ("focus", 0.4),
        ("achieve", 0.5),
        ("goal", 0.4),
        ("productive", 0.4),
        ("task", 0.3),
        ("deadline", 0.4),
        ("write", 0.3),
        ("create", 0.3),
        ("finish", 0.3),
        ("progress", 0.3),
        ("accomplish", 0.5),
        ("plan", 0.2),
    ]);
}

/// Keyword → weight table. Keys are stored lowercase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lexicon {
    words: BTreeMap<String, f64>,
}

impl Lexicon {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (keyword, weight) pairs
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut lexicon = Self::new();
        for (keyword, weight) in pairs {
            lexicon.insert(keyword.as_ref(), weight);
        }
        lexicon
    }

    /// Default lust table
    pub fn default_lust() -> Self {
        DEFAULT_LUST_WORDS.clone()
    }

    /// Default work table
    pub fn default_work() -> Self {
        DEFAULT_WORK_WORDS.clone()
    }

    /// Insert or overwrite a keyword
    pub fn insert(&mut self, keyword: &str, weight: f64) {
        self.words.insert(keyword.to_lowercase(), weight);
    }

    pub fn get(&self, keyword: &str) -> Option<f64> {
        self.words.get(&keyword.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate keywords in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.words.iter().map(|(k, w)| (k.as_str(), *w))
    }

    /// Reject negative or non-finite weights and empty keywords
    pub fn validate(&self) -> Result<()> {
        for (keyword, weight) in self.iter() {
            if keyword.trim().is_empty() {
                return Err(MeterError::Config("empty lexicon keyword".to_string()));
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(MeterError::Config(format!(
                    "invalid weight {} for keyword '{}'",
                    weight, keyword
                )));
            }
        }
        Ok(())
    }
}

/// How lexicon keys are matched against a message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Key contained anywhere in the lowercased message
    #[default]
    Substring,
    /// Key delimited by word boundaries
    WordBoundary,
}

/// A lexicon prepared for repeated scoring in a given match mode
#[derive(Debug, Clone)]
pub struct LexiconMatcher {
    lexicon: Lexicon,
    mode: MatchMode,
    /// One pattern per key, in lexicon order. Empty in substring mode.
    patterns: Vec<Regex>,
}

impl LexiconMatcher {
    /// Validate the lexicon and compile patterns if needed
    pub fn new(lexicon: Lexicon, mode: MatchMode) -> Result<Self> {
        lexicon.validate()?;

        let patterns = match mode {
            MatchMode::Substring => Vec::new(),
            MatchMode::WordBoundary => lexicon
                .iter()
                .map(|(keyword, _)| {
                    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(keyword)))
                        .map_err(|e| MeterError::Config(e.to_string()))
                })
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(Self { lexicon, mode, patterns })
    }

    /// Substring matcher. Nothing to compile, so the weights are not checked.
    pub fn substring(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            mode: MatchMode::Substring,
            patterns: Vec::new(),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Every keyword found in the message, each at most once
    pub fn hits(&self, message: &str) -> Vec<LexiconHit> {
        match self.mode {
            MatchMode::Substring => substring_hits(message, &self.lexicon),
            MatchMode::WordBoundary => self
                .lexicon
                .iter()
                .zip(&self.patterns)
                .filter(|(_, re)| re.is_match(message))
                .map(|((keyword, weight), _)| LexiconHit {
                    keyword: keyword.to_string(),
                    weight,
                })
                .collect(),
        }
    }

    /// Mean weight of the keywords found in the message
    pub fn score(&self, message: &str) -> f64 {
        average_weight(&self.hits(message))
    }
}

/// Mean weight of lexicon keys contained in the lowercased message, 0 if none
pub fn score_lexicon(message: &str, lexicon: &Lexicon) -> f64 {
    average_weight(&substring_hits(message, lexicon))
}

/// Arithmetic mean of hit weights, 0 for no hits
pub fn average_weight(hits: &[LexiconHit]) -> f64 {
    // Divide before summing so large finite weights cannot overflow to inf
    let n = hits.len().max(1) as f64;
    hits.iter().map(|h| h.weight / n).sum()
}

fn substring_hits(message: &str, lexicon: &Lexicon) -> Vec<LexiconHit> {
    let lowered = message.to_lowercase();
    lexicon
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword))
        .map(|(keyword, weight)| LexiconHit {
            keyword: keyword.to_string(),
            weight,
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
