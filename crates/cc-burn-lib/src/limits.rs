//! Model → rate-limit lookup.
//!
//! Anthropic doesn't publish exact quota numbers; the figures below are
//! approximations. Every identifier resolves to something: an unknown model
//! falls through to [`DEFAULT_LIMITS`].

use crate::data_structures::ModelLimits;

const SONNET_LIMITS: ModelLimits = ModelLimits::new(
    45_000_000,  // tokens per 5h window
    200_000_000, // tokens per week
    3.0,         // $3 per 1M input tokens
    15.0,        // $15 per 1M output tokens
);

const OPUS_LIMITS: ModelLimits = ModelLimits::new(
    15_000_000, // tokens per 5h window
    50_000_000, // tokens per week
    15.0,       // $15 per 1M input tokens
    75.0,       // $75 per 1M output tokens
);

pub const DEFAULT_LIMITS: ModelLimits = SONNET_LIMITS;

/// Known models in scan order. Substring matching returns the first hit, so
/// order matters.
static MODEL_LIMITS: &[(&str, ModelLimits)] = &[
    ("claude-sonnet-4-20250514", SONNET_LIMITS),
    ("claude-sonnet-4", SONNET_LIMITS),
    ("claude-opus-4-20250514", OPUS_LIMITS),
    ("claude-opus-4", OPUS_LIMITS),
    ("claude-opus-4-5-20251101", OPUS_LIMITS),
];

/// Case-insensitive keyword → canonical table key.
static FAMILY_KEYWORDS: &[(&str, &str)] = &[("opus", "claude-opus-4")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Exact,
    Substring,
    Family,
    Default,
}

/// Tried in order; [`MatchStrategy::Default`] applies when none match.
const RESOLUTION_ORDER: [MatchStrategy; 3] = [
    MatchStrategy::Exact,
    MatchStrategy::Substring,
    MatchStrategy::Family,
];

pub struct LimitRegistry {
    table: &'static [(&'static str, ModelLimits)],
}

impl LimitRegistry {
    pub fn new() -> Self {
        Self {
            table: MODEL_LIMITS,
        }
    }

    pub fn resolve(&self, model: &str) -> ModelLimits {
        self.resolve_with_strategy(model).1
    }

    /// Like [`resolve`](Self::resolve) but also reports which rule matched.
    pub fn resolve_with_strategy(&self, model: &str) -> (MatchStrategy, ModelLimits) {
        RESOLUTION_ORDER
            .iter()
            .find_map(|&strategy| self.try_match(strategy, model).map(|l| (strategy, l)))
            .unwrap_or((MatchStrategy::Default, DEFAULT_LIMITS))
    }

    fn try_match(&self, strategy: MatchStrategy, model: &str) -> Option<ModelLimits> {
        match strategy {
            MatchStrategy::Exact => self.lookup(model),
            MatchStrategy::Substring => self
                .table
                .iter()
                .find(|(key, _)| model.contains(key) || key.contains(model))
                .map(|(_, limits)| *limits),
            MatchStrategy::Family => {
                let lowered = model.to_lowercase();
                FAMILY_KEYWORDS
                    .iter()
                    .find(|(keyword, _)| lowered.contains(keyword))
                    .and_then(|(_, canonical)| self.lookup(canonical))
            }
            // Only ever reported, never tried.
            MatchStrategy::Default => None,
        }
    }

    fn lookup(&self, key: &str) -> Option<ModelLimits> {
        self.table
            .iter()
            .find(|(known, _)| *known == key)
            .map(|(_, limits)| *limits)
    }

    pub fn supported_models(&self) -> Vec<&'static str> {
        self.table.iter().map(|(key, _)| *key).collect()
    }
}

impl Default for LimitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
