use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed model invocation as recorded in a Claude Code session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    timestamp: DateTime<Utc>,
    model: String,
    session_id: String,
    input_tokens: u64,
    output_tokens: u64,
    cache_creation_tokens: u64,
    cache_read_tokens: u64,
}

impl UsageEvent {
    pub fn new(
        timestamp: DateTime<Utc>,
        model: String,
        session_id: String,
        input_tokens: u64,
        output_tokens: u64,
        cache_creation_tokens: u64,
        cache_read_tokens: u64,
    ) -> Self {
        Self {
            timestamp,
            model,
            session_id,
            input_tokens,
            output_tokens,
            cache_creation_tokens,
            cache_read_tokens,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn input_tokens(&self) -> u64 {
        self.input_tokens
    }

    pub fn output_tokens(&self) -> u64 {
        self.output_tokens
    }

    pub fn cache_creation_tokens(&self) -> u64 {
        self.cache_creation_tokens
    }

    pub fn cache_read_tokens(&self) -> u64 {
        self.cache_read_tokens
    }

    /// Input plus output. Cache tokens do not count against the quota.
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Per-category token sums over a set of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCounts {
    input_tokens: u64,
    output_tokens: u64,
    cache_creation_tokens: u64,
    cache_read_tokens: u64,
}

impl TokenCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&mut self, event: &UsageEvent) {
        self.input_tokens += event.input_tokens;
        self.output_tokens += event.output_tokens;
        self.cache_creation_tokens += event.cache_creation_tokens;
        self.cache_read_tokens += event.cache_read_tokens;
    }

    pub fn input_tokens(&self) -> u64 {
        self.input_tokens
    }

    pub fn output_tokens(&self) -> u64 {
        self.output_tokens
    }

    pub fn cache_creation_tokens(&self) -> u64 {
        self.cache_creation_tokens
    }

    pub fn cache_read_tokens(&self) -> u64 {
        self.cache_read_tokens
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

impl<'a> FromIterator<&'a UsageEvent> for TokenCounts {
    fn from_iter<I: IntoIterator<Item = &'a UsageEvent>>(iter: I) -> Self {
        let mut counts = TokenCounts::new();
        for event in iter {
            counts.add_event(event);
        }
        counts
    }
}

/// Rate-limit and pricing parameters for one model family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelLimits {
    five_hour_limit: u64,
    weekly_limit: u64,
    input_cost_per_million: f64,
    output_cost_per_million: f64,
}

impl ModelLimits {
    pub const fn new(
        five_hour_limit: u64,
        weekly_limit: u64,
        input_cost_per_million: f64,
        output_cost_per_million: f64,
    ) -> Self {
        Self {
            five_hour_limit,
            weekly_limit,
            input_cost_per_million,
            output_cost_per_million,
        }
    }

    pub fn five_hour_limit(&self) -> u64 {
        self.five_hour_limit
    }

    pub fn weekly_limit(&self) -> u64 {
        self.weekly_limit
    }

    pub fn input_cost_per_million(&self) -> f64 {
        self.input_cost_per_million
    }

    pub fn output_cost_per_million(&self) -> f64 {
        self.output_cost_per_million
    }

    pub fn calculate_cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        (input_tokens as f64 / 1_000_000.0) * self.input_cost_per_million
            + (output_tokens as f64 / 1_000_000.0) * self.output_cost_per_million
    }
}

/// Snapshot of usage inside one rolling window.
///
/// `minutes_remaining` is `f64::INFINITY` when nothing is being consumed;
/// it serialises to `null` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnStats {
    pub(crate) total_tokens: u64,
    pub(crate) input_tokens: u64,
    pub(crate) output_tokens: u64,
    pub(crate) cache_read_tokens: u64,
    pub(crate) cache_creation_tokens: u64,
    pub(crate) tokens_per_minute: u64,
    pub(crate) estimated_time_remaining: String,
    pub(crate) minutes_remaining: f64,
    pub(crate) percent_used: u64,
    pub(crate) session_cost: f64,
    pub(crate) model: String,
    pub(crate) limit: u64,
    pub(crate) event_count: usize,
    pub(crate) session_duration_minutes: u64,
}

impl BurnStats {
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    pub fn input_tokens(&self) -> u64 {
        self.input_tokens
    }

    pub fn output_tokens(&self) -> u64 {
        self.output_tokens
    }

    pub fn cache_read_tokens(&self) -> u64 {
        self.cache_read_tokens
    }

    pub fn cache_creation_tokens(&self) -> u64 {
        self.cache_creation_tokens
    }

    pub fn tokens_per_minute(&self) -> u64 {
        self.tokens_per_minute
    }

    pub fn estimated_time_remaining(&self) -> &str {
        &self.estimated_time_remaining
    }

    pub fn minutes_remaining(&self) -> f64 {
        self.minutes_remaining
    }

    pub fn percent_used(&self) -> u64 {
        self.percent_used
    }

    pub fn session_cost(&self) -> f64 {
        self.session_cost
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn event_count(&self) -> usize {
        self.event_count
    }

    pub fn session_duration_minutes(&self) -> u64 {
        self.session_duration_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(input: u64, output: u64, cache_creation: u64, cache_read: u64) -> UsageEvent {
        UsageEvent::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            "claude-sonnet-4-20250514".to_string(),
            "session-1".to_string(),
            input,
            output,
            cache_creation,
            cache_read,
        )
    }

    #[test]
    fn test_total_tokens_excludes_cache() {
        let e = event(100, 50, 1_000, 2_000);
        assert_eq!(e.total_tokens(), 150);
    }

    #[test]
    fn test_token_counts_collect() {
        let events = vec![event(100, 50, 10, 20), event(200, 25, 0, 5)];
        let counts: TokenCounts = events.iter().collect();

        assert_eq!(counts.input_tokens(), 300);
        assert_eq!(counts.output_tokens(), 75);
        assert_eq!(counts.cache_creation_tokens(), 10);
        assert_eq!(counts.cache_read_tokens(), 25);
        assert_eq!(counts.total_tokens(), 375);
    }

    #[test]
    fn test_model_limits_cost() {
        let limits = ModelLimits::new(15_000_000, 50_000_000, 15.0, 75.0);
        let cost = limits.calculate_cost(1_000, 500);
        assert!((cost - 0.0525).abs() < 1e-12);
    }
}
