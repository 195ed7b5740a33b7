use crate::data_structures::{BurnStats, ModelLimits, TokenCounts, UsageEvent};
use crate::format::{format_duration, INFINITY_SYMBOL};
use crate::limits::{LimitRegistry, DEFAULT_LIMITS};
use crate::loader::recent_events;
use chrono::{DateTime, Utc};

pub const DEFAULT_WINDOW_HOURS: f64 = 5.0;

pub struct Calculator {
    registry: LimitRegistry,
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            registry: LimitRegistry::new(),
        }
    }

    /// Aggregates the events that fall in the `window_hours` before `now` and
    /// projects how long until the current model's 5-hour limit is reached.
    ///
    /// `events` must be sorted ascending by timestamp: the first and last
    /// events in the window define the session duration and the model.
    pub fn calculate_burn_stats(
        &self,
        events: &[UsageEvent],
        window_hours: f64,
        now: DateTime<Utc>,
    ) -> BurnStats {
        let events = recent_events(events, window_hours, now);

        let (first, last) = match (events.first(), events.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Self::empty_stats(),
        };

        let counts: TokenCounts = events.iter().collect();
        let total_tokens = counts.total_tokens();

        let duration_ms = (last.timestamp() - first.timestamp()).num_milliseconds() as f64;
        let duration_minutes = (duration_ms / 60_000.0).max(1.0);

        let tokens_per_minute = total_tokens as f64 / duration_minutes;

        let model = last.model().to_string();
        let limits = self.registry.resolve(&model);
        let limit = limits.five_hour_limit();

        let minutes_remaining =
            Self::calculate_minutes_remaining(total_tokens, limit, tokens_per_minute);
        let percent_used = ((total_tokens as f64 / limit as f64) * 100.0).round() as u64;
        let session_cost = Self::calculate_cost(&events, &limits);

        log::debug!(
            "{} events in {}h window, model {} ({} tokens over {:.1}m)",
            events.len(),
            window_hours,
            model,
            total_tokens,
            duration_minutes
        );

        BurnStats {
            total_tokens,
            input_tokens: counts.input_tokens(),
            output_tokens: counts.output_tokens(),
            cache_read_tokens: counts.cache_read_tokens(),
            cache_creation_tokens: counts.cache_creation_tokens(),
            tokens_per_minute: tokens_per_minute.round() as u64,
            estimated_time_remaining: format_duration(minutes_remaining),
            minutes_remaining,
            percent_used,
            session_cost,
            model,
            limit,
            event_count: events.len(),
            session_duration_minutes: duration_minutes.round() as u64,
        }
    }

    /// Minutes until `limit` at the given rate. Negative once over the
    /// limit, infinite when nothing is being consumed.
    pub fn calculate_minutes_remaining(
        total_tokens: u64,
        limit: u64,
        tokens_per_minute: f64,
    ) -> f64 {
        if tokens_per_minute > 0.0 {
            (limit as f64 - total_tokens as f64) / tokens_per_minute
        } else {
            f64::INFINITY
        }
    }

    pub fn calculate_cost(events: &[UsageEvent], limits: &ModelLimits) -> f64 {
        let total_input: u64 = events.iter().map(|e| e.input_tokens()).sum();
        let total_output: u64 = events.iter().map(|e| e.output_tokens()).sum();

        limits.calculate_cost(total_input, total_output)
    }

    fn empty_stats() -> BurnStats {
        BurnStats {
            total_tokens: 0,
            input_tokens: 0,
            output_tokens: 0,
            cache_read_tokens: 0,
            cache_creation_tokens: 0,
            tokens_per_minute: 0,
            estimated_time_remaining: INFINITY_SYMBOL.to_string(),
            minutes_remaining: f64::INFINITY,
            percent_used: 0,
            session_cost: 0.0,
            model: "unknown".to_string(),
            limit: DEFAULT_LIMITS.five_hour_limit(),
            event_count: 0,
            session_duration_minutes: 0,
        }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
