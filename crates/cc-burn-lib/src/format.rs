//! Human-readable rendering of durations and token counts.

pub const INFINITY_SYMBOL: &str = "∞";

/// Renders a minute count as `45m`, `1h 30m` or `1d 1h`.
///
/// Non-finite and negative inputs render as `∞`, anything under a minute as
/// `< 1m`. Hours are floored and only the leftover minutes are rounded, so
/// 59.6 renders as `60m`.
pub fn format_duration(minutes: f64) -> String {
    if !minutes.is_finite() || minutes < 0.0 {
        return INFINITY_SYMBOL.to_string();
    }

    if minutes < 1.0 {
        return "< 1m".to_string();
    }

    let hours = (minutes / 60.0).floor() as u64;
    let mins = (minutes % 60.0).round() as u64;

    if hours == 0 {
        return format!("{}m", mins);
    }

    if hours >= 24 {
        let days = hours / 24;
        let remaining_hours = hours % 24;
        return format!("{}d {}h", days, remaining_hours);
    }

    format!("{}h {}m", hours, mins)
}

pub fn format_token_count(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}K", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}
