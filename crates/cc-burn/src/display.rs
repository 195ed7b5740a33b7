use anyhow::{Context, Result};
use cc_burn_monitor::{format_token_count, BurnStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Normal,
    Warning,
    Critical,
}

impl AlertLevel {
    pub fn from_percent(percent_used: u64) -> Self {
        if percent_used >= 95 {
            AlertLevel::Critical
        } else if percent_used >= 80 {
            AlertLevel::Warning
        } else {
            AlertLevel::Normal
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            AlertLevel::Normal => "",
            AlertLevel::Warning => "!",
            AlertLevel::Critical => "!!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Full,
    StatusBar,
    Compact,
    Json,
}

pub fn progress_bar(percent: u64, width: usize) -> String {
    let filled = ((percent as f64 / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn render(stats: &BurnStats, format: OutputFormat, window_hours: f64) -> Result<String> {
    match format {
        OutputFormat::Full => Ok(format_stats(stats, window_hours)),
        OutputFormat::StatusBar => Ok(format_status_bar(stats)),
        OutputFormat::Compact => Ok(format_compact(stats)),
        OutputFormat::Json => format_json(stats),
    }
}

pub fn format_stats(stats: &BurnStats, window_hours: f64) -> String {
    let mut lines = vec![
        String::new(),
        format!("  Token Usage Report (last {}h)", window_hours),
        "  ════════════════════════════════════".to_string(),
        String::new(),
        format!(
            "  {} {}%",
            progress_bar(stats.percent_used(), 20),
            stats.percent_used()
        ),
        String::new(),
        format!(
            "  Tokens used:     {} / {}",
            format_token_count(stats.total_tokens()),
            format_token_count(stats.limit())
        ),
        format!(
            "  Burn rate:       {}/min",
            format_token_count(stats.tokens_per_minute())
        ),
        format!("  Time remaining:  ~{}", stats.estimated_time_remaining()),
        format!("  Session cost:    ${:.2}", stats.session_cost()),
        String::new(),
        "  Breakdown:".to_string(),
        format!("    Input:         {}", format_token_count(stats.input_tokens())),
        format!("    Output:        {}", format_token_count(stats.output_tokens())),
        format!(
            "    Cache read:    {}",
            format_token_count(stats.cache_read_tokens())
        ),
        format!(
            "    Cache create:  {}",
            format_token_count(stats.cache_creation_tokens())
        ),
        String::new(),
        format!("  Model: {}", stats.model()),
        format!(
            "  Events: {} | Duration: {}m",
            stats.event_count(),
            stats.session_duration_minutes()
        ),
        String::new(),
    ];

    match AlertLevel::from_percent(stats.percent_used()) {
        AlertLevel::Critical => {
            lines.push("  !! CRITICAL: Above 95% of limit !!".to_string());
            lines.push("  Consider compacting context or taking a break.".to_string());
            lines.push(String::new());
        }
        AlertLevel::Warning => {
            lines.push("  ! WARNING: Above 80% of limit".to_string());
            lines.push(format!(
                "  At current rate, you'll hit limit in ~{}",
                stats.estimated_time_remaining()
            ));
            lines.push(String::new());
        }
        AlertLevel::Normal => {}
    }

    lines.join("\n")
}

pub fn format_status_bar(stats: &BurnStats) -> String {
    format!(
        "{}{} ({}%) ~{}",
        AlertLevel::from_percent(stats.percent_used()).prefix(),
        format_token_count(stats.total_tokens()),
        stats.percent_used(),
        stats.estimated_time_remaining()
    )
}

pub fn format_compact(stats: &BurnStats) -> String {
    format!(
        "{}/{} ({}%) | {}/min | ~{} remaining | ${:.2}",
        format_token_count(stats.total_tokens()),
        format_token_count(stats.limit()),
        stats.percent_used(),
        format_token_count(stats.tokens_per_minute()),
        stats.estimated_time_remaining(),
        stats.session_cost()
    )
}

pub fn format_json(stats: &BurnStats) -> Result<String> {
    serde_json::to_string_pretty(stats).context("Failed to serialise stats")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_burn_monitor::{Calculator, UsageEvent};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 17, 0, 0).unwrap()
    }

    fn stats_with(model: &str, input: u64, output: u64) -> BurnStats {
        let events = vec![
            UsageEvent::new(
                now() - Duration::minutes(90),
                model.to_string(),
                "s".to_string(),
                input / 2,
                output / 2,
                0,
                0,
            ),
            UsageEvent::new(
                now() - Duration::minutes(30),
                model.to_string(),
                "s".to_string(),
                input - input / 2,
                output - output / 2,
                0,
                0,
            ),
        ];
        Calculator::new().calculate_burn_stats(&events, 5.0, now())
    }

    #[test]
    fn test_alert_levels() {
        assert_eq!(AlertLevel::from_percent(0), AlertLevel::Normal);
        assert_eq!(AlertLevel::from_percent(79), AlertLevel::Normal);
        assert_eq!(AlertLevel::from_percent(80), AlertLevel::Warning);
        assert_eq!(AlertLevel::from_percent(94), AlertLevel::Warning);
        assert_eq!(AlertLevel::from_percent(95), AlertLevel::Critical);
        assert_eq!(AlertLevel::from_percent(140), AlertLevel::Critical);
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "░░░░░░░░░░");
        assert_eq!(progress_bar(50, 10), "█████░░░░░");
        assert_eq!(progress_bar(250, 10), "██████████");
    }

    #[test]
    fn test_status_bar_empty() {
        let stats = Calculator::new().calculate_burn_stats(&[], 5.0, now());
        assert_eq!(format_status_bar(&stats), "0 (0%) ~∞");
    }

    #[test]
    fn test_status_bar_critical_prefix() {
        // 43.2M of 45M
        let stats = stats_with("claude-sonnet-4", 40_000_000, 3_200_000);
        assert_eq!(stats.percent_used(), 96);
        assert!(format_status_bar(&stats).starts_with("!!43.2M (96%) ~"));
    }

    #[test]
    fn test_compact_line() {
        // 60k tokens over 60 minutes on opus
        let stats = stats_with("claude-opus-4", 40_000, 20_000);
        assert_eq!(
            format_compact(&stats),
            "60.0K/15.0M (0%) | 1.0K/min | ~10d 9h remaining | $2.10"
        );
    }

    #[test]
    fn test_full_report_warning_block() {
        let stats = stats_with("claude-sonnet-4", 30_000_000, 7_000_000);
        assert_eq!(stats.percent_used(), 82);

        let report = format_stats(&stats, 5.0);
        assert!(report.contains("Token Usage Report (last 5h)"));
        assert!(report.contains("Tokens used:     37.0M / 45.0M"));
        assert!(report.contains("! WARNING: Above 80% of limit"));
        assert!(!report.contains("CRITICAL"));
    }

    #[test]
    fn test_full_report_normal_has_no_alert() {
        let stats = stats_with("claude-sonnet-4", 1_000, 1_000);
        let report = format_stats(&stats, 24.0);

        assert!(report.contains("(last 24h)"));
        assert!(report.contains("Events: 2 | Duration: 60m"));
        assert!(!report.contains("WARNING"));
    }

    #[test]
    fn test_json_output() {
        let stats = stats_with("claude-sonnet-4", 1_000, 1_000);
        let json: serde_json::Value = serde_json::from_str(&format_json(&stats).unwrap()).unwrap();

        assert_eq!(json["totalTokens"], 2_000);
        assert_eq!(json["eventCount"], 2);
        assert_eq!(json["sessionDurationMinutes"], 60);
    }
}
