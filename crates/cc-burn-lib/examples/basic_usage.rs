use cc_burn_monitor::prelude::*;
use cc_burn_monitor::LimitRegistry;
use std::env;

fn main() -> Result<()> {
    let mut monitor = UsageMonitor::new();

    let args: Vec<String> = env::args().collect();

    // Check if a specific file path was provided
    if args.len() >= 2 {
        let file_path = &args[1];
        println!("Loading usage data from: {}", file_path);
        monitor.load_data(file_path)?;
    } else {
        let claude_path = shellexpand::tilde("~/.claude/projects");
        println!("Loading usage data from: {}", claude_path);
        monitor.load_directory(claude_path.as_ref())?;
    }

    println!("Loaded {} usage events", monitor.events().len());
    println!();

    let now = Utc::now();
    for hours in [1.0, DEFAULT_WINDOW_HOURS, 24.0] {
        let stats = monitor.burn_stats(hours, now);
        println!("=== Last {}h ===", hours);
        println!(
            "  Tokens:     {} / {} ({}%)",
            format_token_count(stats.total_tokens()),
            format_token_count(stats.limit()),
            stats.percent_used()
        );
        println!("  Burn rate:  {}/min", format_token_count(stats.tokens_per_minute()));
        println!("  Remaining:  ~{}", stats.estimated_time_remaining());
        println!("  Cost:       ${:.4}", stats.session_cost());
        println!("  Model:      {}", stats.model());
        println!(
            "  Events:     {} over {}",
            stats.event_count(),
            format_duration(stats.session_duration_minutes() as f64)
        );
        println!();
    }

    let registry = LimitRegistry::new();
    println!("=== Known models ===");
    for model in registry.supported_models() {
        let limits = registry.resolve(model);
        println!(
            "  {:<28} 5h: {:>6}  week: {:>6}  ${}/${} per 1M",
            model,
            format_token_count(limits.five_hour_limit()),
            format_token_count(limits.weekly_limit()),
            limits.input_cost_per_million(),
            limits.output_cost_per_million()
        );
    }

    Ok(())
}
