use anyhow::Result;
use cc_burn_monitor::prelude::*;
use clap::{ArgAction, Parser};
use std::path::Path;
use std::process::ExitCode;

mod config;
mod display;

use config::{load_config, resolve_data_path, BurnConfig};
use display::{render, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "cc-burn",
    version,
    about = "cc-burn - Token usage tracking for Claude Code",
    disable_help_flag = true,
    after_help = "Examples:\n  cc-burn                    Show full stats report\n  cc-burn --statusbar        Show status bar format\n  cc-burn --hours 24         Show stats for last 24 hours"
)]
struct Args {
    /// Output compact status bar format
    #[arg(short = 's', long = "statusbar")]
    statusbar: bool,

    /// Output single-line compact format
    #[arg(short = 'c', long = "compact")]
    compact: bool,

    /// Output raw JSON stats
    #[arg(short = 'j', long = "json")]
    json: bool,

    /// Time window in hours (default: 5)
    #[arg(
        short = 'h',
        long = "hours",
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "5"
    )]
    hours: Option<String>,

    /// Log directory or single .jsonl file (default: ~/.claude/projects)
    #[arg(short = 'd', long = "data-dir")]
    data_dir: Option<String>,

    /// Verbose logging to stderr (RUST_LOG overrides)
    #[arg(short = 'v')]
    verbose: bool,

    /// Show this help message
    #[arg(long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

impl Args {
    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.compact {
            OutputFormat::Compact
        } else if self.statusbar {
            OutputFormat::StatusBar
        } else {
            OutputFormat::Full
        }
    }

    fn window_hours(&self, config: &BurnConfig) -> f64 {
        match self.hours.as_deref() {
            Some(raw) => parse_hours(raw).unwrap_or_else(|| {
                log::warn!("Ignoring invalid --hours value {:?}", raw);
                DEFAULT_WINDOW_HOURS
            }),
            None => config
                .hours
                .filter(|h| h.is_finite() && *h > 0.0)
                .unwrap_or(DEFAULT_WINDOW_HOURS),
        }
    }
}

fn parse_hours(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|h| h.is_finite() && *h > 0.0)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn load_events(monitor: &mut UsageMonitor, data_path: &Path) -> Result<()> {
    if data_path.is_file() {
        log::debug!("Loading single log file {}", data_path.display());
        monitor.load_data(data_path)
    } else {
        log::debug!("Loading logs under {}", data_path.display());
        monitor.load_directory(data_path)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let window_hours = args.window_hours(&config);
    let data_path = resolve_data_path(args.data_dir.as_deref(), &config);

    let mut monitor = UsageMonitor::new();
    if let Err(e) = load_events(&mut monitor, &data_path) {
        eprintln!("Error reading Claude logs: {:#}", e);
        return ExitCode::FAILURE;
    }

    let stats = monitor.current_burn_stats(window_hours);

    match render(&stats, args.output_format(), window_hours) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("24"), Some(24.0));
        assert_eq!(parse_hours("1.5"), Some(1.5));
        assert_eq!(parse_hours("abc"), None);
        assert_eq!(parse_hours("0"), None);
        assert_eq!(parse_hours("-3"), None);
        assert_eq!(parse_hours("inf"), None);
    }

    #[test]
    fn test_hours_flag_falls_back_to_default() {
        let args = Args::try_parse_from(["cc-burn", "--hours", "lots"]).unwrap();
        let config = BurnConfig {
            hours: Some(12.0),
            data_dir: None,
        };
        assert_eq!(args.window_hours(&config), DEFAULT_WINDOW_HOURS);
    }

    #[test]
    fn test_short_h_is_hours() {
        let args = Args::try_parse_from(["cc-burn", "-h", "24"]).unwrap();
        assert_eq!(args.window_hours(&BurnConfig::default()), 24.0);
    }

    #[test]
    fn test_hours_does_not_swallow_next_flag() {
        let args = Args::try_parse_from(["cc-burn", "--hours", "-s"]).unwrap();
        assert_eq!(args.window_hours(&BurnConfig::default()), DEFAULT_WINDOW_HOURS);
        assert_eq!(args.output_format(), OutputFormat::StatusBar);
    }

    #[test]
    fn test_bare_hours_uses_default() {
        let args = Args::try_parse_from(["cc-burn", "-s", "--hours"]).unwrap();
        let config = BurnConfig {
            hours: Some(12.0),
            data_dir: None,
        };
        assert_eq!(args.window_hours(&config), DEFAULT_WINDOW_HOURS);
        assert_eq!(args.output_format(), OutputFormat::StatusBar);
    }

    #[test]
    fn test_huge_hours_value_accepted() {
        let args = Args::try_parse_from(["cc-burn", "--hours", "1e10"]).unwrap();
        assert_eq!(args.window_hours(&BurnConfig::default()), 1e10);
    }

    #[test]
    fn test_config_hours_used_without_flag() {
        let args = Args::try_parse_from(["cc-burn"]).unwrap();
        let config = BurnConfig {
            hours: Some(12.0),
            data_dir: None,
        };
        assert_eq!(args.window_hours(&config), 12.0);
        assert_eq!(args.window_hours(&BurnConfig::default()), 5.0);
    }

    #[test]
    fn test_output_format_flags() {
        let parse = |argv: &[&str]| Args::try_parse_from(argv).unwrap().output_format();

        assert_eq!(parse(&["cc-burn"]), OutputFormat::Full);
        assert_eq!(parse(&["cc-burn", "-s"]), OutputFormat::StatusBar);
        assert_eq!(parse(&["cc-burn", "--compact"]), OutputFormat::Compact);
        assert_eq!(parse(&["cc-burn", "-s", "-j"]), OutputFormat::Json);
    }

    #[test]
    fn test_help_flag_exits_cleanly() {
        let err = Args::try_parse_from(["cc-burn", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
