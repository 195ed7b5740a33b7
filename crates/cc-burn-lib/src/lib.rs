pub mod calculator;
pub mod data_structures;
pub mod format;
pub mod limits;
pub mod loader;
pub mod monitor;

pub use calculator::{Calculator, DEFAULT_WINDOW_HOURS};
pub use data_structures::{BurnStats, ModelLimits, TokenCounts, UsageEvent};
pub use format::{format_duration, format_token_count};
pub use limits::{LimitRegistry, MatchStrategy};
pub use loader::{recent_events, DataLoader};
pub use monitor::UsageMonitor;

pub use anyhow::Result;
pub use chrono::{DateTime, Duration, Utc};

pub mod prelude {
    pub use crate::calculator::DEFAULT_WINDOW_HOURS;
    pub use crate::data_structures::{BurnStats, UsageEvent};
    pub use crate::format::{format_duration, format_token_count};
    pub use crate::monitor::UsageMonitor;
    pub use anyhow::Result;
    pub use chrono::{DateTime, Utc};
}
