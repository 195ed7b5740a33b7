use crate::calculator::Calculator;
use crate::data_structures::{BurnStats, UsageEvent};
use crate::loader::DataLoader;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Loaded usage history plus the machinery to summarise it.
pub struct UsageMonitor {
    usage_events: Vec<UsageEvent>,
    calculator: Calculator,
    loader: DataLoader,
}

impl UsageMonitor {
    pub fn new() -> Self {
        Self {
            usage_events: Vec::new(),
            calculator: Calculator::new(),
            loader: DataLoader::new(),
        }
    }

    pub fn load_data<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut events = self.loader.load_from_file(path)?;
        events.sort_by_key(|e| e.timestamp());
        self.usage_events = events;
        Ok(())
    }

    pub fn load_directory<P: AsRef<Path>>(&mut self, dir_path: P) -> Result<()> {
        self.usage_events = self.loader.load_from_directory(dir_path)?;
        Ok(())
    }

    pub fn add_event(&mut self, event: UsageEvent) {
        let idx = self
            .usage_events
            .partition_point(|e| e.timestamp() <= event.timestamp());
        self.usage_events.insert(idx, event);
    }

    pub fn events(&self) -> &[UsageEvent] {
        &self.usage_events
    }

    pub fn is_empty(&self) -> bool {
        self.usage_events.is_empty()
    }

    pub fn burn_stats(&self, window_hours: f64, now: DateTime<Utc>) -> BurnStats {
        self.calculator
            .calculate_burn_stats(&self.usage_events, window_hours, now)
    }

    pub fn current_burn_stats(&self, window_hours: f64) -> BurnStats {
        self.burn_stats(window_hours, Utc::now())
    }
}

impl Default for UsageMonitor {
    fn default() -> Self {
        Self::new()
    }
}
