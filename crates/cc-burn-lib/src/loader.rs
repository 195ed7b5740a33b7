use crate::data_structures::UsageEvent;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct DataLoader;

impl DataLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<UsageEvent>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;

        let reader = BufReader::new(file);
        let mut events = Vec::new();
        let mut skipped = 0usize;

        for (line_num, line) in reader.split(b'\n').enumerate() {
            let line = line.with_context(|| {
                format!(
                    "Failed to read line {} of {}",
                    line_num + 1,
                    path.as_ref().display()
                )
            })?;

            // Undecodable lines are malformed records, not read failures.
            let Ok(line) = std::str::from_utf8(&line) else {
                skipped += 1;
                continue;
            };

            if line.trim().is_empty() {
                continue;
            }

            match self.parse_line(line) {
                Ok(event) => events.push(event),
                // Lines without assistant usage are normal; just count them.
                Err(_) => skipped += 1,
            }
        }

        log::debug!(
            "{}: {} usage events, {} other lines",
            path.as_ref().display(),
            events.len(),
            skipped
        );

        Ok(events)
    }

    /// Loads every `*.jsonl` file below `dir_path`, sorted by timestamp.
    ///
    /// A missing directory is treated as "no logs yet" and yields nothing.
    pub fn load_from_directory<P: AsRef<Path>>(&self, dir_path: P) -> Result<Vec<UsageEvent>> {
        let dir_path = dir_path.as_ref();
        if !dir_path.exists() {
            log::warn!("Log directory {} does not exist", dir_path.display());
            return Ok(Vec::new());
        }

        let mut all_events = Vec::new();
        self.load_from_directory_recursive(dir_path, &mut all_events)?;
        all_events.sort_by_key(|e| e.timestamp());
        Ok(all_events)
    }

    fn load_from_directory_recursive(
        &self,
        dir_path: &Path,
        events: &mut Vec<UsageEvent>,
    ) -> Result<()> {
        let dir = std::fs::read_dir(dir_path)
            .with_context(|| format!("Failed to read directory: {}", dir_path.display()))?;

        for entry in dir {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if path.extension().is_some_and(|ext| ext == "jsonl") {
                    let mut file_events = self.load_from_file(&path)?;
                    events.append(&mut file_events);
                }
            } else if path.is_dir() {
                // Project directories
                self.load_from_directory_recursive(&path, events)?;
            }
        }

        Ok(())
    }

    fn parse_line(&self, line: &str) -> Result<UsageEvent> {
        let json: Value = serde_json::from_str(line).context("Failed to parse JSON")?;

        if json.get("type").and_then(|v| v.as_str()) != Some("assistant") {
            return Err(anyhow::anyhow!("Not an assistant message"));
        }

        let message = json
            .get("message")
            .ok_or_else(|| anyhow::anyhow!("Missing 'message' field"))?;
        let usage = message
            .get("usage")
            .filter(|u| u.is_object())
            .ok_or_else(|| anyhow::anyhow!("No usage data found in this entry"))?;

        let timestamp = self.parse_timestamp(&json)?;
        let model = message
            .get("model")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown")
            .to_string();
        let session_id = json
            .get("sessionId")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(UsageEvent::new(
            timestamp,
            model,
            session_id,
            self.extract_u64(usage, "input_tokens"),
            self.extract_u64(usage, "output_tokens"),
            self.extract_u64(usage, "cache_creation_input_tokens"),
            self.extract_u64(usage, "cache_read_input_tokens"),
        ))
    }

    fn parse_timestamp(&self, json: &Value) -> Result<DateTime<Utc>> {
        let timestamp_str = json
            .get("timestamp")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Missing or invalid 'timestamp' field"))?;

        DateTime::parse_from_rfc3339(timestamp_str)
            .context("Failed to parse timestamp")
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn extract_u64(&self, json: &Value, key: &str) -> u64 {
        json.get(key).and_then(|v| v.as_u64()).unwrap_or(0)
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Start of the window ending at `now`. A window reaching past the
/// representable range starts at `MIN_UTC`.
pub fn window_cutoff(hours: f64, now: DateTime<Utc>) -> DateTime<Utc> {
    Duration::try_milliseconds((hours * 3_600_000.0) as i64)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Events whose timestamp is strictly after `now - hours`.
pub fn recent_events(events: &[UsageEvent], hours: f64, now: DateTime<Utc>) -> Vec<UsageEvent> {
    let cutoff = window_cutoff(hours, now);
    events
        .iter()
        .filter(|e| e.timestamp() > cutoff)
        .cloned()
        .collect()
}
