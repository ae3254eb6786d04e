// Decision trace for offline analysis
//
// Appends one JSON object per decision to a JSONL file. The handle is cheap to
// clone so every agent of a team can share one file.

use log::{error, info};
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Arc;

use crate::adversarial::SearchStats;
use crate::config::DebugConfig;

/// A single decision log entry
#[derive(Debug, Serialize)]
struct DecisionLogEntry<'a> {
    agent: usize,
    policy: &'a str,
    chosen_move: &'a str,
    value: Option<f64>,
    stats: Option<SearchStats>,
    timestamp: String,
}

/// Shared JSONL decision log; a disabled log drops every entry
#[derive(Clone)]
pub struct DecisionLog {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DecisionLog {
    /// Creates a decision log
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DecisionLog::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                info!("Decision logging enabled: {}", log_file_path);
                DecisionLog {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create decision log '{}': {}", log_file_path, e);
                DecisionLog::disabled()
            }
        }
    }

    /// Creates the log described by the `[debug]` config section
    pub fn from_config(config: &DebugConfig) -> Self {
        DecisionLog::new(config.enabled, &config.log_file_path)
    }

    pub fn disabled() -> Self {
        DecisionLog {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Records one decision; write failures are logged and swallowed
    pub fn record(
        &self,
        agent: usize,
        policy: &str,
        chosen_move: &str,
        value: Option<f64>,
        stats: Option<SearchStats>,
    ) {
        if !self.enabled {
            return;
        }

        let mut guard = self.file.lock();
        let file = match guard.as_mut() {
            Some(file) => file,
            None => return,
        };

        let entry = DecisionLogEntry {
            agent,
            policy,
            chosen_move,
            value: value.filter(|v| v.is_finite()),
            stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                if let Err(e) = writeln!(file, "{}", json_line) {
                    error!("Failed to write decision log entry: {}", e);
                } else if let Err(e) = file.flush() {
                    error!("Failed to flush decision log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize decision log entry: {}", e);
            }
        }
    }
}

impl std::fmt::Debug for DecisionLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionLog")
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Default for DecisionLog {
    fn default() -> Self {
        DecisionLog::disabled()
    }
}
