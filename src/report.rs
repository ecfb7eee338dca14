//! Decode-run reporting.
//!
//! The decoding core is silent: malformed records are dropped with no
//! diagnostic. This module is the separate, non-core channel the
//! pipeline uses to surface what happened during a run - how many records
//! decoded, how many were dropped - without threading any of it through
//! state.
//!
//! Entries go to stderr and to a broadcast channel embedders can subscribe
//! to. Decoders, the reducer, and selectors never log here.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Severity of a report entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single report entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Error,
            message: message.into(),
        }
    }
}

/// Global report broadcaster.
pub static REPORTER: Lazy<Reporter> = Lazy::new(Reporter::new);

/// Fans report entries out to all subscribers.
pub struct Reporter {
    sender: broadcast::Sender<LogEntry>,
}

impl Reporter {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Emit an entry to stderr and every subscriber.
    pub fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   !",
            LogLevel::Error => "   x",
        };
        eprintln!("{} {}", prefix, entry.message);

        // Subscribers are optional; a send into the void is fine.
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for this process's report stream.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient report functions
pub fn log_info(msg: impl Into<String>) {
    REPORTER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    REPORTER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    REPORTER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    REPORTER.log(LogEntry::error(msg));
}
