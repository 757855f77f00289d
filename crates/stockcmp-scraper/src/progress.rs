//! Human-readable progress reporting for long scrape runs.

use std::sync::Mutex;

/// Receives one line per notable step of a warehouse run.
pub trait ProgressSink: Send + Sync {
    fn log(&self, message: &str);
}

/// Forwards progress lines to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn log(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Keeps every line in memory, for inspecting a run after the fact.
#[derive(Debug, Default)]
pub struct CollectingProgress {
    lines: Mutex<Vec<String>>,
}

impl CollectingProgress {
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl ProgressSink for CollectingProgress {
    fn log(&self, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(message.to_owned());
        }
    }
}
