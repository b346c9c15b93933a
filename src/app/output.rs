//! Progress output sinks
//!
//! The batch workflows report human-readable progress through an
//! [`OutputSink`]. [`ConsoleOutput`] forwards text to stdout as it arrives,
//! [`CaptureOutput`] keeps it in memory so it can be inspected afterwards.

use std::io::{self, Write};
use std::sync::Mutex;

/// Receiver of progress text
pub trait OutputSink: Send + Sync {
    /// Emit one piece of progress text, exactly as given
    fn render(&self, text: &str);
}

/// Pass-through sink writing to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleOutput;

impl OutputSink for ConsoleOutput {
    fn render(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
            tracing::warn!("Failed to write progress output: {}", e);
        }
    }
}

/// Sink that records every rendered text in order
#[derive(Debug, Default)]
pub struct CaptureOutput {
    lines: Mutex<Vec<String>>,
}

impl CaptureOutput {
    /// Create an empty capture sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything rendered so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Concatenation of everything rendered so far
    pub fn text(&self) -> String {
        self.lines().concat()
    }
}

impl OutputSink for CaptureOutput {
    fn render(&self, text: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(text.to_string()),
            Err(poisoned) => poisoned.into_inner().push(text.to_string()),
        }
    }
}
