//! Implements ProgressPort. Spinner on stderr naming the Bot API method in flight.

use crate::ports::ProgressPort;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// indicatif spinner. Hidden automatically when stderr is not a terminal.
pub struct SpinnerProgress {
    bar: ProgressBar,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.magenta} {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressPort for SpinnerProgress {
    fn on_call(&self, method: &str) {
        self.bar.set_message(format!("querying {method}"));
    }

    fn on_finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// No feedback (JSON-only output, tests).
#[derive(Debug, Default)]
pub struct SilentProgress;

impl ProgressPort for SilentProgress {
    fn on_call(&self, _method: &str) {}

    fn on_finish(&self) {}
}
