//! Report presentation: text, JSON to stdout, JSON to file.
//!
//! Text is written first, then the JSON payload. A failed file save is
//! reported and never turns into a process failure.

use crate::adapters::ui::render_text;
use crate::domain::{DomainError, Report};
use crate::ports::ReportStorePort;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Which renderings a run produces. Text mode is on whenever stdout JSON is off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSinks {
    pub text: bool,
    pub json_stdout: bool,
    pub json_file: Option<PathBuf>,
}

impl OutputSinks {
    pub fn new(json_stdout: bool, json_file: Option<PathBuf>) -> Self {
        Self {
            text: !json_stdout,
            json_stdout,
            json_file,
        }
    }

    pub fn wants_json(&self) -> bool {
        self.json_stdout || self.json_file.is_some()
    }
}

pub struct ReportPresenter {
    sinks: OutputSinks,
    store: Arc<dyn ReportStorePort>,
}

impl ReportPresenter {
    pub fn new(sinks: OutputSinks, store: Arc<dyn ReportStorePort>) -> Self {
        Self { sinks, store }
    }

    /// Emit every configured rendering of `report` into `out`.
    pub async fn present<W: Write>(
        &self,
        report: &Report,
        out: &mut W,
    ) -> Result<(), DomainError> {
        if self.sinks.text {
            render_text(report, out)?;
        }
        if !self.sinks.wants_json() {
            return Ok(());
        }

        let payload = report
            .to_json_pretty()
            .map_err(|e| DomainError::Encode(e.to_string()))?;

        if self.sinks.json_stdout {
            writeln!(out, "{payload}")?;
        }

        if let Some(path) = &self.sinks.json_file {
            match self.store.save(path, &payload).await {
                Ok(()) => {
                    info!(path = %path.display(), "JSON report written");
                    if self.sinks.text {
                        writeln!(out, "\nJSON report saved to: {}", path.display())?;
                    }
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "JSON report not saved");
                    if self.sinks.text {
                        writeln!(
                            out,
                            "\nATTENTION Unable to save JSON report to '{}': {}",
                            path.display(),
                            e
                        )?;
                    }
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}
