//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ApiResponse, DomainError};
use std::path::Path;

/// Bot API gateway. One call per logical operation; the token is bound by the adapter.
#[async_trait::async_trait]
pub trait BotApiPort: Send + Sync {
    /// Invoke `method` with query `params` and return the decoded envelope.
    ///
    /// Provider-side failures come back as `Ok` envelopes with `ok == false`.
    /// `Err` is reserved for transport and decoding failures.
    async fn call(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse, DomainError>;
}

/// Report store port. Persist the rendered JSON report.
#[async_trait::async_trait]
pub trait ReportStorePort: Send + Sync {
    /// Write `payload` to `path`, followed by a trailing newline.
    async fn save(&self, path: &Path, payload: &str) -> Result<(), DomainError>;
}

/// Progress feedback while the recon run is collecting.
pub trait ProgressPort: Send + Sync {
    /// A Bot API call is about to be made.
    fn on_call(&self, method: &str);

    /// Collection is over; clear any transient output before presentation.
    fn on_finish(&self);
}
