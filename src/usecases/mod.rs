//! Application use cases. Orchestrate domain logic via ports.

pub mod normalize;
pub mod presenter;
pub mod recon_service;

pub use presenter::{OutputSinks, ReportPresenter};
pub use recon_service::ReconService;
