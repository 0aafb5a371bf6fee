//! Persistence adapters. Implement ReportStorePort.

pub mod json_file;

pub use json_file::JsonFileStore;
