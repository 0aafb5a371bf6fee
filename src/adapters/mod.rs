//! Infrastructure adapters. Implement ports.
//!
//! Bot API transport, filesystem, terminal UI. Map errors to DomainError.

pub mod persistence;
pub mod telegram;
pub mod ui;
