//! tosint: Telegram bot token reconnaissance with Hexagonal Architecture.

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
