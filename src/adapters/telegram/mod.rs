//! Telegram Bot API adapters. Implement BotApiPort.

pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::{DEFAULT_API_BASE, HttpBotApi};
#[cfg(test)]
pub use mock::{RecordedCall, ScriptedBotApi};
