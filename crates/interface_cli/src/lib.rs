//! Front Desk Register
//!
//! Command line surface over the accounting and patient domains.
//!
//! # Architecture
//!
//! - **Config**: `REGISTER_*` environment settings
//! - **DTOs**: JSON request and response shapes
//! - **Commands**: settle, match-pet and search, as pure functions
//! - **Telemetry**: tracing subscriber setup for the binary

pub mod config;
pub mod error;
pub mod dto;
pub mod commands;
pub mod telemetry;

pub use commands::{match_pet, parse_json, search_roster, settle, SettleMode};
pub use config::RegisterConfig;
pub use error::CliError;
