//! Command error handling

use thiserror::Error;

use domain_accounting::AccountingError;

/// Errors surfaced by register commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Accounting error: {0}")]
    Accounting(#[from] AccountingError),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
