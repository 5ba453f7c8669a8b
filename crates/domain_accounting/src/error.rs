//! Accounting domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{CoreError, Yen};

/// Errors that can occur in the accounting domain
#[derive(Debug, Error)]
pub enum AccountingError {
    /// Line item failed validation
    #[error("Invalid line item: {0}")]
    InvalidItem(String),

    /// Tax rate outside the configured set
    #[error("Unsupported tax rate: {0}")]
    UnsupportedTaxRate(Decimal),

    /// Insurance ratio outside the offered set
    #[error("Unsupported insurance ratio: {0}")]
    UnsupportedInsuranceRatio(String),

    /// Line item not found
    #[error("Line item not found: {0}")]
    ItemNotFound(String),

    /// Line item came from a medical record and cannot be removed at the register
    #[error("Line item is derived from a medical record and cannot be removed: {0}")]
    ItemNotRemovable(String),

    /// Settlement has a payment snapshot and can no longer change
    #[error("Settlement is frozen: {0}")]
    SettlementFrozen(String),

    /// Status change not allowed
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// Settlement was already completed
    #[error("Settlement already completed: {0}")]
    AlreadyCompleted(String),

    /// No received amount was entered
    #[error("Received amount has not been entered")]
    PaymentNotEntered,

    /// Received amount does not cover the billing amount
    #[error("Insufficient payment: billing={billing}, received={received}")]
    InsufficientPayment { billing: Yen, received: Yen },

    /// Stored settlement whose status, payment and timestamps disagree
    #[error("Inconsistent settlement: {0}")]
    InconsistentSettlement(String),

    /// Document requested for a settlement that has no payment yet
    #[error("Settlement not completed: {0}")]
    NotCompleted(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AccountingError {
    /// Creates an InvalidItem error with a message
    pub fn invalid_item(message: impl Into<String>) -> Self {
        AccountingError::InvalidItem(message.into())
    }
}
