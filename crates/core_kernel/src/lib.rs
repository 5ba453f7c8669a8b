//! Core Kernel - Foundational types for the clinic front desk
//!
//! This crate provides the building blocks shared by the accounting and
//! patient domains:
//! - Yen amounts and decimal rates with exact floor arithmetic
//! - The clinic's local time zone and date formatting
//! - Strongly typed identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Yen, Rate, MoneyError};
pub use temporal::Timezone;
pub use identifiers::{
    SettlementId, LineItemId, MedicalRecordId, PetId, OwnerId,
};
pub use error::CoreError;
