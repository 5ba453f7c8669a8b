//! Accounting Domain
//!
//! This crate implements the register side of a visit: assembling the bill,
//! reconciling it against insurance and the customer's payment, and
//! freezing the result once the payment is confirmed.
//!
//! # Settlement Lifecycle
//!
//! ```text
//! Waiting <-> Pending -> Completed
//!        \         \
//!         +---------+--> Canceled
//! ```
//!
//! # Examples
//!
//! ```rust
//! use core_kernel::Yen;
//! use domain_accounting::{ItemCategory, LineItem, SettlementCalculator, SettlementInput};
//!
//! let items = vec![
//!     LineItem::new(ItemCategory::Examination, "診察料", Yen::new(800)),
//!     LineItem::new(ItemCategory::Test, "血液検査", Yen::new(2000)),
//! ];
//!
//! let calc = SettlementCalculator::calculate(&SettlementInput::new(&items));
//! assert_eq!(calc.billing_amount, Yen::new(3080));
//! ```

pub mod item;
pub mod catalog;
pub mod calculator;
pub mod settlement;
pub mod document;
pub mod error;

pub use item::{ItemCategory, ItemSource, LineItem, TaxRate};
pub use catalog::ManualItemForm;
pub use calculator::{
    Calculation, InsuranceConfig, InsuranceRatio, SettlementCalculator, SettlementInput,
    TaxBreakdown, TaxBucket,
};
pub use settlement::{PaymentInfo, PaymentMethod, PaymentRequest, Settlement, SettlementStatus};
pub use document::{AccountingDocument, DocumentKind, DocumentLine};
pub use error::AccountingError;
