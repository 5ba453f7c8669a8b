//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! front desk test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built roster, item and date data
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Calculation invariant checks
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
