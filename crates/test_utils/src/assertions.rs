//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for accounting types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Yen;
use domain_accounting::{Calculation, LineItem, PaymentInfo};

/// Asserts the reconciliation identities every calculation must satisfy
///
/// # Panics
///
/// Panics naming the first identity that does not hold
pub fn assert_calculation_consistent(calc: &Calculation) {
    assert_eq!(
        calc.total_amount,
        calc.subtotal + calc.tax_total,
        "total_amount must equal subtotal + tax_total: {:?}",
        calc
    );
    assert_eq!(
        calc.billing_amount,
        calc.total_amount + calc.insurance_amount,
        "billing_amount must equal total_amount + insurance_amount: {:?}",
        calc
    );
    assert!(
        !calc.insurance_amount.is_positive(),
        "insurance_amount must never be positive, got {}",
        calc.insurance_amount
    );
    assert!(
        !calc.change_amount.is_negative(),
        "change_amount must never be negative, got {}",
        calc.change_amount
    );
}

/// Asserts that the calculation's subtotal matches the items
pub fn assert_subtotal_matches(calc: &Calculation, items: &[LineItem]) {
    let expected: Yen = items.iter().map(LineItem::amount).sum();
    assert_eq!(
        calc.subtotal, expected,
        "subtotal {} does not match the {} items ({})",
        calc.subtotal,
        items.len(),
        expected
    );
}

/// Asserts that a payment snapshot agrees with a calculation
pub fn assert_snapshot_matches(payment: &PaymentInfo, calc: &Calculation) {
    assert_eq!(payment.subtotal, calc.subtotal, "snapshot subtotal");
    assert_eq!(payment.tax_total, calc.tax_total, "snapshot tax_total");
    assert_eq!(payment.total_amount, calc.total_amount, "snapshot total_amount");
    assert_eq!(payment.insurance_amount, calc.insurance_amount, "snapshot insurance_amount");
    assert_eq!(payment.billing_amount, calc.billing_amount, "snapshot billing_amount");
    assert_eq!(payment.received_amount, calc.received, "snapshot received_amount");
    assert_eq!(payment.change_amount, calc.change_amount, "snapshot change_amount");
    assert_eq!(payment.discount_amount, Yen::ZERO, "snapshot discount_amount");
}
