//! Settlement calculation
//!
//! Turns a visit's line items plus the insurance and payment inputs into a
//! reconciled bill. The calculation is a pure function of its input: no
//! state is kept between calls, and it never fails. Payment gating is left
//! to the caller, which reads `Calculation::is_payment_sufficient`.
//!
//! # Rounding
//!
//! Consumption tax is computed and floored per line item, then summed. The
//! insurance credit is floored once on the pre-tax insurance base. Both
//! follow the itemized invoice conventions the clinic's receipts use, and
//! must not be replaced by flooring an aggregated tax.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use core_kernel::{Rate, Yen};

use crate::error::AccountingError;
use crate::item::{LineItem, TaxRate};

/// Share of the insurance-eligible spend reimbursed by the insurer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub enum InsuranceRatio {
    /// 50%
    #[default]
    Half,
    /// 70%
    Seventy,
    /// 90%
    Ninety,
    /// 100%
    Full,
}

impl InsuranceRatio {
    /// All ratios offered at the register
    pub const ALL: [InsuranceRatio; 4] = [
        InsuranceRatio::Half,
        InsuranceRatio::Seventy,
        InsuranceRatio::Ninety,
        InsuranceRatio::Full,
    ];

    /// Returns the ratio as a decimal fraction
    pub fn as_decimal(&self) -> Decimal {
        match self {
            InsuranceRatio::Half => dec!(0.5),
            InsuranceRatio::Seventy => dec!(0.7),
            InsuranceRatio::Ninety => dec!(0.9),
            InsuranceRatio::Full => dec!(1.0),
        }
    }

    /// Returns the ratio for arithmetic
    pub fn rate(&self) -> Rate {
        Rate::new(self.as_decimal())
    }
}

impl TryFrom<Decimal> for InsuranceRatio {
    type Error = AccountingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        InsuranceRatio::ALL
            .into_iter()
            .find(|ratio| ratio.as_decimal() == value)
            .ok_or_else(|| AccountingError::UnsupportedInsuranceRatio(value.to_string()))
    }
}

impl From<InsuranceRatio> for Decimal {
    fn from(ratio: InsuranceRatio) -> Decimal {
        ratio.as_decimal()
    }
}

/// Parses the register's select value (`"0.5"`, `"0.7"`, `"0.9"`, `"1.0"`)
impl FromStr for InsuranceRatio {
    type Err = AccountingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| AccountingError::UnsupportedInsuranceRatio(s.to_string()))?;
        InsuranceRatio::try_from(value)
    }
}

impl fmt::Display for InsuranceRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rate())
    }
}

/// Insurance settings for one calculation
///
/// Not stored on the settlement; the register toggles it freely until the
/// payment is confirmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceConfig {
    /// Whether insurance is settled at the counter
    pub enabled: bool,
    /// Ratio paid by the insurer
    pub ratio: InsuranceRatio,
}

impl InsuranceConfig {
    /// Insurance switched on at the given ratio
    pub fn enabled(ratio: InsuranceRatio) -> Self {
        Self { enabled: true, ratio }
    }

    /// Insurance switched off
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Credit against the customer for an insurance base; never positive
    pub fn offset(&self, insurance_base: Yen) -> Yen {
        if !self.enabled {
            return Yen::ZERO;
        }
        -self.ratio.rate().apply_floor(insurance_base).non_negative()
    }
}

/// Input to the calculator
#[derive(Debug, Clone, Copy)]
pub struct SettlementInput<'a> {
    /// Line items, in display order
    pub items: &'a [LineItem],
    /// Insurance settings
    pub insurance: InsuranceConfig,
    /// Amount handed over by the customer, if entered
    pub received: Option<Yen>,
}

impl<'a> SettlementInput<'a> {
    /// Input with insurance off and nothing received
    pub fn new(items: &'a [LineItem]) -> Self {
        Self {
            items,
            insurance: InsuranceConfig::disabled(),
            received: None,
        }
    }

    /// Sets the insurance settings
    pub fn with_insurance(mut self, insurance: InsuranceConfig) -> Self {
        self.insurance = insurance;
        self
    }

    /// Sets the received amount
    pub fn with_received(mut self, received: Yen) -> Self {
        self.received = Some(received);
        self
    }

    /// Sets the received amount from the raw payment field
    ///
    /// Unparsable text reads as zero.
    pub fn with_received_text(self, text: &str) -> Self {
        self.with_received(Yen::parse_lenient(text))
    }
}

/// Result of a settlement calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    /// Pre-tax sum of all items
    pub subtotal: Yen,
    /// Per-item floored tax, summed
    pub tax_total: Yen,
    /// Subtotal plus tax
    pub total_amount: Yen,
    /// Pre-tax sum of the insurance-eligible items
    pub insurance_base: Yen,
    /// Insurance credit, zero or negative
    pub insurance_amount: Yen,
    /// Amount owed by the customer
    pub billing_amount: Yen,
    /// Amount handed over, zero when not entered
    pub received: Yen,
    /// Change due, never negative
    pub change_amount: Yen,
}

impl Calculation {
    /// Whether the received amount covers the bill
    pub fn is_payment_sufficient(&self) -> bool {
        self.received >= self.billing_amount
    }

    /// Amount still missing, zero when the payment covers the bill
    pub fn shortfall(&self) -> Yen {
        (self.billing_amount - self.received).non_negative()
    }
}

/// Taxable base and tax for one rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBucket {
    pub rate: TaxRate,
    pub base: Yen,
    pub tax: Yen,
}

/// Tax broken out by rate, as printed on receipts and statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Items at 10%
    pub standard: TaxBucket,
    /// Items at 8%
    pub reduced: TaxBucket,
}

impl TaxBreakdown {
    /// Both buckets, standard first
    pub fn buckets(&self) -> [TaxBucket; 2] {
        [self.standard, self.reduced]
    }

    /// Buckets a document prints: the standard bucket always, the reduced
    /// one only when something was billed at it
    pub fn printed_buckets(&self) -> Vec<TaxBucket> {
        self.buckets()
            .into_iter()
            .filter(|b| b.rate == TaxRate::Standard || b.base.is_positive())
            .collect()
    }

    /// Sum of the bucket taxes; equals the calculation's `tax_total`
    pub fn total_tax(&self) -> Yen {
        self.standard.tax + self.reduced.tax
    }
}

/// Stateless settlement calculator
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Calculates the bill for the given input
    ///
    /// Order-independent over `items` and idempotent.
    pub fn calculate(input: &SettlementInput<'_>) -> Calculation {
        let mut subtotal = Yen::ZERO;
        let mut tax_total = Yen::ZERO;
        let mut insurance_base = Yen::ZERO;

        for item in input.items {
            let amount = item.amount();
            subtotal += amount;
            tax_total += item.tax();
            if item.is_insurance_applicable {
                insurance_base += amount;
            }
        }

        let total_amount = subtotal + tax_total;
        let insurance_amount = input.insurance.offset(insurance_base);
        let billing_amount = total_amount + insurance_amount;
        let received = input.received.unwrap_or(Yen::ZERO);
        let change_amount = if received > billing_amount {
            received - billing_amount
        } else {
            Yen::ZERO
        };

        debug!(
            items = input.items.len(),
            subtotal = subtotal.amount(),
            tax_total = tax_total.amount(),
            insurance_amount = insurance_amount.amount(),
            billing_amount = billing_amount.amount(),
            "settlement recalculated"
        );

        Calculation {
            subtotal,
            tax_total,
            total_amount,
            insurance_base,
            insurance_amount,
            billing_amount,
            received,
            change_amount,
        }
    }

    /// Breaks the tax out by rate, summing per-item tax within each bucket
    pub fn tax_breakdown(items: &[LineItem]) -> TaxBreakdown {
        let bucket = |rate: TaxRate| {
            let (base, tax) = items
                .iter()
                .filter(|item| item.tax_rate == rate)
                .fold((Yen::ZERO, Yen::ZERO), |(base, tax), item| {
                    (base + item.amount(), tax + item.tax())
                });
            TaxBucket { rate, base, tax }
        };

        TaxBreakdown {
            standard: bucket(TaxRate::Standard),
            reduced: bucket(TaxRate::Reduced),
        }
    }

    /// Quick tender amounts offered next to the payment field
    ///
    /// The exact amount, then the amount rounded up to the next ¥1,000 and
    /// ¥10,000, ascending without duplicates. Empty when nothing is owed.
    pub fn suggested_tenders(billing_amount: Yen) -> Vec<Yen> {
        if !billing_amount.is_positive() {
            return Vec::new();
        }

        let mut tenders = vec![
            billing_amount,
            billing_amount.round_up_to(1_000),
            billing_amount.round_up_to(10_000),
        ];
        tenders.dedup();
        tenders
    }
}
