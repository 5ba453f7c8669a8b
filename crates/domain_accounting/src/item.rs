//! Billable line items
//!
//! A line item is one charge on a visit's bill: a consultation, a test,
//! a prescription, a bag of food. Items either arrive from the medical
//! record hand-off or are added by hand at the register, and that
//! provenance decides what the register may do with them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{LineItemId, MedicalRecordId, Rate, Yen};

use crate::error::AccountingError;

/// Category of a billable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Consultation fee
    Examination,
    /// Blood work, imaging and other tests
    Test,
    /// Treatment procedure
    Procedure,
    /// Surgery
    Surgery,
    /// Prescribed medicine
    Medicine,
    /// Therapeutic diet or food
    Food,
    /// Care goods sold over the counter
    Goods,
    /// Anything else
    Other,
}

impl ItemCategory {
    /// Label printed on the register screen and statements
    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::Examination => "診察",
            ItemCategory::Test => "検査",
            ItemCategory::Procedure => "処置",
            ItemCategory::Surgery => "手術",
            ItemCategory::Medicine => "処方",
            ItemCategory::Food => "フード",
            ItemCategory::Goods => "物販",
            ItemCategory::Other => "その他",
        }
    }

    /// Categories the register may add by hand
    pub fn is_manual_entry(&self) -> bool {
        matches!(self, ItemCategory::Food | ItemCategory::Goods | ItemCategory::Other)
    }
}

/// Consumption tax rate
///
/// The closed set of rates the clinic bills at. Serialized as the decimal
/// rate (`0.1`, `0.08`); any other value is rejected on the way in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub enum TaxRate {
    /// Standard rate, 10%
    #[default]
    Standard,
    /// Reduced rate for food, 8%
    Reduced,
}

impl TaxRate {
    /// All rates, in the order documents list them
    pub const ALL: [TaxRate; 2] = [TaxRate::Standard, TaxRate::Reduced];

    /// Returns the rate as a decimal fraction
    pub fn as_decimal(&self) -> Decimal {
        match self {
            TaxRate::Standard => dec!(0.1),
            TaxRate::Reduced => dec!(0.08),
        }
    }

    /// Returns the rate for arithmetic
    pub fn rate(&self) -> Rate {
        Rate::new(self.as_decimal())
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = AccountingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        TaxRate::ALL
            .into_iter()
            .find(|rate| rate.as_decimal() == value)
            .ok_or(AccountingError::UnsupportedTaxRate(value))
    }
}

impl From<TaxRate> for Decimal {
    fn from(rate: TaxRate) -> Decimal {
        rate.as_decimal()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rate())
    }
}

/// Where a line item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSource {
    /// Handed off from the medical record; the register may not remove it
    MedicalRecord {
        /// The originating record, when known
        record_id: Option<MedicalRecordId>,
    },
    /// Added at the register
    Manual,
}

impl ItemSource {
    /// Whether the register may remove an item with this provenance
    pub fn is_removable(&self) -> bool {
        matches!(self, ItemSource::Manual)
    }
}

/// A billable line item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier
    pub id: LineItemId,
    /// Master item code, when the item came from the item master
    pub code: Option<String>,
    /// Category
    pub category: ItemCategory,
    /// Display name
    pub name: String,
    /// Price per unit, before tax
    pub unit_price: Yen,
    /// Quantity, at least 1
    pub quantity: u32,
    /// Consumption tax rate
    pub tax_rate: TaxRate,
    /// Whether the item counts toward the insurance base
    pub is_insurance_applicable: bool,
    /// Provenance
    pub source: ItemSource,
}

impl LineItem {
    /// Creates a manually added item with quantity 1, standard tax and no
    /// insurance coverage
    ///
    /// # Arguments
    ///
    /// * `category` - Item category
    /// * `name` - Display name
    /// * `unit_price` - Pre-tax unit price
    pub fn new(category: ItemCategory, name: impl Into<String>, unit_price: Yen) -> Self {
        Self {
            id: LineItemId::new_v7(),
            code: None,
            category,
            name: name.into(),
            unit_price,
            quantity: 1,
            tax_rate: TaxRate::Standard,
            is_insurance_applicable: false,
            source: ItemSource::Manual,
        }
    }

    /// Sets the master item code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the quantity
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the tax rate
    pub fn with_tax_rate(mut self, tax_rate: TaxRate) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Marks whether insurance applies
    pub fn insurance_applicable(mut self, applicable: bool) -> Self {
        self.is_insurance_applicable = applicable;
        self
    }

    /// Tags the item as handed off from a medical record
    pub fn derived_from_record(mut self, record_id: Option<MedicalRecordId>) -> Self {
        self.source = ItemSource::MedicalRecord { record_id };
        self
    }

    /// Pre-tax amount: unit price × quantity
    pub fn amount(&self) -> Yen {
        self.unit_price.times(self.quantity)
    }

    /// Tax on this item alone, floored
    pub fn tax(&self) -> Yen {
        self.tax_rate.rate().apply_floor(self.amount())
    }

    /// Whether the register may remove this item
    pub fn is_removable(&self) -> bool {
        self.source.is_removable()
    }

    /// Checks the item invariants: non-empty name, non-negative price,
    /// positive quantity
    pub fn validate(&self) -> Result<(), AccountingError> {
        if self.name.trim().is_empty() {
            return Err(AccountingError::invalid_item("name is required"));
        }
        if self.unit_price.is_negative() {
            return Err(AccountingError::invalid_item(format!(
                "unit price must not be negative: {}",
                self.unit_price
            )));
        }
        if self.quantity == 0 {
            return Err(AccountingError::invalid_item("quantity must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_and_tax() {
        let item = LineItem::new(ItemCategory::Food, "療法食 3kg", Yen::new(4500))
            .with_quantity(2)
            .with_tax_rate(TaxRate::Reduced);

        assert_eq!(item.amount(), Yen::new(9000));
        assert_eq!(item.tax(), Yen::new(720));
    }

    #[test]
    fn test_tax_rate_from_decimal() {
        assert_eq!(TaxRate::try_from(dec!(0.10)).unwrap(), TaxRate::Standard);
        assert_eq!(TaxRate::try_from(dec!(0.08)).unwrap(), TaxRate::Reduced);
        assert!(TaxRate::try_from(dec!(0.05)).is_err());
    }

    #[test]
    fn test_only_manual_items_are_removable() {
        let manual = LineItem::new(ItemCategory::Goods, "シャンプー", Yen::new(1200));
        let derived = manual.clone().derived_from_record(None);

        assert!(manual.is_removable());
        assert!(!derived.is_removable());
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let item = LineItem::new(ItemCategory::Other, "爪切り", Yen::new(500)).with_quantity(0);
        assert!(matches!(item.validate(), Err(AccountingError::InvalidItem(_))));
    }
}
