//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{OwnerId, PetId, Yen};
use domain_accounting::{InsuranceConfig, InsuranceRatio, ItemCategory, LineItem, TaxRate};
use domain_patient::Pet;
use proptest::prelude::*;

/// Strategy for item categories
pub fn category_strategy() -> impl Strategy<Value = ItemCategory> {
    prop_oneof![
        Just(ItemCategory::Examination),
        Just(ItemCategory::Test),
        Just(ItemCategory::Procedure),
        Just(ItemCategory::Surgery),
        Just(ItemCategory::Medicine),
        Just(ItemCategory::Food),
        Just(ItemCategory::Goods),
        Just(ItemCategory::Other),
    ]
}

/// Strategy for tax rates
pub fn tax_rate_strategy() -> impl Strategy<Value = TaxRate> {
    prop_oneof![Just(TaxRate::Standard), Just(TaxRate::Reduced)]
}

/// Strategy for insurance ratios
pub fn insurance_ratio_strategy() -> impl Strategy<Value = InsuranceRatio> {
    prop_oneof![
        Just(InsuranceRatio::Half),
        Just(InsuranceRatio::Seventy),
        Just(InsuranceRatio::Ninety),
        Just(InsuranceRatio::Full),
    ]
}

/// Strategy for insurance settings, on or off
pub fn insurance_config_strategy() -> impl Strategy<Value = InsuranceConfig> {
    (any::<bool>(), insurance_ratio_strategy())
        .prop_map(|(enabled, ratio)| InsuranceConfig { enabled, ratio })
}

/// Strategy for unit prices a clinic plausibly charges
pub fn unit_price_strategy() -> impl Strategy<Value = Yen> {
    (0i64..500_000i64).prop_map(Yen::new)
}

/// Strategy for valid line items
pub fn line_item_strategy() -> impl Strategy<Value = LineItem> {
    (
        category_strategy(),
        unit_price_strategy(),
        1u32..20u32,
        tax_rate_strategy(),
        any::<bool>(),
    )
        .prop_map(|(category, unit_price, quantity, tax_rate, insured)| {
            LineItem::new(category, category.label(), unit_price)
                .with_quantity(quantity)
                .with_tax_rate(tax_rate)
                .insurance_applicable(insured)
        })
}

/// Strategy for item lists of up to 12 items
pub fn line_items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(line_item_strategy(), 0..12)
}

/// Strategy for received amounts, including nothing entered
pub fn received_strategy() -> impl Strategy<Value = Option<Yen>> {
    prop::option::of((0i64..10_000_000i64).prop_map(Yen::new))
}

/// Strategy for short Japanese names without whitespace
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[あ-んア-ン一-龥]{1,6}"
}

/// Strategy for whitespace an operator might type: ASCII space or the
/// ideographic space U+3000
pub fn whitespace_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just(' '), Just('\u{3000}')], 0..3)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Inserts the given whitespace at a char boundary of `name`
pub fn insert_whitespace(name: &str, position: usize, whitespace: &str) -> String {
    let split = name
        .char_indices()
        .map(|(i, _)| i)
        .nth(position)
        .unwrap_or(name.len());
    format!("{}{}{}", &name[..split], whitespace, &name[split..])
}

/// Strategy for roster pets with generated names
pub fn pet_strategy() -> impl Strategy<Value = Pet> {
    (name_strategy(), name_strategy()).prop_map(|(owner, name)| {
        Pet::new(PetId::new(), OwnerId::new(), owner, name, "犬")
    })
}
