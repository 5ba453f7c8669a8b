//! Line item list operations
//!
//! The register treats the item list as a value: every operation takes the
//! current list and returns a new one, leaving the caller's copy untouched.
//!
//! # Provenance boundary
//!
//! [`remove_item`] is unconditional. Items handed off from a medical record
//! must not disappear from a bill at the register, but that rule belongs to
//! the caller: use [`remove_manual_item`] (or `Settlement::remove_item`)
//! wherever a user action triggers the removal, otherwise record-derived
//! charges can be silently dropped.

use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, LineItemId, Yen};

use crate::error::AccountingError;
use crate::item::{ItemCategory, LineItem};

/// Appends an item, returning the new list
pub fn add_item(items: &[LineItem], new_item: LineItem) -> Vec<LineItem> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(new_item);
    next
}

/// Removes the first item with the given id, returning the new list
///
/// Returns an unchanged copy when no item matches. Does not check
/// provenance; see the module documentation.
pub fn remove_item(items: &[LineItem], item_id: LineItemId) -> Vec<LineItem> {
    let mut next = items.to_vec();
    if let Some(pos) = next.iter().position(|item| item.id == item_id) {
        next.remove(pos);
    }
    next
}

/// Removes a manually added item, refusing record-derived ones
///
/// # Errors
///
/// * `ItemNotFound` - no item has this id
/// * `ItemNotRemovable` - the item came from a medical record
pub fn remove_manual_item(
    items: &[LineItem],
    item_id: LineItemId,
) -> Result<Vec<LineItem>, AccountingError> {
    let item = items
        .iter()
        .find(|item| item.id == item_id)
        .ok_or_else(|| AccountingError::ItemNotFound(item_id.to_string()))?;

    if !item.is_removable() {
        return Err(AccountingError::ItemNotRemovable(item.name.clone()));
    }

    Ok(remove_item(items, item_id))
}

/// The register's "add item" form, as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualItemForm {
    /// Selected category
    pub category: ItemCategory,
    /// Item name
    pub name: String,
    /// Unit price as entered
    pub unit_price: String,
}

impl ManualItemForm {
    pub fn new(
        category: ItemCategory,
        name: impl Into<String>,
        unit_price: impl Into<String>,
    ) -> Self {
        Self {
            category,
            name: name.into(),
            unit_price: unit_price.into(),
        }
    }

    /// Validates the form and builds the line item
    ///
    /// Manual items are billed at quantity 1 and the standard rate, and do
    /// not count toward insurance.
    ///
    /// # Errors
    ///
    /// * `InvalidItem` - empty name, category not offered for manual entry,
    ///   or a price that is not a positive whole number
    pub fn into_line_item(self) -> Result<LineItem, AccountingError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AccountingError::invalid_item("name is required"));
        }
        if !self.category.is_manual_entry() {
            return Err(AccountingError::invalid_item(format!(
                "category {} cannot be added at the register",
                self.category.label()
            )));
        }

        let unit_price: Yen = self
            .unit_price
            .parse()
            .map_err(|e| AccountingError::Core(CoreError::from(e)))?;
        if !unit_price.is_positive() {
            return Err(AccountingError::invalid_item(format!(
                "unit price must be positive: {}",
                unit_price
            )));
        }

        Ok(LineItem::new(self.category, name, unit_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemSource;

    fn sample_items() -> Vec<LineItem> {
        vec![
            LineItem::new(ItemCategory::Examination, "再診料", Yen::new(800))
                .derived_from_record(None),
            LineItem::new(ItemCategory::Goods, "ブラシ", Yen::new(1500)),
        ]
    }

    #[test]
    fn test_add_item_leaves_input_untouched() {
        let items = sample_items();
        let extra = LineItem::new(ItemCategory::Food, "おやつ", Yen::new(300));

        let next = add_item(&items, extra.clone());

        assert_eq!(items.len(), 2);
        assert_eq!(next.len(), 3);
        assert_eq!(next[2], extra);
    }

    #[test]
    fn test_remove_item_is_noop_for_unknown_id() {
        let items = sample_items();
        let next = remove_item(&items, LineItemId::new());
        assert_eq!(next, items);
    }

    #[test]
    fn test_remove_item_ignores_provenance() {
        let items = sample_items();
        let next = remove_item(&items, items[0].id);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].source, ItemSource::Manual);
    }

    #[test]
    fn test_form_rejects_zero_price() {
        let form = ManualItemForm::new(ItemCategory::Goods, "リード", "0");
        assert!(matches!(form.into_line_item(), Err(AccountingError::InvalidItem(_))));
    }
}
