//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{MedicalRecordId, Yen};
use domain_accounting::{
    InsuranceConfig, ItemCategory, LineItem, PaymentMethod, PaymentRequest, Settlement, TaxRate,
};
use domain_patient::Pet;

use crate::fixtures::{ItemFixtures, RosterFixtures, TemporalFixtures};

/// Builder for line items
pub struct LineItemBuilder {
    category: ItemCategory,
    name: String,
    unit_price: Yen,
    quantity: u32,
    tax_rate: TaxRate,
    insured: bool,
    from_record: bool,
}

impl Default for LineItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineItemBuilder {
    /// A ¥1,000 manual item at the standard rate
    pub fn new() -> Self {
        Self {
            category: ItemCategory::Other,
            name: "テスト項目".to_string(),
            unit_price: Yen::new(1000),
            quantity: 1,
            tax_rate: TaxRate::Standard,
            insured: false,
            from_record: false,
        }
    }

    pub fn category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn unit_price(mut self, amount: i64) -> Self {
        self.unit_price = Yen::new(amount);
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn reduced_rate(mut self) -> Self {
        self.tax_rate = TaxRate::Reduced;
        self
    }

    pub fn insured(mut self) -> Self {
        self.insured = true;
        self
    }

    /// Marks the item as handed off from a medical record
    pub fn from_record(mut self) -> Self {
        self.from_record = true;
        self
    }

    pub fn build(self) -> LineItem {
        let item = LineItem::new(self.category, self.name, self.unit_price)
            .with_quantity(self.quantity)
            .with_tax_rate(self.tax_rate)
            .insurance_applicable(self.insured);

        if self.from_record {
            item.derived_from_record(None)
        } else {
            item
        }
    }
}

/// Builder for settlements
pub struct SettlementBuilder {
    pet: Pet,
    date: NaiveDate,
    record_id: Option<MedicalRecordId>,
    record_items: Vec<LineItem>,
    manual_items: Vec<LineItem>,
}

impl Default for SettlementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SettlementBuilder {
    /// An empty settlement for ポチ
    pub fn new() -> Self {
        Self {
            pet: RosterFixtures::pochi(),
            date: TemporalFixtures::visit_date(),
            record_id: None,
            record_items: Vec::new(),
            manual_items: Vec::new(),
        }
    }

    pub fn pet(mut self, pet: Pet) -> Self {
        self.pet = pet;
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Hands off the routine revisit items (¥2,800 pre-tax) from a record
    pub fn with_medical_record(mut self) -> Self {
        let record_id = MedicalRecordId::new();
        self.record_items = ItemFixtures::medical_record_items(record_id);
        self.record_id = Some(record_id);
        self
    }

    /// Adds an item at the register
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.manual_items.push(item);
        self
    }

    pub fn build(self) -> Settlement {
        let mut settlement = match self.record_id {
            Some(record_id) => {
                Settlement::from_medical_record(record_id, &self.pet, self.date, self.record_items)
            }
            None => Settlement::new(&self.pet, self.date),
        };

        for item in self.manual_items {
            settlement.add_item(item).unwrap();
        }
        settlement
    }

    /// Builds and completes the settlement with an exact cash payment
    pub fn completed(self) -> Settlement {
        let mut settlement = self.build();
        let billing = settlement
            .calculate(&InsuranceConfig::disabled(), None)
            .billing_amount;
        settlement
            .complete(PaymentRequest::new(billing, PaymentMethod::Cash))
            .unwrap();
        settlement
    }
}
