//! Register request and response DTOs

use serde::{Deserialize, Serialize};

use core_kernel::Yen;
use domain_accounting::{
    AccountingDocument, Calculation, InsuranceRatio, ItemCategory, LineItem, PaymentInfo,
    PaymentMethod, TaxBucket, TaxRate,
};
use domain_patient::Pet;

fn one() -> u32 {
    1
}

/// One item as the register submits it
#[derive(Debug, Clone, Deserialize)]
pub struct SettleItem {
    pub code: Option<String>,
    pub category: ItemCategory,
    pub name: String,
    pub unit_price: Yen,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub tax_rate: TaxRate,
    #[serde(default)]
    pub is_insurance_applicable: bool,
    /// Handed off from a medical record rather than added at the register
    #[serde(default)]
    pub from_medical_record: bool,
}

impl From<SettleItem> for LineItem {
    fn from(dto: SettleItem) -> Self {
        let mut item = LineItem::new(dto.category, dto.name, dto.unit_price)
            .with_quantity(dto.quantity)
            .with_tax_rate(dto.tax_rate)
            .insurance_applicable(dto.is_insurance_applicable);
        if let Some(code) = dto.code {
            item = item.with_code(code);
        }
        if dto.from_medical_record {
            item = item.derived_from_record(None);
        }
        item
    }
}

/// A settlement as the register screen holds it
#[derive(Debug, Clone, Deserialize)]
pub struct SettleRequest {
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub pet_name: String,
    pub items: Vec<SettleItem>,
    #[serde(default)]
    pub insurance_enabled: bool,
    /// Falls back to the configured default ratio
    pub insurance_ratio: Option<InsuranceRatio>,
    pub insurance_name: Option<String>,
    /// The payment field exactly as typed
    #[serde(default)]
    pub received: String,
    #[serde(default)]
    pub method: PaymentMethod,
}

#[derive(Debug, Serialize)]
pub struct SettleResponse {
    pub calculation: Calculation,
    pub tax_breakdown: Vec<TaxBucket>,
    pub suggested_tenders: Vec<Yen>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<AccountingDocument>,
}

#[derive(Debug, Serialize)]
pub struct PetResponse {
    pub id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
}

impl From<&Pet> for PetResponse {
    fn from(pet: &Pet) -> Self {
        Self {
            id: pet.id.to_string(),
            owner_id: pet.owner_id.to_string(),
            owner_name: pet.owner_name.clone(),
            name: pet.name.clone(),
            species: pet.species.clone(),
            breed: pet.breed.clone(),
        }
    }
}
