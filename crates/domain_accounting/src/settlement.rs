//! Settlements
//!
//! A settlement is the bill for one patient visit. It is created when the
//! visit's items are first assembled, edited at the register, and frozen
//! when the payment is confirmed. After that only documents can be produced
//! from it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use core_kernel::{LineItemId, MedicalRecordId, OwnerId, PetId, SettlementId, Yen};
use domain_patient::{Pet, Roster};

use crate::calculator::{Calculation, InsuranceConfig, InsuranceRatio, SettlementCalculator, SettlementInput};
use crate::catalog::{self, ManualItemForm};
use crate::error::AccountingError;
use crate::item::LineItem;

/// Settlement lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Waiting at the register
    Waiting,
    /// Put on hold
    Pending,
    /// Paid
    Completed,
    /// Canceled
    Canceled,
}

impl SettlementStatus {
    /// Label shown in the accounting list
    pub fn label(&self) -> &'static str {
        match self {
            SettlementStatus::Waiting => "未収",
            SettlementStatus::Pending => "保留",
            SettlementStatus::Completed => "回収済",
            SettlementStatus::Canceled => "キャンセル",
        }
    }
}

/// How the customer paid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    CreditCard,
    ElectronicMoney,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "現金",
            PaymentMethod::CreditCard => "クレジットカード",
            PaymentMethod::ElectronicMoney => "電子マネー",
        }
    }
}

/// Snapshot of the confirmed payment
///
/// Captured once, when the settlement completes, and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// Pre-tax subtotal
    pub subtotal: Yen,
    /// Consumption tax total
    pub tax_total: Yen,
    /// Tax-inclusive total
    pub total_amount: Yen,
    /// Insurance provider, when insurance was settled at the counter
    pub insurance_name: Option<String>,
    /// Ratio used, when insurance was settled at the counter
    pub insurance_ratio: Option<InsuranceRatio>,
    /// Insurance credit, zero or negative
    pub insurance_amount: Yen,
    /// Discount, zero or negative; the register offers none
    pub discount_amount: Yen,
    /// Amount billed to the customer
    pub billing_amount: Yen,
    /// Amount handed over
    pub received_amount: Yen,
    /// Change returned
    pub change_amount: Yen,
    /// Payment method
    pub method: PaymentMethod,
}

impl PaymentInfo {
    fn snapshot(
        calculation: &Calculation,
        insurance: &InsuranceConfig,
        insurance_name: Option<String>,
        method: PaymentMethod,
    ) -> Self {
        Self {
            subtotal: calculation.subtotal,
            tax_total: calculation.tax_total,
            total_amount: calculation.total_amount,
            insurance_name: insurance_name.filter(|_| insurance.enabled),
            insurance_ratio: insurance.enabled.then_some(insurance.ratio),
            insurance_amount: calculation.insurance_amount,
            discount_amount: Yen::ZERO,
            billing_amount: calculation.billing_amount,
            received_amount: calculation.received,
            change_amount: calculation.change_amount,
            method,
        }
    }
}

/// What the register submits when the payment is confirmed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Insurance settings at confirmation time
    pub insurance: InsuranceConfig,
    /// Insurance provider, recorded when insurance is enabled
    pub insurance_name: Option<String>,
    /// Amount handed over; `None` when the field was left empty
    pub received: Option<Yen>,
    /// Payment method
    pub method: PaymentMethod,
}

impl PaymentRequest {
    pub fn new(received: Yen, method: PaymentMethod) -> Self {
        Self {
            received: Some(received),
            method,
            ..Self::default()
        }
    }

    /// Sets the insurance settings and provider
    pub fn with_insurance(mut self, insurance: InsuranceConfig, insurance_name: Option<String>) -> Self {
        self.insurance = insurance;
        self.insurance_name = insurance_name;
        self
    }
}

/// The bill for one patient visit
///
/// Deserialization checks that the payment snapshot and the `Completed`
/// status appear together, and that every stored item is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SettlementRecord")]
pub struct Settlement {
    /// Unique identifier
    pub id: SettlementId,
    /// Medical record the items were handed off from
    pub medical_record_id: Option<MedicalRecordId>,
    /// Owner, once resolved against the roster
    pub owner_id: Option<OwnerId>,
    /// Owner's display name
    pub owner_name: String,
    /// Pet, once resolved against the roster
    pub pet_id: Option<PetId>,
    /// Pet's display name
    pub pet_name: String,
    /// Species
    pub pet_species: Option<String>,
    /// Lifecycle status
    pub status: SettlementStatus,
    /// Visit date
    pub scheduled_date: NaiveDate,
    /// When the payment was confirmed
    pub completed_at: Option<DateTime<Utc>>,
    /// Line items, in display order
    items: Vec<LineItem>,
    /// Payment snapshot, present once completed
    payment: Option<PaymentInfo>,
    /// Free-text memo
    pub memo: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

/// Stored form of a settlement, checked before it becomes one
#[derive(Deserialize)]
struct SettlementRecord {
    id: SettlementId,
    medical_record_id: Option<MedicalRecordId>,
    owner_id: Option<OwnerId>,
    owner_name: String,
    pet_id: Option<PetId>,
    pet_name: String,
    pet_species: Option<String>,
    status: SettlementStatus,
    scheduled_date: NaiveDate,
    completed_at: Option<DateTime<Utc>>,
    items: Vec<LineItem>,
    payment: Option<PaymentInfo>,
    memo: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SettlementRecord> for Settlement {
    type Error = AccountingError;

    fn try_from(record: SettlementRecord) -> Result<Self, Self::Error> {
        let completed = record.status == SettlementStatus::Completed;
        if record.payment.is_some() != completed {
            return Err(AccountingError::InconsistentSettlement(format!(
                "{}: status {:?} with payment {}",
                record.id,
                record.status,
                if record.payment.is_some() { "present" } else { "missing" }
            )));
        }
        if record.completed_at.is_some() != completed {
            return Err(AccountingError::InconsistentSettlement(format!(
                "{}: status {:?} does not agree with completed_at",
                record.id, record.status
            )));
        }
        for item in &record.items {
            item.validate()?;
        }

        Ok(Self {
            id: record.id,
            medical_record_id: record.medical_record_id,
            owner_id: record.owner_id,
            owner_name: record.owner_name,
            pet_id: record.pet_id,
            pet_name: record.pet_name,
            pet_species: record.pet_species,
            status: record.status,
            scheduled_date: record.scheduled_date,
            completed_at: record.completed_at,
            items: record.items,
            payment: record.payment,
            memo: record.memo,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

impl Settlement {
    /// Opens an empty settlement for a roster pet
    ///
    /// # Arguments
    ///
    /// * `pet` - The patient
    /// * `scheduled_date` - Visit date
    pub fn new(pet: &Pet, scheduled_date: NaiveDate) -> Self {
        let mut settlement = Self::from_names(&pet.owner_name, &pet.name, scheduled_date);
        settlement.link_pet(pet);
        settlement
    }

    /// Opens a settlement that only knows the display names, as legacy and
    /// externally sourced records do
    pub fn from_names(
        owner_name: impl Into<String>,
        pet_name: impl Into<String>,
        scheduled_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: SettlementId::new_v7(),
            medical_record_id: None,
            owner_id: None,
            owner_name: owner_name.into(),
            pet_id: None,
            pet_name: pet_name.into(),
            pet_species: None,
            status: SettlementStatus::Waiting,
            scheduled_date,
            completed_at: None,
            items: Vec::new(),
            payment: None,
            memo: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Opens a settlement from a medical record hand-off
    ///
    /// Every handed-off item is tagged as record-derived, so the register
    /// cannot remove it.
    pub fn from_medical_record(
        record_id: MedicalRecordId,
        pet: &Pet,
        scheduled_date: NaiveDate,
        items: Vec<LineItem>,
    ) -> Self {
        let mut settlement = Self::new(pet, scheduled_date);
        settlement.medical_record_id = Some(record_id);
        settlement.items = items
            .into_iter()
            .map(|item| item.derived_from_record(Some(record_id)))
            .collect();
        settlement
    }

    /// Line items, in display order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Payment snapshot, once completed
    pub fn payment(&self) -> Option<&PaymentInfo> {
        self.payment.as_ref()
    }

    /// Whether the settlement can no longer change
    pub fn is_frozen(&self) -> bool {
        self.payment.is_some()
    }

    /// Adds a line item
    ///
    /// # Errors
    ///
    /// * `SettlementFrozen` - the payment has been confirmed
    /// * `InvalidItem` - the item breaks the line item invariants
    pub fn add_item(&mut self, item: LineItem) -> Result<(), AccountingError> {
        self.ensure_editable()?;
        item.validate()?;
        self.items = catalog::add_item(&self.items, item);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Adds an item from the register's manual entry form
    pub fn add_manual_item(&mut self, form: ManualItemForm) -> Result<LineItemId, AccountingError> {
        let item = form.into_line_item()?;
        let id = item.id;
        self.add_item(item)?;
        Ok(id)
    }

    /// Removes a manually added item
    ///
    /// # Errors
    ///
    /// * `SettlementFrozen` - the payment has been confirmed
    /// * `ItemNotFound` / `ItemNotRemovable` - see `catalog::remove_manual_item`
    pub fn remove_item(&mut self, item_id: LineItemId) -> Result<(), AccountingError> {
        self.ensure_editable()?;
        self.items = catalog::remove_manual_item(&self.items, item_id)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Calculates the current bill
    pub fn calculate(&self, insurance: &InsuranceConfig, received: Option<Yen>) -> Calculation {
        SettlementCalculator::calculate(&SettlementInput {
            items: &self.items,
            insurance: *insurance,
            received,
        })
    }

    /// Puts the settlement on hold
    pub fn hold(&mut self) -> Result<(), AccountingError> {
        self.update_status(SettlementStatus::Pending)
    }

    /// Returns a held settlement to the register queue
    pub fn resume(&mut self) -> Result<(), AccountingError> {
        self.update_status(SettlementStatus::Waiting)
    }

    /// Cancels the settlement
    pub fn cancel(&mut self) -> Result<(), AccountingError> {
        self.update_status(SettlementStatus::Canceled)?;
        info!(settlement_id = %self.id, "settlement canceled");
        Ok(())
    }

    /// Confirms the payment and freezes the settlement
    ///
    /// # Errors
    ///
    /// * `AlreadyCompleted` - the payment was already confirmed
    /// * `InvalidStatusTransition` - the settlement was canceled
    /// * `PaymentNotEntered` - no received amount
    /// * `InsufficientPayment` - the received amount does not cover the bill
    pub fn complete(&mut self, request: PaymentRequest) -> Result<&PaymentInfo, AccountingError> {
        if self.is_frozen() || self.status == SettlementStatus::Completed {
            return Err(AccountingError::AlreadyCompleted(self.id.to_string()));
        }
        if !self.can_transition_to(SettlementStatus::Completed) {
            return Err(self.transition_error(SettlementStatus::Completed));
        }
        let received = request.received.ok_or(AccountingError::PaymentNotEntered)?;

        let calculation = self.calculate(&request.insurance, Some(received));
        if !calculation.is_payment_sufficient() {
            warn!(
                settlement_id = %self.id,
                billing = calculation.billing_amount.amount(),
                received = received.amount(),
                "payment confirmation rejected: insufficient amount"
            );
            return Err(AccountingError::InsufficientPayment {
                billing: calculation.billing_amount,
                received,
            });
        }

        let now = Utc::now();
        self.status = SettlementStatus::Completed;
        self.completed_at = Some(now);
        self.updated_at = now;

        info!(
            settlement_id = %self.id,
            billing = calculation.billing_amount.amount(),
            change = calculation.change_amount.amount(),
            method = ?request.method,
            "settlement completed"
        );

        let info = PaymentInfo::snapshot(
            &calculation,
            &request.insurance,
            request.insurance_name,
            request.method,
        );
        Ok(self.payment.insert(info))
    }

    /// Re-associates the settlement with a roster pet using its display names
    ///
    /// On a match the ids are filled in and the names replaced with the
    /// roster's spelling. Returns the matched pet, or `None` when no roster
    /// entry matches.
    ///
    /// # Errors
    ///
    /// * `SettlementFrozen` - the payment has been confirmed; the names
    ///   printed on its documents must not change
    pub fn rematch_pet<'a>(&mut self, roster: &'a Roster) -> Result<Option<&'a Pet>, AccountingError> {
        self.ensure_editable()?;
        let Some(pet) = roster.find_by_record(&self.pet_name, &self.owner_name) else {
            return Ok(None);
        };
        self.link_pet(pet);
        self.updated_at = Utc::now();
        Ok(Some(pet))
    }

    fn link_pet(&mut self, pet: &Pet) {
        self.pet_id = Some(pet.id);
        self.owner_id = Some(pet.owner_id);
        self.pet_name = pet.name.clone();
        self.owner_name = pet.owner_name.clone();
        self.pet_species = Some(pet.species.clone());
    }

    fn ensure_editable(&self) -> Result<(), AccountingError> {
        if self.is_frozen() {
            return Err(AccountingError::SettlementFrozen(self.id.to_string()));
        }
        Ok(())
    }

    fn update_status(&mut self, status: SettlementStatus) -> Result<(), AccountingError> {
        if !self.can_transition_to(status) {
            return Err(self.transition_error(status));
        }
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn transition_error(&self, to: SettlementStatus) -> AccountingError {
        AccountingError::InvalidStatusTransition {
            from: format!("{:?}", self.status),
            to: format!("{:?}", to),
        }
    }

    fn can_transition_to(&self, target: SettlementStatus) -> bool {
        use SettlementStatus::*;
        matches!(
            (self.status, target),
            (Waiting, Pending) |
            (Pending, Waiting) |
            (Waiting, Completed) |
            (Pending, Completed) |
            (Waiting, Canceled) |
            (Pending, Canceled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemCategory;

    fn open_settlement() -> Settlement {
        let pet = Pet::new(PetId::new(), OwnerId::new(), "山田 太郎", "ポチ", "犬");
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        Settlement::from_medical_record(
            MedicalRecordId::new(),
            &pet,
            date,
            vec![LineItem::new(ItemCategory::Examination, "初診料", Yen::new(1500))],
        )
    }

    #[test]
    fn test_handed_off_items_are_record_derived() {
        let settlement = open_settlement();
        assert!(settlement.items().iter().all(|item| !item.is_removable()));
        assert_eq!(settlement.status, SettlementStatus::Waiting);
    }

    #[test]
    fn test_complete_requires_received_amount() {
        let mut settlement = open_settlement();
        let result = settlement.complete(PaymentRequest::default());
        assert!(matches!(result, Err(AccountingError::PaymentNotEntered)));
        assert!(!settlement.is_frozen());
    }

    #[test]
    fn test_cancel_then_complete_is_rejected() {
        let mut settlement = open_settlement();
        settlement.cancel().unwrap();
        let result = settlement.complete(PaymentRequest::new(Yen::new(5000), PaymentMethod::Cash));
        assert!(matches!(result, Err(AccountingError::InvalidStatusTransition { .. })));
    }
}
