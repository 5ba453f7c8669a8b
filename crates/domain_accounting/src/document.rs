//! Receipts and statements
//!
//! Both documents are prepared from a completed settlement's payment
//! snapshot; nothing is recalculated except the per-rate tax breakdown,
//! which the snapshot does not carry.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{SettlementId, Timezone, Yen};

use crate::calculator::{InsuranceRatio, SettlementCalculator, TaxBucket};
use crate::error::AccountingError;
use crate::item::{ItemCategory, LineItem, TaxRate};
use crate::settlement::{PaymentMethod, Settlement};

/// Which document to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// 領収書: totals only
    Receipt,
    /// 明細書: totals plus every line item
    Statement,
}

impl DocumentKind {
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Receipt => "領収書",
            DocumentKind::Statement => "明細書",
        }
    }
}

/// One printed line of a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLine {
    pub category: ItemCategory,
    pub category_label: String,
    pub name: String,
    pub unit_price: Yen,
    pub quantity: u32,
    pub amount: Yen,
    pub tax_rate: TaxRate,
    pub is_insurance_applicable: bool,
}

impl From<&LineItem> for DocumentLine {
    fn from(item: &LineItem) -> Self {
        Self {
            category: item.category,
            category_label: item.category.label().to_string(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            amount: item.amount(),
            tax_rate: item.tax_rate,
            is_insurance_applicable: item.is_insurance_applicable,
        }
    }
}

/// Data shape handed to the printer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingDocument {
    pub kind: DocumentKind,
    pub settlement_id: SettlementId,
    /// Issue date in the clinic's time zone
    pub issued_on: NaiveDate,
    /// Issue date as printed, e.g. `2024年01月05日`
    pub issued_on_label: String,
    /// Addressee line, `{owner} 様`
    pub addressee: String,
    pub pet_name: String,
    pub subtotal: Yen,
    pub tax_total: Yen,
    pub total_amount: Yen,
    pub insurance_name: Option<String>,
    pub insurance_ratio: Option<InsuranceRatio>,
    pub insurance_amount: Yen,
    pub billing_amount: Yen,
    pub received_amount: Yen,
    pub change_amount: Yen,
    pub method: PaymentMethod,
    pub method_label: String,
    /// Tax by rate; the reduced rate only appears when billed
    pub tax_breakdown: Vec<TaxBucket>,
    /// Item lines; empty on receipts
    pub lines: Vec<DocumentLine>,
}

impl AccountingDocument {
    /// Prepares a receipt or statement for a completed settlement
    ///
    /// # Errors
    ///
    /// * `NotCompleted` - the settlement has no payment snapshot
    pub fn prepare(
        settlement: &Settlement,
        kind: DocumentKind,
        timezone: &Timezone,
        now: DateTime<Utc>,
    ) -> Result<Self, AccountingError> {
        let payment = settlement
            .payment()
            .ok_or_else(|| AccountingError::NotCompleted(settlement.id.to_string()))?;

        let issued_on = timezone.local_date(now);
        let lines = match kind {
            DocumentKind::Receipt => Vec::new(),
            DocumentKind::Statement => settlement.items().iter().map(DocumentLine::from).collect(),
        };

        Ok(Self {
            kind,
            settlement_id: settlement.id,
            issued_on,
            issued_on_label: Timezone::format_japanese_date(issued_on),
            addressee: format!("{} 様", settlement.owner_name),
            pet_name: settlement.pet_name.clone(),
            subtotal: payment.subtotal,
            tax_total: payment.tax_total,
            total_amount: payment.total_amount,
            insurance_name: payment.insurance_name.clone(),
            insurance_ratio: payment.insurance_ratio,
            insurance_amount: payment.insurance_amount,
            billing_amount: payment.billing_amount,
            received_amount: payment.received_amount,
            change_amount: payment.change_amount,
            method: payment.method,
            method_label: payment.method.label().to_string(),
            tax_breakdown: SettlementCalculator::tax_breakdown(settlement.items()).printed_buckets(),
            lines,
        })
    }
}
