//! Register commands
//!
//! Each command takes already-parsed input and returns a serializable
//! response; reading files and printing is left to the binary.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use core_kernel::Yen;
use domain_accounting::{
    AccountingDocument, DocumentKind, InsuranceConfig, LineItem, PaymentRequest, Settlement,
    SettlementCalculator, SettlementInput,
};
use domain_patient::Roster;

use crate::config::RegisterConfig;
use crate::dto::{PetResponse, SettleRequest, SettleResponse};
use crate::error::CliError;

/// Parses a JSON document: a settle request or a roster
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, CliError> {
    Ok(serde_json::from_str(text)?)
}

/// How far a `settle` run goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleMode {
    /// Calculate only
    Preview,
    /// Confirm the payment and prepare the given document
    Complete(DocumentKind),
}

/// Calculates a settlement and, in `Complete` mode, confirms its payment
///
/// # Errors
///
/// * `Accounting` - an item is invalid, or the completion gate refused
///   the payment
pub fn settle(
    request: SettleRequest,
    config: &RegisterConfig,
    mode: SettleMode,
    now: DateTime<Utc>,
) -> Result<SettleResponse, CliError> {
    let items: Vec<LineItem> = request.items.into_iter().map(LineItem::from).collect();
    for item in &items {
        item.validate()?;
    }

    let insurance = InsuranceConfig {
        enabled: request.insurance_enabled,
        ratio: request.insurance_ratio.unwrap_or(config.default_insurance_ratio),
    };
    let received = if request.received.trim().is_empty() {
        None
    } else {
        Some(Yen::parse_lenient(&request.received))
    };

    let calculation = SettlementCalculator::calculate(&SettlementInput {
        items: &items,
        insurance,
        received,
    });
    let tax_breakdown = SettlementCalculator::tax_breakdown(&items).printed_buckets();
    let suggested_tenders = SettlementCalculator::suggested_tenders(calculation.billing_amount);

    let kind = match mode {
        SettleMode::Complete(kind) => kind,
        SettleMode::Preview => {
            debug!(billing = calculation.billing_amount.amount(), "settlement previewed");
            return Ok(SettleResponse {
                calculation,
                tax_breakdown,
                suggested_tenders,
                payment: None,
                document: None,
            });
        }
    };

    let mut settlement = Settlement::from_names(
        request.owner_name,
        request.pet_name,
        config.timezone.local_date(now),
    );
    for item in items {
        settlement.add_item(item)?;
    }

    let payment = settlement
        .complete(PaymentRequest {
            insurance,
            insurance_name: request.insurance_name,
            received,
            method: request.method,
        })?
        .clone();
    let document = AccountingDocument::prepare(&settlement, kind, &config.timezone, now)?;

    info!(
        clinic = %config.clinic_name,
        settlement_id = %settlement.id,
        document = kind.title(),
        "document prepared"
    );

    Ok(SettleResponse {
        calculation,
        tax_breakdown,
        suggested_tenders,
        payment: Some(payment),
        document: Some(document),
    })
}

/// Matches a name-only record against the roster
pub fn match_pet(roster: &Roster, pet_name: &str, owner_name: &str) -> Option<PetResponse> {
    roster
        .find_by_record(pet_name, owner_name)
        .map(PetResponse::from)
}

/// Filters the roster the way the pet selection screen does
pub fn search_roster(roster: &Roster, query: &str, limit: usize) -> Vec<PetResponse> {
    roster
        .search(query, limit)
        .into_iter()
        .map(PetResponse::from)
        .collect()
}
