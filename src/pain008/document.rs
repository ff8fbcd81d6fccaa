use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::NOT_PROVIDED;
use crate::core::iban::{
    IBAN_MAX_LENGTH, MAX_BIC_LENGTH, MAX_CREDITOR_ID_LENGTH, MAX_MANDATE_ID_LENGTH,
    MAX_MESSAGE_ID_LENGTH, MAX_NAME_LENGTH, MAX_PAYMENT_INFO_ID_LENGTH, MAX_REMITTANCE_LENGTH,
};
use crate::core::parallel::map_indexed;
use crate::core::*;

/// One `DrctDbtTxInf` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectDebitTransaction {
    /// `EndToEndId`; always `NOTPROVIDED`.
    pub end_to_end_id: String,
    /// `InstdAmt` in EUR.
    pub amount: Decimal,
    /// `MndtId`: the payer id.
    pub mandate_id: String,
    /// `DtOfSgntr`.
    pub mandate_signed: NaiveDate,
    /// `AmdmntInd`.
    pub mandate_amended: bool,
    /// `DbtrAgt/FinInstnId/BIC`.
    pub debtor_bic: String,
    /// `Dbtr/Nm` as "Lastname, Firstname".
    pub debtor_name: String,
    /// `DbtrAcct/Id/IBAN`.
    pub debtor_iban: String,
    /// `RmtInf/Ustrd`.
    pub remittance: String,
}

/// A complete SEPA direct debit batch (one payment information block).
///
/// Built once by [`build_batch_document`]; there is no way to change it
/// afterwards, so the transaction count and control sum always agree with
/// the transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDocument {
    message_id: String,
    created_at: NaiveDateTime,
    initiating_party: String,
    payment_info_id: String,
    sequence_type: SequenceType,
    collection_date: NaiveDate,
    creditor_name: String,
    creditor_iban: String,
    creditor_bic: String,
    creditor_scheme_id: String,
    control_sum: Decimal,
    transactions: Vec<DirectDebitTransaction>,
}

impl BatchDocument {
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn initiating_party(&self) -> &str {
        &self.initiating_party
    }

    pub fn payment_info_id(&self) -> &str {
        &self.payment_info_id
    }

    pub fn sequence_type(&self) -> SequenceType {
        self.sequence_type
    }

    pub fn collection_date(&self) -> NaiveDate {
        self.collection_date
    }

    pub fn creditor_name(&self) -> &str {
        &self.creditor_name
    }

    pub fn creditor_iban(&self) -> &str {
        &self.creditor_iban
    }

    pub fn creditor_bic(&self) -> &str {
        &self.creditor_bic
    }

    pub fn creditor_scheme_id(&self) -> &str {
        &self.creditor_scheme_id
    }

    pub fn control_sum(&self) -> Decimal {
        self.control_sum
    }

    pub fn transactions(&self) -> &[DirectDebitTransaction] {
        &self.transactions
    }

    /// `NbOfTxs`, written to both the group header and the payment block.
    pub fn number_of_transactions(&self) -> usize {
        self.transactions.len()
    }

    /// Render as pain.008.003.02 XML.
    pub fn to_xml(&self) -> Result<String, SepaError> {
        super::to_pain008_xml(self)
    }
}

/// Assemble the batch document from filtered, priced payers.
///
/// `contributions` must come from resolving exactly `eligible`; entries are
/// matched by position and payer id. Fails with [`SepaError::EmptyBatch`]
/// when `eligible` is empty, [`SepaError::ContributionMismatch`] when the
/// two lists differ in length, and [`SepaError::InvalidField`] when any text
/// would break the XML or exceed a schema length limit.
pub fn build_batch_document(
    originator: &Originator,
    eligible: &[EligiblePayer],
    contributions: &ResolvedContributions,
    sequence_type: SequenceType,
    created_at: NaiveDateTime,
) -> Result<BatchDocument, SepaError> {
    if eligible.is_empty() {
        tracing::error!("batch document requested without eligible payers");
        return Err(SepaError::EmptyBatch);
    }
    if contributions.len() != eligible.len() {
        return Err(SepaError::ContributionMismatch {
            payers: eligible.len(),
            contributions: contributions.len(),
        });
    }

    let unwritable = unwritable_fields(originator, eligible);
    if !unwritable.is_empty() {
        tracing::warn!(fields = unwritable.len(), "batch contains text that cannot be written");
        return Err(SepaError::InvalidField(unwritable));
    }

    let slots = map_indexed(eligible, |index, payer| {
        match contributions.entry_at(index) {
            Some((payer_id, amount)) if payer_id == payer.payer_id => {
                Ok(transaction_for(payer, amount, &originator.purpose))
            }
            _ => Err(payer.payer_id.clone()),
        }
    });

    let mut transactions = Vec::with_capacity(slots.len());
    let mut unpriced = Vec::new();
    for slot in slots {
        match slot {
            Ok(tx) => transactions.push(tx),
            Err(payer_id) => unpriced.push(payer_id),
        }
    }
    if !unpriced.is_empty() {
        return Err(SepaError::MissingContribution(unpriced));
    }

    tracing::debug!(
        transactions = transactions.len(),
        sequence_type = %sequence_type,
        "batch document assembled"
    );

    Ok(BatchDocument {
        message_id: originator.message_id.clone(),
        created_at,
        initiating_party: originator.creator.clone(),
        payment_info_id: originator.payment_info_id.clone(),
        sequence_type,
        collection_date: originator.collection_date,
        creditor_name: originator.creditor.clone(),
        creditor_iban: originator.iban.clone(),
        creditor_bic: originator.bic.clone(),
        creditor_scheme_id: originator.creditor_id.clone(),
        control_sum: contributions.control_sum(),
        transactions,
    })
}

/// Every text field that would make the document malformed or exceed a
/// schema length limit.
fn unwritable_fields(originator: &Originator, eligible: &[EligiblePayer]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let originator_fields = [
        (&originator.creator, "originator.creator", MAX_NAME_LENGTH),
        (&originator.creditor, "originator.creditor", MAX_NAME_LENGTH),
        (&originator.message_id, "originator.message_id", MAX_MESSAGE_ID_LENGTH),
        (&originator.payment_info_id, "originator.payment_info_id", MAX_PAYMENT_INFO_ID_LENGTH),
        (&originator.iban, "originator.iban", IBAN_MAX_LENGTH),
        (&originator.bic, "originator.bic", MAX_BIC_LENGTH),
        (&originator.creditor_id, "originator.creditor_id", MAX_CREDITOR_ID_LENGTH),
        (&originator.purpose, "originator.purpose", MAX_REMITTANCE_LENGTH),
    ];
    for (value, field, max_len) in originator_fields {
        validate_document_text(value, field, max_len, &mut errors);
    }

    for payer in eligible {
        let id = &payer.payer_id;
        validate_document_text(id, &format!("payer[{id}].payer_id"), MAX_MANDATE_ID_LENGTH, &mut errors);
        validate_document_text(
            &payer.debtor_name(),
            &format!("payer[{id}].debtor_name"),
            MAX_NAME_LENGTH,
            &mut errors,
        );
        validate_document_text(&payer.bic, &format!("payer[{id}].bic"), MAX_BIC_LENGTH, &mut errors);
    }
    errors
}

fn transaction_for(payer: &EligiblePayer, amount: Decimal, purpose: &str) -> DirectDebitTransaction {
    DirectDebitTransaction {
        end_to_end_id: NOT_PROVIDED.to_string(),
        amount,
        mandate_id: payer.payer_id.clone(),
        mandate_signed: payer.mandate_signed(),
        mandate_amended: payer.mandate_amended,
        debtor_bic: payer.bic.clone(),
        debtor_name: payer.debtor_name(),
        debtor_iban: payer.iban.clone(),
        remittance: purpose.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn originator() -> Originator {
        OriginatorBuilder::new("Trachtenverein", date(2024, 3, 1))
            .account("DE89370400440532013000", "COBADEFFXXX")
            .creditor_id("DE98ZZZ09999999999")
            .message_id("MSG-1")
            .payment_info_id("PMT-1")
            .purpose("Beitrag 2024")
            .build()
    }

    #[test]
    fn mismatched_contributions_are_reported() {
        let partition = partition_payers(vec![
            PayerBuilder::new("A", "Anna", "Huber")
                .iban("DE89370400440532013000")
                .bic("COBADEFFXXX")
                .mandate_signed(date(2020, 1, 1))
                .build(),
        ]);
        let other = partition_payers(vec![
            PayerBuilder::new("B", "Berta", "Maier")
                .iban("DE89370400440532013000")
                .bic("COBADEFFXXX")
                .mandate_signed(date(2020, 1, 1))
                .build(),
        ]);
        let resolved = ContributionPlan::uniform(dec!(10))
            .resolve(&other.eligible, ControlSumRounding::HalfEven)
            .unwrap();

        let err = build_batch_document(
            &originator(),
            &partition.eligible,
            &resolved,
            SequenceType::Recurring,
            date(2024, 2, 1).and_hms_opt(9, 0, 0).unwrap(),
        )
        .unwrap_err();
        assert_eq!(err, SepaError::MissingContribution(vec!["A".into()]));
    }

}
