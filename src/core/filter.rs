use serde::Serialize;

use super::iban::validate_iban;
use super::parallel::map_indexed;
use super::types::*;

/// Result of [`partition_payers`]: both lists keep the input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PayerPartition {
    pub eligible: Vec<EligiblePayer>,
    pub rejected: Vec<RejectedPayer>,
}

/// Every reason that keeps `payer` out of a batch, in a fixed order.
/// An empty result means the payer is eligible.
pub fn rejection_reasons(payer: &Payer) -> Vec<RejectionReason> {
    let mut reasons = Vec::new();

    if payer.iban.is_empty() {
        reasons.push(RejectionReason::MissingIban);
    } else if !validate_iban(&payer.iban) {
        reasons.push(RejectionReason::InvalidIbanChecksum);
    }

    if payer.bic.is_empty() {
        reasons.push(RejectionReason::MissingBic);
    }

    if payer.mandate_signed.is_none() {
        reasons.push(RejectionReason::MissingMandateDate);
    }

    reasons
}

/// Split payers into those that may be debited and those that may not.
///
/// This is the only gate in front of the document builder. The partition
/// is stable, and `eligible.len() + rejected.len()` equals the input length.
pub fn partition_payers(payers: Vec<Payer>) -> PayerPartition {
    let verdicts = map_indexed(&payers, |_, payer| rejection_reasons(payer));

    let mut partition = PayerPartition::default();
    for (payer, reasons) in payers.into_iter().zip(verdicts) {
        match payer.mandate_signed {
            Some(mandate_signed) if reasons.is_empty() => {
                partition
                    .eligible
                    .push(EligiblePayer::new(payer, mandate_signed));
            }
            _ => {
                tracing::warn!(
                    payer_id = %payer.payer_id,
                    reasons = ?reasons,
                    "payer excluded from direct debit"
                );
                partition.rejected.push(RejectedPayer::new(payer, reasons));
            }
        }
    }

    tracing::debug!(
        eligible = partition.eligible.len(),
        rejected = partition.rejected.len(),
        "payers partitioned"
    );
    partition
}
