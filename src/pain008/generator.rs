use chrono::{Local, NaiveDateTime, SubsecRound};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::document::{BatchDocument, build_batch_document};
use crate::core::*;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Generator settings, loadable from any serde format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Rounding of the batch control sum (applied once).
    pub control_sum_rounding: ControlSumRounding,
    /// Prefix [`GeneratedBatch::to_bytes`] output with a UTF-8 BOM.
    pub byte_order_mark: bool,
    /// Reject originators failing [`validate_originator`].
    pub validate_originator: bool,
}

/// A generated batch together with the payers that were left out.
#[derive(Debug, Clone)]
pub struct GeneratedBatch {
    pub document: BatchDocument,
    /// The rendered pain.008.003.02 document.
    pub xml: String,
    pub rejected: Vec<RejectedPayer>,
    byte_order_mark: bool,
}

impl GeneratedBatch {
    pub fn control_sum(&self) -> Decimal {
        self.document.control_sum()
    }

    /// UTF-8 bytes of the document, BOM-prefixed if configured.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.xml.len() + UTF8_BOM.len());
        if self.byte_order_mark {
            bytes.extend_from_slice(UTF8_BOM);
        }
        bytes.extend_from_slice(self.xml.as_bytes());
        bytes
    }
}

/// A failed generation. The rejected payers are kept so the operator can
/// still be told why they were excluded.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct GenerationError {
    #[source]
    pub error: SepaError,
    pub rejected: Vec<RejectedPayer>,
}

/// Produces pain.008.003.02 direct debit batches.
///
/// Steps, in order: filter payers, stop if none is eligible, resolve
/// contributions, build the document, render XML. Nothing is written to
/// disk or sent anywhere.
#[derive(Debug, Clone, Default)]
pub struct SepaBatchGenerator {
    options: GeneratorOptions,
    created_at: Option<NaiveDateTime>,
}

impl SepaBatchGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self {
            options,
            created_at: None,
        }
    }

    /// Fix the `CreDtTm` timestamp instead of reading the local clock.
    pub fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn generate(
        &self,
        originator: &Originator,
        payers: Vec<Payer>,
        plan: &ContributionPlan,
        sequence_type: SequenceType,
    ) -> Result<GeneratedBatch, GenerationError> {
        let PayerPartition { eligible, rejected } = partition_payers(payers);

        match self.assemble(originator, &eligible, rejected.len(), plan, sequence_type) {
            Ok((document, xml)) => Ok(GeneratedBatch {
                document,
                xml,
                rejected,
                byte_order_mark: self.options.byte_order_mark,
            }),
            Err(error) => Err(GenerationError { error, rejected }),
        }
    }

    fn assemble(
        &self,
        originator: &Originator,
        eligible: &[EligiblePayer],
        rejected: usize,
        plan: &ContributionPlan,
        sequence_type: SequenceType,
    ) -> Result<(BatchDocument, String), SepaError> {
        if eligible.is_empty() {
            tracing::warn!(rejected, "no eligible payers left to generate a batch for");
            return Err(SepaError::NoEligiblePayers { rejected });
        }

        if self.options.validate_originator {
            let errors = validate_originator(originator);
            if !errors.is_empty() {
                return Err(SepaError::InvalidOriginator(errors));
            }
        }

        let contributions = plan.resolve(eligible, self.options.control_sum_rounding)?;
        let document = build_batch_document(
            originator,
            eligible,
            &contributions,
            sequence_type,
            self.creation_time(),
        )?;
        let xml = document.to_xml()?;

        tracing::info!(
            message_id = %document.message_id(),
            transactions = document.number_of_transactions(),
            control_sum = %document.control_sum(),
            rejected,
            "direct debit batch generated"
        );
        Ok((document, xml))
    }

    fn creation_time(&self) -> NaiveDateTime {
        self.created_at
            .unwrap_or_else(|| Local::now().naive_local().trunc_subsecs(0))
    }
}
