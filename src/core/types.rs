use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// First and last name of a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.last.is_empty()
    }
}

/// One debit-eligible member of the collecting organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    /// Stable identifier, written as the mandate reference (`MndtId`).
    pub payer_id: String,
    /// The member's own name.
    pub name: PersonName,
    /// The designated account holder. Empty parts fall back to `name`.
    pub account_holder: PersonName,
    /// Debtor IBAN. Empty means "not recorded".
    pub iban: String,
    /// Debtor BIC. Empty means "not recorded".
    pub bic: String,
    /// Date the direct debit mandate was signed.
    pub mandate_signed: Option<NaiveDate>,
    /// Mandate amendment indicator (`AmdmntInd`).
    pub mandate_amended: bool,
}

impl Payer {
    /// Account holder last name, falling back to the payer's own.
    pub fn holder_last_name(&self) -> &str {
        if self.account_holder.last.is_empty() {
            &self.name.last
        } else {
            &self.account_holder.last
        }
    }

    /// Account holder first name, falling back to the payer's own.
    pub fn holder_first_name(&self) -> &str {
        if self.account_holder.first.is_empty() {
            &self.name.first
        } else {
            &self.account_holder.first
        }
    }

    /// Debtor name as written to `Dbtr/Nm`: "Lastname, Firstname".
    pub fn debtor_name(&self) -> String {
        format!("{}, {}", self.holder_last_name(), self.holder_first_name())
    }
}

/// A payer that passed [`partition_payers`](super::partition_payers).
///
/// Holds a checksum-valid IBAN, a non-empty BIC and a mandate date; the
/// type can only be created by the filter, so downstream code relies on
/// these facts without checking them again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligiblePayer {
    payer: Payer,
    mandate_signed: NaiveDate,
}

impl EligiblePayer {
    pub(crate) fn new(payer: Payer, mandate_signed: NaiveDate) -> Self {
        Self {
            payer,
            mandate_signed,
        }
    }

    pub fn mandate_signed(&self) -> NaiveDate {
        self.mandate_signed
    }

    pub fn into_payer(self) -> Payer {
        self.payer
    }
}

impl std::ops::Deref for EligiblePayer {
    type Target = Payer;

    fn deref(&self) -> &Payer {
        &self.payer
    }
}

/// The collector's own SEPA identity.
///
/// The fields are written to the document as given; see
/// [`validate_originator`](super::validate_originator) for optional checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Originator {
    /// Initiating party name (`InitgPty/Nm`).
    pub creator: String,
    /// Creditor name (`Cdtr/Nm`).
    pub creditor: String,
    /// Creditor IBAN.
    pub iban: String,
    /// Creditor BIC.
    pub bic: String,
    /// Creditor scheme identifier (Gläubiger-ID), e.g. "DE98ZZZ09999999999".
    pub creditor_id: String,
    /// Message identification (`MsgId`).
    pub message_id: String,
    /// Payment information identification (`PmtInfId`).
    pub payment_info_id: String,
    /// Requested collection date (`ReqdColltnDt`).
    pub collection_date: NaiveDate,
    /// Unstructured remittance text (`Ustrd`), the same for every transaction.
    pub purpose: String,
}

/// Whether a collection is the first under a mandate or a recurring one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceType {
    /// FRST: first collection of a mandate.
    First,
    /// RCUR: recurring collection.
    Recurring,
}

impl SequenceType {
    /// ISO 20022 `SeqTp` code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::First => "FRST",
            Self::Recurring => "RCUR",
        }
    }

    /// Parse from the `SeqTp` code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FRST" => Some(Self::First),
            "RCUR" => Some(Self::Recurring),
            _ => None,
        }
    }
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Why a payer was kept out of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RejectionReason {
    MissingIban,
    InvalidIbanChecksum,
    MissingBic,
    MissingMandateDate,
}

impl RejectionReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingIban => "no IBAN recorded",
            Self::InvalidIbanChecksum => "IBAN is invalid",
            Self::MissingBic => "no BIC recorded",
            Self::MissingMandateDate => "no mandate signature date",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A payer excluded from the batch, with every reason that applied.
///
/// Only created by [`partition_payers`](super::partition_payers); the
/// reason list is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedPayer {
    payer: Payer,
    reasons: Vec<RejectionReason>,
}

impl RejectedPayer {
    pub(crate) fn new(payer: Payer, reasons: Vec<RejectionReason>) -> Self {
        debug_assert!(!reasons.is_empty());
        Self { payer, reasons }
    }

    pub fn payer(&self) -> &Payer {
        &self.payer
    }

    pub fn reasons(&self) -> &[RejectionReason] {
        &self.reasons
    }

    pub fn has_reason(&self, reason: RejectionReason) -> bool {
        self.reasons.contains(&reason)
    }

    pub fn into_payer(self) -> Payer {
        self.payer
    }
}

impl fmt::Display for RejectedPayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): ", self.payer.payer_id, self.payer.debtor_name())?;
        for (i, reason) in self.reasons.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{reason}")?;
        }
        Ok(())
    }
}
