use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can stop a direct debit batch from being produced.
///
/// Invalid payers are never reported through this type; they end up as
/// [`RejectedPayer`](super::RejectedPayer) entries instead.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SepaError {
    /// Every payer was rejected by the filter.
    #[error("no eligible payers left to collect from ({rejected} rejected)")]
    NoEligiblePayers { rejected: usize },

    /// Payers without an individual contribution while no default applies.
    #[error("{} payer(s) have no stored contribution: {}", .0.len(), .0.join(", "))]
    MissingContribution(Vec<String>),

    /// A resolved contribution is zero or negative.
    #[error("contribution for payer {payer_id} must be positive, got {amount}")]
    NonPositiveContribution { payer_id: String, amount: Decimal },

    /// An amount has fractional cents; SEPA amounts carry at most two decimals.
    #[error("{field} has more than two decimal places: {amount}")]
    ExcessPrecision { field: String, amount: Decimal },

    /// The control sum does not fit into a `Decimal`.
    #[error("control sum overflows the supported amount range")]
    AmountOverflow,

    /// Contributions were resolved for a different set of payers.
    #[error("contributions resolved for {contributions} payer(s), but the batch has {payers}")]
    ContributionMismatch { payers: usize, contributions: usize },

    /// Two eligible payers share the same identifier (used as mandate ID).
    #[error("payer id '{0}' appears more than once in the batch")]
    DuplicatePayerId(String),

    /// An eligible payer has an empty identifier.
    #[error("payer id must not be empty")]
    EmptyPayerId,

    /// The document builder was called without transactions.
    #[error("cannot build a batch without transactions")]
    EmptyBatch,

    /// The originator failed the optional SEPA field checks.
    #[error("invalid originator: {}", join_errors(.0))]
    InvalidOriginator(Vec<ValidationError>),

    /// Payer or originator text that cannot appear in a pain.008 document
    /// (too long, or characters XML 1.0 does not allow).
    #[error("document fields cannot be written: {}", join_errors(.0))]
    InvalidField(Vec<ValidationError>),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidationError {
    /// Path to the invalid field (e.g. "originator.message_id").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
