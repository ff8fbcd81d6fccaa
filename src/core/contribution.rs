use std::collections::{BTreeMap, HashSet};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::SepaError;
use super::types::EligiblePayer;

/// SEPA amounts are whole cents.
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// How the batch control sum is rounded to cents.
///
/// Rounding happens once on the final sum, never per term. Resolved amounts
/// are whole cents, so the exact sum is already at cent precision and the
/// modes only differ for sums computed elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlSumRounding {
    /// Round half to even (banker's rounding).
    #[default]
    HalfEven,
    /// Round half away from zero (commercial rounding).
    HalfUp,
    /// Keep the exact sum.
    Unrounded,
}

impl ControlSumRounding {
    pub fn apply(&self, sum: Decimal) -> Decimal {
        match self {
            Self::HalfEven => sum.round_dp_with_strategy(MAX_AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven),
            Self::HalfUp => sum.round_dp_with_strategy(MAX_AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero),
            Self::Unrounded => sum,
        }
    }
}

/// Contribution amounts per payer: individual overrides and an optional
/// uniform default for everyone else.
///
/// ```
/// use lastschrift::core::*;
/// use rust_decimal_macros::dec;
///
/// let plan = ContributionPlan::uniform(dec!(25.00)).with_override("M-007", dec!(12.50));
/// assert_eq!(plan.amount_for("M-007"), Some(dec!(12.50)));
/// assert_eq!(plan.amount_for("M-001"), Some(dec!(25.00)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionPlan {
    /// Individual amounts keyed by payer id.
    #[serde(default)]
    pub overrides: BTreeMap<String, Decimal>,
    /// Amount for payers without an override. `None` means override-only.
    #[serde(default)]
    pub default: Option<Decimal>,
}

impl ContributionPlan {
    /// The same amount for every payer.
    pub fn uniform(amount: Decimal) -> Self {
        Self {
            overrides: BTreeMap::new(),
            default: Some(amount),
        }
    }

    /// Individual amounts only; payers without an entry cannot be priced.
    pub fn individual<I, K>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<String>,
    {
        Self {
            overrides: overrides.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            default: None,
        }
    }

    pub fn with_default(mut self, amount: Decimal) -> Self {
        self.default = Some(amount);
        self
    }

    pub fn with_override(mut self, payer_id: impl Into<String>, amount: Decimal) -> Self {
        self.overrides.insert(payer_id.into(), amount);
        self
    }

    /// The amount a payer would be charged, if any.
    pub fn amount_for(&self, payer_id: &str) -> Option<Decimal> {
        self.overrides.get(payer_id).copied().or(self.default)
    }

    /// Price every eligible payer and compute the control sum.
    ///
    /// Fails if any payer id is empty or duplicated, if any payer has no
    /// amount (all such payers are listed), if an amount is not positive or
    /// has fractional cents, or if the sum overflows.
    pub fn resolve(
        &self,
        eligible: &[EligiblePayer],
        rounding: ControlSumRounding,
    ) -> Result<ResolvedContributions, SepaError> {
        let mut seen = HashSet::with_capacity(eligible.len());
        for payer in eligible {
            if payer.payer_id.is_empty() {
                return Err(SepaError::EmptyPayerId);
            }
            if !seen.insert(payer.payer_id.as_str()) {
                return Err(SepaError::DuplicatePayerId(payer.payer_id.clone()));
            }
        }

        let mut entries = Vec::with_capacity(eligible.len());
        let mut missing = Vec::new();
        for payer in eligible {
            match self.amount_for(&payer.payer_id) {
                Some(amount) => entries.push((payer.payer_id.clone(), amount)),
                None => missing.push(payer.payer_id.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(SepaError::MissingContribution(missing));
        }
        for (payer_id, amount) in &entries {
            if *amount <= Decimal::ZERO {
                return Err(SepaError::NonPositiveContribution {
                    payer_id: payer_id.clone(),
                    amount: *amount,
                });
            }
            if amount.normalize().scale() > MAX_AMOUNT_SCALE {
                return Err(SepaError::ExcessPrecision {
                    field: format!("contribution for payer {payer_id}"),
                    amount: *amount,
                });
            }
        }

        let exact = entries
            .iter()
            .try_fold(Decimal::ZERO, |sum, (_, amount)| sum.checked_add(*amount))
            .ok_or(SepaError::AmountOverflow)?;
        let control_sum = rounding.apply(exact);
        tracing::debug!(%exact, %control_sum, payers = entries.len(), "contributions resolved");

        Ok(ResolvedContributions {
            entries,
            control_sum,
        })
    }
}

/// One amount per eligible payer, in the payers' order, plus the control sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedContributions {
    entries: Vec<(String, Decimal)>,
    control_sum: Decimal,
}

impl ResolvedContributions {
    pub fn control_sum(&self) -> Decimal {
        self.control_sum
    }

    /// Amount at the payer's position in the eligible list.
    pub fn amount_at(&self, index: usize) -> Option<Decimal> {
        self.entries.get(index).map(|(_, amount)| *amount)
    }

    /// Payer id and amount at a position in the eligible list.
    pub fn entry_at(&self, index: usize) -> Option<(&str, Decimal)> {
        self.entries
            .get(index)
            .map(|(id, amount)| (id.as_str(), *amount))
    }

    /// Amount by payer id.
    pub fn get(&self, payer_id: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(id, _)| id == payer_id)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(id, amount)| (id.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
