//! # lastschrift
//!
//! SEPA Core Direct Debit batches for member contributions: validate payer
//! bank data, price every eligible payer and write one pain.008.003.02 file.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! IBANs are checked with the ISO 7064 mod-97 checksum.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lastschrift::core::*;
//! use rust_decimal_macros::dec;
//!
//! let payers = vec![
//!     PayerBuilder::new("M-001", "Anna", "Huber")
//!         .iban("DE89370400440532013000")
//!         .bic("COBADEFFXXX")
//!         .mandate_signed(NaiveDate::from_ymd_opt(2021, 4, 1).unwrap())
//!         .build(),
//!     PayerBuilder::new("M-002", "Max", "Maier")
//!         .iban("DE89370400440532013000")
//!         .build(),
//! ];
//!
//! let partition = partition_payers(payers);
//! assert_eq!(partition.eligible.len(), 1);
//! assert!(partition.rejected[0].has_reason(RejectionReason::MissingBic));
//!
//! let resolved = ContributionPlan::uniform(dec!(30))
//!     .resolve(&partition.eligible, ControlSumRounding::HalfEven)
//!     .unwrap();
//! assert_eq!(resolved.control_sum(), dec!(30.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Payer types, IBAN/BIC checks, filtering, contributions |
//! | `pain008` (default) | pain.008.003.02 document model, XML rendering, generator |
//! | `parallel` | Per-payer work on the rayon thread pool |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "pain008")]
pub mod pain008;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
