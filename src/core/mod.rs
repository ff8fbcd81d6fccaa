//! Core direct debit types, payer eligibility and contribution pricing.
//!
//! This module decides which payers may enter a batch (IBAN checksum,
//! BIC and mandate presence) and what each of them is charged.

mod builder;
mod contribution;
mod error;
mod filter;
pub mod iban;
pub(crate) mod parallel;
mod types;
mod validation;

pub use builder::*;
pub use contribution::*;
pub use error::*;
pub use filter::*;
pub use iban::{is_valid_bic, is_valid_creditor_id, is_valid_message_id, normalize_iban, validate_iban};
pub use types::*;
pub use validation::*;
