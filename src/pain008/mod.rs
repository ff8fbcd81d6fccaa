//! SEPA Direct Debit batch documents in the pain.008.003.02 dialect.
//!
//! [`SepaBatchGenerator`] runs the whole pipeline: filter payers, price them,
//! assemble a [`BatchDocument`] and render it as XML. The individual steps
//! are public for callers that need them separately.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use lastschrift::core::*;
//! use lastschrift::pain008::SepaBatchGenerator;
//! use rust_decimal_macros::dec;
//!
//! let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
//! let originator = OriginatorBuilder::new("Trachtenverein", date(2024, 3, 1))
//!     .account("DE89370400440532013000", "COBADEFFXXX")
//!     .creditor_id("DE98ZZZ09999999999")
//!     .message_id("BEITRAG-2024")
//!     .payment_info_id("BEITRAG-2024-1")
//!     .purpose("Mitgliedsbeitrag 2024")
//!     .build();
//! let payers = vec![
//!     PayerBuilder::new("M-001", "Anna", "Huber")
//!         .iban("DE02100500000024290661")
//!         .bic("BELADEBEXXX")
//!         .mandate_signed(date(2019, 5, 4))
//!         .build(),
//! ];
//!
//! let batch = SepaBatchGenerator::new()
//!     .created_at(date(2024, 2, 20).and_hms_opt(12, 0, 0).unwrap())
//!     .generate(&originator, payers, &ContributionPlan::uniform(dec!(25)), SequenceType::Recurring)
//!     .unwrap();
//! assert_eq!(batch.document.number_of_transactions(), 1);
//! assert!(batch.xml.contains("<CtrlSum>25.00</CtrlSum>"));
//! ```

mod document;
mod generator;
mod render;
pub(crate) mod xml_utils;

use chrono::{NaiveDate, NaiveDateTime};

pub use document::{BatchDocument, DirectDebitTransaction, build_batch_document};
pub use generator::{GeneratedBatch, GenerationError, GeneratorOptions, SepaBatchGenerator};
pub use render::to_pain008_xml;
pub use xml_utils::format_amount;

/// pain.008.003.02 namespace URI.
pub const PAIN008_NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:pain.008.003.02";
/// XML Schema instance namespace URI.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// `xsi:schemaLocation` value.
pub const PAIN008_SCHEMA_LOCATION: &str =
    "urn:iso:std:iso:20022:tech:xsd:pain.008.003.02 pain.008.003.02.xsd";

/// `PmtMtd`: direct debit.
pub const PAYMENT_METHOD_DIRECT_DEBIT: &str = "DD";
/// `SvcLvl/Cd`.
pub const SERVICE_LEVEL: &str = "SEPA";
/// `LclInstrm/Cd`: SEPA core direct debit.
pub const LOCAL_INSTRUMENT: &str = "CORE";
/// `ChrgBr`: following service level (shared).
pub const CHARGE_BEARER: &str = "SLEV";
/// `CdtrSchmeId/.../SchmeNm/Prtry`.
pub const SCHEME_NAME: &str = "SEPA";
/// `EndToEndId` sentinel; end-to-end references are not tracked.
pub const NOT_PROVIDED: &str = "NOTPROVIDED";
/// `InstdAmt` currency.
pub const CURRENCY: &str = "EUR";

/// Date as written to `ReqdColltnDt` and `DtOfSgntr` (yyyy-MM-dd).
pub fn sepa_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Timestamp as written to `CreDtTm` (yyyy-MM-ddTHH:mm:ss, local time).
pub fn sepa_date_time(date_time: NaiveDateTime) -> String {
    date_time.format("%Y-%m-%dT%H:%M:%S").to_string()
}
