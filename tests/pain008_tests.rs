#![cfg(feature = "pain008")]

use chrono::{NaiveDate, NaiveDateTime};
use lastschrift::core::*;
use lastschrift::pain008::{self, BatchDocument, build_batch_document, format_amount, to_pain008_xml};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn created_at() -> NaiveDateTime {
    date(2024, 2, 20).and_hms_opt(14, 5, 9).unwrap()
}

fn originator() -> Originator {
    OriginatorBuilder::new("Trachtenverein Edelweiß e.V.", date(2024, 3, 1))
        .account("DE89370400440532013000", "COBADEFFXXX")
        .creditor_id("DE98ZZZ09999999999")
        .message_id("BEITRAG-2024")
        .payment_info_id("BEITRAG-2024-1")
        .purpose("Mitgliedsbeitrag 2024")
        .build()
}

fn payers() -> Vec<Payer> {
    vec![
        PayerBuilder::new("M-001", "Anna", "Huber")
            .iban("DE02100500000024290661")
            .bic("BELADEBEXXX")
            .mandate_signed(date(2019, 5, 4))
            .build(),
        PayerBuilder::new("M-002", "Lukas", "Gruber")
            .account_holder("Maria", "Gruber")
            .iban("AT611904300234573201")
            .bic("BKAUATWW")
            .mandate_signed(date(2021, 11, 30))
            .mandate_amended(true)
            .build(),
        PayerBuilder::new("M-003", "Sophie", "Müller & Söhne")
            .iban("DE44500105175407324931")
            .bic("INGDDEFFXXX")
            .mandate_signed(date(2023, 1, 2))
            .build(),
    ]
}

fn document(sequence_type: SequenceType) -> BatchDocument {
    let partition = partition_payers(payers());
    let plan = ContributionPlan::individual([
        ("M-001", dec!(10.00)),
        ("M-002", dec!(15.50)),
        ("M-003", dec!(20.25)),
    ]);
    let contributions = plan
        .resolve(&partition.eligible, ControlSumRounding::HalfEven)
        .unwrap();
    build_batch_document(
        &originator(),
        &partition.eligible,
        &contributions,
        sequence_type,
        created_at(),
    )
    .unwrap()
}

/// Assert that `needles` occur in `haystack` in the given order.
fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        match haystack[from..].find(needle) {
            Some(pos) => from += pos + needle.len(),
            None => panic!("'{needle}' not found after byte {from}"),
        }
    }
}

// --- Document model ---

#[test]
fn document_mirrors_inputs() {
    let doc = document(SequenceType::Recurring);
    assert_eq!(doc.message_id(), "BEITRAG-2024");
    assert_eq!(doc.payment_info_id(), "BEITRAG-2024-1");
    assert_eq!(doc.initiating_party(), "Trachtenverein Edelweiß e.V.");
    assert_eq!(doc.creditor_name(), "Trachtenverein Edelweiß e.V.");
    assert_eq!(doc.creditor_scheme_id(), "DE98ZZZ09999999999");
    assert_eq!(doc.collection_date(), date(2024, 3, 1));
    assert_eq!(doc.created_at(), created_at());
    assert_eq!(doc.control_sum(), dec!(45.75));
    assert_eq!(doc.number_of_transactions(), 3);
}

#[test]
fn transactions_follow_payer_order() {
    let doc = document(SequenceType::Recurring);
    let ids: Vec<&str> = doc.transactions().iter().map(|t| t.mandate_id.as_str()).collect();
    assert_eq!(ids, ["M-001", "M-002", "M-003"]);

    let second = &doc.transactions()[1];
    assert_eq!(second.amount, dec!(15.50));
    assert_eq!(second.debtor_name, "Gruber, Maria");
    assert_eq!(second.debtor_iban, "AT611904300234573201");
    assert_eq!(second.mandate_signed, date(2021, 11, 30));
    assert!(second.mandate_amended);
    assert_eq!(second.end_to_end_id, pain008::NOT_PROVIDED);
    assert_eq!(second.remittance, "Mitgliedsbeitrag 2024");
}

#[test]
fn control_sum_matches_transaction_amounts() {
    let doc = document(SequenceType::First);
    let sum: rust_decimal::Decimal = doc.transactions().iter().map(|t| t.amount).sum();
    assert_eq!(sum, doc.control_sum());
}

#[test]
fn empty_batch_is_an_error() {
    let contributions = ContributionPlan::uniform(dec!(10))
        .resolve(&[], ControlSumRounding::HalfEven)
        .unwrap();
    let err = build_batch_document(
        &originator(),
        &[],
        &contributions,
        SequenceType::Recurring,
        created_at(),
    )
    .unwrap_err();
    assert_eq!(err, SepaError::EmptyBatch);
}

#[test]
fn contributions_must_cover_exactly_the_batch() {
    let both = partition_payers(payers().into_iter().take(2).collect());
    let only_first = partition_payers(payers().into_iter().take(1).collect());
    let contributions = ContributionPlan::uniform(dec!(10.00))
        .resolve(&both.eligible, ControlSumRounding::HalfEven)
        .unwrap();

    let err = build_batch_document(
        &originator(),
        &only_first.eligible,
        &contributions,
        SequenceType::Recurring,
        created_at(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        SepaError::ContributionMismatch {
            payers: 1,
            contributions: 2,
        }
    );
}

fn build_for(payer: Payer) -> Result<BatchDocument, SepaError> {
    let partition = partition_payers(vec![payer]);
    let contributions = ContributionPlan::uniform(dec!(10.00))
        .resolve(&partition.eligible, ControlSumRounding::HalfEven)?;
    build_batch_document(
        &originator(),
        &partition.eligible,
        &contributions,
        SequenceType::Recurring,
        created_at(),
    )
}

fn payer_named(id: &str, first: &str, last: &str) -> Payer {
    PayerBuilder::new(id, first, last)
        .iban("DE02100500000024290661")
        .bic("BELADEBEXXX")
        .mandate_signed(date(2019, 5, 4))
        .build()
}

#[test]
fn control_characters_in_names_are_rejected() {
    let err = build_for(payer_named("M-004", "Anna", "X\u{1}Y")).unwrap_err();
    assert_eq!(
        err,
        SepaError::InvalidField(vec![ValidationError::new(
            "payer[M-004].debtor_name",
            "contains characters not allowed in XML",
        )])
    );
}

#[test]
fn names_longer_than_seventy_characters_are_rejected() {
    // "<65 x A>, Anna" is 71 characters.
    let err = build_for(payer_named("M-005", "Anna", &"A".repeat(65))).unwrap_err();
    assert_eq!(
        err,
        SepaError::InvalidField(vec![ValidationError::new(
            "payer[M-005].debtor_name",
            "71 characters exceed the limit of 70",
        )])
    );

    let doc = build_for(payer_named("M-005", "Ann", &"A".repeat(65))).unwrap();
    assert_eq!(doc.transactions()[0].debtor_name.chars().count(), 70);
}

#[test]
fn overlong_originator_fields_are_rejected() {
    let mut originator = originator();
    originator.message_id = "M".repeat(36);
    originator.purpose = "Beitrag\u{0}".to_string();
    let partition = partition_payers(payers());
    let contributions = ContributionPlan::uniform(dec!(10.00))
        .resolve(&partition.eligible, ControlSumRounding::HalfEven)
        .unwrap();

    let err = build_batch_document(
        &originator,
        &partition.eligible,
        &contributions,
        SequenceType::Recurring,
        created_at(),
    )
    .unwrap_err();
    let SepaError::InvalidField(fields) = &err else {
        panic!("expected InvalidField, got {err:?}");
    };
    let names: Vec<_> = fields.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(names, ["originator.message_id", "originator.purpose"]);
}

// --- XML ---

#[test]
fn header_carries_namespace_and_schema_location() {
    let xml = document(SequenceType::Recurring).to_xml().unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(r#"xmlns="urn:iso:std:iso:20022:tech:xsd:pain.008.003.02""#));
    assert!(xml.contains(r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#));
    assert!(xml.contains(
        r#"xsi:schemaLocation="urn:iso:std:iso:20022:tech:xsd:pain.008.003.02 pain.008.003.02.xsd""#
    ));
}

#[test]
fn group_header_fields() {
    let xml = document(SequenceType::Recurring).to_xml().unwrap();
    assert_in_order(
        &xml,
        &[
            "<CstmrDrctDbtInitn>",
            "<GrpHdr>",
            "<MsgId>BEITRAG-2024</MsgId>",
            "<CreDtTm>2024-02-20T14:05:09</CreDtTm>",
            "<NbOfTxs>3</NbOfTxs>",
            "<CtrlSum>45.75</CtrlSum>",
            "<InitgPty>",
            "<Nm>Trachtenverein Edelweiß e.V.</Nm>",
            "</InitgPty>",
            "</GrpHdr>",
        ],
    );
}

#[test]
fn payment_information_element_order() {
    let xml = document(SequenceType::Recurring).to_xml().unwrap();
    assert_in_order(
        &xml,
        &[
            "<PmtInf>",
            "<PmtInfId>BEITRAG-2024-1</PmtInfId>",
            "<PmtMtd>DD</PmtMtd>",
            "<BtchBookg>true</BtchBookg>",
            "<NbOfTxs>3</NbOfTxs>",
            "<CtrlSum>45.75</CtrlSum>",
            "<PmtTpInf>",
            "<SvcLvl>",
            "<Cd>SEPA</Cd>",
            "<LclInstrm>",
            "<Cd>CORE</Cd>",
            "<SeqTp>RCUR</SeqTp>",
            "</PmtTpInf>",
            "<ReqdColltnDt>2024-03-01</ReqdColltnDt>",
            "<Cdtr>",
            "<CdtrAcct>",
            "<IBAN>DE89370400440532013000</IBAN>",
            "<CdtrAgt>",
            "<BIC>COBADEFFXXX</BIC>",
            "<ChrgBr>SLEV</ChrgBr>",
            "<CdtrSchmeId>",
            "<PrvtId>",
            "<Othr>",
            "<Id>DE98ZZZ09999999999</Id>",
            "<SchmeNm>",
            "<Prtry>SEPA</Prtry>",
            "</CdtrSchmeId>",
            "<DrctDbtTxInf>",
        ],
    );
}

#[test]
fn transaction_element_order() {
    let xml = document(SequenceType::Recurring).to_xml().unwrap();
    assert_in_order(
        &xml,
        &[
            "<DrctDbtTxInf>",
            "<EndToEndId>NOTPROVIDED</EndToEndId>",
            r#"<InstdAmt Ccy="EUR">10.00</InstdAmt>"#,
            "<MndtRltdInf>",
            "<MndtId>M-001</MndtId>",
            "<DtOfSgntr>2019-05-04</DtOfSgntr>",
            "<AmdmntInd>false</AmdmntInd>",
            "</MndtRltdInf>",
            "<DbtrAgt>",
            "<BIC>BELADEBEXXX</BIC>",
            "<Dbtr>",
            "<Nm>Huber, Anna</Nm>",
            "<DbtrAcct>",
            "<IBAN>DE02100500000024290661</IBAN>",
            "<RmtInf>",
            "<Ustrd>Mitgliedsbeitrag 2024</Ustrd>",
            "</DrctDbtTxInf>",
            "<MndtId>M-002</MndtId>",
            "<AmdmntInd>true</AmdmntInd>",
            "<Nm>Gruber, Maria</Nm>",
            "<MndtId>M-003</MndtId>",
            "</PmtInf>",
            "</CstmrDrctDbtInitn>",
            "</Document>",
        ],
    );
}

#[test]
fn transaction_count_matches_header() {
    let doc = document(SequenceType::Recurring);
    let xml = to_pain008_xml(&doc).unwrap();
    assert_eq!(xml.matches("<DrctDbtTxInf>").count(), doc.number_of_transactions());
    assert_eq!(xml.matches("<NbOfTxs>3</NbOfTxs>").count(), 2);
    assert_eq!(xml.matches("<CtrlSum>45.75</CtrlSum>").count(), 2);
}

#[test]
fn first_collection_sequence_type() {
    let xml = document(SequenceType::First).to_xml().unwrap();
    assert!(xml.contains("<SeqTp>FRST</SeqTp>"));
    assert!(!xml.contains("RCUR"));
}

#[test]
fn names_are_escaped() {
    let xml = document(SequenceType::Recurring).to_xml().unwrap();
    assert!(xml.contains("<Nm>Müller &amp; Söhne, Sophie</Nm>"));
    assert!(!xml.contains("Müller & Söhne"));
}

#[test]
fn rendering_is_deterministic() {
    let doc = document(SequenceType::Recurring);
    assert_eq!(doc.to_xml().unwrap(), doc.to_xml().unwrap());
    assert_eq!(
        document(SequenceType::Recurring).to_xml().unwrap(),
        doc.to_xml().unwrap()
    );
}

// --- Formatting helpers ---

#[test]
fn amounts_have_two_decimals() {
    assert_eq!(format_amount("InstdAmt", dec!(10)).unwrap(), "10.00");
    assert_eq!(format_amount("InstdAmt", dec!(15.5)).unwrap(), "15.50");
    assert_eq!(format_amount("CtrlSum", dec!(1234.56)).unwrap(), "1234.56");
    assert!(matches!(
        format_amount("InstdAmt", dec!(10.125)),
        Err(SepaError::ExcessPrecision { .. })
    ));
}

#[test]
fn every_amount_is_written_with_two_decimals() {
    let xml = document(SequenceType::Recurring).to_xml().unwrap();
    assert!(xml.contains("<CtrlSum>45.75</CtrlSum>"));
    assert!(xml.contains(r#"<InstdAmt Ccy="EUR">10.00</InstdAmt>"#));
    assert!(xml.contains(r#"<InstdAmt Ccy="EUR">15.50</InstdAmt>"#));
    assert!(xml.contains(r#"<InstdAmt Ccy="EUR">20.25</InstdAmt>"#));
}

#[test]
fn sepa_date_formats() {
    assert_eq!(pain008::sepa_date(date(2024, 3, 1)), "2024-03-01");
    assert_eq!(pain008::sepa_date_time(created_at()), "2024-02-20T14:05:09");
}
