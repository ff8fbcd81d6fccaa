#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use lastschrift::core::*;
use lastschrift::pain008::SepaBatchGenerator;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Some(date) = NaiveDate::from_ymd_opt(2024, 3, 1) else {
        return;
    };

    // Each line is "first|last|iban|bic"; fields go straight into the XML.
    let payers: Vec<Payer> = s
        .lines()
        .enumerate()
        .map(|(i, line)| {
            let mut parts = line.split('|');
            let first = parts.next().unwrap_or_default();
            let last = parts.next().unwrap_or_default();
            PayerBuilder::new(format!("M-{i}"), first, last)
                .iban(parts.next().unwrap_or("DE89370400440532013000"))
                .bic(parts.next().unwrap_or("COBADEFFXXX"))
                .mandate_signed(date)
                .build()
        })
        .collect();

    let originator = OriginatorBuilder::new(s.lines().next().unwrap_or_default(), date)
        .account("DE89370400440532013000", "COBADEFFXXX")
        .creditor_id("DE98ZZZ09999999999")
        .message_id("FUZZ")
        .payment_info_id("FUZZ-1")
        .purpose(s)
        .build();

    let Some(and_time) = date.and_hms_opt(0, 0, 0) else {
        return;
    };
    let _ = SepaBatchGenerator::new().created_at(and_time).generate(
        &originator,
        payers,
        &ContributionPlan::uniform(Decimal::ONE),
        SequenceType::Recurring,
    );
});
