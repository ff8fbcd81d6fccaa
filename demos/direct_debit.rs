//! Generate a member contribution batch and print the XML.
//!
//! Run with: `RUST_LOG=lastschrift=debug cargo run --example direct_debit`

use chrono::NaiveDate;
use lastschrift::core::*;
use lastschrift::pain008::{GeneratorOptions, SepaBatchGenerator};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lastschrift=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).ok_or("invalid date");

    let originator = OriginatorBuilder::new("Trachtenverein Edelweiß e.V.", date(2024, 3, 1)?)
        .account("DE89370400440532013000", "COBADEFFXXX")
        .creditor_id("DE98ZZZ09999999999")
        .message_id("BEITRAG-2024")
        .payment_info_id("BEITRAG-2024-1")
        .purpose("Mitgliedsbeitrag 2024")
        .build();

    let payers = vec![
        PayerBuilder::new("M-001", "Anna", "Huber")
            .iban(normalize_iban("de02 1005 0000 0024 2906 61"))
            .bic("BELADEBEXXX")
            .mandate_signed(date(2019, 5, 4)?)
            .build(),
        PayerBuilder::new("M-002", "Lukas", "Gruber")
            .account_holder("Maria", "Gruber")
            .iban("AT611904300234573201")
            .bic("BKAUATWW")
            .mandate_signed(date(2021, 11, 30)?)
            .build(),
        PayerBuilder::new("M-003", "Max", "Maier")
            .iban("DE45500105175407324931")
            .bic("INGDDEFFXXX")
            .mandate_signed(date(2022, 1, 10)?)
            .build(),
        PayerBuilder::new("M-004", "Eva", "Berger")
            .iban("DE44500105175407324931")
            .build(),
    ];

    let plan = ContributionPlan::uniform(dec!(36.00)).with_override("M-002", dec!(18.00));
    let options = GeneratorOptions {
        validate_originator: true,
        ..GeneratorOptions::default()
    };

    let batch = match SepaBatchGenerator::with_options(options).generate(
        &originator,
        payers,
        &plan,
        SequenceType::First,
    ) {
        Ok(batch) => batch,
        Err(err) => {
            for rejected in &err.rejected {
                eprintln!("excluded: {rejected}");
            }
            return Err(err.into());
        }
    };

    for rejected in &batch.rejected {
        eprintln!("excluded: {rejected}");
    }
    eprintln!(
        "{} transactions, control sum {} EUR",
        batch.document.number_of_transactions(),
        batch.control_sum()
    );
    println!("{}", batch.xml);
    Ok(())
}
