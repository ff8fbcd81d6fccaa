//! IBAN, BIC and SEPA identifier checks.
//!
//! All checks are pure and never panic; malformed input yields `false`.

/// Shortest IBAN accepted (Norway, 15 characters).
pub const IBAN_MIN_LENGTH: usize = 15;
/// Longest IBAN permitted by ISO 13616.
pub const IBAN_MAX_LENGTH: usize = 34;
/// Maximum length of the message identification (`MsgId`).
pub const MAX_MESSAGE_ID_LENGTH: usize = 35;
/// Maximum length of the payment information identification (`PmtInfId`).
pub const MAX_PAYMENT_INFO_ID_LENGTH: usize = 35;
/// Maximum length of SEPA name fields (`Nm`).
pub const MAX_NAME_LENGTH: usize = 70;
/// Maximum length of the mandate reference (`MndtId`).
pub const MAX_MANDATE_ID_LENGTH: usize = 35;
/// Maximum length of the creditor scheme identifier.
pub const MAX_CREDITOR_ID_LENGTH: usize = 35;
/// Maximum length of unstructured remittance text (`Ustrd`).
pub const MAX_REMITTANCE_LENGTH: usize = 140;
/// Maximum length of a BIC.
pub const MAX_BIC_LENGTH: usize = 11;

const IBAN_CHECKSUM_MODULUS: u32 = 97;
const CREDITOR_BUSINESS_CODE: &str = "ZZZ";

/// Check an IBAN's structure and its ISO 7064 mod-97 checksum.
///
/// The input must already be compact and uppercase: two letters (country),
/// two digits (check digits), then `[A-Z0-9]` up to 34 characters in total.
/// Use [`normalize_iban`] for user-entered values.
///
/// ```
/// use lastschrift::core::validate_iban;
///
/// assert!(validate_iban("DE89370400440532013000"));
/// assert!(!validate_iban("DE89370400440532013001"));
/// assert!(!validate_iban("XX00"));
/// ```
pub fn validate_iban(iban: &str) -> bool {
    let bytes = iban.as_bytes();
    if bytes.len() < IBAN_MIN_LENGTH || bytes.len() > IBAN_MAX_LENGTH {
        return false;
    }
    if !bytes[..2].iter().all(u8::is_ascii_uppercase) || !bytes[2..4].iter().all(u8::is_ascii_digit)
    {
        return false;
    }

    // Country code and check digits move to the end; letters expand to 10..=35.
    // Reducing after every step keeps the remainder of the arbitrarily long
    // number without materializing it.
    let mut remainder: u32 = 0;
    for &b in bytes[4..].iter().chain(&bytes[..4]) {
        remainder = match b {
            b'0'..=b'9' => (remainder * 10 + u32::from(b - b'0')) % IBAN_CHECKSUM_MODULUS,
            b'A'..=b'Z' => (remainder * 100 + u32::from(b - b'A') + 10) % IBAN_CHECKSUM_MODULUS,
            _ => return false,
        };
    }
    remainder == 1
}

/// Remove whitespace and uppercase an IBAN as typed by a human
/// (e.g. "de89 3704 0044 0532 0130 00").
pub fn normalize_iban(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Check a BIC by length (8 or 11) and alphabet (`[A-Z0-9]`).
///
/// The bank directory is not consulted.
pub fn is_valid_bic(bic: &str) -> bool {
    (bic.len() == 8 || bic.len() == 11)
        && bic
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Check a SEPA creditor scheme identifier (Gläubiger-Identifikationsnummer).
///
/// Layout: country code, check digits, business code `ZZZ`, national
/// identifier. The business code is excluded from the checksum, so the
/// remainder is checked like an IBAN.
///
/// ```
/// use lastschrift::core::is_valid_creditor_id;
///
/// assert!(is_valid_creditor_id("DE98ZZZ09999999999"));
/// assert!(!is_valid_creditor_id("DE02100500000024290661"));
/// ```
pub fn is_valid_creditor_id(creditor_id: &str) -> bool {
    let compact: String = creditor_id.chars().filter(|c| !c.is_whitespace()).collect();
    if !compact.is_ascii() || compact.len() < 7 || &compact[4..7] != CREDITOR_BUSINESS_CODE {
        return false;
    }
    let without_business_code = format!("{}{}", &compact[..4], &compact[7..]);
    validate_iban(&without_business_code)
}

/// Check a message or payment information identifier against the SEPA
/// Latin character set and the 35 character limit.
pub fn is_valid_message_id(id: &str) -> bool {
    id.chars().count() <= MAX_MESSAGE_ID_LENGTH && id.chars().all(is_sepa_id_char)
}

fn is_sepa_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | ' ' | '-' | '?' | ':' | '(' | ')' | '.' | ',' | '\'' | '+')
}
