use super::error::ValidationError;
use super::iban::*;
use super::types::Originator;

/// Check the originator's SEPA fields.
/// Returns all validation errors found (not just the first).
///
/// The generator does not call this unless
/// `GeneratorOptions::validate_originator` is set; by default the caller
/// is trusted to supply a correct originator.
pub fn validate_originator(originator: &Originator) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_name(&originator.creator, "originator.creator", &mut errors);
    validate_name(&originator.creditor, "originator.creditor", &mut errors);

    validate_identifier(
        &originator.message_id,
        "originator.message_id",
        MAX_MESSAGE_ID_LENGTH,
        &mut errors,
    );
    validate_identifier(
        &originator.payment_info_id,
        "originator.payment_info_id",
        MAX_PAYMENT_INFO_ID_LENGTH,
        &mut errors,
    );

    if !validate_iban(&originator.iban) {
        errors.push(ValidationError::new(
            "originator.iban",
            format!("'{}' is not a valid IBAN", originator.iban),
        ));
    }

    if !is_valid_bic(&originator.bic) {
        errors.push(ValidationError::new(
            "originator.bic",
            format!("'{}' is not a valid BIC (8 or 11 characters A-Z, 0-9)", originator.bic),
        ));
    }

    if !is_valid_creditor_id(&originator.creditor_id) {
        errors.push(ValidationError::new(
            "originator.creditor_id",
            format!("'{}' is not a valid creditor identifier", originator.creditor_id),
        ));
    }

    validate_document_text(
        &originator.purpose,
        "originator.purpose",
        MAX_REMITTANCE_LENGTH,
        &mut errors,
    );

    errors
}

fn validate_name(name: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if name.trim().is_empty() {
        errors.push(ValidationError::new(field, "name must not be empty"));
    } else if name.chars().count() > MAX_NAME_LENGTH {
        errors.push(ValidationError::new(
            field,
            format!("name must not exceed {MAX_NAME_LENGTH} characters"),
        ));
    }
}

fn validate_identifier(id: &str, field: &str, max_len: usize, errors: &mut Vec<ValidationError>) {
    if id.trim().is_empty() {
        errors.push(ValidationError::new(field, "identifier must not be empty"));
    } else if id.chars().count() > max_len {
        errors.push(ValidationError::new(
            field,
            format!("identifier must not exceed {max_len} characters"),
        ));
    } else if !is_valid_message_id(id) {
        errors.push(ValidationError::new(
            field,
            "identifier contains characters outside the SEPA character set",
        ));
    }
}

/// Whether every character may appear in XML 1.0 character data.
pub fn is_xml_text(text: &str) -> bool {
    text.chars().all(|c| {
        matches!(c,
            '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}')
    })
}

/// Check a value that is written verbatim into a pain.008 document: XML 1.0
/// characters only, at most `max_len` characters.
pub fn validate_document_text(
    value: &str,
    field: &str,
    max_len: usize,
    errors: &mut Vec<ValidationError>,
) {
    if !is_xml_text(value) {
        errors.push(ValidationError::new(
            field,
            "contains characters not allowed in XML",
        ));
    }
    let len = value.chars().count();
    if len > max_len {
        errors.push(ValidationError::new(
            field,
            format!("{len} characters exceed the limit of {max_len}"),
        ));
    }
}
