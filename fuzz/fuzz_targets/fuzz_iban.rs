#![no_main]

use libfuzzer_sys::fuzz_target;
use lastschrift::core::*;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic; malformed input is simply invalid.
        let _ = validate_iban(s);
        let _ = validate_iban(&normalize_iban(s));
        let _ = is_valid_bic(s);
        let _ = is_valid_creditor_id(s);
        let _ = is_valid_message_id(s);
    }
});
