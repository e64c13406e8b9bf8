use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use super::{
    arbitrary::{Utf8ish, Utf16ish, Utf32ish},
    utils::quickcheck_tests,
};
use crate::{
    ConversionFlags, ConversionResult, convert_utf8_to_wide_vec, convert_wide_to_utf8_vec,
};

/// Length a valid lead byte announces.
fn announced_len(lead: u8) -> Option<usize> {
    match lead {
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Property: strict UTF-8 validation accepts exactly what `core::str`
/// accepts and stops where it stops. The stop is `SourceExhausted` when the
/// remaining bytes are fewer than the lead byte announces, whether or not
/// they are well formed so far, and `SourceIllegal` otherwise.
#[test]
fn strict_utf8_agrees_with_core_str() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(bytes: Utf8ish) -> bool {
        let bytes = bytes.0;
        let out = convert_utf8_to_wide_vec::<u16>(&bytes, ConversionFlags::strict());
        let (valid_up_to, expected_result) = match core::str::from_utf8(&bytes) {
            Ok(_) => (bytes.len(), ConversionResult::ConversionOk),
            Err(err) => {
                let rest = &bytes[err.valid_up_to()..];
                let short = rest
                    .first()
                    .and_then(|&lead| announced_len(lead))
                    .is_some_and(|len| rest.len() < len);
                let result = if short {
                    ConversionResult::SourceExhausted
                } else {
                    ConversionResult::SourceIllegal
                };
                (err.valid_up_to(), result)
            }
        };
        let Ok(valid) = core::str::from_utf8(&bytes[..valid_up_to]) else {
            return false;
        };
        let expected: Vec<u16> = valid.encode_utf16().collect();

        out.result == expected_result && out.consumed == valid_up_to && out.output == expected
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Utf8ish) -> bool);
}

/// Property: strict UTF-16 decoding agrees with `String::from_utf16`.
#[test]
fn strict_utf16_agrees_with_std() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(units: Utf16ish) -> bool {
        let units = units.0;
        let out = convert_wide_to_utf8_vec(&units, ConversionFlags::strict());
        match String::from_utf16(&units) {
            Ok(text) => out.result.is_ok() && out.output == text.as_bytes(),
            Err(_) => {
                let Ok(prefix) = String::from_utf16(&units[..out.consumed]) else {
                    return false;
                };
                !out.result.is_ok() && out.output == prefix.as_bytes()
            }
        }
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Utf16ish) -> bool);
}

/// Property: a UTF-32 unit converts exactly when it is a `char`.
#[test]
fn strict_utf32_accepts_exactly_chars() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(units: Utf32ish) -> bool {
        let units = units.0;
        let out = convert_wide_to_utf8_vec(&units, ConversionFlags::strict());
        let valid = units
            .iter()
            .take_while(|&&unit| char::from_u32(unit).is_some())
            .count();
        let expected: String = units[..valid]
            .iter()
            .filter_map(|&unit| char::from_u32(unit))
            .collect();
        let expected_result = if valid == units.len() {
            ConversionResult::ConversionOk
        } else {
            ConversionResult::SourceIllegal
        };

        out.result == expected_result && out.consumed == valid && out.output == expected.as_bytes()
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Utf32ish) -> bool);
}
