use crate::{
    CodePoint, ConversionResult, MAX_CODE_POINT, TargetCursor, WideUnit, wide::is_surrogate,
};

/// Number of bytes in the minimal UTF-8 form of `code_point`.
pub(crate) fn utf8_len(code_point: CodePoint) -> usize {
    match code_point {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    }
}

/// Writes the minimal UTF-8 form of `code_point` to the front of `dst`.
///
/// Returns the number of bytes written, or `None` without touching `dst`
/// when it is too short. Surrogate values get their three-byte generalized
/// form; callers only pass them when lone surrogates are allowed.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn encode_utf8_into(code_point: CodePoint, dst: &mut [u8]) -> Option<usize> {
    debug_assert!(code_point <= MAX_CODE_POINT);
    let len = utf8_len(code_point);
    let dst = dst.get_mut(..len)?;

    let mut bytes = [0u8; 4];
    match len {
        1 => bytes[0] = code_point as u8,
        2 => {
            bytes[0] = 0xC0 | (code_point >> 6) as u8;
            bytes[1] = 0x80 | (code_point & 0x3F) as u8;
        }
        3 => {
            bytes[0] = 0xE0 | (code_point >> 12) as u8;
            bytes[1] = 0x80 | ((code_point >> 6) & 0x3F) as u8;
            bytes[2] = 0x80 | (code_point & 0x3F) as u8;
        }
        _ => {
            bytes[0] = 0xF0 | (code_point >> 18) as u8;
            bytes[1] = 0x80 | ((code_point >> 12) & 0x3F) as u8;
            bytes[2] = 0x80 | ((code_point >> 6) & 0x3F) as u8;
            bytes[3] = 0x80 | (code_point & 0x3F) as u8;
        }
    }
    dst.copy_from_slice(&bytes[..len]);
    Some(len)
}

fn is_scalar(code_point: CodePoint) -> bool {
    code_point <= MAX_CODE_POINT && !is_surrogate(code_point)
}

/// Encodes one scalar value as UTF-8 at the target cursor.
///
/// Returns [`ConversionResult::TargetExhausted`] without writing anything if
/// the minimal form does not fit, and [`ConversionResult::SourceIllegal`] if
/// `code_point` is a surrogate or above U+10FFFF.
pub fn encode_utf8(code_point: CodePoint, target: &mut TargetCursor<'_, u8>) -> ConversionResult {
    if !is_scalar(code_point) {
        return ConversionResult::SourceIllegal;
    }
    match encode_utf8_into(code_point, target.spare()) {
        Some(written) => {
            target.advance(written);
            ConversionResult::ConversionOk
        }
        None => ConversionResult::TargetExhausted,
    }
}

/// Encodes one scalar value as wide units at the target cursor.
///
/// With 16-bit units a value above the BMP needs two free units; if only
/// one is free nothing is written and the result is
/// [`ConversionResult::TargetExhausted`]. Surrogates and values above
/// U+10FFFF return [`ConversionResult::SourceIllegal`].
pub fn encode_wide<W: WideUnit>(
    code_point: CodePoint,
    target: &mut TargetCursor<'_, W>,
) -> ConversionResult {
    if !is_scalar(code_point) {
        return ConversionResult::SourceIllegal;
    }
    match W::encode_into(code_point, target.spare()) {
        Some(written) => {
            target.advance(written);
            ConversionResult::ConversionOk
        }
        None => ConversionResult::TargetExhausted,
    }
}
