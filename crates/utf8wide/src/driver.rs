//! The conversion loop.
//!
//! Each iteration decodes one code point, encodes it, and only then moves
//! both cursors. A code point that does not fit in the target therefore
//! leaves the source cursor at its first unit, and a malformed sequence
//! leaves the target exactly as it was after the last complete code point.

use crate::{
    CodePoint, ConversionFlags, ConversionResult, Decoded, Malformed, SourceCursor,
    TargetCursor, WideUnit,
    decode::{resolve, scan_utf8},
    encode::encode_utf8_into,
};

/// Converts UTF-8 bytes to wide units.
///
/// Runs until the source is consumed or the first code point that cannot be
/// decoded or does not fit. Both cursors are advanced in place past exactly
/// the units consumed and produced, whatever the result. Never allocates.
///
/// ```rust
/// use utf8wide::{
///     ConversionFlags, ConversionResult, SourceCursor, TargetCursor, convert_utf8_to_wide,
/// };
///
/// let mut out = [0u32; 8];
/// let mut source = SourceCursor::new(b"ab\xF0\x9F");
/// let mut target = TargetCursor::new(&mut out);
/// let result = convert_utf8_to_wide(&mut source, &mut target, ConversionFlags::strict());
/// assert_eq!(result, ConversionResult::SourceExhausted);
/// assert_eq!(source.position(), 2);
/// assert_eq!(target.written(), &[0x61, 0x62]);
/// ```
pub fn convert_utf8_to_wide<W: WideUnit>(
    source: &mut SourceCursor<'_, u8>,
    target: &mut TargetCursor<'_, W>,
    flags: ConversionFlags,
) -> ConversionResult {
    transcode(
        source,
        target,
        flags,
        |src| scan_utf8(src, flags.allow_lone_surrogates),
        W::encode_into,
    )
}

/// Converts wide units to UTF-8 bytes.
///
/// The counterpart of [`convert_utf8_to_wide`], with the same cursor
/// contract. A high surrogate that ends a UTF-16 source reports
/// [`ConversionResult::SourceExhausted`] and is left unconsumed.
pub fn convert_wide_to_utf8<W: WideUnit>(
    source: &mut SourceCursor<'_, W>,
    target: &mut TargetCursor<'_, u8>,
    flags: ConversionFlags,
) -> ConversionResult {
    transcode(
        source,
        target,
        flags,
        |src| W::scan(src, flags.allow_lone_surrogates),
        encode_utf8_into,
    )
}

#[inline]
fn transcode<S, T>(
    source: &mut SourceCursor<'_, S>,
    target: &mut TargetCursor<'_, T>,
    flags: ConversionFlags,
    scan: impl Fn(&[S]) -> Result<Decoded, Malformed>,
    encode: impl Fn(CodePoint, &mut [T]) -> Option<usize>,
) -> ConversionResult {
    while !source.is_empty() {
        let decoded = match resolve(scan(source.remaining()), flags) {
            Ok(decoded) => decoded,
            Err(result) => return result,
        };
        let Some(written) = encode(decoded.code_point, target.spare()) else {
            return ConversionResult::TargetExhausted;
        };
        source.advance(decoded.consumed);
        target.advance(written);
    }
    ConversionResult::ConversionOk
}
