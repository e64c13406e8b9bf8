//! Decoding one code point at a time.
//!
//! The scanners here look at the front of a slice and report either a code
//! point with its length or why no code point could be read. They never look
//! at flags other than `allow_lone_surrogates`; substitution is applied on
//! top by [`resolve`].

use crate::{
    CodePoint, ConversionFlags, ConversionResult, IllegalSkip, SourceCursor, WideUnit,
};

/// A code point read from the front of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded value.
    pub code_point: CodePoint,
    /// Number of source units it occupied.
    pub consumed: usize,
}

/// Why no code point could be read from the front of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// The source ends inside a sequence whose units so far are valid.
    Truncated,
    /// The source starts with an ill-formed sequence. `len` is its maximal
    /// subpart: the lead unit plus the units that were still valid, always
    /// at least one.
    Illegal {
        /// Length of the maximal subpart in source units.
        len: usize,
    },
}

/// Reads one UTF-8 sequence from the front of `src`.
///
/// Validation follows the well-formed byte sequence table of the Unicode
/// standard: the range allowed for the second byte depends on the lead byte,
/// which rules out overlong forms, surrogates and values above U+10FFFF
/// without decoding first. A valid lead byte announces the sequence length;
/// if fewer bytes than that remain the result is `Truncated` without looking
/// at them, so the caller can retry once the rest of the input arrives.
pub(crate) fn scan_utf8(src: &[u8], allow_lone_surrogates: bool) -> Result<Decoded, Malformed> {
    scan(src, allow_lone_surrogates, true)
}

/// Like [`scan_utf8`], but for the final bytes of an input that has really
/// ended: continuation bytes are checked as far as they go, so a cut-off
/// sequence that is already broken reports its maximal subpart and
/// `Truncated` only ever means "valid so far".
pub(crate) fn scan_utf8_tail(
    src: &[u8],
    allow_lone_surrogates: bool,
) -> Result<Decoded, Malformed> {
    scan(src, allow_lone_surrogates, false)
}

fn scan(
    src: &[u8],
    allow_lone_surrogates: bool,
    wait_for_whole: bool,
) -> Result<Decoded, Malformed> {
    let Some(&lead) = src.first() else {
        return Err(Malformed::Truncated);
    };

    let (len, second) = match lead {
        0x00..=0x7F => {
            return Ok(Decoded {
                code_point: CodePoint::from(lead),
                consumed: 1,
            });
        }
        0xC2..=0xDF => (2, 0x80..=0xBF),
        0xE0 => (3, 0xA0..=0xBF),
        0xED if !allow_lone_surrogates => (3, 0x80..=0x9F),
        0xE1..=0xEF => (3, 0x80..=0xBF),
        0xF0 => (4, 0x90..=0xBF),
        0xF1..=0xF3 => (4, 0x80..=0xBF),
        0xF4 => (4, 0x80..=0x8F),
        // Continuation bytes, 0xC0, 0xC1 and 0xF5..=0xFF never start a sequence.
        _ => return Err(Malformed::Illegal { len: 1 }),
    };
    if wait_for_whole && src.len() < len {
        return Err(Malformed::Truncated);
    }

    let mut code_point = CodePoint::from(lead & (0x7F >> len));
    for i in 1..len {
        let Some(&byte) = src.get(i) else {
            return Err(Malformed::Truncated);
        };
        let valid = if i == 1 {
            second.contains(&byte)
        } else {
            byte & 0xC0 == 0x80
        };
        if !valid {
            return Err(Malformed::Illegal { len: i });
        }
        code_point = (code_point << 6) | CodePoint::from(byte & 0x3F);
    }

    Ok(Decoded {
        code_point,
        consumed: len,
    })
}

/// Applies the error policy of `flags` to a scan.
pub(crate) fn resolve(
    scanned: Result<Decoded, Malformed>,
    flags: ConversionFlags,
) -> Result<Decoded, ConversionResult> {
    match scanned {
        Ok(decoded) => Ok(decoded),
        Err(Malformed::Truncated) => Err(ConversionResult::SourceExhausted),
        Err(Malformed::Illegal { .. }) if !flags.is_lenient() => {
            Err(ConversionResult::SourceIllegal)
        }
        Err(Malformed::Illegal { len }) => Ok(substitute(flags, len)),
    }
}

/// The decoded value a lenient conversion emits for a malformed subpart of
/// `len` units.
pub(crate) fn substitute(flags: ConversionFlags, len: usize) -> Decoded {
    Decoded {
        code_point: CodePoint::from(flags.replacement),
        consumed: match flags.skip {
            IllegalSkip::Unit => 1,
            IllegalSkip::MaximalSubpart => len,
        },
    }
}

/// Decodes one code point from a UTF-8 source, advancing the cursor past it.
///
/// # Errors
///
/// - [`ConversionResult::SourceExhausted`] if the source is empty or holds
///   fewer bytes than the lead byte announces.
/// - [`ConversionResult::SourceIllegal`] for a malformed sequence under
///   strict flags. Lenient flags return the replacement instead.
///
/// The cursor does not move on error.
pub fn decode_utf8(
    source: &mut SourceCursor<'_, u8>,
    flags: ConversionFlags,
) -> Result<Decoded, ConversionResult> {
    let decoded = resolve(
        scan_utf8(source.remaining(), flags.allow_lone_surrogates),
        flags,
    )?;
    source.advance(decoded.consumed);
    Ok(decoded)
}

/// Decodes one code point from a wide source, advancing the cursor past it.
///
/// With 16-bit units a surrogate pair is combined into one supplementary
/// code point.
///
/// # Errors
///
/// - [`ConversionResult::SourceExhausted`] if the source is empty or is a
///   lone high surrogate at the end of a UTF-16 source.
/// - [`ConversionResult::SourceIllegal`] for an unpaired surrogate or an
///   out-of-range UTF-32 value under strict flags.
///
/// The cursor does not move on error.
pub fn decode_wide<W: WideUnit>(
    source: &mut SourceCursor<'_, W>,
    flags: ConversionFlags,
) -> Result<Decoded, ConversionResult> {
    let decoded = resolve(
        W::scan(source.remaining(), flags.allow_lone_surrogates),
        flags,
    )?;
    source.advance(decoded.consumed);
    Ok(decoded)
}
