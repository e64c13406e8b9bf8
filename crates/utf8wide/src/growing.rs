//! Conversions into an owned, growable target.
//!
//! [`GrowingBuffer`] wraps the cursor driver in a retry loop: whenever the
//! driver reports [`ConversionResult::TargetExhausted`] the buffer is
//! enlarged, keeping everything already written, and the driver resumes
//! from the source position it stopped at.

use alloc::{string::String, vec, vec::Vec};

use crate::{
    ConversionError, ConversionFlags, ConversionResult, NativeWide, SourceCursor, TargetCursor,
    WideUnit, convert_utf8_to_wide, convert_wide_to_utf8, decode_wide,
};

/// Most target units a single code point needs in either direction.
const MAX_UNITS_PER_CODE_POINT: usize = 4;

/// The result of converting into an owned buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcoded<T> {
    /// Everything produced, truncated to the units actually written. On
    /// failure this is the output for `source[..consumed]`.
    pub output: Vec<T>,
    /// Number of source units consumed.
    pub consumed: usize,
    /// Why the conversion stopped. Never
    /// [`ConversionResult::TargetExhausted`].
    pub result: ConversionResult,
}

/// An owned target buffer that grows until a conversion fits.
#[derive(Debug, Clone)]
pub struct GrowingBuffer<T> {
    buf: Vec<T>,
    written: usize,
}

impl<T: Copy + Default> GrowingBuffer<T> {
    /// Creates an empty buffer with room for `capacity` units.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![T::default(); capacity],
            written: 0,
        }
    }

    /// Creates a buffer that appends after the contents of `existing`.
    pub(crate) fn append_to(existing: Vec<T>, additional: usize) -> Self {
        let written = existing.len();
        let mut buf = existing;
        buf.resize(written + additional, T::default());
        Self { buf, written }
    }

    /// Number of units written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.written
    }

    /// Whether nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Runs `driver` over `source` until it finishes with anything other than
    /// [`ConversionResult::TargetExhausted`], growing the buffer in between.
    pub fn fill<S>(
        mut self,
        source: &[S],
        flags: ConversionFlags,
        driver: impl Fn(
            &mut SourceCursor<'_, S>,
            &mut TargetCursor<'_, T>,
            ConversionFlags,
        ) -> ConversionResult,
    ) -> Transcoded<T> {
        let mut cursor = SourceCursor::new(source);
        loop {
            let mut target = TargetCursor::with_position(&mut self.buf, self.written);
            let result = driver(&mut cursor, &mut target, flags);
            self.written = target.position();

            if result != ConversionResult::TargetExhausted {
                self.buf.truncate(self.written);
                return Transcoded {
                    output: self.buf,
                    consumed: cursor.position(),
                    result,
                };
            }
            self.grow();
        }
    }

    fn grow(&mut self) {
        let len = self.buf.len();
        let new_len = (len * 2).max(self.written + MAX_UNITS_PER_CODE_POINT);
        log::trace!("growing target buffer from {len} to {new_len} units");
        self.buf.resize(new_len, T::default());
    }
}

/// Converts UTF-8 to an owned sequence of wide units of any width.
///
/// The initial buffer holds one unit per source byte. That is enough for
/// any well-formed input and for lenient substitution with a BMP
/// replacement; a supplementary replacement in 16-bit units can need two
/// units for a single byte, and the buffer then grows.
pub fn convert_utf8_to_wide_vec<W: WideUnit>(
    source: &[u8],
    flags: ConversionFlags,
) -> Transcoded<W> {
    GrowingBuffer::new(source.len()).fill(source, flags, convert_utf8_to_wide)
}

/// Converts UTF-8 to an owned platform wide string.
///
/// On failure the output holds the conversion of `source[..consumed]`.
///
/// ```rust
/// use utf8wide::{ConversionFlags, ConversionResult, convert_utf8_to_wide_string};
///
/// let out = convert_utf8_to_wide_string(b"abc\xC0\x80", ConversionFlags::strict());
/// assert_eq!(out.result, ConversionResult::SourceIllegal);
/// assert_eq!(out.consumed, 3);
/// assert_eq!(out.output.len(), 3);
/// ```
pub fn convert_utf8_to_wide_string(
    source: &[u8],
    flags: ConversionFlags,
) -> Transcoded<NativeWide> {
    convert_utf8_to_wide_vec(source, flags)
}

/// Converts wide units to owned UTF-8 bytes.
///
/// Starts with one byte per source unit and grows as multi-byte forms need
/// more.
pub fn convert_wide_to_utf8_vec<W: WideUnit>(
    source: &[W],
    flags: ConversionFlags,
) -> Transcoded<u8> {
    GrowingBuffer::new(source.len()).fill(source, flags, convert_wide_to_utf8)
}

/// Strictly converts UTF-8 to wide units.
///
/// # Errors
///
/// [`ConversionError::InvalidUtf8`] for malformed input and
/// [`ConversionError::Incomplete`] if the input ends inside a sequence.
pub fn utf8_to_wide<W: WideUnit>(source: &[u8]) -> Result<Vec<W>, ConversionError> {
    let Transcoded {
        output,
        consumed,
        result,
    } = convert_utf8_to_wide_vec(source, ConversionFlags::strict());
    if result.is_ok() {
        return Ok(output);
    }
    log::debug!("UTF-8 conversion stopped at byte {consumed}: {result}");
    Err(ConversionError::from_utf8_stop(source, consumed, result))
}

/// Converts a string to wide units.
///
/// A `str` is always valid UTF-8, so this cannot fail.
#[must_use]
pub fn str_to_wide<W: WideUnit>(source: &str) -> Vec<W> {
    let transcoded = convert_utf8_to_wide_vec(source.as_bytes(), ConversionFlags::strict());
    debug_assert!(transcoded.result.is_ok());
    transcoded.output
}

/// Strictly converts wide units to UTF-8 bytes.
///
/// # Errors
///
/// [`ConversionError::InvalidWide`] for an unpaired surrogate or a value
/// above U+10FFFF, and [`ConversionError::Incomplete`] for a UTF-16 source
/// ending in a high surrogate.
pub fn wide_to_utf8<W: WideUnit>(source: &[W]) -> Result<Vec<u8>, ConversionError> {
    let Transcoded {
        output,
        consumed,
        result,
    } = convert_wide_to_utf8_vec(source, ConversionFlags::strict());
    if result.is_ok() {
        return Ok(output);
    }
    log::debug!("wide conversion stopped at unit {consumed}: {result}");
    Err(ConversionError::from_wide_stop(source, consumed, result))
}

/// Strictly converts wide units to a `String`.
///
/// # Errors
///
/// As [`wide_to_utf8`].
pub fn wide_to_string<W: WideUnit>(source: &[W]) -> Result<String, ConversionError> {
    let mut cursor = SourceCursor::new(source);
    let mut text = String::with_capacity(source.len());
    while !cursor.is_empty() {
        let offset = cursor.position();
        let result = match decode_wide(&mut cursor, ConversionFlags::strict()) {
            Ok(decoded) => match char::from_u32(decoded.code_point) {
                Some(ch) => {
                    text.push(ch);
                    continue;
                }
                None => ConversionResult::SourceIllegal,
            },
            Err(result) => result,
        };
        log::debug!("wide conversion stopped at unit {offset}: {result}");
        return Err(ConversionError::from_wide_stop(source, offset, result));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IllegalSkip, WideString};

    #[test]
    fn grows_from_a_single_unit() {
        let text = "h\u{e9}llo, \u{4e16}\u{754c} \u{1F600}";
        let out = GrowingBuffer::<u16>::new(1).fill(
            text.as_bytes(),
            ConversionFlags::strict(),
            convert_utf8_to_wide,
        );
        assert_eq!(out.result, ConversionResult::ConversionOk);
        assert_eq!(out.consumed, text.len());
        assert_eq!(out.output, text.encode_utf16().collect::<Vec<_>>());
    }

    #[test]
    fn grows_from_zero_capacity() {
        let units: Vec<u32> = "\u{1F600}\u{1F600}".chars().map(u32::from).collect();
        let out = GrowingBuffer::<u8>::new(0).fill(
            &units,
            ConversionFlags::strict(),
            convert_wide_to_utf8,
        );
        assert_eq!(out.result, ConversionResult::ConversionOk);
        assert_eq!(out.output, "\u{1F600}\u{1F600}".as_bytes());
    }

    #[test]
    fn wide_to_utf8_grows_past_the_estimate() {
        let text = "\u{4e16}\u{754c}\u{4e16}\u{754c}";
        let units: Vec<u16> = text.encode_utf16().collect();
        let out = convert_wide_to_utf8_vec(&units, ConversionFlags::strict());
        assert_eq!(out.result, ConversionResult::ConversionOk);
        assert_eq!(out.output, text.as_bytes());
        assert_eq!(out.output.len(), 3 * units.len());
    }

    #[test]
    fn failure_keeps_the_partial_output() {
        let out =
            convert_utf8_to_wide_vec::<u16>(b"abc\xED\xA0\x80def", ConversionFlags::strict());
        assert_eq!(out.result, ConversionResult::SourceIllegal);
        assert_eq!(out.consumed, 3);
        assert_eq!(out.output, [0x61, 0x62, 0x63]);

        let out = convert_utf8_to_wide_vec::<u32>(b"abc\xE2\x82", ConversionFlags::strict());
        assert_eq!(out.result, ConversionResult::SourceExhausted);
        assert_eq!(out.consumed, 3);
        assert_eq!(out.output, [0x61, 0x62, 0x63]);
    }

    #[test]
    fn output_is_truncated_to_what_was_written() {
        let out = GrowingBuffer::<u32>::new(64).fill(
            "\u{1F600}".as_bytes(),
            ConversionFlags::strict(),
            convert_utf8_to_wide,
        );
        assert_eq!(out.output, [0x1_F600]);
    }

    #[test]
    fn appends_after_existing_units() {
        let buffer = GrowingBuffer::append_to(vec![0x41u16], 0);
        assert_eq!(buffer.len(), 1);
        let out = buffer.fill(b"bc", ConversionFlags::strict(), convert_utf8_to_wide);
        assert_eq!(out.output, [0x41, 0x62, 0x63]);
        assert_eq!(out.consumed, 2);
    }

    #[test]
    fn lenient_substitution_never_needs_more_than_one_unit_per_byte() {
        let bytes = b"\xFF\xFE\x80\xC0";
        let flags = ConversionFlags::lenient().with_skip(IllegalSkip::Unit);
        let out = convert_utf8_to_wide_vec::<u16>(bytes, flags);
        assert_eq!(out.result, ConversionResult::ConversionOk);
        assert_eq!(out.output, [0xFFFD; 4]);
    }

    #[test]
    fn wide_to_string_reports_what_wide_to_utf8_reports() {
        let utf16: &[&[u16]] = &[
            &[0x61, 0xD83D, 0xDE00, 0x62],
            &[0x61, 0xDE00],
            &[0x61, 0x62, 0xD83D],
            &[0xD800, 0x41],
            &[],
        ];
        for units in utf16 {
            let bytes = wide_to_utf8::<u16>(units);
            let text = wide_to_string::<u16>(units);
            assert_eq!(text.map(String::into_bytes), bytes, "{units:?}");
        }

        assert_eq!(
            wide_to_string::<u32>(&[0x61, 0x11_0000]),
            Err(ConversionError::InvalidWide {
                offset: 1,
                unit: 0x11_0000
            })
        );
        assert_eq!(
            wide_to_string::<u32>(&[0x1_F600, 0xDFFF]),
            Err(ConversionError::InvalidWide {
                offset: 1,
                unit: 0xDFFF
            })
        );
        assert_eq!(wide_to_string::<u32>(&[0x1_F600]).as_deref(), Ok("\u{1F600}"));
    }

    #[test]
    fn supplementary_replacement_grows_the_buffer() {
        let flags = ConversionFlags::lenient().with_replacement('\u{1F600}');
        let out = convert_utf8_to_wide_vec::<u16>(b"\xFF\xFF", flags);
        assert_eq!(out.result, ConversionResult::ConversionOk);
        assert_eq!(out.consumed, 2);
        assert_eq!(out.output, [0xD83D, 0xDE00, 0xD83D, 0xDE00]);
    }

    #[test]
    fn string_helpers() {
        assert_eq!(str_to_wide::<u16>("a\u{1F600}"), [0x61, 0xD83D, 0xDE00]);
        assert_eq!(utf8_to_wide::<u32>(b"a\xC3\xA9"), Ok(vec![0x61, 0xE9]));
        assert_eq!(
            utf8_to_wide::<u32>(b"a\xC3"),
            Err(ConversionError::Incomplete { offset: 1 })
        );
        assert_eq!(
            wide_to_string::<u16>(&[0x61, 0xD83D, 0xDE00]).as_deref(),
            Ok("a\u{1F600}")
        );
        assert_eq!(
            wide_to_utf8::<u16>(&[0x61, 0xDE00]),
            Err(ConversionError::InvalidWide {
                offset: 1,
                unit: 0xDE00
            })
        );
        assert_eq!(
            wide_to_utf8::<u16>(&[0x61, 0xD83D]),
            Err(ConversionError::Incomplete { offset: 1 })
        );

        let native: WideString = str_to_wide("wide");
        assert_eq!(wide_to_string(&native).as_deref(), Ok("wide"));
    }
}
