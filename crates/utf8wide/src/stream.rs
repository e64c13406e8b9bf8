//! Chunked UTF-8 input.
//!
//! [`Utf8ToWideStream`] is the caller-side retry loop for
//! [`ConversionResult::SourceExhausted`]: when a chunk ends with fewer bytes
//! than the last lead byte announces, those bytes (at most three) are kept
//! and placed in front of the next chunk, which decides whether they were
//! well formed. Nothing else is carried between feeds.

use alloc::vec::Vec;

use crate::{
    ConversionError, ConversionFlags, ConversionResult, GrowingBuffer, Malformed, Transcoded,
    WideUnit, convert_utf8_to_wide,
    decode::{scan_utf8_tail, substitute},
};

/// Converts UTF-8 arriving in arbitrary chunks to wide units.
///
/// ```rust
/// use utf8wide::{ConversionFlags, Utf8ToWideStream};
///
/// let mut stream = Utf8ToWideStream::<u16>::new(ConversionFlags::strict());
/// stream.feed(b"caf\xC3").unwrap();
/// assert_eq!(stream.output(), &[0x63, 0x61, 0x66]);
/// stream.feed(b"\xA9!").unwrap();
/// assert_eq!(stream.finish().unwrap(), [0x63, 0x61, 0x66, 0xE9, 0x21]);
/// ```
#[derive(Debug, Clone)]
pub struct Utf8ToWideStream<W> {
    flags: ConversionFlags,
    output: Vec<W>,
    pending: Vec<u8>,
    /// Bytes committed before `pending`.
    offset: usize,
    failed: Option<ConversionError>,
}

impl<W: WideUnit> Utf8ToWideStream<W> {
    /// Creates an empty stream.
    #[must_use]
    pub fn new(flags: ConversionFlags) -> Self {
        Self {
            flags,
            output: Vec::new(),
            pending: Vec::new(),
            offset: 0,
            failed: None,
        }
    }

    /// Converts `chunk`, appending to the output.
    ///
    /// # Errors
    ///
    /// Under strict flags, [`ConversionError::InvalidUtf8`] with the offset
    /// of the malformed sequence counted from the start of the stream. The
    /// output keeps everything before it. Once failed, every later call
    /// returns the same error.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), ConversionError> {
        if let Some(error) = &self.failed {
            return Err(error.clone());
        }

        if self.pending.is_empty() {
            self.convert(chunk)
        } else {
            let mut joined = core::mem::take(&mut self.pending);
            joined.extend_from_slice(chunk);
            self.convert(&joined)
        }
    }

    fn convert(&mut self, input: &[u8]) -> Result<(), ConversionError> {
        let output = core::mem::take(&mut self.output);
        let Transcoded {
            output,
            consumed,
            result,
        } = GrowingBuffer::append_to(output, input.len()).fill(
            input,
            self.flags,
            convert_utf8_to_wide,
        );
        self.output = output;

        match result {
            ConversionResult::SourceExhausted => {
                self.pending.extend_from_slice(&input[consumed..]);
                self.offset += consumed;
                Ok(())
            }
            ConversionResult::SourceIllegal => {
                let error = ConversionError::from_utf8_stop(input, consumed, result);
                let error = match error {
                    ConversionError::InvalidUtf8 { offset, bytes } => {
                        ConversionError::InvalidUtf8 {
                            offset: self.offset + offset,
                            bytes,
                        }
                    }
                    other => other,
                };
                log::debug!("stream failed: {error}");
                self.offset += consumed;
                self.failed = Some(error.clone());
                Err(error)
            }
            _ => {
                self.offset += consumed;
                Ok(())
            }
        }
    }

    /// Units produced so far.
    #[must_use]
    pub fn output(&self) -> &[W] {
        &self.output
    }

    /// Removes and returns the units produced so far.
    pub fn take_output(&mut self) -> Vec<W> {
        core::mem::take(&mut self.output)
    }

    /// Number of input bytes held back because they are shorter than the
    /// sequence their lead byte announces.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Ends the stream and returns the remaining output.
    ///
    /// Lenient flags substitute the held-back bytes as a malformed sequence.
    ///
    /// # Errors
    ///
    /// The error of an earlier failed [`feed`](Self::feed), or, under strict
    /// flags, [`ConversionError::Incomplete`] if the input ended inside a
    /// sequence.
    pub fn finish(mut self) -> Result<Vec<W>, ConversionError> {
        if let Some(error) = self.failed {
            return Err(error);
        }
        if self.pending.is_empty() {
            return Ok(self.output);
        }
        if !self.flags.is_lenient() {
            return Err(ConversionError::Incomplete {
                offset: self.offset,
            });
        }

        let mut rest = self.pending.as_slice();
        let mut units = [W::default(); 2];
        while !rest.is_empty() {
            // At end of input a truncated sequence is as malformed as a broken one.
            let decoded = match scan_utf8_tail(rest, self.flags.allow_lone_surrogates) {
                Ok(decoded) => decoded,
                Err(Malformed::Truncated) => substitute(self.flags, rest.len()),
                Err(Malformed::Illegal { len }) => substitute(self.flags, len),
            };
            let written = W::encode_into(decoded.code_point, &mut units).unwrap_or(0);
            self.output.extend_from_slice(&units[..written]);
            rest = &rest[decoded.consumed.min(rest.len())..];
        }
        Ok(self.output)
    }
}
