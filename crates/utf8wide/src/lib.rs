//! Resumable transcoding between UTF-8 and the platform's wide-character
//! representation.
//!
//! The wide side is UTF-16 when the unit type is `u16` and UTF-32 when it is
//! `u32`, both in native byte order. [`NativeWide`] picks the width of the
//! target's `wchar_t`: 16 bits on Windows, 32 bits elsewhere. The width is a
//! type parameter, so only one code path is compiled for each instantiation.
//!
//! # Layers
//!
//! - [`decode_utf8`], [`decode_wide`], [`encode_utf8`] and [`encode_wide`]
//!   move a single code point through a cursor.
//! - [`convert_utf8_to_wide`] and [`convert_wide_to_utf8`] drive those over a
//!   whole caller-owned buffer pair. They never allocate.
//! - [`convert_utf8_to_wide_string`], [`convert_utf8_to_wide_vec`] and
//!   [`convert_wide_to_utf8_vec`] own a growable target and retry on
//!   [`ConversionResult::TargetExhausted`].
//! - [`utf8_to_wide`], [`wide_to_utf8`], [`wide_to_string`] and
//!   [`str_to_wide`] are strict helpers returning [`ConversionError`].
//! - [`Utf8ToWideStream`] accepts UTF-8 in arbitrary chunks.
//!
//! # Resuming
//!
//! Every exit from the cursor driver leaves both cursors on a code point
//! boundary. After `SourceExhausted` supply more input starting at the
//! source cursor; after `TargetExhausted` supply more room and call again.
//!
//! ```rust
//! use utf8wide::{
//!     ConversionFlags, ConversionResult, SourceCursor, TargetCursor, convert_utf8_to_wide,
//! };
//!
//! let text = "h\u{e9}llo \u{1F600}".as_bytes();
//! let mut out = [0u16; 4];
//! let mut source = SourceCursor::new(text);
//! let mut target = TargetCursor::new(&mut out);
//! let result = convert_utf8_to_wide(&mut source, &mut target, ConversionFlags::strict());
//! assert_eq!(result, ConversionResult::TargetExhausted);
//! assert_eq!(source.position(), 5);
//!
//! let mut rest = [0u16; 4];
//! let mut target = TargetCursor::new(&mut rest);
//! let result = convert_utf8_to_wide(&mut source, &mut target, ConversionFlags::strict());
//! assert_eq!(result, ConversionResult::ConversionOk);
//! assert_eq!(target.written(), &[0x6f, 0x20, 0xD83D, 0xDE00]);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cursor;
mod decode;
mod driver;
mod encode;
mod error;
mod growing;
mod options;
mod result;
mod stream;
mod wide;

#[cfg(test)]
mod tests;

pub use cursor::{SourceCursor, TargetCursor};
pub use decode::{Decoded, Malformed, decode_utf8, decode_wide};
pub use driver::{convert_utf8_to_wide, convert_wide_to_utf8};
pub use encode::{encode_utf8, encode_wide};
pub use error::ConversionError;
pub use growing::{
    GrowingBuffer, Transcoded, convert_utf8_to_wide_string, convert_utf8_to_wide_vec,
    convert_wide_to_utf8_vec, str_to_wide, utf8_to_wide, wide_to_string, wide_to_utf8,
};
pub use options::{ConversionFlags, ErrorPolicy, IllegalSkip};
pub use result::ConversionResult;
pub use stream::Utf8ToWideStream;
pub use wide::{NativeWide, WideString, WideUnit};

/// A Unicode scalar value, or a lone surrogate when
/// [`ConversionFlags::allow_lone_surrogates`] is set.
pub type CodePoint = u32;

/// Largest valid code point.
pub const MAX_CODE_POINT: CodePoint = 0x10_FFFF;
