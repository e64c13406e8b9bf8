use bstr::BString;
use thiserror::Error;

use crate::{ConversionResult, Malformed, WideUnit, decode::scan_utf8};

/// A conversion that could not complete, as reported by the string-level
/// helpers.
///
/// The cursor-level API reports the same conditions as a
/// [`ConversionResult`]; this type adds where the source stopped and what
/// was found there.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A malformed UTF-8 sequence. `bytes` is its maximal subpart.
    #[error("invalid UTF-8 sequence {bytes:?} at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the sequence in the source.
        offset: usize,
        /// The offending bytes.
        bytes: BString,
    },
    /// An unpaired surrogate or an out-of-range UTF-32 unit.
    #[error("invalid wide unit {unit:#06x} at offset {offset}")]
    InvalidWide {
        /// Unit offset in the source.
        offset: usize,
        /// The offending unit.
        unit: u32,
    },
    /// The source ended inside a sequence.
    #[error("incomplete sequence at offset {offset}")]
    Incomplete {
        /// Offset of the first unit of the incomplete sequence.
        offset: usize,
    },
}

impl ConversionError {
    /// Offset in source units at which conversion stopped.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            ConversionError::InvalidUtf8 { offset, .. }
            | ConversionError::InvalidWide { offset, .. }
            | ConversionError::Incomplete { offset } => *offset,
        }
    }

    /// Builds the error for a UTF-8 source that stopped at `offset` with
    /// `result`.
    pub(crate) fn from_utf8_stop(source: &[u8], offset: usize, result: ConversionResult) -> Self {
        let rest = source.get(offset..).unwrap_or_default();
        match (result, scan_utf8(rest, false)) {
            (ConversionResult::SourceIllegal, Err(Malformed::Illegal { len })) => {
                ConversionError::InvalidUtf8 {
                    offset,
                    bytes: BString::from(&rest[..len]),
                }
            }
            // Lone surrogate forms are only illegal when not allowed, in which
            // case the strict scan above already reported them.
            (ConversionResult::SourceIllegal, _) => ConversionError::InvalidUtf8 {
                offset,
                bytes: BString::from(rest.get(..1).unwrap_or_default()),
            },
            _ => ConversionError::Incomplete { offset },
        }
    }

    /// Builds the error for a wide source that stopped at `offset` with
    /// `result`.
    pub(crate) fn from_wide_stop<W: WideUnit>(
        source: &[W],
        offset: usize,
        result: ConversionResult,
    ) -> Self {
        match (result, source.get(offset)) {
            (ConversionResult::SourceIllegal, Some(unit)) => ConversionError::InvalidWide {
                offset,
                unit: unit.to_u32(),
            },
            _ => ConversionError::Incomplete { offset },
        }
    }
}

impl From<ConversionError> for ConversionResult {
    fn from(error: ConversionError) -> Self {
        match error {
            ConversionError::InvalidUtf8 { .. } | ConversionError::InvalidWide { .. } => {
                ConversionResult::SourceIllegal
            }
            ConversionError::Incomplete { .. } => ConversionResult::SourceExhausted,
        }
    }
}
