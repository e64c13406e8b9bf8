use core::fmt;

/// Outcome of a conversion step.
///
/// The set is closed: every call into the codec ends in exactly one of these
/// four states, and both cursors are left on a code point boundary in all of
/// them.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConversionResult {
    /// The whole source was converted.
    ConversionOk,
    /// The source ends in the middle of a sequence. The source cursor points
    /// at the start of that sequence.
    SourceExhausted,
    /// The target has no room for the next code point. The source cursor
    /// points at the start of the code point that did not fit.
    TargetExhausted,
    /// The source holds a malformed sequence that the active flags do not
    /// recover from. The source cursor points at its first unit.
    SourceIllegal,
}

impl ConversionResult {
    /// Returns `true` for [`ConversionResult::ConversionOk`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, ConversionResult::ConversionOk)
    }

    /// Returns `true` when more input or more output space lets the caller
    /// resume from the current cursors.
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        matches!(
            self,
            ConversionResult::SourceExhausted | ConversionResult::TargetExhausted
        )
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConversionResult::ConversionOk => "conversion complete",
            ConversionResult::SourceExhausted => "partial sequence at end of source",
            ConversionResult::TargetExhausted => "insufficient room in target",
            ConversionResult::SourceIllegal => "illegal sequence in source",
        })
    }
}
