/// How malformed input is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorPolicy {
    /// Stop with [`ConversionResult::SourceIllegal`](crate::ConversionResult)
    /// at the first malformed sequence.
    #[default]
    Strict,
    /// Emit [`ConversionFlags::replacement`] and continue past the malformed
    /// input.
    Lenient,
}

/// How much input a lenient substitution skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IllegalSkip {
    /// Skip one source unit per substitution. Each stray continuation byte
    /// of a broken UTF-8 sequence then gets its own replacement.
    #[default]
    Unit,
    /// Skip the maximal subpart: the lead unit plus the continuation units
    /// that were still valid when the sequence broke. This produces the same
    /// replacements as `String::from_utf8_lossy`.
    MaximalSubpart,
}

/// Switches controlling how the codec treats malformed input.
///
/// The flags are orthogonal to direction and width: the same value drives
/// UTF-8 to wide and wide to UTF-8 conversions of either width.
///
/// # Examples
///
/// ```rust
/// use utf8wide::{ConversionFlags, ConversionResult, IllegalSkip, convert_utf8_to_wide_vec};
///
/// let flags = ConversionFlags::lenient().with_skip(IllegalSkip::MaximalSubpart);
/// let out = convert_utf8_to_wide_vec::<u16>(b"a\xF0\x9F\x98b", flags);
/// assert_eq!(out.result, ConversionResult::ConversionOk);
/// assert_eq!(out.output, [0x61, 0xFFFD, 0x62]);
/// ```
///
/// # Default
///
/// Strict: every malformed, overlong, truncated or surrogate-misusing
/// sequence stops the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConversionFlags {
    /// Whether malformed input stops the conversion or is substituted.
    ///
    /// # Default
    ///
    /// [`ErrorPolicy::Strict`]
    pub policy: ErrorPolicy,

    /// The code point emitted for malformed input under
    /// [`ErrorPolicy::Lenient`].
    ///
    /// # Default
    ///
    /// U+FFFD REPLACEMENT CHARACTER
    pub replacement: char,

    /// How far a lenient substitution advances the source.
    ///
    /// # Default
    ///
    /// [`IllegalSkip::Unit`]
    pub skip: IllegalSkip,

    /// Whether unpaired surrogates pass through instead of being malformed.
    ///
    /// When set, a lone UTF-16 surrogate or a UTF-32 unit in the surrogate
    /// range converts to the three-byte generalized UTF-8 form of its value,
    /// and such three-byte forms (`ED A0 80` to `ED BF BF`) convert back to a
    /// single wide unit. A high surrogate at the very end of a UTF-16 source
    /// still reports [`SourceExhausted`](crate::ConversionResult), since its
    /// low half may arrive with more input.
    ///
    /// Unlike WTF-8, a high-surrogate form directly followed by a
    /// low-surrogate form is accepted. Decoded to 16-bit units the two
    /// become an ordinary surrogate pair, so converting back yields the
    /// four-byte form of the supplementary code point rather than the
    /// original six bytes. With 32-bit units they stay two separate units
    /// and round-trip unchanged.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_lone_surrogates: bool,
}

impl Default for ConversionFlags {
    fn default() -> Self {
        Self {
            policy: ErrorPolicy::Strict,
            replacement: char::REPLACEMENT_CHARACTER,
            skip: IllegalSkip::Unit,
            allow_lone_surrogates: false,
        }
    }
}

impl ConversionFlags {
    /// Strict flags; the same as [`ConversionFlags::default`].
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient flags substituting U+FFFD one source unit at a time.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            policy: ErrorPolicy::Lenient,
            ..Self::default()
        }
    }

    /// Returns these flags with a different substitute.
    #[must_use]
    pub fn with_replacement(self, replacement: char) -> Self {
        Self {
            replacement,
            ..self
        }
    }

    /// Returns these flags with a different skip width.
    #[must_use]
    pub fn with_skip(self, skip: IllegalSkip) -> Self {
        Self { skip, ..self }
    }

    /// Returns these flags with lone surrogates allowed or rejected.
    #[must_use]
    pub fn with_lone_surrogates(self, allow: bool) -> Self {
        Self {
            allow_lone_surrogates: allow,
            ..self
        }
    }

    /// Whether malformed input is substituted.
    #[must_use]
    pub fn is_lenient(&self) -> bool {
        self.policy == ErrorPolicy::Lenient
    }
}
