use alloc::vec::Vec;
use core::fmt;

use crate::{CodePoint, Decoded, MAX_CODE_POINT, Malformed};

const HIGH_SURROGATE_START: u16 = 0xD800;
const HIGH_SURROGATE_END: u16 = 0xDBFF;
const LOW_SURROGATE_START: u16 = 0xDC00;
const LOW_SURROGATE_END: u16 = 0xDFFF;
const SURROGATES: core::ops::RangeInclusive<u32> = 0xD800..=0xDFFF;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// A wide code unit: `u16` for UTF-16, `u32` for UTF-32.
///
/// The trait is sealed. Choosing the unit type chooses the encoding at
/// compile time, so a conversion never branches on width at run time.
pub trait WideUnit: Copy + Default + Eq + fmt::Debug + sealed::Sealed {
    /// Width of one unit in bits.
    const BITS: u32;

    /// Most units a single code point can occupy.
    const MAX_UNITS: usize;

    /// The unit as an unsigned integer.
    fn to_u32(self) -> u32;

    /// Reads one code point from the front of `src`.
    ///
    /// # Errors
    ///
    /// [`Malformed::Truncated`] when `src` is empty or, for UTF-16, holds
    /// only a high surrogate. [`Malformed::Illegal`] for unpaired surrogates
    /// (unless `allow_lone_surrogates`) and values above U+10FFFF.
    fn scan(src: &[Self], allow_lone_surrogates: bool) -> Result<Decoded, Malformed>;

    /// Writes `code_point` to the front of `dst` and returns the number of
    /// units written, or `None` without touching `dst` if it is too short.
    ///
    /// `code_point` must not exceed U+10FFFF. Surrogate values are written
    /// as a single unit.
    fn encode_into(code_point: CodePoint, dst: &mut [Self]) -> Option<usize>;
}

impl WideUnit for u16 {
    const BITS: u32 = 16;
    const MAX_UNITS: usize = 2;

    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    fn scan(src: &[u16], allow_lone_surrogates: bool) -> Result<Decoded, Malformed> {
        let lone = |unit: u16| {
            if allow_lone_surrogates {
                Ok(Decoded {
                    code_point: CodePoint::from(unit),
                    consumed: 1,
                })
            } else {
                Err(Malformed::Illegal { len: 1 })
            }
        };

        match *src {
            [] | [HIGH_SURROGATE_START..=HIGH_SURROGATE_END] => Err(Malformed::Truncated),
            [
                high @ HIGH_SURROGATE_START..=HIGH_SURROGATE_END,
                low @ LOW_SURROGATE_START..=LOW_SURROGATE_END,
                ..,
            ] => Ok(Decoded {
                code_point: 0x1_0000
                    + ((CodePoint::from(high - HIGH_SURROGATE_START) << 10)
                        | CodePoint::from(low - LOW_SURROGATE_START)),
                consumed: 2,
            }),
            [
                unit @ (HIGH_SURROGATE_START..=HIGH_SURROGATE_END
                | LOW_SURROGATE_START..=LOW_SURROGATE_END),
                ..,
            ] => lone(unit),
            [unit, ..] => Ok(Decoded {
                code_point: CodePoint::from(unit),
                consumed: 1,
            }),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn encode_into(code_point: CodePoint, dst: &mut [u16]) -> Option<usize> {
        debug_assert!(code_point <= MAX_CODE_POINT);
        if code_point < 0x1_0000 {
            *dst.first_mut()? = code_point as u16;
            return Some(1);
        }

        let [high, low, ..] = dst else {
            return None;
        };
        let offset = code_point - 0x1_0000;
        *high = HIGH_SURROGATE_START + (offset >> 10) as u16;
        *low = LOW_SURROGATE_START + (offset & 0x3FF) as u16;
        Some(2)
    }
}

impl WideUnit for u32 {
    const BITS: u32 = 32;
    const MAX_UNITS: usize = 1;

    fn to_u32(self) -> u32 {
        self
    }

    fn scan(src: &[u32], allow_lone_surrogates: bool) -> Result<Decoded, Malformed> {
        let Some(&unit) = src.first() else {
            return Err(Malformed::Truncated);
        };
        if unit > MAX_CODE_POINT || (!allow_lone_surrogates && SURROGATES.contains(&unit)) {
            return Err(Malformed::Illegal { len: 1 });
        }
        Ok(Decoded {
            code_point: unit,
            consumed: 1,
        })
    }

    fn encode_into(code_point: CodePoint, dst: &mut [u32]) -> Option<usize> {
        debug_assert!(code_point <= MAX_CODE_POINT);
        *dst.first_mut()? = code_point;
        Some(1)
    }
}

/// The width of the platform `wchar_t`.
#[cfg(windows)]
pub type NativeWide = u16;

/// The width of the platform `wchar_t`.
#[cfg(not(windows))]
pub type NativeWide = u32;

/// An owned sequence of platform wide units.
pub type WideString = Vec<NativeWide>;

pub(crate) fn is_surrogate(code_point: CodePoint) -> bool {
    SURROGATES.contains(&code_point)
}
