use alloc::{boxed::Box, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::{ConversionFlags, ErrorPolicy, IllegalSkip};

/// Bytes that are mostly UTF-8, with broken, truncated and overlong
/// sequences mixed in.
#[derive(Debug, Clone)]
pub(crate) struct Utf8ish(pub Vec<u8>);

/// UTF-16 units with pairs, lone surrogates and reversed pairs mixed in.
#[derive(Debug, Clone)]
pub(crate) struct Utf16ish(pub Vec<u16>);

/// UTF-32 units, including surrogates and values above U+10FFFF.
#[derive(Debug, Clone)]
pub(crate) struct Utf32ish(pub Vec<u32>);

fn push_char(bytes: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

impl Arbitrary for Utf8ish {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % g.size().max(1);
        let mut bytes = Vec::new();
        for _ in 0..len {
            match u8::arbitrary(g) % 8 {
                0..=3 => push_char(&mut bytes, char::arbitrary(g)),
                4 => bytes.push(u8::arbitrary(g)),
                5 => {
                    // Drop the tail of a multi-byte sequence.
                    let mut buf = [0u8; 4];
                    let encoded = char::arbitrary(g).encode_utf8(&mut buf).len();
                    let keep = 1 + usize::arbitrary(g) % encoded;
                    bytes.extend_from_slice(&buf[..keep]);
                }
                6 => {
                    let nasty: &[&[u8]] = &[
                        b"\xC0\x80",
                        b"\xE0\x80\xAF",
                        b"\xED\xA0\x80",
                        b"\xED\xBF\xBF",
                        b"\xF4\x90\x80\x80",
                        b"\xF5\x80",
                        b"\xFF",
                        b"\x80\x80",
                    ];
                    bytes.extend_from_slice(g.choose(nasty).copied().unwrap_or_default());
                }
                _ => bytes.push(u8::arbitrary(g) % 0x80),
            }
        }
        Utf8ish(bytes)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Utf8ish))
    }
}

impl Arbitrary for Utf16ish {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % g.size().max(1);
        let mut units = Vec::new();
        for _ in 0..len {
            match u8::arbitrary(g) % 6 {
                0 | 1 => {
                    let mut buf = [0u16; 2];
                    units.extend_from_slice(char::arbitrary(g).encode_utf16(&mut buf));
                }
                2 => units.push(0xD800 + u16::arbitrary(g) % 0x800),
                3 => {
                    // Low surrogate first.
                    units.push(0xDC00 + u16::arbitrary(g) % 0x400);
                    units.push(0xD800 + u16::arbitrary(g) % 0x400);
                }
                _ => units.push(u16::arbitrary(g)),
            }
        }
        Utf16ish(units)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Utf16ish))
    }
}

impl Arbitrary for Utf32ish {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % g.size().max(1);
        let mut units = Vec::new();
        for _ in 0..len {
            let unit = match u8::arbitrary(g) % 6 {
                0..=2 => u32::from(char::arbitrary(g)),
                3 => 0xD800 + u32::arbitrary(g) % 0x800,
                4 => 0x10_FFFF + u32::arbitrary(g) % 0x100,
                _ => u32::arbitrary(g),
            };
            units.push(unit);
        }
        Utf32ish(units)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Utf32ish))
    }
}

impl Arbitrary for ErrorPolicy {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            ErrorPolicy::Strict
        } else {
            ErrorPolicy::Lenient
        }
    }
}

impl Arbitrary for IllegalSkip {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            IllegalSkip::Unit
        } else {
            IllegalSkip::MaximalSubpart
        }
    }
}

impl Arbitrary for ConversionFlags {
    fn arbitrary(g: &mut Gen) -> Self {
        ConversionFlags {
            policy: ErrorPolicy::arbitrary(g),
            replacement: char::arbitrary(g),
            skip: IllegalSkip::arbitrary(g),
            allow_lone_surrogates: bool::arbitrary(g),
        }
    }
}
