#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use utf8wide::{
    ConversionFlags, ConversionResult, ErrorPolicy, IllegalSkip, SourceCursor, TargetCursor,
    Utf8ToWideStream, convert_utf8_to_wide, convert_utf8_to_wide_vec, convert_wide_to_utf8,
    convert_wide_to_utf8_vec,
};

#[derive(Debug, Arbitrary)]
struct Input {
    lenient: bool,
    maximal_subpart: bool,
    allow_lone_surrogates: bool,
    replacement: char,
    /// Sizes of the successive targets handed to the driver.
    target_sizes: Vec<u8>,
    /// Sizes of the successive chunks fed to the stream.
    chunk_sizes: Vec<u8>,
    bytes: Vec<u8>,
    units: Vec<u16>,
}

impl Input {
    fn flags(&self) -> ConversionFlags {
        ConversionFlags {
            policy: if self.lenient {
                ErrorPolicy::Lenient
            } else {
                ErrorPolicy::Strict
            },
            replacement: self.replacement,
            skip: if self.maximal_subpart {
                IllegalSkip::MaximalSubpart
            } else {
                IllegalSkip::Unit
            },
            allow_lone_surrogates: self.allow_lone_surrogates,
        }
    }
}

/// Drives a conversion through targets of the given sizes, checking that a
/// full target never loses or duplicates anything.
fn in_pieces<S, T: Copy + Default>(
    source: &[S],
    flags: ConversionFlags,
    sizes: &[u8],
    min_room: usize,
    driver: impl Fn(
        &mut SourceCursor<'_, S>,
        &mut TargetCursor<'_, T>,
        ConversionFlags,
    ) -> ConversionResult,
) -> (Vec<T>, usize, ConversionResult) {
    let mut cursor = SourceCursor::new(source);
    let mut output = Vec::new();
    let sizes = sizes
        .iter()
        .map(|&size| usize::from(size % 8))
        .chain(std::iter::repeat(min_room));
    for size in sizes {
        let before = cursor.position();
        let mut piece = vec![T::default(); size];
        let mut target = TargetCursor::new(&mut piece);
        let result = driver(&mut cursor, &mut target, flags);
        assert!(cursor.position() >= before);
        assert!(target.position() <= size);
        output.extend_from_slice(target.written());
        if result != ConversionResult::TargetExhausted {
            return (output, cursor.position(), result);
        }
    }
    unreachable!()
}

fuzz_target!(|input: Input| {
    let flags = input.flags();

    let whole = convert_utf8_to_wide_vec::<u16>(&input.bytes, flags);
    assert_ne!(whole.result, ConversionResult::TargetExhausted);
    if flags.is_lenient() {
        assert_ne!(whole.result, ConversionResult::SourceIllegal);
    }
    if whole.result == ConversionResult::SourceExhausted {
        // Only a tail shorter than any sequence is waited on.
        assert!(input.bytes.len() - whole.consumed < 4);
    }
    if !flags.allow_lone_surrogates && whole.result.is_ok() {
        assert!(String::from_utf16(&whole.output).is_ok());
    }
    let pieces = in_pieces(&input.bytes, flags, &input.target_sizes, 2, convert_utf8_to_wide);
    assert_eq!(pieces, (whole.output.clone(), whole.consumed, whole.result));

    let mut stream = Utf8ToWideStream::<u16>::new(flags);
    let mut rest = input.bytes.as_slice();
    let mut failed = false;
    for &size in &input.chunk_sizes {
        let (chunk, tail) = rest.split_at(usize::from(size).min(rest.len()));
        rest = tail;
        if stream.feed(chunk).is_err() {
            failed = true;
            break;
        }
    }
    if !failed && stream.feed(rest).is_err() {
        failed = true;
    }
    assert_eq!(failed, whole.result == ConversionResult::SourceIllegal);
    assert_eq!(stream.output(), whole.output.as_slice());

    let whole = convert_wide_to_utf8_vec(&input.units, flags);
    if !flags.allow_lone_surrogates && whole.result.is_ok() {
        assert!(std::str::from_utf8(&whole.output).is_ok());
    }
    let pieces = in_pieces(&input.units, flags, &input.target_sizes, 4, convert_wide_to_utf8);
    assert_eq!(pieces, (whole.output, whole.consumed, whole.result));
});
