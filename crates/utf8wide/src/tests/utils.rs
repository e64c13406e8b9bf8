use alloc::vec::Vec;

/// Number of quickcheck cases to run; CI gets the long run.
pub(crate) fn quickcheck_tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

/// Splits `source` into consecutive chunks whose lengths come from `cuts`,
/// each taken modulo 8. The last chunk is whatever is left.
pub(crate) fn chunks<'a, T>(mut source: &'a [T], cuts: &[u8]) -> Vec<&'a [T]> {
    let mut out = Vec::with_capacity(cuts.len() + 1);
    for &cut in cuts {
        let at = usize::from(cut % 8).min(source.len());
        let (head, tail) = source.split_at(at);
        out.push(head);
        source = tail;
    }
    out.push(source);
    out
}

#[test]
fn chunks_cover_the_source() {
    let source = b"abcdefghij";
    let parts = chunks(source, &[3, 0, 9, 100]);
    assert_eq!(parts, [&b"abc"[..], b"", b"d", b"efgh", b"ij"]);
}
