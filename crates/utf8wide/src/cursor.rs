//! Cursors over caller-owned buffers.
//!
//! A cursor is the (start, end) pair of the conversion API: the end is the
//! length of the borrowed slice and the start is an index that the codec
//! advances in place. Cursors only ever move past whole code points.

/// Read position over a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCursor<'a, T> {
    data: &'a [T],
    pos: usize,
}

impl<'a, T> SourceCursor<'a, T> {
    /// Creates a cursor at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [T]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a cursor at `pos`, clamped to the length of `data`.
    #[must_use]
    pub fn with_position(data: &'a [T], pos: usize) -> Self {
        Self {
            data,
            pos: pos.min(data.len()),
        }
    }

    /// Number of units consumed so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Whether every unit has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    /// The units not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> &'a [T] {
        &self.data[self.pos..]
    }

    /// The units consumed so far.
    #[must_use]
    pub fn consumed(&self) -> &'a [T] {
        &self.data[..self.pos]
    }

    pub(crate) fn advance(&mut self, units: usize) {
        debug_assert!(units <= self.data.len() - self.pos);
        self.pos = (self.pos + units).min(self.data.len());
    }
}

/// Write position over a target buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct TargetCursor<'a, T> {
    data: &'a mut [T],
    pos: usize,
}

impl<'a, T> TargetCursor<'a, T> {
    /// Creates a cursor at the start of `data`.
    #[must_use]
    pub fn new(data: &'a mut [T]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a cursor at `pos`, clamped to the length of `data`. Units
    /// before `pos` are treated as already written.
    #[must_use]
    pub fn with_position(data: &'a mut [T], pos: usize) -> Self {
        let pos = pos.min(data.len());
        Self { data, pos }
    }

    /// Number of units written so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of units that can still be written.
    #[must_use]
    pub fn capacity_left(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The units written so far.
    #[must_use]
    pub fn written(&self) -> &[T] {
        &self.data[..self.pos]
    }

    pub(crate) fn spare(&mut self) -> &mut [T] {
        &mut self.data[self.pos..]
    }

    pub(crate) fn advance(&mut self, units: usize) {
        debug_assert!(units <= self.capacity_left());
        self.pos = (self.pos + units).min(self.data.len());
    }
}
