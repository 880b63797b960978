use super::wrap::advance;

/// Cursor state of the ring: where the oldest entry starts, where the next one
/// goes, and how many entries sit in between.
///
/// `head == tail` is ambiguous on its own, `len` tells an empty ring from a
/// saturated one. `head_seq` is the arrival number of the entry at `head`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RingOffsets {
    head: usize,
    tail: usize,
    len: usize,
    head_seq: u64,
}

impl RingOffsets {
    #[inline(always)]
    pub const fn head(&self) -> usize {
        self.head
    }

    #[inline(always)]
    pub const fn tail(&self) -> usize {
        self.tail
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub const fn head_seq(&self) -> u64 {
        self.head_seq
    }

    #[inline(always)]
    pub const fn next_seq(&self) -> u64 {
        self.head_seq + self.len as u64
    }

    #[inline(always)]
    pub const fn contains_seq(&self, seq: u64) -> bool {
        seq >= self.head_seq && seq < self.next_seq()
    }

    /// Free bytes from `tail` forward to `head`.
    pub const fn available_space(&self, capacity: usize) -> usize {
        if self.tail > self.head {
            capacity - self.tail + self.head
        } else if self.tail < self.head {
            self.head - self.tail
        } else if self.len == 0 {
            capacity
        } else {
            0
        }
    }

    /// Records an entry of `entry_len` bytes written at `tail`.
    pub fn commit(&mut self, entry_len: usize, capacity: usize) {
        debug_assert!(entry_len <= self.available_space(capacity));

        self.tail = advance(self.tail, entry_len, capacity);
        self.len += 1;
    }

    /// Records the removal of the `entry_len` byte entry at `head`.
    pub fn release(&mut self, entry_len: usize, capacity: usize) {
        assert!(!self.is_empty(), "released an entry from an empty ring");
        debug_assert!(entry_len <= capacity - self.available_space(capacity));

        self.head = advance(self.head, entry_len, capacity);
        self.len -= 1;
        self.head_seq += 1;
    }
}
