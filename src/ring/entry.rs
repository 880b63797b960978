use std::iter::FusedIterator;

use super::header::{self, HEADER_LEN};
use super::wrap::{self, advance};

/// Where an entry was written, returned by [`EntryStore::push`].
///
/// `offset` is the position of the entry's header at the time of the push and
/// is advisory only: once the entry is evicted the same offset may hold
/// unrelated bytes. `seq` is the entry's arrival number, which the store uses to
/// refuse stale handles in [`EntryStore::contains`] and [`EntryStore::get`].
/// Handles are only meaningful to the store that issued them.
///
/// [`EntryStore::push`]: crate::EntryStore::push
/// [`EntryStore::contains`]: crate::EntryStore::contains
/// [`EntryStore::get`]: crate::EntryStore::get
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    offset: usize,
    seq: u64,
}

impl Handle {
    pub(crate) const fn new(offset: usize, seq: u64) -> Self {
        Self { offset, seq }
    }

    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub const fn seq(&self) -> u64 {
        self.seq
    }
}

/// Borrowed view of one stored payload, split in two when it straddles the end
/// of the buffer.
#[derive(Clone, Copy, Debug)]
pub struct Entry<'a> {
    handle: Handle,
    first: &'a [u8],
    second: &'a [u8],
}

impl<'a> Entry<'a> {
    #[inline]
    pub const fn handle(&self) -> Handle {
        self.handle
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.first.len() + self.second.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The payload in order; the second slice is empty unless the payload wraps.
    #[inline]
    pub const fn segments(&self) -> (&'a [u8], &'a [u8]) {
        (self.first, self.second)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(self.len());
        payload.extend_from_slice(self.first);
        payload.extend_from_slice(self.second);
        payload
    }

    /// Copies as much of the payload as fits into `dst`, returning the count.
    pub fn copy_to(&self, dst: &mut [u8]) -> usize {
        let n = self.len().min(dst.len());
        let split = self.first.len().min(n);

        dst[..split].copy_from_slice(&self.first[..split]);
        dst[split..n].copy_from_slice(&self.second[..n - split]);
        n
    }
}

impl PartialEq<[u8]> for Entry<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.len() == other.len()
            && self.first == &other[..self.first.len()]
            && self.second == &other[self.first.len()..]
    }
}

/// Decodes the entry whose header starts at `at`, returning it together with
/// the position right after its payload. `None` if the header claims more
/// bytes than the buffer holds.
pub(crate) fn read_entry(storage: &[u8], at: usize, seq: u64) -> Option<(Entry<'_>, usize)> {
    let capacity = storage.len();
    if at >= capacity || HEADER_LEN > capacity {
        return None;
    }

    let mut prefix = [0u8; HEADER_LEN];
    let payload_at = wrap::read(storage, at, &mut prefix);
    let payload_len = header::decode(&prefix);

    if payload_len > capacity - HEADER_LEN {
        return None;
    }

    let (first, second) = wrap::segments(storage, payload_at, payload_len);
    let entry = Entry {
        handle: Handle::new(at, seq),
        first,
        second,
    };

    Some((entry, advance(payload_at, payload_len, capacity)))
}

/// Oldest-first walk over the entries of an [`EntryStore`].
///
/// [`EntryStore`]: crate::EntryStore
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    storage: &'a [u8],
    pos: usize,
    seq: u64,
    remaining: usize,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(storage: &'a [u8], head: usize, head_seq: u64, len: usize) -> Self {
        Self {
            storage,
            pos: head,
            seq: head_seq,
            remaining: len,
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let (entry, next) = read_entry(self.storage, self.pos, self.seq)
            .expect("stored entry headers are always in bounds");

        self.pos = next;
        self.seq += 1;
        self.remaining -= 1;

        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Entries<'_> {}

impl FusedIterator for Entries<'_> {}
