use crate::config::{EvictionMode, StoreConfig};
use crate::error::StoreError;

use super::entry::{read_entry, Entries, Entry, Handle};
use super::header::{self, HEADER_LEN};
use super::ring_offsets::RingOffsets;
use super::snapshot::Snapshot;
use super::wrap::{self, advance};

/// Fixed-capacity FIFO of length-prefixed byte entries stored back to back in
/// a circular buffer.
///
/// Every entry is framed as a 4-byte big-endian payload length followed by the
/// payload, with no padding. A frame may run off the end of the buffer and
/// continue at offset 0. When a [`push`](Self::push) does not fit, the oldest
/// entries are evicted one at a time until it does.
///
/// The store does no locking; wrap it in a mutex to share it between threads.
pub struct EntryStore {
    storage: Box<[u8]>,
    offsets: RingOffsets,
    header_scratch: [u8; HEADER_LEN],
    config: StoreConfig,
}

impl EntryStore {
    pub fn new(capacity: usize) -> Self {
        Self::with_config(capacity, StoreConfig::default())
    }

    pub fn with_config(capacity: usize, config: StoreConfig) -> Self {
        assert!(capacity > 0, "entry store capacity must be non-zero");

        let fill = config.sentinel().unwrap_or(0);

        Self {
            storage: vec![fill; capacity].into_boxed_slice(),
            offsets: RingOffsets::default(),
            header_scratch: [0; HEADER_LEN],
            config,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of stored entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    pub const fn head(&self) -> usize {
        self.offsets.head()
    }

    #[inline]
    pub const fn tail(&self) -> usize {
        self.offsets.tail()
    }

    #[inline]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Free bytes between the tail and the head.
    #[inline]
    pub fn available_space(&self) -> usize {
        self.offsets.available_space(self.capacity())
    }

    /// Bytes taken by stored entries, headers included.
    #[inline]
    pub fn used_space(&self) -> usize {
        self.capacity() - self.available_space()
    }

    pub fn push(&mut self, payload: &[u8]) -> Result<Handle, StoreError> {
        let capacity = self.capacity();
        let entry_len = HEADER_LEN.saturating_add(payload.len());

        let payload_len = match header::payload_len(payload.len()) {
            Some(len) if entry_len <= capacity => len,
            _ => {
                return Err(StoreError::EntryTooLarge {
                    entry_len,
                    capacity,
                })
            }
        };

        while self.available_space() < entry_len {
            self.evict_one();
        }

        let handle = Handle::new(self.offsets.tail(), self.offsets.next_seq());

        header::encode(payload_len, &mut self.header_scratch);
        let payload_at = wrap::write(&mut self.storage, handle.offset(), &self.header_scratch);
        wrap::write(&mut self.storage, payload_at, payload);

        self.offsets.commit(entry_len, capacity);

        Ok(handle)
    }

    fn evict_one(&mut self) {
        let evicted = match self.config.eviction() {
            EvictionMode::Copy => self.pop().map(|_| ()),
            EvictionMode::Skip => self.pop_without_data(),
        };

        assert!(
            evicted.is_ok(),
            "store drained without making room for an entry that fits its capacity"
        );
    }

    /// Removes the oldest entry and returns its payload.
    pub fn pop(&mut self) -> Result<Vec<u8>, StoreError> {
        let payload_len = self.read_head_header()?;
        let payload_at = advance(self.offsets.head(), HEADER_LEN, self.capacity());

        let mut payload = vec![0; payload_len];
        wrap::read(&self.storage, payload_at, &mut payload);

        self.release_head(payload_len);

        Ok(payload)
    }

    /// Removes the oldest entry without copying its payload out.
    pub fn pop_without_data(&mut self) -> Result<(), StoreError> {
        let payload_len = self.read_head_header()?;
        self.release_head(payload_len);

        Ok(())
    }

    fn read_head_header(&mut self) -> Result<usize, StoreError> {
        if self.offsets.is_empty() {
            return Err(StoreError::EmptyStore);
        }

        wrap::read(&self.storage, self.offsets.head(), &mut self.header_scratch);
        let payload_len = header::decode(&self.header_scratch);

        assert!(
            payload_len <= self.used_space() - HEADER_LEN,
            "entry header at offset {} claims {} payload bytes past the stored data",
            self.offsets.head(),
            payload_len
        );

        Ok(payload_len)
    }

    fn release_head(&mut self, payload_len: usize) {
        let entry_len = HEADER_LEN + payload_len;

        if let Some(sentinel) = self.config.sentinel() {
            wrap::fill(&mut self.storage, self.offsets.head(), entry_len, sentinel);
        }

        let capacity = self.capacity();
        self.offsets.release(entry_len, capacity);
    }

    /// The oldest entry, left in place.
    pub fn peek(&self) -> Option<Entry<'_>> {
        self.iter().next()
    }

    pub fn iter(&self) -> Entries<'_> {
        Entries::new(
            &self.storage,
            self.offsets.head(),
            self.offsets.head_seq(),
            self.offsets.len(),
        )
    }

    /// Whether the entry `handle` points at is still stored.
    #[inline]
    pub const fn contains(&self, handle: Handle) -> bool {
        self.offsets.contains_seq(handle.seq())
    }

    /// Resolves `handle` to its entry, or `None` once that entry has been removed.
    pub fn get(&self, handle: Handle) -> Option<Entry<'_>> {
        if !self.contains(handle) {
            return None;
        }

        read_entry(&self.storage, handle.offset(), handle.seq()).map(|(entry, _)| entry)
    }

    /// The raw backing buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            head: self.head(),
            tail: self.tail(),
            entry_count: self.len(),
            available: self.available_space(),
            bytes: self.storage.to_vec(),
        }
    }

    /// Buffer bytes equal to the configured sentinel, 0 without one.
    pub fn count_sentinel(&self) -> usize {
        self.config.sentinel().map_or(0, |sentinel| {
            self.storage.iter().filter(|&&byte| byte == sentinel).count()
        })
    }

    /// Overwrites every free byte with `byte`. Stored entries are untouched.
    pub fn fill_free(&mut self, byte: u8) {
        let available = self.available_space();
        wrap::fill(&mut self.storage, self.offsets.tail(), available, byte);
    }
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore")
            .field("capacity", &self.capacity())
            .field("head", &self.head())
            .field("tail", &self.tail())
            .field("len", &self.len())
            .field("available", &self.available_space())
            .field("config", &self.config)
            .finish()
    }
}
