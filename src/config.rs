/// How [`EntryStore::push`](crate::EntryStore::push) drops old entries to make room.
///
/// Both modes leave the store in the same state; they differ only in cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvictionMode {
    /// Evict through [`EntryStore::pop`](crate::EntryStore::pop), copying the
    /// payload out and discarding it.
    Copy,

    /// Evict through [`EntryStore::pop_without_data`](crate::EntryStore::pop_without_data),
    /// reading only the header and stepping over the payload.
    #[default]
    Skip,
}

/// Construction-time settings of an [`EntryStore`](crate::EntryStore).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StoreConfig {
    eviction: EvictionMode,
    sentinel: Option<u8>,
}

impl StoreConfig {
    pub const fn new() -> Self {
        Self {
            eviction: EvictionMode::Skip,
            sentinel: None,
        }
    }

    pub const fn with_eviction(mut self, eviction: EvictionMode) -> Self {
        self.eviction = eviction;
        self
    }

    /// Poisons the buffer with `byte` at construction and writes it back over
    /// every entry as it leaves the store, so free bytes can be counted from
    /// the raw buffer.
    pub const fn with_sentinel(mut self, byte: u8) -> Self {
        self.sentinel = Some(byte);
        self
    }

    #[inline]
    pub const fn eviction(&self) -> EvictionMode {
        self.eviction
    }

    #[inline]
    pub const fn sentinel(&self) -> Option<u8> {
        self.sentinel
    }
}
