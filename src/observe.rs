use std::ops::Deref;

use tracing::{debug, trace, Level};

use crate::error::StoreError;
use crate::ring::{EntryStore, Handle};

/// Wraps an [`EntryStore`] and reports every mutating call as `tracing` events.
///
/// Each operation logs one `debug` event with its outcome, including how many
/// entries a push evicted. At `trace` level the cursors and a hex dump of the
/// buffer follow. Read-only accessors are reached through `Deref`.
#[derive(Debug)]
pub struct Traced {
    inner: EntryStore,
}

impl Traced {
    pub fn new(inner: EntryStore) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> EntryStore {
        self.inner
    }

    pub fn push(&mut self, payload: &[u8]) -> Result<Handle, StoreError> {
        let before = self.inner.len();
        let result = self.inner.push(payload);

        match &result {
            Ok(handle) => {
                let evicted = before + 1 - self.inner.len();
                debug!(
                    offset = handle.offset(),
                    seq = handle.seq(),
                    len = payload.len(),
                    evicted,
                    "pushed entry"
                );
            }
            Err(err) => debug!(len = payload.len(), %err, "push rejected"),
        }

        self.trace_state("push");
        result
    }

    pub fn pop(&mut self) -> Result<Vec<u8>, StoreError> {
        let result = self.inner.pop();

        match &result {
            Ok(payload) => debug!(len = payload.len(), "popped entry"),
            Err(err) => debug!(%err, "pop failed"),
        }

        self.trace_state("pop");
        result
    }

    pub fn pop_without_data(&mut self) -> Result<(), StoreError> {
        let result = self.inner.pop_without_data();

        if let Err(err) = &result {
            debug!(%err, "pop without data failed");
        } else {
            debug!("dropped entry");
        }

        self.trace_state("pop_without_data");
        result
    }

    fn trace_state(&self, op: &'static str) {
        if !tracing::enabled!(Level::TRACE) {
            return;
        }

        trace!(
            op,
            head = self.inner.head(),
            tail = self.inner.tail(),
            entries = self.inner.len(),
            available = self.inner.available_space(),
            "store state"
        );
        trace!("{}", self.inner.snapshot());
    }
}

impl Deref for Traced {
    type Target = EntryStore;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<EntryStore> for Traced {
    fn from(inner: EntryStore) -> Self {
        Self::new(inner)
    }
}
