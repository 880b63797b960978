mod entry;
mod entry_store;
mod header;
mod ring_offsets;
mod snapshot;
mod wrap;

pub use entry::{Entries, Entry, Handle};
pub use entry_store::EntryStore;
pub use header::HEADER_LEN;
pub use snapshot::Snapshot;
