use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("entry of {entry_len} bytes including its header does not fit a store of {capacity} bytes")]
    EntryTooLarge { entry_len: usize, capacity: usize },

    #[error("store is empty and no entry can be removed")]
    EmptyStore,
}
