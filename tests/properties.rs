use std::collections::VecDeque;

use anyhow::{ensure, Result};
use entry_ring::error::StoreError;
use entry_ring::{EntryStore, EvictionMode, StoreConfig, HEADER_LEN};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// no 'X', which poisons free bytes
const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWYZ";

#[derive(Clone, Debug)]
enum Op {
    Push(Vec<u8>),
    Pop,
    PopWithoutData,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => prop::collection::vec(any::<u8>(), 0..48).prop_map(Op::Push),
        1 => Just(Op::Pop),
        1 => Just(Op::PopWithoutData),
    ]
}

fn eviction_strategy() -> impl Strategy<Value = EvictionMode> {
    prop_oneof![Just(EvictionMode::Copy), Just(EvictionMode::Skip)]
}

fn occupied(model: &VecDeque<Vec<u8>>) -> usize {
    model.iter().map(|payload| HEADER_LEN + payload.len()).sum()
}

proptest! {
    #[test]
    fn store_matches_fifo_model(
        capacity in 1usize..96,
        eviction in eviction_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut store = EntryStore::with_config(capacity, StoreConfig::new().with_eviction(eviction));
        let mut model: VecDeque<Vec<u8>> = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(payload) => {
                    let entry_len = HEADER_LEN + payload.len();
                    let (head, tail, len) = (store.head(), store.tail(), store.len());

                    if entry_len > capacity {
                        prop_assert_eq!(
                            store.push(&payload),
                            Err(StoreError::EntryTooLarge { entry_len, capacity })
                        );
                        prop_assert_eq!((store.head(), store.tail(), store.len()), (head, tail, len));
                        continue;
                    }

                    let mut evicted = 0;
                    while capacity - occupied(&model) < entry_len {
                        model.pop_front();
                        evicted += 1;
                    }
                    model.push_back(payload.clone());

                    let handle = store.push(&payload).unwrap();
                    prop_assert_eq!(handle.offset(), tail);
                    prop_assert_eq!(store.len(), len + 1 - evicted);
                    prop_assert_eq!(store.get(handle).unwrap().to_vec(), payload);
                }
                Op::Pop => match model.pop_front() {
                    Some(expected) => prop_assert_eq!(store.pop().unwrap(), expected),
                    None => prop_assert_eq!(store.pop(), Err(StoreError::EmptyStore)),
                },
                Op::PopWithoutData => match model.pop_front() {
                    Some(_) => prop_assert!(store.pop_without_data().is_ok()),
                    None => prop_assert_eq!(store.pop_without_data(), Err(StoreError::EmptyStore)),
                },
            }

            prop_assert!(store.head() < capacity);
            prop_assert!(store.tail() < capacity);
            prop_assert_eq!(store.len(), model.len());
            prop_assert_eq!(store.available_space() + occupied(&model), capacity);

            let stored: Vec<Vec<u8>> = store.iter().map(|entry| entry.to_vec()).collect();
            prop_assert_eq!(stored, Vec::from(model.clone()));
        }
    }

    #[test]
    fn push_then_pop_round_trips(
        prefix in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..16), 0..8),
        payload in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut store = EntryStore::new(512);

        for entry in &prefix {
            store.push(entry).unwrap();
            store.pop_without_data().unwrap();
        }

        store.push(&payload).unwrap();
        prop_assert_eq!(store.pop().unwrap(), payload);
        prop_assert!(store.is_empty());
    }
}

fn random_payload(rng: &mut SmallRng, max_len: usize) -> Vec<u8> {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())])
        .collect()
}

/// Replays random pushes against a poisoned store and cross-checks the cursors
/// and free space with an independent count after every push.
fn check_cursors_and_space(eviction: EvictionMode, iterations: usize, seed: u64) -> Result<()> {
    const CAPACITY: usize = 30;

    let config = StoreConfig::new()
        .with_eviction(eviction)
        .with_sentinel(b'X');
    let mut store = EntryStore::with_config(CAPACITY, config);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut sizes: VecDeque<usize> = VecDeque::new();
    let mut check_head = 0;
    let mut check_tail = 0;
    let mut check_space = CAPACITY;

    for i in 0..iterations {
        let payload = random_payload(&mut rng, CAPACITY - HEADER_LEN);
        let entry_len = HEADER_LEN + payload.len();

        let mut popped_bytes = 0;
        while check_space + popped_bytes < entry_len {
            popped_bytes += sizes.pop_front().unwrap_or_default();
        }
        sizes.push_back(entry_len);

        store.push(&payload)?;

        check_head = (check_head + popped_bytes) % CAPACITY;
        check_tail = (check_tail + entry_len) % CAPACITY;
        check_space = check_space + popped_bytes - entry_len;

        ensure!(store.head() == check_head, "head at {i}: {:?}", store);
        ensure!(store.tail() == check_tail, "tail at {i}: {:?}", store);
        ensure!(store.available_space() == check_space, "space at {i}: {:?}", store);
        ensure!(
            store.available_space() == store.count_sentinel(),
            "poison count at {i}: {}",
            store.snapshot()
        );
        ensure!(store.len() == sizes.len(), "entries at {i}: {:?}", store);
    }

    Ok(())
}

#[test]
fn cursors_and_space_with_copy_eviction() -> Result<()> {
    check_cursors_and_space(EvictionMode::Copy, 50_000, 256)
}

#[test]
fn cursors_and_space_with_skip_eviction() -> Result<()> {
    check_cursors_and_space(EvictionMode::Skip, 50_000, 512)
}

#[test]
fn handles_of_evicted_entries_go_stale() -> Result<()> {
    let mut store = EntryStore::new(64);
    let mut rng = SmallRng::seed_from_u64(1024);
    let mut handles = VecDeque::new();

    for _ in 0..1_000 {
        let payload = random_payload(&mut rng, 20);
        let handle = store.push(&payload)?;
        handles.push_back((handle, payload));

        while let Some(&(oldest, _)) = handles.front() {
            if store.contains(oldest) {
                break;
            }
            ensure!(store.get(oldest).is_none());
            handles.pop_front();
        }

        ensure!(handles.len() == store.len());
        for (handle, payload) in &handles {
            let entry = store.get(*handle).expect("live handle resolves");
            ensure!(entry.to_vec() == *payload);
        }
    }

    Ok(())
}
