// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Level-wise (Apriori) frequent itemset search.
//!
//! Level k candidates are built by joining frequent (k-1)-itemsets which
//! share their first k-2 items. Any candidate with an infrequent
//! (k-1)-subset is dropped before the database is scanned, as support can
//! only shrink as an itemset grows.

use crate::encoder::TransactionSet;
use crate::error::{ArmError, Result};
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::itemset::{FrequentItemsets, ItemSet};
use crate::vec_sets::is_subset;
use fnv::FnvHashSet;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

// Transactions per counting task.
static COUNT_CHUNK_SIZE: usize = 1024;

pub fn validate_min_support(min_support: f64) -> Result<()> {
    if !(min_support > 0.0 && min_support <= 1.0) {
        return Err(ArmError::InvalidParameter {
            name: "min_support",
            value: min_support,
            reason: "must be in range (0,1]",
        });
    }
    Ok(())
}

fn is_frequent(count: u32, num_transactions: usize, min_support: f64) -> bool {
    count as f64 / num_transactions as f64 >= min_support
}

/// Finds every itemset with support at least `min_support`. `max_len`
/// optionally caps the itemset size, bounding the number of levels.
pub fn mine_frequent_itemsets(
    transactions: &TransactionSet,
    min_support: f64,
    max_len: Option<usize>,
) -> Result<FrequentItemsets> {
    validate_min_support(min_support)?;
    if max_len == Some(0) {
        return Err(ArmError::InvalidParameter {
            name: "max_len",
            value: 0.0,
            reason: "must be at least 1",
        });
    }

    let num_transactions = transactions.len();
    let universe_size = transactions.itemizer().len();
    if num_transactions == 0 || universe_size == 0 {
        return Ok(FrequentItemsets::new(vec![], num_transactions));
    }

    let timer = Instant::now();
    let mut result: Vec<ItemSet> = vec![];

    let item_counts = count_items(transactions.transactions(), universe_size);
    let mut level: Vec<Vec<Item>> = vec![];
    for item in transactions.itemizer().items() {
        let count = item_counts.get(&item);
        if is_frequent(count, num_transactions, min_support) {
            result.push(ItemSet::new(vec![item], count, num_transactions));
            level.push(vec![item]);
        }
    }
    debug!(
        size = 1,
        candidates = universe_size,
        frequent = level.len(),
        "Counted level"
    );

    let mut k = 2;
    while !level.is_empty() && max_len.map_or(true, |max_len| k <= max_len) {
        let candidates = generate_candidates(&level);
        if candidates.is_empty() {
            break;
        }
        let counts = count_candidates(&candidates, transactions.transactions(), k);
        level = vec![];
        for (candidate, count) in candidates.into_iter().zip(counts) {
            if is_frequent(count, num_transactions, min_support) {
                result.push(ItemSet::new(candidate.clone(), count, num_transactions));
                level.push(candidate);
            }
        }
        debug!(size = k, frequent = level.len(), "Counted level");
        k += 1;
    }

    info!(
        itemsets = result.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Apriori finished"
    );

    Ok(FrequentItemsets::new(result, num_transactions))
}

fn count_items(transactions: &[Vec<Item>], universe_size: usize) -> ItemCounter {
    transactions
        .par_chunks(COUNT_CHUNK_SIZE)
        .map(|chunk| {
            let mut counter = ItemCounter::with_capacity(universe_size);
            for transaction in chunk {
                for item in transaction {
                    counter.add(item, 1);
                }
            }
            counter
        })
        .reduce(
            || ItemCounter::with_capacity(universe_size),
            |mut a, b| {
                a.absorb(b);
                a
            },
        )
}

/// Joins pairs of `frequent` (k-1)-itemsets that agree on everything but
/// their last item, dropping candidates with an infrequent (k-1)-subset.
/// `frequent` must be sorted and hold itemsets of a single size; the
/// candidates come out sorted.
pub fn generate_candidates(frequent: &[Vec<Item>]) -> Vec<Vec<Item>> {
    let lookup: FnvHashSet<&[Item]> = frequent.iter().map(|itemset| itemset.as_slice()).collect();
    let mut candidates: Vec<Vec<Item>> = vec![];
    for (i, a) in frequent.iter().enumerate() {
        let (prefix, _) = a.split_at(a.len() - 1);
        for b in &frequent[i + 1..] {
            // Itemsets sharing a prefix are contiguous.
            if !b.starts_with(prefix) {
                break;
            }
            let mut candidate: Vec<Item> = Vec::with_capacity(a.len() + 1);
            candidate.extend_from_slice(a);
            candidate.push(b[b.len() - 1]);
            if !has_infrequent_subset(&candidate, &lookup) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

fn has_infrequent_subset(candidate: &[Item], frequent: &FnvHashSet<&[Item]>) -> bool {
    // Dropping either of the last two items gives back the joined parents.
    let mut subset: Vec<Item> = Vec::with_capacity(candidate.len() - 1);
    for skip in 0..candidate.len().saturating_sub(2) {
        subset.clear();
        subset.extend_from_slice(&candidate[..skip]);
        subset.extend_from_slice(&candidate[skip + 1..]);
        if !frequent.contains(subset.as_slice()) {
            return true;
        }
    }
    false
}

// Support counts of `candidates`, each of size k, summed over chunks of
// the transaction database counted in parallel.
fn count_candidates(candidates: &[Vec<Item>], transactions: &[Vec<Item>], k: usize) -> Vec<u32> {
    transactions
        .par_chunks(COUNT_CHUNK_SIZE)
        .map(|chunk| {
            let mut counts = vec![0u32; candidates.len()];
            for transaction in chunk.iter().filter(|t| t.len() >= k) {
                for (candidate, count) in candidates.iter().zip(counts.iter_mut()) {
                    if is_subset(candidate, transaction) {
                        *count += 1;
                    }
                }
            }
            counts
        })
        .reduce(
            || vec![0u32; candidates.len()],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        )
}
