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

use crate::item::Item;
use fnv::FnvHashMap;
use itertools::Itertools;
use std::cmp;

#[derive(Clone, Debug)]
pub struct ItemSet {
    pub items: Vec<Item>,
    pub count: u32,
    pub support: f64,
}

// Itemsets are identified by their items; support is derived from them.
impl PartialEq for ItemSet {
    fn eq(&self, other: &ItemSet) -> bool {
        self.items == other.items
    }
}

impl Eq for ItemSet {}

// Smaller itemsets first, then canonical item order.
impl Ord for ItemSet {
    fn cmp(&self, other: &ItemSet) -> cmp::Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.items.cmp(&other.items))
    }
}

impl PartialOrd for ItemSet {
    fn partial_cmp(&self, other: &ItemSet) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl ItemSet {
    pub fn new(items: Vec<Item>, count: u32, num_transactions: usize) -> ItemSet {
        let support = if num_transactions == 0 {
            0.0
        } else {
            count as f64 / num_transactions as f64
        };
        ItemSet {
            items: items.into_iter().sorted().collect(),
            count,
            support,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The output of a mining run: every frequent itemset with its exact
/// support, ordered by size then canonical item order.
#[derive(Clone, Debug)]
pub struct FrequentItemsets {
    itemsets: Vec<ItemSet>,
    lookup: FnvHashMap<Vec<Item>, usize>,
    num_transactions: usize,
}

impl FrequentItemsets {
    pub fn new(mut itemsets: Vec<ItemSet>, num_transactions: usize) -> FrequentItemsets {
        itemsets.sort();
        let lookup = FrequentItemsets::build_lookup(&itemsets);
        FrequentItemsets {
            itemsets,
            lookup,
            num_transactions,
        }
    }

    fn build_lookup(itemsets: &[ItemSet]) -> FnvHashMap<Vec<Item>, usize> {
        itemsets
            .iter()
            .enumerate()
            .map(|(position, itemset)| (itemset.items.clone(), position))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<ItemSet> {
        self.itemsets.iter()
    }

    pub fn as_slice(&self) -> &[ItemSet] {
        &self.itemsets
    }

    pub fn of_size(&self, size: usize) -> impl Iterator<Item = &ItemSet> {
        self.itemsets.iter().filter(move |itemset| itemset.len() == size)
    }

    pub fn max_len(&self) -> usize {
        self.itemsets.last().map_or(0, ItemSet::len)
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    /// `items` must be sorted.
    pub fn get(&self, items: &[Item]) -> Option<&ItemSet> {
        self.lookup.get(items).map(|&position| &self.itemsets[position])
    }

    pub fn support_of(&self, items: &[Item]) -> Option<f64> {
        self.get(items).map(|itemset| itemset.support)
    }

    /// Keeps only the itemsets matching `keep`. Rules generated afterwards
    /// fall back to the transaction database for supports that were
    /// filtered out.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&ItemSet) -> bool,
    {
        self.itemsets.retain(keep);
        self.lookup = FrequentItemsets::build_lookup(&self.itemsets);
    }

    pub fn into_vec(self) -> Vec<ItemSet> {
        self.itemsets
    }
}

impl<'a> IntoIterator for &'a FrequentItemsets {
    type Item = &'a ItemSet;
    type IntoIter = std::slice::Iter<'a, ItemSet>;
    fn into_iter(self) -> Self::IntoIter {
        self.itemsets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{FrequentItemsets, ItemSet};
    use crate::item::Item;

    fn items(ids: &[u32]) -> Vec<Item> {
        ids.iter().map(|&id| Item::with_id(id)).collect()
    }

    #[test]
    fn test_itemset_sorts_items() {
        let itemset = ItemSet::new(items(&[3, 1, 2]), 2, 4);
        assert_eq!(itemset.items, items(&[1, 2, 3]));
        assert_eq!(itemset.support, 0.5);
    }

    #[test]
    fn test_ordering() {
        let mut v = vec![
            ItemSet::new(items(&[0, 2]), 1, 1),
            ItemSet::new(items(&[5]), 1, 1),
            ItemSet::new(items(&[0, 1]), 1, 1),
            ItemSet::new(items(&[0]), 1, 1),
        ];
        v.sort();
        let order: Vec<Vec<Item>> = v.into_iter().map(|i| i.items).collect();
        assert_eq!(
            order,
            vec![items(&[0]), items(&[5]), items(&[0, 1]), items(&[0, 2])]
        );
    }

    #[test]
    fn test_lookup_and_retain() {
        let mut frequent = FrequentItemsets::new(
            vec![
                ItemSet::new(items(&[0, 1]), 2, 5),
                ItemSet::new(items(&[0]), 4, 5),
                ItemSet::new(items(&[1]), 3, 5),
            ],
            5,
        );
        assert_eq!(frequent.len(), 3);
        assert_eq!(frequent.max_len(), 2);
        assert_eq!(frequent.of_size(1).count(), 2);
        assert_eq!(frequent.support_of(&items(&[0])), Some(0.8));
        assert_eq!(frequent.support_of(&items(&[0, 1])), Some(0.4));
        assert_eq!(frequent.support_of(&items(&[2])), None);

        frequent.retain(|itemset| itemset.len() > 1);
        assert_eq!(frequent.len(), 1);
        assert_eq!(frequent.support_of(&items(&[0])), None);
        assert_eq!(frequent.support_of(&items(&[0, 1])), Some(0.4));
    }
}
