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

//! Turns raw label lists into an immutable, canonically ordered
//! transaction database.

use crate::error::{ArmError, Result};
use crate::index::Index;
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::vec_sets::is_subset;
use fnv::FnvHashSet;
use tracing::debug;

pub struct TransactionSet {
    itemizer: Itemizer,
    transactions: Vec<Vec<Item>>,
    index: Index,
}

impl TransactionSet {
    /// Encodes `raw` transactions. Labels are trimmed, blank labels are
    /// dropped and duplicates within a transaction collapse. Transaction
    /// ids are positions in `raw`, so transactions that end up empty are
    /// kept and still count towards the total.
    pub fn encode<T, S>(raw: &[T]) -> Result<TransactionSet>
    where
        T: AsRef<[S]>,
        S: AsRef<str>,
    {
        if raw.is_empty() {
            return Err(ArmError::InvalidInput(
                "transaction sequence is empty".to_owned(),
            ));
        }

        // First pass: find the universe, so the id space is fixed before
        // any transaction is encoded.
        let mut labels: FnvHashSet<&str> = FnvHashSet::default();
        for transaction in raw {
            for label in transaction.as_ref() {
                let label = label.as_ref().trim();
                if !label.is_empty() {
                    labels.insert(label);
                }
            }
        }
        if labels.is_empty() {
            return Err(ArmError::InvalidInput(format!(
                "all {} transactions are empty",
                raw.len()
            )));
        }
        let itemizer = Itemizer::from_labels(labels.into_iter());

        let mut transactions: Vec<Vec<Item>> = Vec::with_capacity(raw.len());
        let mut index = Index::with_item_count(itemizer.len());
        for transaction in raw {
            let transaction = transaction.as_ref();
            let mut items: Vec<Item> = Vec::with_capacity(transaction.len());
            for label in transaction {
                if let Some(item) = itemizer.id_of(label.as_ref().trim()) {
                    items.push(item);
                }
            }
            // Some sources have transactions with duplicate items.
            items.sort();
            items.dedup();
            index.insert(&items);
            transactions.push(items);
        }

        debug!(
            transactions = transactions.len(),
            items = itemizer.len(),
            "Encoded transactions"
        );

        Ok(TransactionSet {
            itemizer,
            transactions,
            index,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(itemizer: Itemizer, transactions: Vec<Vec<Item>>) -> TransactionSet {
        let mut index = Index::with_item_count(itemizer.len());
        for transaction in &transactions {
            index.insert(transaction);
        }
        TransactionSet {
            itemizer,
            transactions,
            index,
        }
    }

    pub fn itemizer(&self) -> &Itemizer {
        &self.itemizer
    }
    /// Distinct item labels in canonical order.
    pub fn universe(&self) -> &[String] {
        self.itemizer.labels()
    }
    pub fn len(&self) -> usize {
        self.transactions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
    pub fn transactions(&self) -> &[Vec<Item>] {
        &self.transactions
    }
    pub fn transaction(&self, tid: usize) -> &[Item] {
        &self.transactions[tid]
    }
    /// Labels of the items present in transaction `tid`, in canonical order.
    pub fn labels_of(&self, tid: usize) -> Vec<&str> {
        self.itemizer.to_str_vec(&self.transactions[tid])
    }
    // Straight scan of the database; the index answers the same question
    // faster, this is the reference.
    pub fn count_containing(&self, itemset: &[Item]) -> u32 {
        self.transactions
            .iter()
            .filter(|transaction| is_subset(itemset, transaction))
            .count() as u32
    }
    pub fn support(&self, itemset: &[Item]) -> f64 {
        self.index.support(itemset)
    }
}

#[cfg(test)]
mod tests {
    use super::TransactionSet;
    use crate::error::ArmError;

    #[test]
    fn test_encode() {
        let raw = vec![
            vec!["b", "a", "b", ""],
            vec!["  c ", "a"],
            vec!["", "   "],
            vec!["a"],
        ];
        let transactions = TransactionSet::encode(&raw).unwrap();
        assert_eq!(transactions.universe(), &["a", "b", "c"]);
        assert_eq!(transactions.len(), 4);
        assert_eq!(transactions.labels_of(0), vec!["a", "b"]);
        assert_eq!(transactions.labels_of(1), vec!["a", "c"]);
        assert!(transactions.labels_of(2).is_empty());
        assert_eq!(transactions.labels_of(3), vec!["a"]);

        let a = transactions.itemizer().to_id_vec(&["a"]).unwrap();
        assert_eq!(transactions.count_containing(&a), 3);
        assert_eq!(transactions.support(&a), 0.75);
    }

    #[test]
    fn test_encode_owned_strings() {
        let raw: Vec<Vec<String>> = vec![vec!["x".to_owned()], vec!["y".to_owned()]];
        let transactions = TransactionSet::encode(&raw).unwrap();
        assert_eq!(transactions.universe(), &["x", "y"]);
    }

    #[test]
    fn test_empty_input() {
        let raw: Vec<Vec<&str>> = vec![];
        match TransactionSet::encode(&raw) {
            Err(ArmError::InvalidInput(_)) => {}
            other => panic!("expected InvalidInput, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_all_transactions_empty() {
        let raw = vec![vec![], vec![" "], vec!["", ""]];
        assert!(matches!(
            TransactionSet::encode(&raw),
            Err(ArmError::InvalidInput(_))
        ));
    }
}
