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

//! Association rule mining over rental listings.
//!
//! Listings are discretized into baskets of labels, encoded into a
//! transaction database, mined for frequent itemsets with Apriori, and
//! split into antecedent => consequent rules scored by support,
//! confidence and lift.

pub mod apriori;
pub mod basket;
pub mod config;
pub mod discretize;
pub mod encoder;
pub mod error;
pub mod generate_rules;
pub mod index;
pub mod item;
pub mod item_counter;
pub mod itemizer;
pub mod itemset;
pub mod listing;
pub mod metric;
pub mod report;
pub mod rule;
pub mod transaction_reader;
pub mod vec_sets;

pub use crate::apriori::mine_frequent_itemsets;
pub use crate::config::MiningConfig;
pub use crate::encoder::TransactionSet;
pub use crate::error::{ArmError, Result};
pub use crate::generate_rules::generate_rules;
pub use crate::item::Item;
pub use crate::itemset::{FrequentItemsets, ItemSet};
pub use crate::metric::Metric;
pub use crate::rule::{Rule, RuleSet};

/// Everything a mining run produces.
pub struct Mined {
    pub transactions: TransactionSet,
    pub itemsets: FrequentItemsets,
    pub rules: Vec<Rule>,
}

/// Encodes `raw` transactions, mines frequent itemsets and derives rules.
/// Any failure aborts the whole run; no partial results are returned.
pub fn mine<T, S>(raw: &[T], config: &MiningConfig) -> Result<Mined>
where
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    config.validate()?;
    let transactions = TransactionSet::encode(raw)?;
    let itemsets = mine_frequent_itemsets(&transactions, config.min_support, config.max_len)?;
    let rules = generate_rules(
        &itemsets,
        &transactions,
        config.metric,
        config.min_threshold,
    )?;
    Ok(Mined {
        transactions,
        itemsets,
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::{mine, ArmError, Metric, MiningConfig};

    #[test]
    fn test_mine() {
        let raw = vec![
            vec!["A", "B", "C"],
            vec!["A", "B"],
            vec!["A", "C"],
            vec!["A"],
            vec!["B", "C"],
        ];
        let mined = mine(&raw, &MiningConfig::new(0.4, Metric::Confidence, 0.6)).unwrap();
        assert_eq!(mined.transactions.len(), 5);
        assert_eq!(mined.itemsets.len(), 6);
        assert_eq!(mined.rules.len(), 4);
    }

    #[test]
    fn test_mine_fails_fast() {
        let empty: Vec<Vec<&str>> = vec![];
        assert!(matches!(
            mine(&empty, &MiningConfig::new(0.4, Metric::Lift, 1.0)),
            Err(ArmError::InvalidInput(_))
        ));
        let raw = vec![vec!["A"]];
        assert!(matches!(
            mine(&raw, &MiningConfig::new(0.0, Metric::Lift, 1.0)),
            Err(ArmError::InvalidParameter { .. })
        ));
    }
}
