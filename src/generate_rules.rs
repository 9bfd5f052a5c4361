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

use crate::encoder::TransactionSet;
use crate::error::Result;
use crate::item::Item;
use crate::itemset::{FrequentItemsets, ItemSet};
use crate::metric::Metric;
use crate::rule::Rule;
use crate::vec_sets::difference;
use itertools::Itertools;
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

// Supports come from the mined itemsets where possible. Anything filtered
// out of the collection is counted against the transaction index instead.
struct ItemsetSupport<'a> {
    itemsets: &'a FrequentItemsets,
    transactions: &'a TransactionSet,
}

impl<'a> ItemsetSupport<'a> {
    fn get(&self, items: &[Item]) -> f64 {
        match self.itemsets.support_of(items) {
            Some(support) => support,
            None => self.transactions.support(items),
        }
    }
}

/// Splits every frequent itemset of two or more items into all
/// antecedent => consequent rules and keeps those whose `metric` is at
/// least `min_threshold`. Output order follows the itemset order, then
/// antecedents by size and canonical order.
pub fn generate_rules(
    itemsets: &FrequentItemsets,
    transactions: &TransactionSet,
    metric: Metric,
    min_threshold: f64,
) -> Result<Vec<Rule>> {
    metric.validate_threshold(min_threshold)?;

    let timer = Instant::now();
    let supports = ItemsetSupport {
        itemsets,
        transactions,
    };
    let rules: Vec<Vec<Rule>> = itemsets
        .as_slice()
        .par_iter()
        .filter(|itemset| itemset.len() > 1)
        .map(|itemset| rules_from_itemset(itemset, &supports, metric, min_threshold))
        .collect::<Result<Vec<Vec<Rule>>>>()?;
    let rules: Vec<Rule> = rules.into_iter().flatten().collect();

    info!(
        rules = rules.len(),
        metric = %metric,
        min_threshold,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Generated rules"
    );
    Ok(rules)
}

fn rules_from_itemset(
    itemset: &ItemSet,
    supports: &ItemsetSupport,
    metric: Metric,
    min_threshold: f64,
) -> Result<Vec<Rule>> {
    let mut rules: Vec<Rule> = vec![];
    for size in 1..itemset.len() {
        for antecedent in itemset.items.iter().cloned().combinations(size) {
            let consequent = difference(&itemset.items, &antecedent);
            let antecedent_support = supports.get(&antecedent);
            let consequent_support = supports.get(&consequent);
            let rule = Rule::new(
                antecedent,
                consequent,
                itemset.support,
                antecedent_support,
                consequent_support,
            )?;
            if metric == Metric::All || rule.metric(metric) >= min_threshold {
                rules.push(rule);
            }
        }
    }
    Ok(rules)
}
