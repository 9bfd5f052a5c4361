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
use crate::itemizer::Itemizer;
use crate::itemset::FrequentItemsets;
use crate::rule::Rule;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::io;
use std::io::Write;

/// Strongest rules first: confidence descending, then lift descending.
/// The sort is stable, so ties keep generation order.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by_key(|rule| {
        (
            Reverse(OrderedFloat(rule.confidence)),
            Reverse(OrderedFloat(rule.lift)),
        )
    });
}

pub fn rules_with_consequent<'a>(rules: &'a [Rule], item: Item) -> impl Iterator<Item = &'a Rule> {
    rules
        .iter()
        .filter(move |rule| rule.consequent.binary_search(&item).is_ok())
}

pub fn write_rules_csv<W: Write>(output: &mut W, rules: &[Rule], itemizer: &Itemizer) -> io::Result<()> {
    writeln!(
        output,
        "Antecedent => Consequent,Support,Confidence,Lift,Leverage,Conviction"
    )?;
    for rule in rules {
        writeln!(
            output,
            "{},{},{},{},{},{}",
            rule.to_string(itemizer),
            rule.support,
            rule.confidence,
            rule.lift,
            rule.leverage,
            rule.conviction
        )?;
    }
    Ok(())
}

pub fn write_itemsets_csv<W: Write>(
    output: &mut W,
    itemsets: &FrequentItemsets,
    itemizer: &Itemizer,
) -> io::Result<()> {
    writeln!(output, "Itemset,Support,Count")?;
    for itemset in itemsets {
        writeln!(
            output,
            "{},{},{}",
            Item::item_vec_to_string(&itemset.items, itemizer),
            itemset.support,
            itemset.count
        )?;
    }
    Ok(())
}

/// Human readable table of at most `limit` rules.
pub fn write_rule_table<W: Write>(
    output: &mut W,
    rules: &[Rule],
    itemizer: &Itemizer,
    limit: usize,
) -> io::Result<()> {
    writeln!(
        output,
        "{:<60} {:>8} {:>10} {:>8}",
        "rule", "support", "confidence", "lift"
    )?;
    for rule in rules.iter().take(limit) {
        writeln!(
            output,
            "{:<60} {:>8.4} {:>10.4} {:>8.4}",
            rule.to_string(itemizer),
            rule.support,
            rule.confidence,
            rule.lift
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{rules_with_consequent, sort_rules, write_itemsets_csv, write_rule_table, write_rules_csv};
    use crate::apriori::mine_frequent_itemsets;
    use crate::encoder::TransactionSet;
    use crate::generate_rules::generate_rules;
    use crate::metric::Metric;

    fn scenario() -> TransactionSet {
        TransactionSet::encode(&[
            vec!["A", "B", "C"],
            vec!["A", "B"],
            vec!["A", "C"],
            vec!["A"],
            vec!["B", "C"],
        ])
        .unwrap()
    }

    #[test]
    fn test_sort_and_filter() {
        let transactions = scenario();
        let itemizer = transactions.itemizer();
        let itemsets = mine_frequent_itemsets(&transactions, 0.2, None).unwrap();
        let mut rules = generate_rules(&itemsets, &transactions, Metric::All, 0.0).unwrap();
        sort_rules(&mut rules);
        for pair in rules.windows(2) {
            assert!(
                pair[0].confidence > pair[1].confidence
                    || (pair[0].confidence == pair[1].confidence && pair[0].lift >= pair[1].lift)
            );
        }
        // B => C and C => B have higher lift than B => A at equal confidence.
        let top: Vec<String> = rules[..4].iter().map(|r| r.to_string(itemizer)).collect();
        assert_eq!(top, vec!["B => C", "C => B", "B => A", "C => A"]);

        let a = itemizer.id_of("A").unwrap();
        let to_a: Vec<String> = rules_with_consequent(&rules, a)
            .map(|r| r.to_string(itemizer))
            .collect();
        assert_eq!(to_a.len(), 5);
        assert!(to_a.iter().all(|name| name.split(" => ").nth(1).unwrap().contains('A')));
    }

    #[test]
    fn test_csv_output() {
        let transactions = scenario();
        let itemizer = transactions.itemizer();
        let itemsets = mine_frequent_itemsets(&transactions, 0.4, None).unwrap();
        let rules = generate_rules(&itemsets, &transactions, Metric::Lift, 1.0).unwrap();

        let mut out: Vec<u8> = vec![];
        write_rules_csv(&mut out, &rules, itemizer).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Antecedent => Consequent,Support"));
        assert!(lines[1].starts_with("B => C,0.4,"));

        let mut out: Vec<u8> = vec![];
        write_itemsets_csv(&mut out, &itemsets, itemizer).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<&str>>(),
            vec![
                "Itemset,Support,Count",
                "A,0.8,4",
                "B,0.6,3",
                "C,0.6,3",
                "A B,0.4,2",
                "A C,0.4,2",
                "B C,0.4,2",
            ]
        );

        let mut out: Vec<u8> = vec![];
        write_rule_table(&mut out, &rules, itemizer, 1).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }
}
