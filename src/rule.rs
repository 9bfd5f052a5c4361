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

use crate::error::{ArmError, Result};
use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::metric::Metric;
use crate::vec_sets::union;
use fnv::FnvHashSet;
use std::hash::{Hash, Hasher};

pub type RuleSet = FnvHashSet<Rule>;

#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: Vec<Item>,
    pub consequent: Vec<Item>,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub conviction: f64,
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

impl Rule {
    /// Creates the rule antecedent => consequent from the support of the
    /// whole itemset and of each side. Both sides must be sorted.
    pub fn new(
        antecedent: Vec<Item>,
        consequent: Vec<Item>,
        support: f64,
        antecedent_support: f64,
        consequent_support: f64,
    ) -> Result<Rule> {
        if antecedent_support <= 0.0 {
            return Err(ArmError::DivisionUndefined {
                itemset: format!("antecedent {:?}", antecedent),
            });
        }
        if consequent_support <= 0.0 {
            return Err(ArmError::DivisionUndefined {
                itemset: format!("consequent {:?}", consequent),
            });
        }

        let confidence = support / antecedent_support;
        let lift = confidence / consequent_support;
        let leverage = support - antecedent_support * consequent_support;
        // A rule that always holds has no counter examples, so its
        // conviction is unbounded.
        let conviction = if confidence >= 1.0 {
            std::f64::INFINITY
        } else {
            (1.0 - consequent_support) / (1.0 - confidence)
        };

        Ok(Rule {
            antecedent,
            consequent,
            antecedent_support,
            consequent_support,
            support,
            confidence,
            lift,
            leverage,
            conviction,
        })
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::All => std::f64::INFINITY,
            Metric::Support => self.support,
            Metric::Confidence => self.confidence,
            Metric::Lift => self.lift,
            Metric::Leverage => self.leverage,
            Metric::Conviction => self.conviction,
        }
    }

    /// The frequent itemset this rule was split from.
    pub fn itemset(&self) -> Vec<Item> {
        union(&self.antecedent, &self.consequent)
    }

    pub fn to_string(&self, itemizer: &Itemizer) -> String {
        [
            Item::item_vec_to_string(&self.antecedent, itemizer),
            " => ".to_owned(),
            Item::item_vec_to_string(&self.consequent, itemizer),
        ]
        .join("")
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn lift(&self) -> f64 {
        self.lift
    }

    pub fn support(&self) -> f64 {
        self.support
    }
}
