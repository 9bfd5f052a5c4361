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

/// Two way mapping between item labels and `Item` ids. The id space is
/// fixed at construction: labels are sorted and numbered from zero, which
/// makes id order the canonical item order.
pub struct Itemizer {
    item_str_to_id: FnvHashMap<String, Item>,
    item_id_to_str: Vec<String>,
}

impl Itemizer {
    pub fn from_labels<I, S>(labels: I) -> Itemizer
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut item_id_to_str: Vec<String> = labels.into_iter().map(Into::into).collect();
        item_id_to_str.sort();
        item_id_to_str.dedup();
        let mut item_str_to_id =
            FnvHashMap::with_capacity_and_hasher(item_id_to_str.len(), Default::default());
        for (index, label) in item_id_to_str.iter().enumerate() {
            item_str_to_id.insert(label.clone(), Item::with_id(index as u32));
        }
        Itemizer {
            item_str_to_id,
            item_id_to_str,
        }
    }
    pub fn id_of(&self, item: &str) -> Option<Item> {
        self.item_str_to_id.get(item).cloned()
    }
    pub fn str_of(&self, id: Item) -> &str {
        &self.item_id_to_str[id.as_index()]
    }
    pub fn len(&self) -> usize {
        self.item_id_to_str.len()
    }
    pub fn is_empty(&self) -> bool {
        self.item_id_to_str.is_empty()
    }
    /// The item universe, in canonical order.
    pub fn labels(&self) -> &[String] {
        &self.item_id_to_str
    }
    pub fn items(&self) -> impl Iterator<Item = Item> {
        (0..self.item_id_to_str.len() as u32).map(Item::with_id)
    }
    // Returns None if any label is unknown. The result is sorted.
    pub fn to_id_vec(&self, labels: &[&str]) -> Option<Vec<Item>> {
        let mut items = labels
            .iter()
            .map(|label| self.id_of(label))
            .collect::<Option<Vec<Item>>>()?;
        items.sort();
        items.dedup();
        Some(items)
    }
    pub fn to_str_vec(&self, items: &[Item]) -> Vec<&str> {
        items.iter().map(|&item| self.str_of(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Itemizer;
    use crate::item::Item;

    #[test]
    fn test_ids_follow_lexicographic_order() {
        let itemizer = Itemizer::from_labels(vec!["c", "a", "b", "a"]);
        assert_eq!(itemizer.len(), 3);
        assert_eq!(itemizer.labels(), &["a", "b", "c"]);
        assert_eq!(itemizer.id_of("a"), Some(Item::with_id(0)));
        assert_eq!(itemizer.id_of("c"), Some(Item::with_id(2)));
        assert_eq!(itemizer.id_of("d"), None);
        assert_eq!(itemizer.str_of(Item::with_id(1)), "b");
    }

    #[test]
    fn test_to_id_vec() {
        let itemizer = Itemizer::from_labels(vec!["x", "y", "z"]);
        let items = itemizer.to_id_vec(&["z", "x", "z"]).unwrap();
        assert_eq!(itemizer.to_str_vec(&items), vec!["x", "z"]);
        assert!(itemizer.to_id_vec(&["x", "nope"]).is_none());
    }

    #[test]
    fn test_empty() {
        let itemizer = Itemizer::from_labels(Vec::<String>::new());
        assert!(itemizer.is_empty());
        assert_eq!(itemizer.items().count(), 0);
    }
}
