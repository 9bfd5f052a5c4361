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

/// Dense per-item occurrence counter, indexed by item id.
pub struct ItemCounter {
    counter: Vec<u32>,
}

impl ItemCounter {
    pub fn with_capacity(item_count: usize) -> ItemCounter {
        ItemCounter {
            counter: vec![0; item_count],
        }
    }
    pub fn add(&mut self, item: &Item, count: u32) {
        let index = item.as_index();
        if self.counter.len() <= index {
            self.counter.resize(index + 1, 0);
        }
        self.counter[index] += count;
    }
    pub fn get(&self, item: &Item) -> u32 {
        let index = item.as_index();
        if index >= self.counter.len() {
            0
        } else {
            self.counter[index]
        }
    }
    // Merges the counts of another counter into this one.
    pub fn absorb(&mut self, other: ItemCounter) {
        if self.counter.len() < other.counter.len() {
            self.counter.resize(other.counter.len(), 0);
        }
        for (count, other_count) in self.counter.iter_mut().zip(other.counter) {
            *count += other_count;
        }
    }
}
