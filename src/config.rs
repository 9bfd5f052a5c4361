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

use crate::apriori::validate_min_support;
use crate::error::{ArmError, Result};
use crate::metric::Metric;

/// Parameters of a mining run. There are no defaults; every threshold is
/// chosen by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct MiningConfig {
    pub min_support: f64,
    pub metric: Metric,
    pub min_threshold: f64,
    /// Largest itemset size to search for. Unbounded when None.
    pub max_len: Option<usize>,
}

impl MiningConfig {
    pub fn new(min_support: f64, metric: Metric, min_threshold: f64) -> MiningConfig {
        MiningConfig {
            min_support,
            metric,
            min_threshold,
            max_len: None,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> MiningConfig {
        self.max_len = Some(max_len);
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_min_support(self.min_support)?;
        self.metric.validate_threshold(self.min_threshold)?;
        if self.max_len == Some(0) {
            return Err(ArmError::InvalidParameter {
                name: "max_len",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
