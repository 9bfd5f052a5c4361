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
use std::fmt;
use std::str::FromStr;

/// The rule metric a minimum threshold is applied to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Metric {
    /// Keep every rule, ignoring the threshold.
    All,
    Support,
    Confidence,
    Lift,
    Leverage,
    Conviction,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match *self {
            Metric::All => "all",
            Metric::Support => "support",
            Metric::Confidence => "confidence",
            Metric::Lift => "lift",
            Metric::Leverage => "leverage",
            Metric::Conviction => "conviction",
        }
    }

    pub fn validate_threshold(&self, min_threshold: f64) -> Result<()> {
        if *self == Metric::All {
            return Ok(());
        }
        let (in_range, reason) = match *self {
            Metric::Support | Metric::Confidence => (
                min_threshold >= 0.0 && min_threshold <= 1.0,
                "must be in range [0,1]",
            ),
            Metric::Lift | Metric::Conviction => (
                min_threshold >= 0.0 && min_threshold.is_finite(),
                "must be finite and non-negative",
            ),
            Metric::Leverage => (
                min_threshold >= -1.0 && min_threshold <= 1.0,
                "must be in range [-1,1]",
            ),
            Metric::All => (true, ""),
        };
        if !in_range {
            return Err(ArmError::InvalidParameter {
                name: "min_threshold",
                value: min_threshold,
                reason,
            });
        }
        Ok(())
    }
}

impl FromStr for Metric {
    type Err = ArmError;
    fn from_str(s: &str) -> Result<Metric> {
        match s.trim().to_lowercase().as_str() {
            "all" | "none" => Ok(Metric::All),
            "support" => Ok(Metric::Support),
            "confidence" => Ok(Metric::Confidence),
            "lift" => Ok(Metric::Lift),
            "leverage" => Ok(Metric::Leverage),
            "conviction" => Ok(Metric::Conviction),
            _ => Err(ArmError::UnknownMetric(s.to_owned())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
