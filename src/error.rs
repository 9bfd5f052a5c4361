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

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArmError>;

#[derive(Debug, Error)]
pub enum ArmError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Unknown metric '{0}', expected one of: all, support, confidence, lift, leverage, conviction")]
    UnknownMetric(String),

    // Zero-support denominators can't arise from a consistent frequent
    // itemset collection, but must never turn into NaN.
    #[error("Division undefined: support of {itemset} is zero")]
    DivisionUndefined { itemset: String },

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
