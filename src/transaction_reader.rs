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

use crate::error::Result;
use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

/// Reads pre-built baskets, one comma separated transaction per line.
/// Blank lines are skipped; labels are passed through untouched for the
/// encoder to clean up.
pub struct TransactionReader<R> {
    reader: R,
}

impl TransactionReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<TransactionReader<BufReader<File>>> {
        let file = File::open(path)?;
        Ok(TransactionReader::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(reader: R) -> TransactionReader<R> {
        TransactionReader { reader }
    }
}

impl<R: BufRead> Iterator for TransactionReader<R> {
    type Item = io::Result<Vec<String>>;
    fn next(&mut self) -> Option<io::Result<Vec<String>>> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(err)),
            }
            if line.trim().is_empty() {
                continue;
            }
            let splits = line
                .trim_end_matches(&['\r', '\n'][..])
                .split(',')
                .map(String::from)
                .collect::<Vec<String>>();
            return Some(Ok(splits));
        }
    }
}

pub fn read_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let transactions = TransactionReader::open(path)?.collect::<io::Result<Vec<Vec<String>>>>()?;
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::TransactionReader;
    use std::io::Cursor;

    #[test]
    fn test_reader() {
        let data = "a,b,c\n\n  \nd, e\r\nf\n";
        let transactions: Vec<Vec<String>> = TransactionReader::new(Cursor::new(data))
            .map(|t| t.unwrap())
            .collect();
        assert_eq!(
            transactions,
            vec![vec!["a", "b", "c"], vec!["d", " e"], vec!["f"]]
        );
    }

    #[test]
    fn test_read_missing_file() {
        assert!(super::read_transactions("/nonexistent/transactions.csv").is_err());
    }
}
