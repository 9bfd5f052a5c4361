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

use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Collect, Store, StoreOption};
use rental_arm::{Metric, MiningConfig};

pub enum Input {
    Listings(String),
    Transactions(String),
}

pub struct Arguments {
    pub input: Input,
    pub output_rules_path: Option<String>,
    pub output_itemsets_path: Option<String>,
    pub config: MiningConfig,
    pub top: usize,
    pub targets: Vec<String>,
}

pub fn parse_args_or_exit() -> Arguments {
    let mut listings_path: Option<String> = None;
    let mut transactions_path: Option<String> = None;
    let mut output_rules_path: Option<String> = None;
    let mut output_itemsets_path: Option<String> = None;
    let mut min_support: f64 = 0.0;
    let mut metric = String::new();
    let mut min_threshold: f64 = 0.0;
    let mut max_len: Option<usize> = None;
    let mut top: usize = 10;
    let mut targets: Vec<String> = vec![];

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Apriori association rule mining over rental listings.");

        parser
            .refer(&mut listings_path)
            .add_option(
                &["--listings"],
                StoreOption,
                "Rental listings in delimited text format, with a header row.",
            )
            .metavar("file_path");

        parser
            .refer(&mut transactions_path)
            .add_option(
                &["--input"],
                StoreOption,
                "Pre-built transactions, one comma separated transaction per line.",
            )
            .metavar("file_path");

        parser
            .refer(&mut output_rules_path)
            .add_option(
                &["--output"],
                StoreOption,
                "File path in which to store output rules. \
                 Format: antecedent => consequent, support, confidence, lift, \
                 leverage, conviction.",
            )
            .metavar("file_path");

        parser
            .refer(&mut output_itemsets_path)
            .add_option(
                &["--itemsets"],
                StoreOption,
                "File path in which to store frequent itemsets.",
            )
            .metavar("file_path");

        parser
            .refer(&mut min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support threshold, in range (0,1].",
            )
            .metavar("threshold")
            .required();

        parser
            .refer(&mut metric)
            .add_option(
                &["--metric"],
                Store,
                "Rule metric to filter on: support, confidence, lift, leverage, \
                 conviction, or all.",
            )
            .metavar("metric")
            .required();

        parser
            .refer(&mut min_threshold)
            .add_option(
                &["--min-threshold"],
                Store,
                "Minimum value of the rule metric.",
            )
            .metavar("threshold")
            .required();

        parser
            .refer(&mut max_len)
            .add_option(
                &["--max-len"],
                StoreOption,
                "Largest itemset size to search for.",
            )
            .metavar("size");

        parser
            .refer(&mut top)
            .add_option(&["--top"], Store, "Number of rules to print. Default 10.")
            .metavar("count");

        parser
            .refer(&mut targets)
            .add_option(
                &["--target"],
                Collect,
                "Also print the rules whose consequent contains this item. \
                 May be repeated. Defaults to Rent_High and Rent_Low for listings.",
            )
            .metavar("item");

        if env::args().count() == 1 {
            parser.print_help("Usage:", &mut io::stderr()).unwrap();
            process::exit(1);
        }

        match parser.parse_args() {
            Ok(()) => {}
            Err(err) => {
                process::exit(err);
            }
        }
    }

    let input = match (listings_path, transactions_path) {
        (Some(path), None) => Input::Listings(path),
        (None, Some(path)) => Input::Transactions(path),
        _ => {
            eprintln!("Exactly one of --listings or --input is required");
            process::exit(1);
        }
    };

    let metric: Metric = match metric.parse() {
        Ok(metric) => metric,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let mut config = MiningConfig::new(min_support, metric, min_threshold);
    if let Some(max_len) = max_len {
        config = config.with_max_len(max_len);
    }
    if let Err(err) = config.validate() {
        eprintln!("{}", err);
        process::exit(1);
    }

    if targets.is_empty() {
        if let Input::Listings(_) = input {
            targets = vec!["Rent_High".to_owned(), "Rent_Low".to_owned()];
        }
    }

    Arguments {
        input,
        output_rules_path,
        output_itemsets_path,
        config,
        top,
        targets,
    }
}
