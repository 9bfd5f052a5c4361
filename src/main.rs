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

mod command_line_args;

use command_line_args::{parse_args_or_exit, Arguments, Input};
use rental_arm::basket::build_baskets;
use rental_arm::listing::read_listings;
use rental_arm::report::{
    rules_with_consequent, sort_rules, write_itemsets_csv, write_rule_table, write_rules_csv,
};
use rental_arm::transaction_reader::read_transactions;
use rental_arm::{generate_rules, mine_frequent_itemsets, TransactionSet};

use std::error::Error;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::process;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_baskets(input: &Input) -> Result<Vec<Vec<String>>, Box<dyn Error>> {
    match input {
        Input::Listings(path) => {
            let loaded = read_listings(path)?;
            let timer = Instant::now();
            let baskets = build_baskets(&loaded.listings)?;
            info!(
                baskets = baskets.len(),
                elapsed_ms = timer.elapsed().as_millis() as u64,
                "Discretized listings"
            );
            Ok(baskets)
        }
        Input::Transactions(path) => {
            info!(path = %path, "Loading transactions");
            Ok(read_transactions(path)?)
        }
    }
}

fn mine_apriori(args: &Arguments) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    let baskets = load_baskets(&args.input)?;

    let transactions = TransactionSet::encode(&baskets)?;
    info!(
        transactions = transactions.len(),
        items = transactions.universe().len(),
        "Encoded transactions"
    );
    let itemizer = transactions.itemizer();

    let config = &args.config;
    let itemsets = mine_frequent_itemsets(&transactions, config.min_support, config.max_len)?;
    info!(
        itemsets = itemsets.len(),
        min_support = config.min_support,
        "Found frequent itemsets"
    );

    let mut rules = generate_rules(
        &itemsets,
        &transactions,
        config.metric,
        config.min_threshold,
    )?;
    sort_rules(&mut rules);

    if let Some(ref path) = args.output_itemsets_path {
        let mut output = BufWriter::new(File::create(path)?);
        write_itemsets_csv(&mut output, &itemsets, itemizer)?;
        output.flush()?;
        info!(path = %path, "Wrote itemsets");
    }
    if let Some(ref path) = args.output_rules_path {
        let mut output = BufWriter::new(File::create(path)?);
        write_rules_csv(&mut output, &rules, itemizer)?;
        output.flush()?;
        info!(path = %path, "Wrote rules");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Top {} association rules:", args.top)?;
    write_rule_table(&mut out, &rules, itemizer, args.top)?;
    for target in &args.targets {
        writeln!(out)?;
        writeln!(out, "What leads to '{}'?", target)?;
        let matching: Vec<_> = match itemizer.id_of(target) {
            Some(item) => rules_with_consequent(&rules, item).cloned().collect(),
            None => vec![],
        };
        if matching.is_empty() {
            writeln!(
                out,
                "No rules found pointing to {} with current thresholds.",
                target
            )?;
        } else {
            write_rule_table(&mut out, &matching, itemizer, 5)?;
        }
    }

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Total runtime"
    );
    Ok(())
}

fn main() {
    init_logging();
    let arguments = parse_args_or_exit();

    if let Err(err) = mine_apriori(&arguments) {
        error!("Error: {}", err);
        process::exit(1);
    }
}
