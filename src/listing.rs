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

//! Loading of apartment-for-rent listings from delimited text.

use crate::error::{ArmError, Result};
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

pub static REQUIRED_COLUMNS: [&str; 6] = [
    "price",
    "square_feet",
    "bedrooms",
    "bathrooms",
    "state",
    "amenities",
];

/// The fields of a listing that patterns are mined over. Rows without a
/// numeric price and floor area never become a `Listing`.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub price: f64,
    pub square_feet: f64,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub state: Option<String>,
    pub amenities: Option<String>,
}

// Column positions of the required fields in the header.
struct Columns {
    price: usize,
    square_feet: usize,
    bedrooms: usize,
    bathrooms: usize,
    state: usize,
    amenities: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Columns> {
        let position = |name: &str| header.iter().position(|column| column.trim() == name);
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|&name| position(name).is_none())
            .map(|name| name.to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(ArmError::MissingColumns(missing));
        }
        let column = |name: &str| position(name).unwrap_or(0);
        Ok(Columns {
            price: column("price"),
            square_feet: column("square_feet"),
            bedrooms: column("bedrooms"),
            bathrooms: column("bathrooms"),
            state: column("state"),
            amenities: column("amenities"),
        })
    }

    fn width(&self) -> usize {
        [
            self.price,
            self.square_feet,
            self.bedrooms,
            self.bathrooms,
            self.state,
            self.amenities,
        ]
        .iter()
        .max()
        .map_or(0, |&max| max + 1)
    }
}

/// The listings that survived loading, and how many rows were dropped for
/// lacking a numeric price or floor area.
pub struct Listings {
    pub listings: Vec<Listing>,
    pub dropped: usize,
}

pub fn read_listings<P: AsRef<Path>>(path: P) -> Result<Listings> {
    let file = File::open(path.as_ref())?;
    info!(path = %path.as_ref().display(), "Loading listings");
    parse_listings(BufReader::new(file))
}

/// Parses listings from a header row followed by one record per line. The
/// delimiter is `;` when the header contains one, otherwise `,`. Bytes that
/// aren't UTF-8 are replaced, as listing dumps are often cp1252.
pub fn parse_listings<R: BufRead>(mut reader: R) -> Result<Listings> {
    let mut buffer: Vec<u8> = vec![];
    if reader.read_until(b'\n', &mut buffer)? == 0 {
        return Err(ArmError::InvalidInput("listing file is empty".to_owned()));
    }
    let header_line = String::from_utf8_lossy(&buffer).into_owned();
    let delimiter = if header_line.contains(';') { ';' } else { ',' };
    let header = split_record(header_line.trim_end_matches(&['\r', '\n'][..]), delimiter);
    let columns = Columns::from_header(&header)?;
    debug!(delimiter = %delimiter, columns = header.len(), "Parsed header");

    let mut listings: Vec<Listing> = vec![];
    let mut dropped = 0;
    let mut line_number = 1;
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line_number += 1;
        let line = String::from_utf8_lossy(&buffer);
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(line, delimiter);
        if fields.len() < columns.width() {
            return Err(ArmError::MalformedRecord {
                line: line_number,
                reason: format!(
                    "expected at least {} fields, found {}",
                    columns.width(),
                    fields.len()
                ),
            });
        }
        match to_listing(&fields, &columns) {
            Some(listing) => listings.push(listing),
            None => dropped += 1,
        }
    }

    info!(listings = listings.len(), dropped, "Loaded listings");
    Ok(Listings { listings, dropped })
}

fn to_listing(fields: &[String], columns: &Columns) -> Option<Listing> {
    Some(Listing {
        price: parse_number(&fields[columns.price])?,
        square_feet: parse_number(&fields[columns.square_feet])?,
        bedrooms: parse_number(&fields[columns.bedrooms]),
        bathrooms: parse_number(&fields[columns.bathrooms]),
        state: non_blank(&fields[columns.state]),
        amenities: non_blank(&fields[columns.amenities]),
    })
}

// Missing values appear as blank or "null"; anything unparseable is
// treated the same way.
fn parse_number(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn non_blank(field: &str) -> Option<String> {
    let field = field.trim();
    if field.is_empty() || field.eq_ignore_ascii_case("null") {
        None
    } else {
        Some(field.to_owned())
    }
}

/// Splits one delimited record. Double quoted fields may contain the
/// delimiter, and `""` inside quotes is a literal quote.
pub fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields: Vec<String> = vec![];
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::replace(&mut field, String::new()));
        } else {
            field.push(c);
        }
    }
    fields.push(field);
    fields
}
