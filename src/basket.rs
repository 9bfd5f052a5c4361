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

//! Builds the item baskets mined from listings.

use crate::discretize::discretize;
use crate::error::Result;
use crate::listing::Listing;

pub static PRICE_LABELS: [&str; 3] = ["Rent_Low", "Rent_Medium", "Rent_High"];
pub static SIZE_LABELS: [&str; 3] = ["Size_Small", "Size_Medium", "Size_Large"];

/// One basket per listing: price bin, size bin, bedroom and bathroom
/// counts, state, then each amenity.
pub fn build_baskets(listings: &[Listing]) -> Result<Vec<Vec<String>>> {
    let prices: Vec<f64> = listings.iter().map(|listing| listing.price).collect();
    let sizes: Vec<f64> = listings.iter().map(|listing| listing.square_feet).collect();
    let price_bins = discretize(&prices, &PRICE_LABELS)?;
    let size_bins = discretize(&sizes, &SIZE_LABELS)?;

    let baskets = listings
        .iter()
        .zip(price_bins.labels.iter().zip(size_bins.labels.iter()))
        .map(|(listing, (price_bin, size_bin))| {
            let mut basket: Vec<String> = vec![
                price_bin.to_string(),
                size_bin.to_string(),
                count_label(listing.bedrooms, "Beds"),
                count_label(listing.bathrooms, "Baths"),
            ];
            if let Some(ref state) = listing.state {
                basket.push(state.clone());
            }
            if let Some(ref amenities) = listing.amenities {
                basket.extend(
                    amenities
                        .split(',')
                        .map(str::trim)
                        .filter(|amenity| !amenity.is_empty())
                        .map(str::to_owned),
                );
            }
            basket
        })
        .collect();
    Ok(baskets)
}

// "2_Beds", "1.5_Baths", or "nan_Beds" when the count is unknown.
fn count_label(count: Option<f64>, suffix: &str) -> String {
    match count {
        Some(count) if count.fract() == 0.0 => format!("{}_{}", count as i64, suffix),
        Some(count) => format!("{}_{}", count, suffix),
        None => format!("nan_{}", suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_baskets, count_label};
    use crate::listing::Listing;

    fn listing(price: f64, square_feet: f64, amenities: Option<&str>) -> Listing {
        Listing {
            price,
            square_feet,
            bedrooms: Some(2.0),
            bathrooms: Some(1.5),
            state: Some("CA".to_owned()),
            amenities: amenities.map(str::to_owned),
        }
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(Some(2.0), "Beds"), "2_Beds");
        assert_eq!(count_label(Some(1.5), "Baths"), "1.5_Baths");
        assert_eq!(count_label(None, "Beds"), "nan_Beds");
    }

    #[test]
    fn test_build_baskets() {
        let listings = vec![
            listing(900.0, 500.0, Some("Pool, Gym,,")),
            listing(1500.0, 900.0, None),
            listing(2500.0, 1300.0, Some("Parking")),
        ];
        let baskets = build_baskets(&listings).unwrap();
        assert_eq!(
            baskets[0],
            vec!["Rent_Low", "Size_Small", "2_Beds", "1.5_Baths", "CA", "Pool", "Gym"]
        );
        assert_eq!(
            baskets[1],
            vec!["Rent_Medium", "Size_Medium", "2_Beds", "1.5_Baths", "CA"]
        );
        assert_eq!(
            baskets[2],
            vec!["Rent_High", "Size_Large", "2_Beds", "1.5_Baths", "CA", "Parking"]
        );
    }

    #[test]
    fn test_missing_state() {
        let mut no_state = listing(900.0, 500.0, None);
        no_state.state = None;
        no_state.bedrooms = None;
        let baskets = build_baskets(&[no_state]).unwrap();
        assert_eq!(baskets[0].len(), 4);
        assert_eq!(baskets[0][2], "nan_Beds");
    }

    #[test]
    fn test_no_listings() {
        assert!(build_baskets(&[]).unwrap().is_empty());
    }
}
