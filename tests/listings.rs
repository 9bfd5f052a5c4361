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

use rental_arm::basket::build_baskets;
use rental_arm::listing::parse_listings;
use rental_arm::report::{rules_with_consequent, sort_rules};
use rental_arm::{mine, Metric, MiningConfig};
use std::io::Cursor;

static LISTINGS: &str = "\
id;category;title;body;amenities;bathrooms;bedrooms;currency;fee;has_photo;pets_allowed;price;price_display;price_type;square_feet;address;cityname;state
1;housing/rent/apartment;Studio;Nice;Pool,Gym;1;1;USD;No;Thumbnail;None;700;$700;Monthly;450;null;Austin;TX
2;housing/rent/apartment;Studio;Nice;Pool,Gym;1;1;USD;No;Thumbnail;None;750;$750;Monthly;480;null;Austin;TX
3;housing/rent/apartment;One bed;Ok;Gym;1;1;USD;No;Thumbnail;None;900;$900;Monthly;600;null;Dallas;TX
4;housing/rent/apartment;Two bed;Ok;Parking;1;2;USD;No;Thumbnail;None;1300;$1,300;Monthly;900;null;Denver;CO
5;housing/rent/apartment;Two bed;Ok;Parking,Gym;2;2;USD;No;Thumbnail;None;1400;$1,400;Monthly;950;null;Denver;CO
6;housing/rent/apartment;Two bed;Ok;null;2;2;USD;No;Thumbnail;None;1450;$1,450;Monthly;1000;null;Denver;CO
7;housing/rent/apartment;House;Big;Parking,Garage;3;4;USD;No;Thumbnail;None;2800;$2,800;Monthly;2200;null;Seattle;WA
8;housing/rent/apartment;House;Big;Parking,Garage;3;4;USD;No;Thumbnail;None;3100;$3,100;Monthly;2400;null;Seattle;WA
9;housing/rent/apartment;House;Big;Garage;2.5;3;USD;No;Thumbnail;None;2900;$2,900;Monthly;2000;null;Seattle;WA
10;housing/rent/apartment;Broken;Row;Pool;1;1;USD;No;Thumbnail;None;call;call;Monthly;500;null;Austin;TX
";

#[test]
fn listings_to_rules() {
    let loaded = parse_listings(Cursor::new(LISTINGS)).unwrap();
    assert_eq!(loaded.listings.len(), 9);
    assert_eq!(loaded.dropped, 1);

    let baskets = build_baskets(&loaded.listings).unwrap();
    assert_eq!(
        baskets[0],
        vec!["Rent_Low", "Size_Small", "1_Beds", "1_Baths", "TX", "Pool", "Gym"]
    );
    assert_eq!(
        baskets[8],
        vec!["Rent_High", "Size_Large", "3_Beds", "2.5_Baths", "WA", "Garage"]
    );

    let mined = mine(&baskets, &MiningConfig::new(0.2, Metric::Lift, 1.2)).unwrap();
    let mut rules = mined.rules;
    sort_rules(&mut rules);
    assert!(!rules.is_empty());
    assert!(rules.iter().all(|rule| rule.lift >= 1.2));

    // Every high rent listing has a garage, and only they do.
    let itemizer = mined.transactions.itemizer();
    let rent_high = itemizer.id_of("Rent_High").unwrap();
    let garage_rule = rules_with_consequent(&rules, rent_high)
        .find(|rule| rule.to_string(itemizer) == "Garage => Rent_High")
        .unwrap();
    assert_eq!(garage_rule.confidence, 1.0);
    assert!((garage_rule.lift - 3.0).abs() < 1e-9);
    assert!(garage_rule.conviction.is_infinite());
}
