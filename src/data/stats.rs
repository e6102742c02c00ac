use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

use super::model::Listing;

// ---------------------------------------------------------------------------
// Price per room
// ---------------------------------------------------------------------------

/// Average price per room, or "not applicable" when the listing has no rooms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerRoom {
    /// Rounded to 2 decimals, scale fixed at 2.
    Amount(Decimal),
    NotApplicable,
}

impl PerRoom {
    fn from_parts(price: f64, rooms: u32) -> Self {
        if rooms == 0 {
            return PerRoom::NotApplicable;
        }
        // Out of Decimal's range only for absurd prices.
        round_cents(price / f64::from(rooms)).map_or(PerRoom::NotApplicable, PerRoom::Amount)
    }
}

impl std::fmt::Display for PerRoom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerRoom::Amount(v) => write!(f, "{v}"),
            PerRoom::NotApplicable => write!(f, "N/A"),
        }
    }
}

// Exported as text: "100.00" or "N/A".
impl Serialize for PerRoom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Rounds the exact binary value of `value` half away from zero: 5.625 is a
/// true midpoint and becomes 5.63, while 20.02 / 4 sits just below 5.005 and
/// becomes 5.00.
fn round_cents(value: f64) -> Option<Decimal> {
    let mut cents = Decimal::from_f64_retain(value)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    Some(cents)
}

/// One entry per active listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePerRoom {
    pub id: String,
    pub total_price: f64,
    pub room_num: u32,
    pub avg_price_per_room: PerRoom,
}

/// Price/room ratio for each listing, in input order.
pub fn price_per_room<'a>(listings: impl IntoIterator<Item = &'a Listing>) -> Vec<PricePerRoom> {
    listings
        .into_iter()
        .map(|listing| PricePerRoom {
            id: listing.id.clone(),
            total_price: listing.price,
            room_num: listing.accommodates,
            avg_price_per_room: PerRoom::from_parts(listing.price, listing.accommodates),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Host ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRanking {
    pub host: String,
    pub count: usize,
}

/// Listing count per host, highest first. Hosts with equal counts keep the
/// order in which they were first seen.
pub fn host_rankings<'a>(listings: impl IntoIterator<Item = &'a Listing>) -> Vec<HostRanking> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut rankings: Vec<HostRanking> = Vec::new();

    for listing in listings {
        match position.get(listing.host_id.as_str()) {
            Some(&i) => rankings[i].count += 1,
            None => {
                position.insert(&listing.host_id, rankings.len());
                rankings.push(HostRanking {
                    host: listing.host_id.clone(),
                    count: 1,
                });
            }
        }
    }

    // `sort_by` is stable: ties stay in encounter order.
    rankings.sort_by(|a, b| b.count.cmp(&a.count));
    rankings
}

// ---------------------------------------------------------------------------
// Max price
// ---------------------------------------------------------------------------

/// Highest price among `listings`; `0` when there are none.
pub fn find_max_price<'a>(listings: impl IntoIterator<Item = &'a Listing>) -> f64 {
    listings
        .into_iter()
        .fold(0.0_f64, |max, listing| max.max(listing.price))
}
