/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  listings.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  csv rows → coerce → ListingDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ListingDataset │  Vec<Listing>, header row
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  lower bounds → active indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  price per room, host ranking
///   └──────────┘
/// ```

pub mod coerce;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
