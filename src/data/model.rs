use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Listing – one row of the source CSV
// ---------------------------------------------------------------------------

/// Column names the pipeline reads as typed fields.
pub const ID_COLUMN: &str = "id";
pub const HOST_ID_COLUMN: &str = "host_id";
pub const PRICE_COLUMN: &str = "price";
pub const ACCOMMODATES_COLUMN: &str = "accommodates";
pub const REVIEW_SCORE_COLUMN: &str = "review_scores_rating";

pub const EXPECTED_COLUMNS: [&str; 5] = [
    ID_COLUMN,
    HOST_ID_COLUMN,
    PRICE_COLUMN,
    ACCOMMODATES_COLUMN,
    REVIEW_SCORE_COLUMN,
];

/// A single rental listing with its numeric fields already coerced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub id: String,
    pub host_id: String,
    /// Nightly price with currency formatting stripped; 0 when missing.
    pub price: f64,
    /// Guest capacity, used as the room count.
    pub accommodates: u32,
    pub review_scores_rating: f64,
    /// Every other CSV column, verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// ListingDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Never mutated once loaded.
#[derive(Debug, Clone, Default)]
pub struct ListingDataset {
    /// All listings in file order.
    pub listings: Vec<Listing>,
    /// Header row, in file order.
    pub column_names: Vec<String>,
}

impl ListingDataset {
    pub fn new(listings: Vec<Listing>, column_names: Vec<String>) -> Self {
        Self {
            listings,
            column_names,
        }
    }

    /// Expected columns that the header row does not carry.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        EXPECTED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !self.column_names.iter().any(|c| c == col))
            .collect()
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
