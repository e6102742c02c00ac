use log::debug;

use super::model::{Listing, ListingDataset};

// ---------------------------------------------------------------------------
// Filter predicate: optional lower bounds on the numeric fields
// ---------------------------------------------------------------------------

/// Lower bounds a listing must meet. `None` means "no constraint".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterCriteria {
    pub min_price: Option<f64>,
    pub min_accommodates: Option<u32>,
    pub min_review_score: Option<f64>,
}

impl FilterCriteria {
    pub fn min_price(mut self, value: f64) -> Self {
        self.min_price = Some(value);
        self
    }

    pub fn min_accommodates(mut self, value: u32) -> Self {
        self.min_accommodates = Some(value);
        self
    }

    pub fn min_review_score(mut self, value: f64) -> Self {
        self.min_review_score = Some(value);
        self
    }

    /// Whether `listing` meets every bound that is set (all are `>=`).
    pub fn matches(&self, listing: &Listing) -> bool {
        self.min_price.map_or(true, |min| listing.price >= min)
            && self
                .min_accommodates
                .map_or(true, |min| listing.accommodates >= min)
            && self
                .min_review_score
                .map_or(true, |min| listing.review_scores_rating >= min)
    }
}

/// Return indices of listings that pass `criteria`, in dataset order.
///
/// Always evaluated against the full dataset, so applying a second set of
/// criteria replaces the first rather than narrowing it.
pub fn filtered_indices(dataset: &ListingDataset, criteria: &FilterCriteria) -> Vec<usize> {
    let indices: Vec<usize> = dataset
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| criteria.matches(listing))
        .map(|(i, _)| i)
        .collect();

    debug!(
        "Filter {criteria:?} kept {} of {} listings",
        indices.len(),
        dataset.len()
    );
    indices
}
