use std::borrow::Cow;
use std::path::Path;

use log::debug;

use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::loader;
use crate::data::model::{Listing, ListingDataset};
use crate::data::stats::{self, HostRanking, PricePerRoom};
use crate::error::{ExportError, LoadError};
use crate::export::{ExportDocument, ExportOptions};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One load → filter → aggregate → export lifecycle over a single input.
///
/// Mutating calls return `&mut Self` so they can be chained:
///
/// ```no_run
/// # use listing_stats::{FilterCriteria, Session};
/// # fn main() -> anyhow::Result<()> {
/// let mut session = Session::new();
/// session
///     .load("listings.csv")?
///     .filter(&FilterCriteria::default().min_price(100.0))
///     .compute_stats()
///     .compute_host_rankings()
///     .export("out.json")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Session {
    /// Loaded dataset; empty until `load` succeeds.
    dataset: ListingDataset,

    /// Indices into `dataset.listings` passing the last filter.
    active: Vec<usize>,

    /// Latest aggregations. `None` means stale: not computed since the
    /// active set last changed.
    price_per_room: Option<Vec<PricePerRoom>>,
    host_rankings: Option<Vec<HostRanking>>,

    export_options: ExportOptions,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_export_options(export_options: ExportOptions) -> Self {
        Self {
            export_options,
            ..Self::default()
        }
    }

    /// Read `path` and make it the original set. On failure the session
    /// keeps whatever it held before.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, LoadError> {
        let dataset = loader::load_file(path.as_ref())?;
        Ok(self.set_dataset(dataset))
    }

    /// Replace the original set; the active set starts out as all of it.
    pub fn set_dataset(&mut self, dataset: ListingDataset) -> &mut Self {
        self.active = (0..dataset.len()).collect();
        self.dataset = dataset;
        self.mark_stale();
        self
    }

    /// Recompute the active set from the original set. Earlier filters are
    /// discarded, not narrowed further.
    pub fn filter(&mut self, criteria: &FilterCriteria) -> &mut Self {
        self.active = filtered_indices(&self.dataset, criteria);
        self.mark_stale();
        self
    }

    pub fn compute_stats(&mut self) -> &mut Self {
        let stats = stats::price_per_room(self.active_records());
        debug!("Computed price per room for {} listings", stats.len());
        self.price_per_room = Some(stats);
        self
    }

    pub fn compute_host_rankings(&mut self) -> &mut Self {
        let rankings = stats::host_rankings(self.active_records());
        debug!("Ranked {} hosts", rankings.len());
        self.host_rankings = Some(rankings);
        self
    }

    /// Write the current snapshot to `path` as JSON. Aggregations that are
    /// stale are recomputed for the document only; the session is untouched.
    /// Takes `&mut self` only so the chain can continue after it.
    pub fn export(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, ExportError> {
        self.snapshot(|doc| doc.write_to(path.as_ref()))?;
        Ok(self)
    }

    /// Build the export document and hand it to `f`.
    pub fn snapshot<T>(&self, f: impl FnOnce(&ExportDocument<'_>) -> T) -> T {
        let price_per_room: Cow<'_, [PricePerRoom]> = match &self.price_per_room {
            Some(stats) => Cow::Borrowed(stats),
            None => Cow::Owned(stats::price_per_room(self.active_records())),
        };
        let host_rankings: Cow<'_, [HostRanking]> = match &self.host_rankings {
            Some(rankings) => Cow::Borrowed(rankings),
            None => Cow::Owned(stats::host_rankings(self.active_records())),
        };

        let doc = ExportDocument {
            total_filtered_listings: self.active.len(),
            avg_price_per_room: &price_per_room,
            host_rankings: &host_rankings,
            filtered_data: self
                .export_options
                .include_records
                .then(|| self.active_records().collect()),
        };
        f(&doc)
    }

    // -- read accessors --

    /// The full original set, regardless of filters.
    pub fn all_records(&self) -> &[Listing] {
        &self.dataset.listings
    }

    pub fn active_records(&self) -> impl Iterator<Item = &Listing> + '_ {
        self.active.iter().map(|&i| &self.dataset.listings[i])
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Latest price-per-room results; empty when stale.
    pub fn price_per_room(&self) -> &[PricePerRoom] {
        self.price_per_room.as_deref().unwrap_or_default()
    }

    /// Latest full host ranking; empty when stale.
    pub fn host_rankings(&self) -> &[HostRanking] {
        self.host_rankings.as_deref().unwrap_or_default()
    }

    /// First `n` entries of the latest ranking.
    pub fn top_hosts(&self, n: usize) -> &[HostRanking] {
        let rankings = self.host_rankings();
        &rankings[..n.min(rankings.len())]
    }

    /// Highest price among `records`, `0` if there are none.
    pub fn find_max_price<'a>(records: impl IntoIterator<Item = &'a Listing>) -> f64 {
        stats::find_max_price(records)
    }

    fn mark_stale(&mut self) {
        self.price_per_room = None;
        self.host_rankings = None;
    }
}
