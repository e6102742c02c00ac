use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};

use super::coerce::coerce_listing;
use super::model::ListingDataset;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a listings dataset from a CSV file.
///
/// CSV layout: header row with column names, one listing per row. The
/// typed columns (`id`, `host_id`, `price`, `accommodates`,
/// `review_scores_rating`) are coerced; all others are kept as text.
pub fn load_file(path: &Path) -> Result<ListingDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = load_reader(file).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Loaded {} listings ({} columns) from {}",
        dataset.len(),
        dataset.column_names.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse CSV text from any reader. Rows with a different field count than
/// the header are rejected.
pub fn load_reader<R: Read>(reader: R) -> Result<ListingDataset, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut listings = Vec::new();
    for result in reader.records() {
        let record = result?;

        let raw: BTreeMap<String, String> = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();

        listings.push(coerce_listing(raw));
    }

    let dataset = ListingDataset::new(listings, headers);

    let missing = dataset.missing_columns();
    if !missing.is_empty() {
        warn!("CSV is missing expected columns {missing:?}; their values default to empty/0");
    }
    debug!("Parsed {} CSV rows", dataset.len());

    Ok(dataset)
}
