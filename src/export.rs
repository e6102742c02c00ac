use std::path::Path;

use log::info;
use serde::Serialize;

use crate::data::model::Listing;
use crate::data::stats::{HostRanking, PricePerRoom};
use crate::error::ExportError;

// ---------------------------------------------------------------------------
// Export document
// ---------------------------------------------------------------------------

/// What goes into an export besides the aggregations.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Write the active listings under `filteredData`.
    pub include_records: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_records: true,
        }
    }
}

/// Snapshot of a session, serialized as:
///
/// ```json
/// {
///   "totalFilteredListings": 1,
///   "avgPricePerRoom": [{ "id": "2", "totalPrice": 300.0, "roomNum": 3, "avgPricePerRoom": "100.00" }],
///   "hostRankings": [{ "host": "20", "count": 1 }],
///   "filteredData": [{ "id": "2", "host_id": "20", "price": 300.0, ... }]
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub total_filtered_listings: usize,
    pub avg_price_per_room: &'a [PricePerRoom],
    pub host_rankings: &'a [HostRanking],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered_data: Option<Vec<&'a Listing>>,
}

impl ExportDocument<'_> {
    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize first, then write the whole file in one call.
    pub fn write_to(&self, path: &Path) -> Result<(), ExportError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            "Exported {} listings to {}",
            self.total_filtered_listings,
            path.display()
        );
        Ok(())
    }
}
