//! Short-term rental listing statistics.
//!
//! Loads a listings CSV, filters it by lower bounds on price, capacity and
//! review score, computes price per room and per-host listing counts, and
//! exports the result as JSON. See [`Session`] for the chained API.

pub mod data;
pub mod error;
pub mod export;
pub mod report;
pub mod session;

pub use data::filter::FilterCriteria;
pub use data::model::{Listing, ListingDataset};
pub use data::stats::{HostRanking, PerRoom, PricePerRoom};
pub use error::{ConfigError, ExportError, LoadError};
pub use export::{ExportDocument, ExportOptions};
pub use session::Session;
