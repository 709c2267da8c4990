//! Core types and service wiring for the collecto waste-sorting assistant.

/// Collection-day formatting and next-collection lookup.
pub mod calendar;
/// Loading of the published collection-zone dataset.
pub mod dataset;
/// Great-circle distance helpers.
pub mod geo;
/// Device position and city resolution.
pub mod location;
/// Domain models shared by all crates.
pub mod model;
/// Traits describing platform services.
pub mod ports;
/// Commune and position lookups over the dataset.
pub mod resolver;
/// High-level service facade used by clients.
pub mod service;
/// Bin recommendations for scanned items.
pub mod sorting;
/// Locally persisted scan counters.
pub mod stats;
/// Recycling tips.
pub mod tips;

pub use calendar::*;
pub use dataset::*;
pub use geo::*;
pub use location::*;
pub use model::*;
pub use ports::*;
pub use resolver::*;
pub use service::*;
pub use sorting::*;
pub use stats::*;
pub use tips::*;
