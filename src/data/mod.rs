/// Data layer: track records, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, derive year → TrackDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ TrackDataset  │  Vec<Track>, genre column flag
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  trend series, recommendations, scatter, histogram
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
