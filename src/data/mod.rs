/// Data layer: source tables, loading, filtering, and reshaping.
///
/// Architecture:
/// ```text
///  .csv (World Bank, 4 metadata lines) / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SourceTable (wide)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep columns, keep requested countries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape   │  melt year columns → LongTable (country, year, value)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod reshape;

pub use model::{Cell, LongTable, Observation, SourceTable};
pub use reshape::{clean_data, CleanRequest};
