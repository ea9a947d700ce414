//! Data layer: catalog types, loading, and the derived views every page uses.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → ContentTable (immutable, has a TableId)
//!   └──────────┘
//!        │
//!        ├──────────────┬───────────────┐
//!        ▼              ▼               ▼
//!   ┌──────────┐  ┌───────────┐  ┌──────────┐
//!   │  select  │  │ aggregate │  │ duration │  rows × columns / pivot / per-type durations
//!   └──────────┘  └───────────┘  └──────────┘
//!        │              │               │
//!        └──────────────┴───────────────┘
//!                       ▼
//!                 ┌──────────┐
//!                 │  cache   │  memoized by (TableId, parameters)
//!                 └──────────┘
//! ```

pub mod aggregate;
pub mod cache;
pub mod duration;
pub mod error;
pub mod loader;
pub mod model;
pub mod select;

pub use aggregate::{aggregate, to_percentages, CrossTab, CrossTabRow, GroupColumn, PercentBasis};
pub use cache::CachedQueries;
pub use duration::{normalize_durations, parse_duration, NormalizedDurations};
pub use error::{LoadError, ParseError, ValidationError};
pub use loader::load_file;
pub use model::{CellValue, Column, ContentRecord, ContentTable, ContentType, TableView, Tabular};
pub use select::{select, ColumnSelection, ALL_COLUMNS};
