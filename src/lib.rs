//! Catalog trend analysis: load a cleaned catalog once, then derive row/column
//! selections, per-type pivots and normalized durations for the dashboard.

pub mod config;
pub mod data;
