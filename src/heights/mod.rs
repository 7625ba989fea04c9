//! Row-height bookkeeping for virtual scrolling.
//!
//! This module handles:
//! - Cumulative-height prefix sums over rows of non-uniform, mutable height
//! - O(log n) forward (index → offset) and inverse (offset → index) queries
//! - Expansion flags kept in a side-table, decoupled from row data

mod cache;
mod expansion;

pub use cache::RowHeightCache;
pub use expansion::ExpansionState;
