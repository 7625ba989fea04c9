//! vgrid - layout core for virtual-scrolling data grids
//!
//! Computes the numeric layout a data grid needs to stay interactive at
//! 10^5+ rows with dynamic row sizing:
//! - Cumulative row-height cache with O(log n) forward and inverse queries
//! - Viewport windowing for virtual and paged scrolling
//! - Column width solving under force-fill and flex policies
//!
//! Rendering, gesture handling, selection, and pagination UI are the
//! caller's concern; vgrid only answers "which rows, at which offsets, and
//! how wide are the columns".
//!
//! # Usage
//!
//! ```
//! use vgrid::{BodyLayout, RowHeightProfile, ScrollMode};
//!
//! let profile = RowHeightProfile::new(30.0, 100.0)?;
//! let mut body = BodyLayout::new(profile)?;
//! body.set_row_count(100_000)?;
//!
//! let window = body.window(ScrollMode::Virtual, 30_000.0, 600.0, 0, 0);
//! assert_eq!(window.first, 1000);
//! # Ok::<(), vgrid::VgridError>(())
//! ```

pub mod body;
pub mod columns;
pub mod error;
pub mod heights;
pub mod types;
pub mod window;

pub use body::{BodyLayout, ExpansionChange, ScrollAnchor};
pub use columns::{
    apply_column_mode, flex_fill_widths, force_fill_widths, group_widths, resize_column,
    total_width, FitOutcome, GroupWidths,
};
pub use error::{Result, VgridError};
pub use heights::{ExpansionState, RowHeightCache};
pub use types::*;
pub use window::{RowWindow, ScrollDirection, ScrollMode};

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
