//! Structured error types for vgrid.
//!
//! Index mutations outside the cache bounds indicate a row-count/cache
//! desynchronization in the caller and are rejected rather than clamped.

/// All errors that can occur in vgrid layout computations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VgridError {
    /// An index-addressed mutation or query landed outside the current bounds.
    #[error("index {index} out of range (len {len})")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The structure's logical length at the time of the call.
        len: usize,
    },

    /// A configuration value the layout cannot work with (negative or
    /// non-finite heights/widths).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VgridError>;
