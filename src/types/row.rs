use serde::{Deserialize, Serialize};

use crate::error::{Result, VgridError};

/// Height configuration shared by every row of a grid instance.
///
/// Rows have a uniform base height; a row whose detail sub-row is expanded
/// additionally contributes `detail_row_height`. Per-row expansion flags live
/// in [`crate::heights::ExpansionState`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowHeightProfile {
    /// Base row height in pixels.
    pub row_height: f32,
    /// Extra height contributed by an expanded detail row.
    pub detail_row_height: f32,
}

impl Default for RowHeightProfile {
    fn default() -> Self {
        Self {
            row_height: 30.0,
            detail_row_height: 0.0,
        }
    }
}

impl RowHeightProfile {
    /// Create a profile, validating that both heights are finite and
    /// non-negative.
    pub fn new(row_height: f32, detail_row_height: f32) -> Result<Self> {
        let profile = Self {
            row_height,
            detail_row_height,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check the invariants: finite, non-negative heights.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("row_height", self.row_height),
            ("detail_row_height", self.detail_row_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(VgridError::InvalidConfiguration(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Effective height of a row given its expansion flag.
    pub fn effective_height(&self, expanded: bool) -> f32 {
        if expanded {
            self.row_height + self.detail_row_height
        } else {
            self.row_height
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_height() {
        let profile = RowHeightProfile::new(30.0, 100.0).unwrap();
        assert_eq!(profile.effective_height(false), 30.0);
        assert_eq!(profile.effective_height(true), 130.0);
    }

    #[test]
    fn test_negative_height_rejected() {
        assert!(matches!(
            RowHeightProfile::new(-1.0, 0.0),
            Err(VgridError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            RowHeightProfile::new(30.0, f32::NAN),
            Err(VgridError::InvalidConfiguration(_))
        ));
    }
}
