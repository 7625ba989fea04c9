use serde::{Deserialize, Serialize};

/// Default width (px) applied to columns declared without one.
pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;

/// How the grid distributes viewport width across columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnMode {
    /// Widths are taken as-is; any surplus/deficit is left to horizontal
    /// scrolling.
    #[default]
    Standard,
    /// All resizable columns are scaled so the total exactly fills the
    /// viewport.
    Force,
    /// The width delta is distributed proportionally, clamped to each
    /// column's min/max bounds.
    Flex,
}

/// Horizontal pin position of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PinPosition {
    /// Pinned to the left edge; does not scroll horizontally.
    Left,
    /// Unpinned, scrolls with the body.
    #[default]
    Center,
    /// Pinned to the right edge.
    Right,
}

/// Layout-relevant definition of a single visible column.
///
/// The width solvers mutate `width` in place; everything else is caller-owned
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Stable identifier, used by callers to correlate solved widths back to
    /// their column model.
    pub id: String,
    /// Current width in pixels. Configs may omit it; see
    /// [`set_column_defaults`].
    #[serde(default)]
    pub width: f32,
    /// Lower width bound enforced by the flex solver and manual resize.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f32>,
    /// Upper width bound enforced by the flex solver and manual resize.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f32>,
    /// Whether the user may resize this column by direct manipulation.
    #[serde(default = "default_true")]
    pub resizeable: bool,
    /// Whether the solvers may change this column's width.
    #[serde(default = "default_true")]
    pub can_auto_resize: bool,
    /// Pin position; only `Center` columns scroll horizontally.
    #[serde(default)]
    pub pin: PinPosition,
}

fn default_true() -> bool {
    true
}

impl ColumnDef {
    /// Create a column with the default width and all resize flags enabled.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: DEFAULT_COLUMN_WIDTH,
            min_width: None,
            max_width: None,
            resizeable: true,
            can_auto_resize: true,
            pin: PinPosition::Center,
        }
    }

    /// Create a column with an explicit width.
    pub fn with_width(id: impl Into<String>, width: f32) -> Self {
        Self {
            width,
            ..Self::new(id)
        }
    }

    /// Set the min/max width bounds.
    #[must_use]
    pub fn bounded(mut self, min_width: Option<f32>, max_width: Option<f32>) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }

    /// Mark the column fixed: the solvers leave its width alone.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.can_auto_resize = false;
        self
    }

    /// Clamp a candidate width to this column's bounds.
    pub fn clamp_width(&self, width: f32) -> f32 {
        let mut w = width;
        if let Some(min) = self.min_width {
            w = w.max(min);
        }
        if let Some(max) = self.max_width {
            w = w.min(max);
        }
        w
    }
}

/// Fill in defaults for columns built from loosely-specified host config:
/// non-positive widths become [`DEFAULT_COLUMN_WIDTH`].
///
/// Deserialized configs commonly omit widths; the solvers need a positive
/// starting weight for proportional distribution.
pub fn set_column_defaults(columns: &mut [ColumnDef]) {
    for column in columns {
        if column.width <= 0.0 {
            column.width = DEFAULT_COLUMN_WIDTH;
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_new_column_defaults() {
        let col = ColumnDef::new("name");
        assert_eq!(col.width, DEFAULT_COLUMN_WIDTH);
        assert!(col.resizeable);
        assert!(col.can_auto_resize);
        assert_eq!(col.pin, PinPosition::Center);
    }

    #[test]
    fn test_clamp_width_respects_bounds() {
        let col = ColumnDef::new("age").bounded(Some(50.0), Some(120.0));
        assert_eq!(col.clamp_width(10.0), 50.0);
        assert_eq!(col.clamp_width(500.0), 120.0);
        assert_eq!(col.clamp_width(80.0), 80.0);
    }

    #[test]
    fn test_clamp_width_unbounded() {
        let col = ColumnDef::new("free");
        assert_eq!(col.clamp_width(-5.0), -5.0);
        assert_eq!(col.clamp_width(9999.0), 9999.0);
    }

    #[test]
    fn test_set_column_defaults_fills_missing_width() {
        let mut columns = vec![
            ColumnDef::with_width("a", 0.0),
            ColumnDef::with_width("b", 200.0),
        ];
        set_column_defaults(&mut columns);
        assert_eq!(columns[0].width, DEFAULT_COLUMN_WIDTH);
        assert_eq!(columns[1].width, 200.0);
    }
}
