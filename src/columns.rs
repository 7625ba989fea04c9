//! Column width distribution under the force-fill and flex policies.
//!
//! Both solvers are pure functions over a caller-owned column slice: widths
//! are rewritten in place, everything else is read-only. Constraint
//! infeasibility is never an error: the solver returns the best achievable
//! layout and reports the unplaced remainder, leaving the horizontal-scroll
//! fallback to the caller.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VgridError};
use crate::types::{ColumnDef, ColumnMode, PinPosition};

/// Width deltas smaller than this are treated as already settled.
const WIDTH_EPSILON: f32 = 1e-3;

/// Report of a width distribution pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitOutcome {
    /// Total column width after the pass.
    pub total_width: f32,
    /// Width delta the pass could not place: every candidate column was
    /// saturated at a bound, or none was resizable. Compare against a
    /// tolerance, not zero.
    pub remainder: f32,
}

impl FitOutcome {
    /// True when the target width was met (within `tolerance`).
    pub fn is_exact(&self, tolerance: f32) -> bool {
        self.remainder.abs() <= tolerance
    }
}

/// Sum of current column widths.
pub fn total_width(columns: &[ColumnDef]) -> f32 {
    columns.iter().map(|c| c.width).sum()
}

/// Per-pin-group width sums, for header/body group positioning.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupWidths {
    /// Total width of left-pinned columns.
    pub left: f32,
    /// Total width of unpinned (scrolling) columns.
    pub center: f32,
    /// Total width of right-pinned columns.
    pub right: f32,
    /// Sum of all three groups.
    pub total: f32,
}

/// Sum column widths by pin group.
pub fn group_widths(columns: &[ColumnDef]) -> GroupWidths {
    let mut widths = GroupWidths::default();
    for column in columns {
        match column.pin {
            PinPosition::Left => widths.left += column.width,
            PinPosition::Center => widths.center += column.width,
            PinPosition::Right => widths.right += column.width,
        }
        widths.total += column.width;
    }
    widths
}

/// Dispatch a recompute for the grid's configured column mode.
///
/// `Standard` applies no distribution; the outcome still reports the
/// surplus/deficit against `available_width`.
pub fn apply_column_mode(
    columns: &mut [ColumnDef],
    available_width: f32,
    mode: ColumnMode,
) -> Result<FitOutcome> {
    match mode {
        ColumnMode::Standard => {
            validate_inputs(columns, available_width)?;
            let total = total_width(columns);
            Ok(FitOutcome {
                total_width: total,
                remainder: available_width - total,
            })
        }
        ColumnMode::Force => force_fill_widths(columns, available_width, None),
        ColumnMode::Flex => flex_fill_widths(columns, available_width),
    }
}

/// Scale every auto-resizable column proportionally to its prior width so the
/// total equals `available_width` exactly.
///
/// Non-resizable columns are held fixed, as is the pivot column (the one
/// currently under manual resize) when given. No min/max clamping applies in
/// force mode (columns can shrink arbitrarily), so a single pass converges;
/// widths floor at zero only when the fixed columns alone already exceed the
/// target.
///
/// # Errors
/// `OutOfRange` for a pivot index outside the slice; `InvalidConfiguration`
/// for a negative or non-finite `available_width` or column width.
pub fn force_fill_widths(
    columns: &mut [ColumnDef],
    available_width: f32,
    pivot: Option<usize>,
) -> Result<FitOutcome> {
    validate_inputs(columns, available_width)?;
    if let Some(index) = pivot {
        if index >= columns.len() {
            return Err(VgridError::OutOfRange {
                index,
                len: columns.len(),
            });
        }
    }

    let is_candidate =
        |index: usize, column: &ColumnDef| column.can_auto_resize && Some(index) != pivot;

    let mut fixed_sum = 0.0f32;
    let mut candidate_sum = 0.0f32;
    let mut candidate_count = 0usize;
    for (index, column) in columns.iter().enumerate() {
        if is_candidate(index, column) {
            candidate_sum += column.width;
            candidate_count += 1;
        } else {
            fixed_sum += column.width;
        }
    }

    if candidate_count == 0 {
        let total = total_width(columns);
        return Ok(FitOutcome {
            total_width: total,
            remainder: available_width - total,
        });
    }

    let target = available_width - fixed_sum;
    if target <= 0.0 {
        for (index, column) in columns.iter_mut().enumerate() {
            if is_candidate(index, column) {
                column.width = 0.0;
            }
        }
    } else if candidate_sum > 0.0 {
        let scale = target / candidate_sum;
        for (index, column) in columns.iter_mut().enumerate() {
            if is_candidate(index, column) {
                column.width *= scale;
            }
        }
    } else {
        // All candidates are zero-width: no proportions to follow, split
        // the target evenly so the pass still fills the viewport.
        #[allow(clippy::cast_precision_loss)]
        let share = target / candidate_count as f32;
        for (index, column) in columns.iter_mut().enumerate() {
            if is_candidate(index, column) {
                column.width = share;
            }
        }
    }

    let total = total_width(columns);
    Ok(FitOutcome {
        total_width: total,
        remainder: available_width - total,
    })
}

/// Distribute the delta between `available_width` and the current total
/// across auto-resizable columns, proportionally to each column's current
/// width, clamping every result to `[min_width, max_width]`.
///
/// Clamping can leave part of the delta unplaced, so the pass iterates:
/// each round redistributes the remaining delta across the columns that have
/// not yet hit a bound, and stops when no column newly saturates or nothing
/// remains. Each continuing round saturates at least one more column, so the
/// loop is bounded by the column count.
///
/// # Errors
/// `InvalidConfiguration` for a negative or non-finite `available_width` or
/// column width.
pub fn flex_fill_widths(columns: &mut [ColumnDef], available_width: f32) -> Result<FitOutcome> {
    validate_inputs(columns, available_width)?;

    let mut delta = available_width - total_width(columns);
    let mut active: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.can_auto_resize)
        .map(|(i, _)| i)
        .collect();

    while delta.abs() > WIDTH_EPSILON && !active.is_empty() {
        let weight_sum: f32 = active
            .iter()
            .filter_map(|&i| columns.get(i).map(|c| c.width))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let equal_share = delta / active.len() as f32;

        let mut applied = 0.0f32;
        let mut saturated: Vec<usize> = Vec::new();
        for &index in &active {
            let Some(column) = columns.get_mut(index) else {
                continue;
            };
            let share = if weight_sum > 0.0 {
                delta * column.width / weight_sum
            } else {
                equal_share
            };
            let proposed = column.width + share;
            // Growth saturates at max_width; shrink saturates at min_width,
            // or at zero when no lower bound is configured.
            let (clamped, hit_bound) = if share >= 0.0 {
                match column.max_width {
                    Some(max) if proposed >= max => (max, true),
                    _ => (proposed, false),
                }
            } else {
                let floor = column.min_width.unwrap_or(0.0);
                if proposed <= floor {
                    (floor, true)
                } else {
                    (proposed, false)
                }
            };
            applied += clamped - column.width;
            column.width = clamped;
            if hit_bound {
                saturated.push(index);
            }
        }

        delta -= applied;
        if saturated.is_empty() {
            break;
        }
        active.retain(|index| !saturated.contains(index));
    }

    let total = total_width(columns);
    Ok(FitOutcome {
        total_width: total,
        remainder: if delta.abs() > WIDTH_EPSILON {
            delta
        } else {
            0.0
        },
    })
}

/// Apply a manual resize: clamp `new_width` to the column's bounds, set it,
/// then force-fill with the column as pivot so the total stays consistent
/// with the viewport.
///
/// # Errors
/// `OutOfRange` for a bad index; `InvalidConfiguration` if the column is not
/// resizeable or `new_width` is non-finite.
pub fn resize_column(
    columns: &mut [ColumnDef],
    index: usize,
    new_width: f32,
    available_width: f32,
) -> Result<FitOutcome> {
    let len = columns.len();
    let Some(column) = columns.get_mut(index) else {
        return Err(VgridError::OutOfRange { index, len });
    };
    if !column.resizeable {
        return Err(VgridError::InvalidConfiguration(format!(
            "column {} is not resizeable",
            column.id
        )));
    }
    if !new_width.is_finite() {
        return Err(VgridError::InvalidConfiguration(format!(
            "column width must be finite, got {new_width}"
        )));
    }
    column.width = column.clamp_width(new_width.max(0.0));
    force_fill_widths(columns, available_width, Some(index))
}

fn validate_inputs(columns: &[ColumnDef], available_width: f32) -> Result<()> {
    if !available_width.is_finite() || available_width < 0.0 {
        return Err(VgridError::InvalidConfiguration(format!(
            "available width must be finite and non-negative, got {available_width}"
        )));
    }
    for column in columns {
        if !column.width.is_finite() || column.width < 0.0 {
            return Err(VgridError::InvalidConfiguration(format!(
                "column {} width must be finite and non-negative, got {}",
                column.id, column.width
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn columns_of(widths: &[f32]) -> Vec<ColumnDef> {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| ColumnDef::with_width(format!("col{i}"), w))
            .collect()
    }

    #[test]
    fn test_force_fill_scales_proportionally() {
        let mut columns = columns_of(&[100.0, 150.0, 200.0]);
        let outcome = force_fill_widths(&mut columns, 900.0, None).unwrap();
        assert_eq!(columns[0].width, 200.0);
        assert_eq!(columns[1].width, 300.0);
        assert_eq!(columns[2].width, 400.0);
        assert!(outcome.is_exact(0.01));
    }

    #[test]
    fn test_force_fill_holds_fixed_columns() {
        let mut columns = columns_of(&[100.0, 100.0, 100.0]);
        columns[1].can_auto_resize = false;
        force_fill_widths(&mut columns, 500.0, None).unwrap();
        assert_eq!(columns[1].width, 100.0);
        assert_eq!(columns[0].width, 200.0);
        assert_eq!(columns[2].width, 200.0);
    }

    #[test]
    fn test_force_fill_pivot_excluded() {
        let mut columns = columns_of(&[100.0, 200.0, 100.0]);
        let outcome = force_fill_widths(&mut columns, 600.0, Some(1)).unwrap();
        // Pivot keeps its applied width; the 400 remaining splits 1:1.
        assert_eq!(columns[1].width, 200.0);
        assert_eq!(columns[0].width, 200.0);
        assert_eq!(columns[2].width, 200.0);
        assert!(outcome.is_exact(0.01));
    }

    #[test]
    fn test_force_fill_no_resizable_is_noop() {
        let mut columns = columns_of(&[100.0, 100.0]);
        for c in &mut columns {
            c.can_auto_resize = false;
        }
        let outcome = force_fill_widths(&mut columns, 500.0, None).unwrap();
        assert_eq!(columns[0].width, 100.0);
        assert_eq!(columns[1].width, 100.0);
        assert_eq!(outcome.remainder, 300.0);
    }

    #[test]
    fn test_force_fill_zero_available_collapses() {
        let mut columns = columns_of(&[100.0, 100.0]);
        let outcome = force_fill_widths(&mut columns, 0.0, None).unwrap();
        assert_eq!(columns[0].width, 0.0);
        assert_eq!(columns[1].width, 0.0);
        assert_eq!(outcome.total_width, 0.0);
    }

    #[test]
    fn test_force_fill_zero_weights_split_evenly() {
        let mut columns = columns_of(&[0.0, 0.0]);
        force_fill_widths(&mut columns, 300.0, None).unwrap();
        assert_eq!(columns[0].width, 150.0);
        assert_eq!(columns[1].width, 150.0);
    }

    #[test]
    fn test_force_fill_negative_available_rejected() {
        let mut columns = columns_of(&[100.0]);
        assert!(matches!(
            force_fill_widths(&mut columns, -1.0, None),
            Err(VgridError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            force_fill_widths(&mut columns, f32::NAN, None),
            Err(VgridError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_force_fill_bad_pivot_rejected() {
        let mut columns = columns_of(&[100.0]);
        assert_eq!(
            force_fill_widths(&mut columns, 500.0, Some(1)),
            Err(VgridError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_flex_saturates_then_redistributes() {
        let mut columns = vec![
            ColumnDef::with_width("a", 100.0).bounded(Some(50.0), Some(120.0)),
            ColumnDef::with_width("b", 100.0).bounded(Some(50.0), Some(300.0)),
        ];
        let outcome = flex_fill_widths(&mut columns, 300.0).unwrap();
        assert_eq!(columns[0].width, 120.0);
        assert_eq!(columns[1].width, 180.0);
        assert!(outcome.is_exact(0.01));
    }

    #[test]
    fn test_flex_shrink_respects_min() {
        let mut columns = vec![
            ColumnDef::with_width("a", 200.0).bounded(Some(150.0), None),
            ColumnDef::with_width("b", 200.0).bounded(Some(50.0), None),
        ];
        let outcome = flex_fill_widths(&mut columns, 250.0).unwrap();
        assert_eq!(columns[0].width, 150.0);
        // Second column absorbs the rest of the 150 deficit.
        assert!((columns[1].width - 100.0).abs() < 0.01);
        assert!(outcome.is_exact(0.01));
    }

    #[test]
    fn test_flex_all_saturated_reports_remainder() {
        let mut columns = vec![
            ColumnDef::with_width("a", 100.0).bounded(None, Some(110.0)),
            ColumnDef::with_width("b", 100.0).bounded(None, Some(110.0)),
        ];
        let outcome = flex_fill_widths(&mut columns, 500.0).unwrap();
        assert_eq!(columns[0].width, 110.0);
        assert_eq!(columns[1].width, 110.0);
        assert!((outcome.remainder - 280.0).abs() < 0.01);
    }

    #[test]
    fn test_flex_noop_when_already_fit() {
        let mut columns = columns_of(&[100.0, 200.0]);
        let outcome = flex_fill_widths(&mut columns, 300.0).unwrap();
        assert_eq!(columns[0].width, 100.0);
        assert_eq!(columns[1].width, 200.0);
        assert_eq!(outcome.remainder, 0.0);
    }

    #[test]
    fn test_resize_column_clamps_then_pivots() {
        let mut columns = vec![
            ColumnDef::with_width("a", 100.0).bounded(Some(80.0), Some(150.0)),
            ColumnDef::with_width("b", 100.0),
            ColumnDef::with_width("c", 100.0),
        ];
        let outcome = resize_column(&mut columns, 0, 400.0, 300.0).unwrap();
        // 400 clamps to the 150 max; the other two split the remaining 150.
        assert_eq!(columns[0].width, 150.0);
        assert_eq!(columns[1].width, 75.0);
        assert_eq!(columns[2].width, 75.0);
        assert!(outcome.is_exact(0.01));
    }

    #[test]
    fn test_resize_column_not_resizeable() {
        let mut columns = columns_of(&[100.0]);
        columns[0].resizeable = false;
        assert!(matches!(
            resize_column(&mut columns, 0, 200.0, 300.0),
            Err(VgridError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_group_widths_by_pin() {
        let mut columns = columns_of(&[100.0, 200.0, 50.0, 25.0]);
        columns[0].pin = PinPosition::Left;
        columns[3].pin = PinPosition::Right;
        let widths = group_widths(&columns);
        assert_eq!(widths.left, 100.0);
        assert_eq!(widths.center, 250.0);
        assert_eq!(widths.right, 25.0);
        assert_eq!(widths.total, 375.0);
    }

    #[test]
    fn test_apply_column_mode_standard_reports_delta() {
        let mut columns = columns_of(&[100.0, 100.0]);
        let outcome = apply_column_mode(&mut columns, 500.0, ColumnMode::Standard).unwrap();
        assert_eq!(columns[0].width, 100.0);
        assert_eq!(outcome.remainder, 300.0);
    }
}
