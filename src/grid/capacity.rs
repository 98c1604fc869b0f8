use std::fmt;

use super::{MAX_COLUMNS, MAX_ROWS};

/// Informational message produced when the grid is reconciled with a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Rows grew to fit the selection; columns unchanged
    RowsAdjusted { rows: u32 },
    /// Columns grew to fit the selection; rows unchanged
    ColumnsAdjusted { columns: u32 },
    /// The selection does not fit the largest grid; only `used` images are placed
    CapacityExceeded { used: usize, selected: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::RowsAdjusted { rows } => {
                write!(f, "Rows adjusted to {} to fit all images", rows)
            }
            Notice::ColumnsAdjusted { columns } => {
                write!(f, "Columns adjusted to {} to fit all images", columns)
            }
            Notice::CapacityExceeded { used, selected } => write!(
                f,
                "Grid capacity exceeded: only the first {} of {} images will be used",
                used, selected
            ),
        }
    }
}

/// Outcome of reconciling a grid with an image count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityAdjustment {
    pub columns: u32,
    pub rows: u32,
    pub notice: Option<Notice>,
}

/// Grow the grid until it holds `count` images, or clamp to the largest grid.
///
/// Rows are always tried first (keeping the current columns), then columns
/// (keeping the original rows). This is a greedy rule, not a best fit: the
/// order is visible to users and must stay as is.
#[expect(
    clippy::cast_possible_truncation,
    reason = "needed counts are checked against the grid maxima before narrowing"
)]
pub fn adjust_capacity(count: usize, columns: u32, rows: u32) -> CapacityAdjustment {
    let columns = columns.max(1);
    let rows = rows.max(1);

    if count <= (columns * rows) as usize {
        return CapacityAdjustment {
            columns,
            rows,
            notice: None,
        };
    }

    let needed_rows = count.div_ceil(columns as usize);
    if needed_rows <= MAX_ROWS as usize {
        let rows = needed_rows as u32;
        return CapacityAdjustment {
            columns,
            rows,
            notice: Some(Notice::RowsAdjusted { rows }),
        };
    }

    let needed_columns = count.div_ceil(rows as usize);
    if needed_columns <= MAX_COLUMNS as usize {
        let columns = needed_columns as u32;
        return CapacityAdjustment {
            columns,
            rows,
            notice: Some(Notice::ColumnsAdjusted { columns }),
        };
    }

    CapacityAdjustment {
        columns: MAX_COLUMNS,
        rows: MAX_ROWS,
        notice: Some(Notice::CapacityExceeded {
            used: (MAX_COLUMNS * MAX_ROWS) as usize,
            selected: count,
        }),
    }
}
