use anyhow::Result;
use clap::ValueEnum;

use super::Rect;
use crate::error::GridpackError;

/// Largest column count the grid supports
pub const MAX_COLUMNS: u32 = 6;
/// Largest row count the grid supports
pub const MAX_ROWS: u32 = 4;
/// Largest padding, in pixels
pub const MAX_PADDING: u32 = 512;

/// Output resolution of the (square) atlas
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash)]
pub enum AtlasSize {
    #[default]
    #[value(name = "1024")]
    S1024,
    #[value(name = "2048")]
    S2048,
    #[value(name = "4096")]
    S4096,
}

impl AtlasSize {
    /// Side length in pixels
    pub fn pixels(self) -> u32 {
        match self {
            AtlasSize::S1024 => 1024,
            AtlasSize::S2048 => 2048,
            AtlasSize::S4096 => 4096,
        }
    }
}

impl TryFrom<u32> for AtlasSize {
    type Error = GridpackError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1024 => Ok(AtlasSize::S1024),
            2048 => Ok(AtlasSize::S2048),
            4096 => Ok(AtlasSize::S4096),
            other => Err(GridpackError::UnsupportedAtlasSize(other)),
        }
    }
}

/// User-adjustable grid settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
    pub padding: u32,
    pub atlas_size: AtlasSize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 2,
            padding: 10,
            atlas_size: AtlasSize::S1024,
        }
    }
}

impl GridConfig {
    /// Create a config, rejecting values outside the supported ranges.
    pub fn new(columns: u32, rows: u32, padding: u32, atlas_size: AtlasSize) -> Result<Self> {
        check_range("columns", columns, 1, MAX_COLUMNS)?;
        check_range("rows", rows, 1, MAX_ROWS)?;
        check_range("padding", padding, 0, MAX_PADDING)?;
        Ok(Self {
            columns,
            rows,
            padding,
            atlas_size,
        })
    }

    /// Number of images the grid can hold
    pub fn capacity(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// Compute the inner cell size for this configuration
    pub fn geometry(&self) -> Result<GridGeometry> {
        cell_geometry(
            self.columns,
            self.rows,
            self.atlas_size.pixels(),
            self.padding,
        )
    }
}

fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(GridpackError::SettingOutOfRange {
            name,
            value,
            min,
            max,
        }
        .into());
    }
    Ok(())
}

/// Validated layout of a uniform grid.
///
/// Every cell shares the same inner size. Whatever the integer division
/// leaves over stays as unused margin on the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: u32,
    pub rows: u32,
    pub padding: u32,
    pub atlas_size: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl GridGeometry {
    /// Inner rectangle of the cell at `index`, in row-major order
    pub fn cell_rect(&self, index: usize) -> Rect {
        let (row, col) = self.position(index);
        Rect::new(
            self.padding + col * (self.cell_width + self.padding),
            self.padding + row * (self.cell_height + self.padding),
            self.cell_width,
            self.cell_height,
        )
    }

    /// (row, column) of the cell at `index`
    #[expect(
        clippy::cast_possible_truncation,
        reason = "indices are bounded by the grid capacity"
    )]
    pub fn position(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        (index / self.columns, index % self.columns)
    }

    pub fn capacity(&self) -> usize {
        (self.columns * self.rows) as usize
    }
}

/// Compute the per-cell inner size for a grid.
///
/// Padding surrounds every cell, so `count + 1` gutters are taken from each
/// axis before the remainder is divided evenly (truncating) between cells.
pub fn cell_geometry(
    columns: u32,
    rows: u32,
    atlas_size: u32,
    padding: u32,
) -> Result<GridGeometry> {
    let columns = columns.max(1);
    let rows = rows.max(1);

    let total_padding_x = (i64::from(columns) + 1) * i64::from(padding);
    let total_padding_y = (i64::from(rows) + 1) * i64::from(padding);
    let available_w = i64::from(atlas_size) - total_padding_x;
    let available_h = i64::from(atlas_size) - total_padding_y;

    if available_w <= 0 || available_h <= 0 {
        return Err(GridpackError::InvalidPadding {
            padding,
            columns,
            rows,
            atlas_size,
        }
        .into());
    }

    let cell_width = available_w / i64::from(columns);
    let cell_height = available_h / i64::from(rows);

    if cell_width <= 0 || cell_height <= 0 {
        return Err(GridpackError::InvalidCellSize {
            padding,
            columns,
            rows,
            atlas_size,
        }
        .into());
    }

    // Both values are positive and no larger than atlas_size
    let (Ok(cell_width), Ok(cell_height)) = (u32::try_from(cell_width), u32::try_from(cell_height))
    else {
        return Err(GridpackError::InvalidCellSize {
            padding,
            columns,
            rows,
            atlas_size,
        }
        .into());
    };

    Ok(GridGeometry {
        columns,
        rows,
        padding,
        atlas_size,
        cell_width,
        cell_height,
    })
}
