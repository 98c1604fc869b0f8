mod capacity;
mod geometry;
mod rect;

pub use capacity::{CapacityAdjustment, Notice, adjust_capacity};
pub use geometry::{
    AtlasSize, GridConfig, GridGeometry, MAX_COLUMNS, MAX_PADDING, MAX_ROWS, cell_geometry,
};
pub use rect::Rect;
