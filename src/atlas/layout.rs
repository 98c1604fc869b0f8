use crate::grid::{GridGeometry, Rect};
use crate::sprite::fit_size;

/// Where one image lands in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position in the selection
    pub index: usize,
    pub row: u32,
    pub col: u32,
    /// Inner rectangle of the cell
    pub cell: Rect,
    /// Rectangle the scaled image is drawn into, centered in `cell`
    pub drawn: Rect,
}

/// Grid geometry projected onto an output surface.
///
/// The atlas uses a scale of 1.0; the preview uses the ratio between the
/// preview surface and the atlas. Both go through the same placement rule.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub geometry: GridGeometry,
    pub scale: f64,
}

impl Layout {
    pub fn new(geometry: GridGeometry, scale: f64) -> Self {
        Self { geometry, scale }
    }

    /// Full-resolution layout used for the atlas itself
    pub fn full(geometry: GridGeometry) -> Self {
        Self::new(geometry, 1.0)
    }

    /// Side of the atlas on the output surface
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "scale is positive and at most the surface size"
    )]
    pub fn atlas_side(&self) -> u32 {
        if self.scale == 1.0 {
            self.geometry.atlas_size
        } else {
            (f64::from(self.geometry.atlas_size) * self.scale).round() as u32
        }
    }

    /// Inner rectangle of cell `index` on the output surface
    pub fn cell(&self, index: usize) -> Rect {
        self.geometry.cell_rect(index).scaled(self.scale)
    }

    /// All cell rectangles, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Rect> + '_ {
        (0..self.geometry.capacity()).map(|i| self.cell(i))
    }

    /// Aspect-fit an image of `width` x `height` into cell `index`, centered
    /// with floor division on the leftover space.
    pub fn place(&self, index: usize, width: u32, height: u32) -> Placement {
        let (row, col) = self.geometry.position(index);
        let cell = self.cell(index);
        let (drawn_w, drawn_h) = fit_size(width, height, cell.width, cell.height);

        let drawn = Rect::new(
            cell.x + (cell.width - drawn_w) / 2,
            cell.y + (cell.height - drawn_h) / 2,
            drawn_w,
            drawn_h,
        );

        Placement {
            index,
            row,
            col,
            cell,
            drawn,
        }
    }
}
