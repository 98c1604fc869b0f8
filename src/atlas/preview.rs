use std::collections::HashMap;
use std::path::PathBuf;

use image::{Rgba, RgbaImage, imageops, imageops::FilterType};
use log::debug;

use super::Layout;
use crate::grid::{GridConfig, Rect};
use crate::sprite::SourceImage;

/// Fill for the atlas area of the preview
pub const PREVIEW_BACKGROUND: Rgba<u8> = Rgba([32, 32, 32, 255]);
/// Fill for each cell, drawn under thumbnails and alone for empty cells
pub const PLACEHOLDER_FILL: Rgba<u8> = Rgba([72, 72, 72, 255]);

/// Draws a reduced-scale view of the grid from already decoded images.
///
/// Scaled thumbnails are kept between renders and reused while the same
/// source image is drawn at the same grid position and size.
#[derive(Debug, Default)]
pub struct PreviewRenderer {
    thumbnails: HashMap<ThumbnailKey, RgbaImage>,
}

/// Identifies a scaled thumbnail: which image, where, and how large
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ThumbnailKey {
    index: usize,
    path: PathBuf,
    source_size: (u32, u32),
    drawn_size: (u32, u32),
}

impl PreviewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached thumbnail (the selection changed)
    pub fn clear(&mut self) {
        self.thumbnails.clear();
    }

    /// Number of cached thumbnails
    pub fn cached(&self) -> usize {
        self.thumbnails.len()
    }

    /// Render the grid into a `width` x `height` surface.
    ///
    /// This never fails: an invalid grid yields the bare background and
    /// images that failed to decode leave their placeholder empty.
    pub fn render(
        &mut self,
        config: &GridConfig,
        images: &[SourceImage],
        width: u32,
        height: u32,
    ) -> RgbaImage {
        let mut canvas = RgbaImage::new(width, height);
        let atlas_size = config.atlas_size.pixels();
        let scale = (f64::from(width) / f64::from(atlas_size))
            .min(f64::from(height) / f64::from(atlas_size));

        let geometry = match config.geometry() {
            Ok(geometry) => geometry,
            Err(e) => {
                debug!("Preview skipped: {:#}", e);
                return canvas;
            }
        };

        let layout = Layout::new(geometry, scale);
        let side = layout.atlas_side();
        fill_rect(&mut canvas, Rect::new(0, 0, side, side), PREVIEW_BACKGROUND);

        for cell in layout.cells() {
            fill_rect(&mut canvas, cell, PLACEHOLDER_FILL);
        }

        let mut previous = std::mem::take(&mut self.thumbnails);

        for (index, source) in images.iter().take(geometry.capacity()).enumerate() {
            let Some(image) = source.image() else {
                debug!("Preview: skipping {} (not loaded)", source.name);
                continue;
            };

            let (img_w, img_h) = image.dimensions();
            let drawn = layout.place(index, img_w, img_h).drawn;
            let key = ThumbnailKey {
                index,
                path: source.path.clone(),
                source_size: (img_w, img_h),
                drawn_size: (drawn.width, drawn.height),
            };

            let thumbnail = previous.remove(&key).unwrap_or_else(|| {
                imageops::resize(image, drawn.width, drawn.height, FilterType::Triangle)
            });

            imageops::overlay(
                &mut canvas,
                &thumbnail,
                i64::from(drawn.x),
                i64::from(drawn.y),
            );
            self.thumbnails.insert(key, thumbnail);
        }

        canvas
    }
}

/// Fill `rect` with `color`, clipped to the canvas
fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    let right = rect.right().min(canvas.width());
    let bottom = rect.bottom().min(canvas.height());

    for y in rect.y..bottom {
        for x in rect.x..right {
            canvas.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::AtlasSize;
    use crate::sprite::Decoded;

    fn config(columns: u32, rows: u32, padding: u32) -> GridConfig {
        GridConfig::new(columns, rows, padding, AtlasSize::S1024).unwrap()
    }

    fn solid(name: &str, color: [u8; 4]) -> SourceImage {
        SourceImage::from_image(name, RgbaImage::from_pixel(40, 40, Rgba(color)))
    }

    #[test]
    fn test_empty_cells_are_placeholders() {
        let mut renderer = PreviewRenderer::new();
        let images = vec![solid("a.png", [255, 0, 0, 255])];
        let config = config(2, 2, 32);

        let preview = renderer.render(&config, &images, 256, 256);
        assert_eq!(preview.dimensions(), (256, 256));

        let layout = Layout::new(config.geometry().unwrap(), 0.25);
        let filled = layout.place(0, 40, 40).drawn;
        let empty = layout.cell(3);

        assert_eq!(
            *preview.get_pixel(filled.x + filled.width / 2, filled.y + filled.height / 2),
            Rgba([255, 0, 0, 255])
        );
        assert_eq!(
            *preview.get_pixel(empty.x + empty.width / 2, empty.y + empty.height / 2),
            PLACEHOLDER_FILL
        );
        // Padding gutter shows the background
        assert_eq!(*preview.get_pixel(1, 1), PREVIEW_BACKGROUND);
    }

    #[test]
    fn test_non_square_surface_uses_smaller_ratio() {
        let mut renderer = PreviewRenderer::new();
        let preview = renderer.render(&config(1, 1, 0), &[], 400, 200);

        assert_eq!(preview.dimensions(), (400, 200));
        assert_eq!(*preview.get_pixel(199, 199), PLACEHOLDER_FILL);
        assert_eq!(preview.get_pixel(300, 100)[3], 0);
    }

    #[test]
    fn test_invalid_grid_renders_blank() {
        let mut renderer = PreviewRenderer::new();
        let images = vec![solid("a.png", [255, 0, 0, 255])];
        let preview = renderer.render(&config(6, 4, 512), &images, 128, 128);
        assert!(preview.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_failed_images_are_skipped() {
        let mut renderer = PreviewRenderer::new();
        let config = config(2, 1, 16);
        let images = vec![
            SourceImage::new("broken.png".into(), Decoded::Failed("bad".into())),
            solid("b.png", [0, 255, 0, 255]),
        ];

        let preview = renderer.render(&config, &images, 256, 256);

        let layout = Layout::new(config.geometry().unwrap(), 0.25);
        let broken = layout.cell(0);
        assert_eq!(
            *preview.get_pixel(broken.x + broken.width / 2, broken.y + broken.height / 2),
            PLACEHOLDER_FILL
        );
        assert_eq!(renderer.cached(), 1);
    }

    #[test]
    fn test_new_selection_of_same_size_is_redrawn() {
        let mut renderer = PreviewRenderer::new();
        let config = config(1, 1, 0);

        let red = renderer.render(&config, &[solid("red.png", [255, 0, 0, 255])], 128, 128);
        assert_eq!(*red.get_pixel(64, 64), Rgba([255, 0, 0, 255]));

        let green = renderer.render(&config, &[solid("green.png", [0, 255, 0, 255])], 128, 128);
        assert_eq!(*green.get_pixel(64, 64), Rgba([0, 255, 0, 255]));
        assert_eq!(renderer.cached(), 1);
    }

    #[test]
    fn test_thumbnails_are_reused_and_pruned() {
        let mut renderer = PreviewRenderer::new();
        let images = vec![solid("a.png", [1, 2, 3, 255]), solid("b.png", [4, 5, 6, 255])];

        let first = renderer.render(&config(2, 1, 8), &images, 256, 256);
        assert_eq!(renderer.cached(), 2);
        let again = renderer.render(&config(2, 1, 8), &images, 256, 256);
        assert_eq!(first.as_raw(), again.as_raw());
        assert_eq!(renderer.cached(), 2);

        // A 1x1 grid only shows the first image
        renderer.render(&config(1, 1, 8), &images, 256, 256);
        assert_eq!(renderer.cached(), 1);

        renderer.clear();
        assert_eq!(renderer.cached(), 0);
    }
}
