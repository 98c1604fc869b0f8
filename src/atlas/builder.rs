use anyhow::Result;
use image::imageops;
use log::{debug, info};

use super::{Atlas, Layout, PlacedImage};
use crate::cli::ResizeFilter;
use crate::error::GridpackError;
use crate::grid::GridConfig;
use crate::sprite::{Decoded, SourceImage, resize_exact};

/// Composes selected images into a fixed-grid atlas
pub struct AtlasBuilder {
    pub config: GridConfig,
    pub filter: ResizeFilter,
}

impl AtlasBuilder {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            filter: ResizeFilter::default(),
        }
    }

    pub fn filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Build the atlas from images in selection order.
    ///
    /// Only the first `columns * rows` images of the current grid are used;
    /// the grid is not reconciled with the selection here. Geometry errors
    /// abort before any drawing, and an image that failed to decode aborts
    /// the build instead of leaving its cell empty.
    pub fn build(&self, images: &[SourceImage]) -> Result<Atlas> {
        if images.is_empty() {
            return Err(GridpackError::NoImagesSelected.into());
        }

        let geometry = self.config.geometry()?;
        let used = &images[..images.len().min(geometry.capacity())];

        if used.len() < images.len() {
            info!(
                "Grid {}x{} holds {} of {} images",
                geometry.columns,
                geometry.rows,
                used.len(),
                images.len()
            );
        }

        if let Some(failed) = used.iter().find(|img| !img.is_loaded()) {
            let message = match &failed.decoded {
                Decoded::Failed(message) => message.clone(),
                Decoded::Ready(_) => String::new(),
            };
            return Err(GridpackError::ImageLoad {
                path: failed.path.clone(),
                message,
            }
            .into());
        }

        let layout = Layout::full(geometry);
        let mut atlas = Atlas::new(geometry);
        let filter = self.filter.to_image_filter();

        for (index, source) in used.iter().enumerate() {
            let Some(image) = source.image() else {
                continue;
            };
            let (width, height) = image.dimensions();
            let placement = layout.place(index, width, height);
            let drawn = placement.drawn;

            debug!(
                "{} {}x{} -> cell ({}, {}) at {}x{}+{}+{}",
                source.name,
                width,
                height,
                placement.row,
                placement.col,
                drawn.width,
                drawn.height,
                drawn.x,
                drawn.y
            );

            let scaled = resize_exact(image, drawn.width, drawn.height, filter);
            imageops::replace(
                &mut atlas.image,
                &*scaled,
                i64::from(drawn.x),
                i64::from(drawn.y),
            );

            atlas.images.push(PlacedImage {
                name: source.name.clone(),
                path: source.path.clone(),
                source_width: width,
                source_height: height,
                placement,
            });
        }

        info!(
            "Atlas {}x{}: {} images in a {}x{} grid (cells {}x{})",
            atlas.size(),
            atlas.size(),
            atlas.images.len(),
            geometry.columns,
            geometry.rows,
            geometry.cell_width,
            geometry.cell_height
        );

        Ok(atlas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::AtlasSize;
    use image::{Rgba, RgbaImage};

    fn solid(name: &str, width: u32, height: u32, color: [u8; 4]) -> SourceImage {
        SourceImage::from_image(name, RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    fn config(columns: u32, rows: u32, padding: u32) -> GridConfig {
        GridConfig::new(columns, rows, padding, AtlasSize::S1024).unwrap()
    }

    #[test]
    fn test_five_images_in_three_by_two() {
        let images: Vec<_> = (0..5)
            .map(|i| solid(&format!("img_{}.png", i), 64, 32, [255, 0, 0, 255]))
            .collect();

        let atlas = AtlasBuilder::new(config(3, 2, 10)).build(&images).unwrap();

        assert_eq!(atlas.image.dimensions(), (1024, 1024));
        assert_eq!(atlas.geometry.cell_width, 328);
        assert_eq!(atlas.geometry.cell_height, 497);
        assert_eq!(atlas.images.len(), 5);

        let names: Vec<_> = atlas.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["img_0.png", "img_1.png", "img_2.png", "img_3.png", "img_4.png"]);

        // The sixth cell stays transparent
        let empty_cell = atlas.geometry.cell_rect(5);
        let center = atlas.image.get_pixel(
            empty_cell.x + empty_cell.width / 2,
            empty_cell.y + empty_cell.height / 2,
        );
        assert_eq!(center[3], 0);
    }

    #[test]
    fn test_pixels_land_in_drawn_rect() {
        let images = vec![solid("red.png", 10, 20, [255, 0, 0, 255])];
        let atlas = AtlasBuilder::new(config(2, 2, 8))
            .filter(ResizeFilter::Nearest)
            .build(&images)
            .unwrap();

        let drawn = atlas.images[0].placement.drawn;
        assert_eq!(*atlas.image.get_pixel(drawn.x, drawn.y), Rgba([255, 0, 0, 255]));
        assert_eq!(
            *atlas
                .image
                .get_pixel(drawn.right() - 1, drawn.bottom() - 1),
            Rgba([255, 0, 0, 255])
        );
        // Padding gutter and centering slack stay transparent
        assert_eq!(atlas.image.get_pixel(0, 0)[3], 0);
        if drawn.x > atlas.images[0].placement.cell.x {
            assert_eq!(atlas.image.get_pixel(drawn.x - 1, drawn.y)[3], 0);
        }
    }

    #[test]
    fn test_truncates_to_current_grid() {
        let images: Vec<_> = (0..7)
            .map(|i| solid(&format!("{}.png", i), 8, 8, [0, 0, 255, 255]))
            .collect();

        let atlas = AtlasBuilder::new(config(2, 2, 4)).build(&images).unwrap();
        assert_eq!(atlas.images.len(), 4);
        assert_eq!(atlas.images[3].name, "3.png");
    }

    #[test]
    fn test_empty_selection() {
        let err = AtlasBuilder::new(config(2, 2, 4)).build(&[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GridpackError>(),
            Some(GridpackError::NoImagesSelected)
        ));
    }

    #[test]
    fn test_invalid_padding_aborts() {
        let images = vec![solid("a.png", 8, 8, [0, 0, 0, 255])];
        let err = AtlasBuilder::new(config(6, 4, 512)).build(&images).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GridpackError>(),
            Some(GridpackError::InvalidPadding { .. })
        ));
    }

    #[test]
    fn test_failed_image_aborts() {
        let images = vec![
            solid("a.png", 8, 8, [0, 0, 0, 255]),
            SourceImage::new("broken.png".into(), Decoded::Failed("bad header".into())),
        ];
        let err = AtlasBuilder::new(config(2, 1, 4)).build(&images).unwrap_err();
        match err.downcast_ref::<GridpackError>() {
            Some(GridpackError::ImageLoad { path, message }) => {
                assert_eq!(path, &std::path::PathBuf::from("broken.png"));
                assert_eq!(message, "bad header");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_failed_image_beyond_capacity_is_ignored() {
        let images = vec![
            solid("a.png", 8, 8, [0, 0, 0, 255]),
            SourceImage::new("broken.png".into(), Decoded::Failed("bad header".into())),
        ];
        let atlas = AtlasBuilder::new(config(1, 1, 4)).build(&images).unwrap();
        assert_eq!(atlas.images.len(), 1);
    }

    #[test]
    fn test_rebuild_is_pixel_identical() {
        let images = vec![
            solid("a.png", 37, 91, [12, 200, 40, 255]),
            solid("b.png", 300, 17, [90, 10, 240, 128]),
            solid("c.png", 5, 5, [255, 255, 0, 255]),
        ];
        let builder = AtlasBuilder::new(config(2, 2, 6)).filter(ResizeFilter::CatmullRom);

        let first = builder.build(&images).unwrap();
        let second = builder.build(&images).unwrap();
        assert_eq!(first.image.as_raw(), second.image.as_raw());
    }
}
