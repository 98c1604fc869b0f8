use image::RgbaImage;
use std::path::PathBuf;

use super::Placement;
use crate::grid::GridGeometry;

/// An image placed into the atlas
#[derive(Debug, Clone)]
pub struct PlacedImage {
    pub name: String,
    pub path: PathBuf,
    pub source_width: u32,
    pub source_height: u32,
    pub placement: Placement,
}

/// A completed grid atlas
#[derive(Debug)]
pub struct Atlas {
    /// Layout the atlas was built with
    pub geometry: GridGeometry,
    /// Rendered square image, transparent where nothing is drawn
    pub image: RgbaImage,
    /// Placed images, in selection order
    pub images: Vec<PlacedImage>,
}

impl Atlas {
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            image: RgbaImage::new(geometry.atlas_size, geometry.atlas_size),
            images: Vec::new(),
        }
    }

    /// Side length in pixels
    pub fn size(&self) -> u32 {
        self.geometry.atlas_size
    }
}
