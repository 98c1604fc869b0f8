//! Controller state for one interactive session.
//!
//! Holds the current selection with its decoded-image cache, the grid
//! settings and the path of the last saved atlas. Every operation runs to
//! completion on the caller's thread.

use std::path::{Path, PathBuf};

use anyhow::Result;
use image::RgbaImage;
use log::{info, warn};

use crate::atlas::{Atlas, AtlasBuilder, PreviewRenderer};
use crate::cli::{CompressionLevel, ResizeFilter};
use crate::error::GridpackError;
use crate::grid::{
    AtlasSize, GridConfig, MAX_COLUMNS, MAX_PADDING, MAX_ROWS, Notice, adjust_capacity,
};
use crate::output::{open_in_default_viewer, save_atlas_image};
use crate::sprite::{SourceImage, load_images};

#[derive(Debug, Default)]
pub struct Session {
    grid: GridConfig,
    filter: ResizeFilter,
    images: Vec<SourceImage>,
    preview: PreviewRenderer,
    last_saved: Option<PathBuf>,
}

impl Session {
    pub fn new(grid: GridConfig) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Cached images of the current selection, in selection order
    pub fn images(&self) -> &[SourceImage] {
        &self.images
    }

    pub fn last_saved(&self) -> Option<&Path> {
        self.last_saved.as_deref()
    }

    /// Replace the selection, decoding every file once.
    ///
    /// The previous cache is dropped entirely. The grid is then reconciled
    /// with the new image count and the resulting notice, if any, returned.
    pub fn select(&mut self, paths: &[impl AsRef<Path>]) -> Result<Option<Notice>> {
        let images = load_images(paths)?;
        Ok(self.replace_images(images))
    }

    /// Replace the selection with images that are already decoded
    pub fn replace_images(&mut self, images: Vec<SourceImage>) -> Option<Notice> {
        self.images = images;
        self.preview.clear();

        let adjustment = adjust_capacity(self.images.len(), self.grid.columns, self.grid.rows);
        self.grid.columns = adjustment.columns;
        self.grid.rows = adjustment.rows;

        if let Some(notice) = adjustment.notice {
            warn!("{}", notice);
        }
        adjustment.notice
    }

    /// Set the column count (clamped to 1..=6) without reconciling the selection
    pub fn set_columns(&mut self, columns: u32) {
        self.grid.columns = columns.clamp(1, MAX_COLUMNS);
    }

    /// Set the row count (clamped to 1..=4) without reconciling the selection
    pub fn set_rows(&mut self, rows: u32) {
        self.grid.rows = rows.clamp(1, MAX_ROWS);
    }

    /// Set the padding (clamped to 0..=512)
    pub fn set_padding(&mut self, padding: u32) {
        self.grid.padding = padding.min(MAX_PADDING);
    }

    pub fn set_atlas_size(&mut self, atlas_size: AtlasSize) {
        self.grid.atlas_size = atlas_size;
    }

    pub fn set_filter(&mut self, filter: ResizeFilter) {
        self.filter = filter;
    }

    /// Render the preview for the current settings. Never fails.
    pub fn preview(&mut self, width: u32, height: u32) -> RgbaImage {
        self.preview.render(&self.grid, &self.images, width, height)
    }

    /// Compose the atlas from the current selection and grid.
    ///
    /// Uses whatever grid is configured now, truncating the selection to its
    /// capacity without running the capacity adjustment again.
    pub fn generate(&self) -> Result<Atlas> {
        if self.images.is_empty() {
            return Err(GridpackError::NoImagesSelected.into());
        }

        AtlasBuilder::new(self.grid)
            .filter(self.filter)
            .build(&self.images)
    }

    /// Save an atlas and remember the path for [`Session::open_last_saved`]
    pub fn save(
        &mut self,
        atlas: &Atlas,
        path: &Path,
        compress: Option<CompressionLevel>,
    ) -> Result<()> {
        save_atlas_image(atlas, path, compress)?;
        info!("Saved {}", path.display());
        self.last_saved = Some(path.to_path_buf());
        Ok(())
    }

    /// Open the most recently saved atlas in the default viewer
    pub fn open_last_saved(&self) -> Result<()> {
        match &self.last_saved {
            Some(path) => open_in_default_viewer(path),
            None => Err(GridpackError::SavedFileMissing(None).into()),
        }
    }
}
