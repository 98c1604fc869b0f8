use image::RgbaImage;
use std::path::PathBuf;

/// Decode outcome for a selected file
#[derive(Debug, Clone)]
pub enum Decoded {
    Ready(RgbaImage),
    /// Decoding failed; the message is kept for reporting at generate time
    Failed(String),
}

/// A selected image and its cached decode result.
///
/// Identity is the position in the selection; the cache is rebuilt whenever
/// the selection is replaced.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Original file path
    pub path: PathBuf,
    /// Display name (file name with extension)
    pub name: String,
    pub decoded: Decoded,
}

impl SourceImage {
    pub fn new(path: PathBuf, decoded: Decoded) -> Self {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self {
            path,
            name,
            decoded,
        }
    }

    /// Wrap an already decoded image
    pub fn from_image(path: impl Into<PathBuf>, image: RgbaImage) -> Self {
        Self::new(path.into(), Decoded::Ready(image))
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        match &self.decoded {
            Decoded::Ready(image) => Some(image),
            Decoded::Failed(_) => None,
        }
    }

    /// Pixel dimensions, if the image decoded
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image().map(RgbaImage::dimensions)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.decoded, Decoded::Ready(_))
    }
}
