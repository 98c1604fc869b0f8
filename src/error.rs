use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridpackError {
    #[error("No images selected")]
    NoImagesSelected,

    #[error(
        "Padding {padding}px leaves no space for images in a {columns}x{rows} grid \
         on a {atlas_size}px atlas"
    )]
    InvalidPadding {
        padding: u32,
        columns: u32,
        rows: u32,
        atlas_size: u32,
    },

    #[error(
        "Cell size is zero for a {columns}x{rows} grid with {padding}px padding \
         on a {atlas_size}px atlas"
    )]
    InvalidCellSize {
        padding: u32,
        columns: u32,
        rows: u32,
        atlas_size: u32,
    },

    #[error("{}", saved_file_missing(.0))]
    SavedFileMissing(Option<PathBuf>),

    #[error("Failed to open '{path}' in the default viewer: {source}")]
    ExternalOpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load image '{path}': {message}")]
    ImageLoad { path: PathBuf, message: String },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("{name} must be between {min} and {max}, got {value}")]
    SettingOutOfRange {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("Unsupported atlas size {0} (expected 1024, 2048 or 4096)")]
    UnsupportedAtlasSize(u32),
}

fn saved_file_missing(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("Saved atlas '{}' no longer exists", path.display()),
        None => "No atlas has been saved yet".to_string(),
    }
}
