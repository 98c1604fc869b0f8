pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod output;
pub mod session;
pub mod sprite;

pub use atlas::{Atlas, AtlasBuilder, Layout, Placement, PreviewRenderer};
pub use cli::{CliArgs, Command, CommonArgs, ResizeFilter};
pub use error::GridpackError;
pub use grid::{AtlasSize, GridConfig, GridGeometry, Notice, adjust_capacity, cell_geometry};
pub use session::Session;
pub use sprite::SourceImage;
