mod builder;
mod layout;
mod preview;
mod types;

pub use builder::AtlasBuilder;
pub use layout::{Layout, Placement};
pub use preview::{PLACEHOLDER_FILL, PREVIEW_BACKGROUND, PreviewRenderer};
pub use types::{Atlas, PlacedImage};
