mod loader;
mod resizer;
mod sprite;

pub use loader::load_images;
pub use resizer::{fit_size, resize_exact};
pub use sprite::{Decoded, SourceImage};
