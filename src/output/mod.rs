mod format;
mod json;
mod launch;

pub use format::save_atlas_image;
pub use json::{metadata_path, write_json};
pub use launch::open_in_default_viewer;
