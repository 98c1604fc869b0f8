use serde::{Deserialize, Serialize};

/// Settings file version this build reads
pub const CONFIG_VERSION: u32 = 1;

/// PNG compression level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompressConfig {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression ("max")
    Max(String),
}

/// Gridpack settings file structure.
///
/// All paths in the config are relative to the config file location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridpackConfig {
    /// Config file version (currently 1)
    pub version: u32,
    /// Input file paths or glob patterns, in placement order
    pub input: Vec<String>,
    /// Output PNG path
    pub output: String,
    /// Grid columns (1-6)
    pub columns: u32,
    /// Grid rows (1-4)
    pub rows: u32,
    /// Padding around every cell in pixels (0-512)
    pub padding: u32,
    /// Atlas resolution: 1024, 2048 or 4096
    pub atlas_size: u32,
    /// Resize filter algorithm (nearest, triangle, catmull-rom, gaussian, lanczos3)
    pub filter: String,
    /// PNG compression configuration (optional)
    pub compress: Option<CompressConfig>,
}

impl Default for GridpackConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            input: Vec::new(),
            output: "atlas.png".to_string(),
            columns: 3,
            rows: 2,
            padding: 10,
            atlas_size: 1024,
            filter: "lanczos3".to_string(),
            compress: None,
        }
    }
}
