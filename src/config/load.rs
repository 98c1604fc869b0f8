use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use super::types::{CONFIG_VERSION, CompressConfig, GridpackConfig};
use crate::cli::{CompressionLevel, ResizeFilter};
use crate::grid::{AtlasSize, GridConfig};

/// A loaded configuration file with its associated directory.
///
/// Paths in the config are relative to the config file location,
/// so we need to track where the config was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration
    pub config: GridpackConfig,
    /// The directory containing the config file
    pub config_dir: PathBuf,
}

impl LoadedConfig {
    /// Load a config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let config: GridpackConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if config.version != CONFIG_VERSION {
            anyhow::bail!(
                "unsupported config version {} in {} (expected {})",
                config.version,
                path.display(),
                CONFIG_VERSION
            );
        }

        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { config, config_dir })
    }

    /// Resolve input patterns to actual file paths.
    ///
    /// Glob patterns are expanded (sorted by path), and all paths are
    /// resolved relative to the config file directory. Entry order is kept.
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut results = Vec::new();

        for pattern in &self.config.input {
            if is_glob_pattern(pattern) {
                let full_pattern = self.config_dir.join(pattern);
                let pattern_str = full_pattern.to_string_lossy();

                let paths = glob::glob(&pattern_str)
                    .with_context(|| format!("invalid glob pattern: {}", pattern))?;

                for entry in paths {
                    let path =
                        entry.with_context(|| format!("failed to read glob entry: {}", pattern))?;
                    results.push(path);
                }
            } else {
                results.push(self.config_dir.join(pattern));
            }
        }

        Ok(results)
    }

    /// Resolve the output path relative to the config file directory.
    pub fn resolve_output(&self) -> PathBuf {
        self.config_dir.join(&self.config.output)
    }

    /// Grid settings from the file, validated against the supported ranges
    pub fn grid(&self) -> Result<GridConfig> {
        let atlas_size = AtlasSize::try_from(self.config.atlas_size)?;
        GridConfig::new(
            self.config.columns,
            self.config.rows,
            self.config.padding,
            atlas_size,
        )
    }

    pub fn filter(&self) -> Result<ResizeFilter> {
        ResizeFilter::from_str(&self.config.filter, true).map_err(|_e| {
            anyhow::anyhow!(
                "unknown filter '{}' in config file. Valid values: nearest, triangle, \
                 catmull-rom, gaussian, lanczos3",
                self.config.filter
            )
        })
    }

    pub fn compress(&self) -> Result<Option<CompressionLevel>> {
        match &self.config.compress {
            None => Ok(None),
            Some(CompressConfig::Level(n)) => n
                .to_string()
                .parse()
                .map(Some)
                .map_err(|e: String| anyhow::anyhow!("{} in config file", e)),
            Some(CompressConfig::Max(s)) => s
                .parse()
                .map(Some)
                .map_err(|e: String| anyhow::anyhow!("{} in config file", e)),
        }
    }
}

/// Check if a pattern contains glob characters.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}
