use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::grid::AtlasSize;

#[derive(Parser, Debug)]
#[command(name = "gridpack")]
#[command(version, about = "Fixed-grid sprite atlas generator", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compose the atlas and save it as PNG
    Generate(GenerateArgs),
    /// Render a reduced-scale preview of the grid
    Preview(PreviewArgs),
}

impl Command {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Command::Generate(args) => &args.common,
            Command::Preview(args) => &args.common,
        }
    }
}

/// Selection and grid settings shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Input PNG files or directories, in placement order
    #[arg(required_unless_present = "config")]
    pub input: Vec<PathBuf>,

    /// Load settings from a .gridpack config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of grid columns (1-6) [default: 3]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=6))]
    pub columns: Option<u32>,

    /// Number of grid rows (1-4) [default: 2]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub rows: Option<u32>,

    /// Padding around every cell in pixels (0-512) [default: 10]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=512))]
    pub padding: Option<u32>,

    /// Atlas resolution [default: 1024]
    #[arg(short, long, value_enum)]
    pub size: Option<AtlasSize>,

    /// Resize filter algorithm [default: lanczos3]
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output PNG path [default: atlas.png]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Also write a JSON file describing every cell next to the PNG
    #[arg(long)]
    pub metadata: bool,

    /// Open the saved atlas in the default image viewer
    #[arg(long)]
    pub open: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output PNG path [default: preview.png]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview surface width in pixels
    #[arg(long, default_value_t = 512)]
    pub width: u32,

    /// Preview surface height in pixels
    #[arg(long, default_value_t = 512)]
    pub height: u32,
}

/// Resize filter algorithm
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq, Hash)]
pub enum ResizeFilter {
    /// Nearest neighbor (best for pixel art)
    #[value(name = "nearest")]
    Nearest,
    /// Bilinear interpolation
    #[value(name = "triangle")]
    Triangle,
    /// Cubic interpolation (bicubic)
    #[value(name = "catmull-rom", alias = "bicubic")]
    CatmullRom,
    /// Gaussian filter
    #[value(name = "gaussian")]
    Gaussian,
    /// Lanczos with window 3 (highest quality)
    #[default]
    #[value(name = "lanczos3")]
    Lanczos3,
}

impl ResizeFilter {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResizeFilter::Nearest => image::imageops::FilterType::Nearest,
            ResizeFilter::Triangle => image::imageops::FilterType::Triangle,
            ResizeFilter::CatmullRom => image::imageops::FilterType::CatmullRom,
            ResizeFilter::Gaussian => image::imageops::FilterType::Gaussian,
            ResizeFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_level_parsing() {
        assert_eq!("max".parse::<CompressionLevel>(), Ok(CompressionLevel::Max));
        assert_eq!("MAX".parse::<CompressionLevel>(), Ok(CompressionLevel::Max));
        assert_eq!("4".parse::<CompressionLevel>(), Ok(CompressionLevel::Level(4)));
        assert!("7".parse::<CompressionLevel>().is_err());
        assert!("fast".parse::<CompressionLevel>().is_err());
    }

    #[test]
    fn test_generate_args() {
        let cli = CliArgs::try_parse_from([
            "gridpack", "generate", "a.png", "b.png", "--columns", "4", "--rows", "1", "-s",
            "2048", "--compress", "-o", "out.png",
        ])
        .unwrap();

        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.common.input.len(), 2);
        assert_eq!(args.common.columns, Some(4));
        assert_eq!(args.common.rows, Some(1));
        assert_eq!(args.common.size, Some(AtlasSize::S2048));
        assert_eq!(args.compress, Some(CompressionLevel::Level(2)));
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn test_grid_ranges_are_enforced() {
        assert!(
            CliArgs::try_parse_from(["gridpack", "generate", "a.png", "--columns", "7"]).is_err()
        );
        assert!(CliArgs::try_parse_from(["gridpack", "generate", "a.png", "--rows", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["gridpack", "generate", "a.png", "-p", "513"]).is_err());
        assert!(CliArgs::try_parse_from(["gridpack", "generate", "a.png", "-s", "512"]).is_err());
    }

    #[test]
    fn test_preview_defaults() {
        let cli = CliArgs::try_parse_from(["gridpack", "preview", "sprites/"]).unwrap();
        let Command::Preview(args) = cli.command else {
            panic!("expected preview");
        };
        assert_eq!((args.width, args.height), (512, 512));
        assert_eq!(cli_filter(&args.common), ResizeFilter::Lanczos3);
    }

    fn cli_filter(args: &CommonArgs) -> ResizeFilter {
        args.filter.unwrap_or_default()
    }

    #[test]
    fn test_config_replaces_inputs() {
        let cli =
            CliArgs::try_parse_from(["gridpack", "generate", "-c", "sheet.gridpack"]).unwrap();
        assert!(cli.command.common().input.is_empty());
    }
}
