use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use gridpack::cli::{CliArgs, Command, CommonArgs, CompressionLevel, ResizeFilter};
use gridpack::config::{GridpackConfig, LoadedConfig};
use gridpack::grid::{AtlasSize, GridConfig};
use gridpack::output::write_json;
use gridpack::session::Session;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();
    let merged = merge_config_with_args(cli.command.common())?;

    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Gridpack v{}", env!("CARGO_PKG_VERSION"));

    let mut session = Session::new(merged.grid).with_filter(merged.filter);
    session.select(&merged.input)?;
    info!(
        "Selected {} images, grid {}x{}",
        session.images().len(),
        session.grid().columns,
        session.grid().rows
    );

    match &cli.command {
        Command::Generate(args) => {
            let atlas = session.generate()?;

            let output = args
                .output
                .clone()
                .or_else(|| merged.output.clone())
                .unwrap_or_else(|| PathBuf::from("atlas.png"));
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory: {}", parent.display())
                })?;
            }

            let compress = args.compress.or(merged.compress);
            session.save(&atlas, &output, compress)?;

            if args.metadata {
                let json_path = write_json(&atlas, &output)?;
                info!("Generated {}", json_path.display());
            }

            if args.open {
                // Failing to launch a viewer does not undo the save
                if let Err(e) = session.open_last_saved() {
                    warn!("{:#}", e);
                }
            }
        }
        Command::Preview(args) => {
            let preview = session.preview(args.width, args.height);
            let output = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from("preview.png"));
            preview
                .save(&output)
                .with_context(|| format!("failed to save preview: {}", output.display()))?;
            info!("Saved preview {}", output.display());
        }
    }

    info!("Done!");

    Ok(())
}

/// Merged configuration from CLI args and optional config file.
#[derive(Debug)]
struct MergedConfig {
    input: Vec<PathBuf>,
    output: Option<PathBuf>,
    grid: GridConfig,
    filter: ResizeFilter,
    compress: Option<CompressionLevel>,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &CommonArgs) -> Result<MergedConfig> {
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };

    // Input files: CLI args override config
    let input = if !args.input.is_empty() {
        args.input.clone()
    } else if let Some(ref lc) = loaded_config {
        lc.resolve_inputs()
            .context("failed to resolve input files from config")?
    } else {
        Vec::new()
    };

    let output = loaded_config.as_ref().map(LoadedConfig::resolve_output);

    // Grid: CLI > config > default, validated once after merging
    let defaults = GridpackConfig::default();
    let file = loaded_config
        .as_ref()
        .map(|lc| &lc.config)
        .unwrap_or(&defaults);
    let atlas_size = match args.size {
        Some(size) => size,
        None => AtlasSize::try_from(file.atlas_size)?,
    };
    let grid = GridConfig::new(
        args.columns.unwrap_or(file.columns),
        args.rows.unwrap_or(file.rows),
        args.padding.unwrap_or(file.padding),
        atlas_size,
    )?;

    let filter = if let Some(f) = args.filter {
        f
    } else if let Some(ref lc) = loaded_config {
        lc.filter()?
    } else {
        ResizeFilter::default()
    };

    let compress = match &loaded_config {
        Some(lc) => lc.compress()?,
        None => None,
    };

    Ok(MergedConfig {
        input,
        output,
        grid,
        filter,
        compress,
        verbose: args.verbose,
    })
}
