use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::atlas::{Atlas, PlacedImage};
use crate::error::GridpackError;
use crate::grid::Rect;

#[derive(Serialize)]
struct JsonOutput {
    meta: Meta,
    image: String,
    size: Size,
    grid: Grid,
    cells: Vec<JsonCell>,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
    format: &'static str,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Grid {
    columns: u32,
    rows: u32,
    padding: u32,
    cell_size: Size,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonCell {
    name: String,
    index: usize,
    row: u32,
    col: u32,
    cell: Rect,
    frame: Rect,
    source_size: Size,
}

/// Path of the metadata file written next to an atlas PNG
pub fn metadata_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("json")
}

/// Write JSON metadata describing where each image was drawn
pub fn write_json(atlas: &Atlas, image_path: &Path) -> Result<PathBuf> {
    let geometry = &atlas.geometry;
    let image = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let output = JsonOutput {
        meta: Meta {
            app: "gridpack",
            version: env!("CARGO_PKG_VERSION"),
            format: "rgba8888",
        },
        image,
        size: Size {
            w: atlas.size(),
            h: atlas.size(),
        },
        grid: Grid {
            columns: geometry.columns,
            rows: geometry.rows,
            padding: geometry.padding,
            cell_size: Size {
                w: geometry.cell_width,
                h: geometry.cell_height,
            },
        },
        cells: atlas.images.iter().map(cell_to_json).collect(),
    };

    let json_path = metadata_path(image_path);
    let content = serde_json::to_string_pretty(&output)?;

    fs::write(&json_path, content).map_err(|e| GridpackError::OutputWrite {
        path: json_path.clone(),
        source: e,
    })?;

    Ok(json_path)
}

fn cell_to_json(placed: &PlacedImage) -> JsonCell {
    let placement = &placed.placement;

    JsonCell {
        name: placed.name.clone(),
        index: placement.index,
        row: placement.row,
        col: placement.col,
        cell: placement.cell,
        frame: placement.drawn,
        source_size: Size {
            w: placed.source_width,
            h: placed.source_height,
        },
    }
}
