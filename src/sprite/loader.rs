use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageReader;
use log::{debug, info, warn};
use rayon::prelude::*;

use super::{Decoded, SourceImage};
use crate::error::GridpackError;

const SUPPORTED_EXTENSIONS: &[&str] = &["png"];

/// Decode every selected image once, in selection order.
///
/// Files are taken as given; directories contribute their PNG files
/// (recursively, sorted by path). A decode failure does not fail the call:
/// it is recorded on the entry so that preview can skip it and generation
/// can report it.
pub fn load_images(inputs: &[impl AsRef<Path>]) -> Result<Vec<SourceImage>> {
    let paths = collect_image_paths(inputs)?;

    if paths.is_empty() {
        return Ok(Vec::new());
    }

    info!("Loading {} images...", paths.len());

    // collect() on an indexed parallel iterator keeps input order
    let images: Vec<SourceImage> = paths
        .into_par_iter()
        .map(|path| {
            let decoded = decode(&path);
            SourceImage::new(path, decoded)
        })
        .collect();

    let failed = images.iter().filter(|img| !img.is_loaded()).count();
    if failed > 0 {
        warn!("{} of {} images failed to load", failed, images.len());
    }

    Ok(images)
}

fn decode(path: &Path) -> Decoded {
    let result = ImageReader::open(path)
        .map_err(image::ImageError::IoError)
        .and_then(|reader| reader.with_guessed_format().map_err(image::ImageError::IoError))
        .and_then(|reader| reader.decode());

    match result {
        Ok(img) => {
            let img = img.into_rgba8();
            debug!(
                "Decoded {} ({}x{})",
                path.display(),
                img.width(),
                img.height()
            );
            Decoded::Ready(img)
        }
        Err(e) => {
            warn!("Failed to load image '{}': {}", path.display(), e);
            Decoded::Failed(e.to_string())
        }
    }
}

fn collect_image_paths(inputs: &[impl AsRef<Path>]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        let path = input.as_ref();
        if !path.exists() {
            return Err(GridpackError::InputNotFound(path.to_path_buf()).into());
        }

        if path.is_dir() {
            let mut found = Vec::new();
            collect_from_directory(path, &mut found)?;
            found.sort();
            paths.extend(found);
        } else {
            paths.push(path.to_path_buf());
        }
    }

    Ok(paths)
}

fn collect_from_directory(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();

        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        } else if path.is_dir() {
            collect_from_directory(&path, paths)?;
        }
    }

    Ok(())
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("hero.png")));
        assert!(is_supported_image(Path::new("HERO.PNG")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("noext")));
    }

    #[test]
    fn test_load_keeps_selection_order() {
        let dir = tempfile::tempdir().unwrap();
        let names = ["c.png", "a.png", "b.png"];
        for (i, name) in names.iter().enumerate() {
            write_png(&dir.path().join(name), 4 + i as u32, 4);
        }

        let inputs: Vec<_> = names.iter().map(|n| dir.path().join(n)).collect();
        let images = load_images(&inputs).unwrap();

        let loaded: Vec<_> = images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(loaded, names);
        assert_eq!(images[2].dimensions(), Some((6, 4)));
    }

    #[test]
    fn test_directory_inputs_are_sorted_png_only() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("b.png"), 2, 2);
        write_png(&dir.path().join("a.png"), 2, 2);
        std::fs::write(dir.path().join("readme.txt"), "not an image").unwrap();

        let images = load_images(&[dir.path()]).unwrap();
        let loaded: Vec<_> = images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(loaded, ["a.png", "b.png"]);
    }

    #[test]
    fn test_decode_failure_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("broken.png");
        std::fs::write(&bad, b"definitely not a png").unwrap();

        let images = load_images(&[&bad]).unwrap();
        assert_eq!(images.len(), 1);
        assert!(!images[0].is_loaded());
        assert!(matches!(images[0].decoded, Decoded::Failed(_)));
    }

    #[test]
    fn test_missing_input() {
        let err = load_images(&[Path::new("/definitely/not/here.png")]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GridpackError>(),
            Some(GridpackError::InputNotFound(_))
        ));
    }
}
