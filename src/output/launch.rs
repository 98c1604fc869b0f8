use std::io;
use std::path::Path;
use std::process::Command;

use anyhow::Result;
use log::info;

use crate::error::GridpackError;

/// Open `path` with the host's default handler for its file type.
///
/// The handler is spawned and not waited on.
pub fn open_in_default_viewer(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(GridpackError::SavedFileMissing(Some(path.to_path_buf())).into());
    }

    spawn_default_handler(path).map_err(|e| GridpackError::ExternalOpenFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Opened {}", path.display());
    Ok(())
}

#[cfg(target_os = "windows")]
fn spawn_default_handler(path: &Path) -> io::Result<()> {
    // The empty argument is the window title expected by `start`
    Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(path)
        .spawn()
        .map(|_| ())
}

#[cfg(target_os = "macos")]
fn spawn_default_handler(path: &Path) -> io::Result<()> {
    Command::new("open").arg(path).spawn().map(|_| ())
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn spawn_default_handler(path: &Path) -> io::Result<()> {
    Command::new("xdg-open").arg(path).spawn().map(|_| ())
}
