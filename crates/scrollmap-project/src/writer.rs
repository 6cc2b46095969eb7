//! Atomic `.sb3` writer.

use crate::{build_project, AssetStore, BundleRequest, Project, ProjectOptions, ProjectResult};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// What [`write_bundle`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSummary {
    /// Final archive path.
    pub path: PathBuf,
    /// Tile sprites written.
    pub tiles: usize,
    /// Distinct asset files in the archive.
    pub assets: usize,
    /// Archive size in bytes.
    pub bytes: u64,
}

fn write_archive<W: Write + Seek>(writer: W, project: &Project, assets: &AssetStore) -> ProjectResult<W> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(writer);

    zip.start_file("project.json", options)?;
    serde_json::to_writer(&mut zip, project)?;

    for (name, bytes) in assets.iter() {
        debug!(name, bytes = bytes.len(), "adding asset");
        zip.start_file(name, options)?;
        zip.write_all(bytes)?;
    }

    Ok(zip.finish()?)
}

/// Builds the project for `request` and writes it to `path`.
///
/// The archive is assembled in a temporary file next to `path` and renamed
/// into place once complete. If any step fails, `path` is left untouched.
///
/// # Errors
///
/// Any validation error from [`build_project`], plus I/O and archive errors.
pub fn write_bundle<P: AsRef<Path>>(
    path: P,
    request: &BundleRequest,
    options: &ProjectOptions,
) -> ProjectResult<BundleSummary> {
    let path = path.as_ref();
    let (project, assets) = build_project(request, options)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = tempfile::Builder::new()
        .prefix(".scrollmap-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    debug!(temp = %temp.path().display(), "staging archive");

    let (file, temp_path) = temp.into_parts();
    let buffered = write_archive(BufWriter::new(file), &project, &assets)?;
    let file: File = buffered.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    let bytes = file.metadata()?.len();
    drop(file);

    temp_path.persist(path).map_err(|e| e.error)?;

    info!(
        path = %path.display(),
        tiles = request.tiles.len(),
        assets = assets.len(),
        bytes,
        "project written"
    );

    Ok(BundleSummary {
        path: path.to_path_buf(),
        tiles: request.tiles.len(),
        assets: assets.len(),
        bytes,
    })
}
