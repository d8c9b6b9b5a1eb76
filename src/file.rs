// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::csv::to_export_string;
use crate::download::DownloadBuffer;
use crate::error::{Error, Result};

/// Write a single export file based on ExportOptions (path, headers policy, delimiter).
/// Returns the final path written to.
pub fn write_export_single(
    export: &ExportOptions,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<PathBuf> {
    let path = export.out_path();
    ensure_parent(&path)?;

    let contents = to_export_string(headers, rows, export.include_headers, export.format.delim())?;
    fs::write(&path, contents)?;
    Ok(path)
}

/// Write a prepared download buffer to the export path.
pub fn write_download(export: &ExportOptions, buf: &DownloadBuffer) -> Result<PathBuf> {
    let path = export.out_path();
    ensure_parent(&path)?;
    fs::write(&path, &buf.bytes)?;
    Ok(path)
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect()
}

/// `-o` handling: empty → default file name in the cwd; a trailing
/// separator or an existing directory → default file name inside it.
pub fn resolve_single_out_path(user_o: &str, default_filename: &str) -> Result<PathBuf> {
    if user_o.is_empty() {
        return Ok(PathBuf::from(default_filename));
    }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(user_o) || p.is_dir() {
        ensure_directory(&p)?;
        Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

fn looks_like_dir_hint(s: &str) -> bool {
    s.ends_with('/') || s.ends_with('\\')
}
