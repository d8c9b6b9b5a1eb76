// src/download.rs
//
// In-memory export of a source table: bytes, suggested file name and MIME
// type. The Data tab copies it to the clipboard or writes it to disk; the
// CLI `export` command prints or saves it.

use crate::config::consts::DEFAULT_FILE_PREFIX;
use crate::config::options::{ExportFormat, Source};
use crate::csv::to_export_string;
use crate::data::Dataset;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadBuffer {
    pub bytes: Vec<u8>,
    pub rows: usize,
    pub file_name: String,
    pub mimetype: &'static str,
}

impl DownloadBuffer {
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }
}

/// `covid19_data_<source>.<ext>`
pub fn download_file_name(source: Source, format: ExportFormat) -> String {
    join!(DEFAULT_FILE_PREFIX, source.id(), ".", format.ext())
}

pub fn make_download(
    source: Source,
    data: &Dataset,
    format: ExportFormat,
    include_headers: bool,
) -> Result<DownloadBuffer> {
    let (headers, rows) = data.to_table();
    let text = to_export_string(&headers, &rows, include_headers, format.delim())?;
    Ok(DownloadBuffer {
        bytes: text.into_bytes(),
        rows: rows.len(),
        file_name: download_file_name(source, format),
        mimetype: format.mimetype(),
    })
}
