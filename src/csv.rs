// src/csv.rs
//
// String-table helpers on top of the `csv` crate. Every artifact the crate
// writes goes through here or through serde records in `store`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use ::csv::{ReaderBuilder, Terminator, WriterBuilder};

use crate::error::{Error, Result};
use crate::file::ensure_parent;

/* ---------------- Parsing ---------------- */

/// Headers + rows from any reader. Ragged rows are accepted.
pub fn read_table<R: Read>(rdr: R, delim: u8) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut rdr = ReaderBuilder::new().delimiter(delim).flexible(true).from_reader(rdr);
    let headers = rdr.headers()?.iter().map(|h| s!(h.trim_start_matches('\u{feff}'))).collect();
    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        rows.push(rec.iter().map(String::from).collect());
    }
    Ok((headers, rows))
}

/// Cell `i` of a ragged row, empty when absent.
pub fn cell_at(row: &[String], i: usize) -> &str {
    row.get(i).map(String::as_str).unwrap_or("")
}

pub fn read_table_file(path: &Path, delim: u8) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    if !path.exists() {
        return Err(Error::MissingData(path.to_path_buf()));
    }
    read_table(File::open(path)?, delim)
}

/* ---------------- Writing ---------------- */

/// Write headers (optional) and rows to any writer, LF line endings.
pub fn write_table<W: Write>(
    w: W,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    delim: u8,
) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(delim)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(w);
    if let Some(h) = headers {
        wtr.write_record(h)?;
    }
    for r in rows {
        wtr.write_record(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_table_file(
    path: &Path,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
    delim: u8,
) -> Result<()> {
    ensure_parent(path)?;
    write_table(File::create(path)?, headers, rows, delim)
}

/// Full export string (Copy/Export) from a table and the header toggle.
pub fn to_export_string(
    headers: &[String],
    rows: &[Vec<String>],
    include_headers: bool,
    delim: u8,
) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_table(&mut buf, include_headers.then_some(headers), rows, delim)?;
    Ok(match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    })
}
