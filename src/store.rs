// src/store.rs
//
// Flat-file layout under the data dir:
//
//   <data>/<source>/covid19_infections.csv
//   <data>/<source>/<model>_model_fit_{plot_data,params,trend_data}.csv
//   <data>/funkeinteraktiv_de/translation_table.csv

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::analysis::params::{params_table, parse_params_table, FitParamRow};
use crate::analysis::trend::TrendRow;
use crate::config::consts::{INFECTIONS_FILE, TRANSLATION_TABLE_FILE};
use crate::config::options::{AppOptions, FitDataKind, ModelKind, Source};
use crate::csv::{read_table_file, write_table_file};
use crate::data::{Dataset, Record};
use crate::error::{Error, Result};
use crate::file::ensure_parent;
use crate::specs::funke::TranslationEntry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_options(opts: &AppOptions) -> Self {
        Self::new(opts.data_dir.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /* ---------------- Paths ---------------- */

    pub fn source_dir(&self, source: Source) -> PathBuf {
        self.root.join(source.id())
    }

    pub fn infections_path(&self, source: Source) -> PathBuf {
        self.source_dir(source).join(INFECTIONS_FILE)
    }

    /// Lives next to the German data it translates from.
    pub fn translation_table_path(&self) -> PathBuf {
        self.source_dir(Source::FunkeinteraktivDe).join(TRANSLATION_TABLE_FILE)
    }

    pub fn fit_artifact_path(&self, source: Source, model: ModelKind, kind: FitDataKind) -> PathBuf {
        self.source_dir(source)
            .join(format!("{}_model_fit_{}.csv", model.id(), kind.file_suffix()))
    }

    pub fn has_data(&self, source: Source) -> bool {
        self.infections_path(source).is_file()
    }

    /* ---------------- Case tables ---------------- */

    pub fn load_dataset(&self, source: Source) -> Result<Dataset> {
        read_dataset(&self.infections_path(source))
    }

    pub fn save_dataset(&self, source: Source, data: &Dataset) -> Result<PathBuf> {
        let path = self.infections_path(source);
        write_dataset(&path, data)?;
        logd!("saved {} rows to {}", data.len(), path.display());
        Ok(path)
    }

    /* ---------------- Translation table ---------------- */

    pub fn save_translation_table(&self, entries: &[TranslationEntry]) -> Result<()> {
        write_records(&self.translation_table_path(), entries)
    }

    pub fn load_translation_table(&self) -> Result<Vec<TranslationEntry>> {
        read_records(&self.translation_table_path())
    }

    /* ---------------- Fit artifacts ---------------- */

    pub fn save_fit_plot(&self, source: Source, model: ModelKind, plot: &Dataset) -> Result<PathBuf> {
        let path = self.fit_artifact_path(source, model, FitDataKind::Plot);
        write_dataset(&path, plot)?;
        Ok(path)
    }

    pub fn load_fit_plot(&self, source: Source, model: ModelKind) -> Result<Dataset> {
        read_dataset(&self.fit_artifact_path(source, model, FitDataKind::Plot))
    }

    pub fn save_fit_params(&self, source: Source, model: ModelKind, rows: &[FitParamRow]) -> Result<PathBuf> {
        let path = self.fit_artifact_path(source, model, FitDataKind::Params);
        let (headers, body) = params_table(rows);
        write_table_file(&path, Some(&headers), &body, b',')?;
        Ok(path)
    }

    pub fn load_fit_params(&self, source: Source, model: ModelKind) -> Result<Vec<FitParamRow>> {
        let (headers, rows) = read_table_file(&self.fit_artifact_path(source, model, FitDataKind::Params), b',')?;
        parse_params_table(&headers, &rows)
    }

    pub fn save_fit_trend(&self, source: Source, model: ModelKind, rows: &[TrendRow]) -> Result<PathBuf> {
        let path = self.fit_artifact_path(source, model, FitDataKind::Trend);
        write_records(&path, rows)?;
        Ok(path)
    }

    pub fn load_fit_trend(&self, source: Source, model: ModelKind) -> Result<Vec<TrendRow>> {
        read_records(&self.fit_artifact_path(source, model, FitDataKind::Trend))
    }
}

/// Case table in the uniform column layout; counts without a trailing `.0`.
pub fn write_dataset(path: &Path, data: &Dataset) -> Result<()> {
    let (headers, rows) = data.to_table();
    write_table_file(path, Some(&headers), &rows, b',')
}

pub fn read_dataset(path: &Path) -> Result<Dataset> {
    Ok(Dataset::new(read_records::<Record>(path)?))
}

fn write_records<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    ensure_parent(path)?;
    let mut wtr = ::csv::Writer::from_writer(File::create(path)?);
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Err(Error::MissingData(path.to_path_buf()));
    }
    let mut rdr = ::csv::Reader::from_path(path)?;
    rdr.deserialize().map(|r| r.map_err(Error::from)).collect()
}
