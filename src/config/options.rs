// src/config/options.rs
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::consts::*;
use crate::error::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub data_dir: PathBuf,
    pub source: Source,
    pub analysis: AnalysisOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            source: Source::FunkeinteraktivDe,
            analysis: AnalysisOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

impl AppOptions {
    /// Defaults, with the data dir taken from `COVID19_DATA_DIR` when set.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            opts.data_dir = PathBuf::from(dir);
        }
        opts
    }
}

/* ---------------- Sources ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    FunkeinteraktivDe,
    FunkeinteraktivEn,
    Jhu,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::FunkeinteraktivDe, Source::FunkeinteraktivEn, Source::Jhu];

    /// Directory / CLI name.
    pub fn id(&self) -> &'static str {
        match self {
            Source::FunkeinteraktivDe => "funkeinteraktiv_de",
            Source::FunkeinteraktivEn => "funkeinteraktiv_en",
            Source::Jhu => "JHU",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Source::FunkeinteraktivDe => "Funke Interaktiv (de)",
            Source::FunkeinteraktivEn => "Funke Interaktiv (en)",
            Source::Jhu => "Johns Hopkins University",
        }
    }

    fn supported() -> String {
        Self::ALL.iter().map(|s| s.id()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|src| src.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnsupportedSource { given: s!(s), supported: Self::supported() })
    }
}

/* ---------------- Fit models ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    ExponentialCurve,
    LogisticCurve,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::ExponentialCurve, ModelKind::LogisticCurve];

    pub fn id(&self) -> &'static str {
        match self {
            ModelKind::ExponentialCurve => "exponential_curve",
            ModelKind::LogisticCurve => "logistic_curve",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelKind::ExponentialCurve => "Exponential curve",
            ModelKind::LogisticCurve => "Logistic curve",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.id() == s.trim())
            .ok_or_else(|| Error::UnsupportedModel {
                given: s!(s),
                implemented: Self::ALL.iter().map(|m| m.id()).collect::<Vec<_>>().join(", "),
            })
    }
}

/// Which fit artifact to read back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FitDataKind {
    Plot,
    Params,
    Trend,
}

impl FitDataKind {
    pub const ALL: [FitDataKind; 3] = [FitDataKind::Plot, FitDataKind::Params, FitDataKind::Trend];

    pub fn id(&self) -> &'static str {
        match self {
            FitDataKind::Plot => "plot",
            FitDataKind::Params => "params",
            FitDataKind::Trend => "trend",
        }
    }

    /// File stem suffix after `<model>_model_fit_`.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            FitDataKind::Plot => "plot_data",
            FitDataKind::Params => "params",
            FitDataKind::Trend => "trend_data",
        }
    }
}

impl FromStr for FitDataKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.id() == s.trim())
            .ok_or_else(|| Error::UnsupportedKind {
                given: s!(s),
                expected: Self::ALL.iter().map(|k| k.id()).collect::<Vec<_>>().join(" | "),
            })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisOptions {
    pub model: ModelKind,
    pub days_to_predict: usize,
    /// Initial `sigma` of the logistic curve.
    pub logistic_sigma: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            model: ModelKind::LogisticCurve,
            days_to_predict: DEFAULT_DAYS_TO_PREDICT,
            logistic_sigma: DEFAULT_SIGMA,
            max_iterations: LM_MAX_ITERATIONS,
            tolerance: LM_TOLERANCE,
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
    pub fn mimetype(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Tsv => "text/tab-separated-values",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(Error::UnsupportedKind { given: s!(other), expected: s!("csv | tsv") }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; a user-typed extension wins over the format's.
    pub fn out_path(&self) -> PathBuf {
        let stem = self.out_path.file_stem.to_string_lossy();
        let ext = self.out_path.custom_ext.as_deref().unwrap_or(self.format.ext());
        self.out_path.dir.join(join!(stem, ".", ext))
    }

    pub fn current_dir(&self) -> &Path {
        &self.out_path.dir
    }

    /// Parse GUI/CLI text into dir + stem (+ extension when one was typed).
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.custom_ext = p
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .filter(|e| !e.is_empty());
    }

    /// Reset the stem to the download name of `source` (`covid19_data_<source>`).
    pub fn set_default_stem_for(&mut self, source: Source) {
        self.out_path.file_stem = OsString::from(join!(DEFAULT_FILE_PREFIX, source.id()));
        self.out_path.custom_ext = None;
    }

    pub fn is_default_stem_for(&self, source: Source) -> bool {
        self.out_path.file_stem == OsString::from(join!(DEFAULT_FILE_PREFIX, source.id()))
            && self.out_path.custom_ext.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    custom_ext: Option<String>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(join!(DEFAULT_FILE_PREFIX, Source::FunkeinteraktivDe.id())),
            custom_ext: None,
        }
    }
}
