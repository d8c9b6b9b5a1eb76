// src/analysis/fit.rs
use chrono::NaiveDate;

use super::lm::{self, LmConfig};
use super::model::CurveModel;
use super::params::ParamEstimate;
use crate::config::options::{AnalysisOptions, ModelKind};
use crate::data::{Record, RegionKey, Subset};
use crate::error::FitError;

/// Result of fitting one subset of one region.
#[derive(Clone, Debug)]
pub struct RegionFit {
    pub key: RegionKey,
    pub subset: Subset,
    pub model: ModelKind,
    /// Observation dates, ascending; `best_fit[i]` belongs to `dates[i]`.
    pub dates: Vec<NaiveDate>,
    pub observed: Vec<f64>,
    pub best_fit: Vec<f64>,
    /// In the model's parameter order.
    pub params: Vec<ParamEstimate>,
    pub chisqr: f64,
    pub redchi: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl RegionFit {
    pub fn values(&self) -> Vec<f64> {
        self.params.iter().map(|p| p.value).collect()
    }
}

/// Fit `model` to the `subset` values of one region's rows.
///
/// Rows are ordered by date first; x is the row index (0..n). A single
/// missing value fails the fit.
pub fn fit_data_model(
    rows: &[&Record],
    key: &RegionKey,
    subset: Subset,
    model: &dyn CurveModel,
    opts: &AnalysisOptions,
) -> Result<RegionFit, FitError> {
    let mut rows = rows.to_vec();
    rows.sort_by_key(|r| r.date);

    let missing = rows.iter().filter(|r| r.get(subset).is_none()).count();
    if missing > 0 {
        return Err(FitError::MissingValues(missing));
    }
    let observed: Vec<f64> = rows.iter().filter_map(|r| r.get(subset)).collect();
    let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
    let x: Vec<f64> = (0..observed.len()).map(|i| i as f64).collect();

    if observed.len() <= model.n_params() {
        return Err(FitError::TooFewPoints { points: observed.len(), params: model.n_params() });
    }

    let init = model.initial_params(&observed, opts)?;
    let cfg = LmConfig { max_iterations: opts.max_iterations, tolerance: opts.tolerance };
    let report = lm::minimize(model, &x, &observed, init, &cfg)?;

    if !report.converged {
        logd!("{key} {subset}: no convergence after {} evaluations", report.iterations);
    }

    let best_fit = x.iter().map(|xi| model.eval(*xi, &report.params)).collect();
    let params = model
        .param_names()
        .iter()
        .zip(report.params.iter().zip(&report.stderr))
        .map(|(name, (value, stderr))| ParamEstimate::new(*name, *value, *stderr))
        .collect();

    Ok(RegionFit {
        key: key.clone(),
        subset,
        model: model.kind(),
        dates,
        observed,
        best_fit,
        params,
        chisqr: report.chisqr,
        redchi: report.redchi,
        iterations: report.iterations,
        converged: report.converged,
    })
}
