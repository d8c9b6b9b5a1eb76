// src/analysis/trend.rs
//
// Extrapolation past the last observation, with a supremum/infimum band
// built from the parameter standard errors.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::fit::RegionFit;
use super::model::{CurveModel, ExtremaStrategy};
use super::params::{params_to_table, ParamEstimate};
use crate::data::Subset;

/// Value and error of every model parameter, in model order. `None` when a
/// parameter is missing or has no stderr.
fn value_error_pairs(model: &dyn CurveModel, params: &[ParamEstimate]) -> Option<Vec<(f64, f64)>> {
    model
        .param_names()
        .iter()
        .map(|name| {
            let p = params.iter().find(|p| p.name == *name)?;
            Some((p.value, p.stderr?))
        })
        .collect()
}

/// Supremum and infimum of the model over `xs`.
///
/// With `brute_force` every `value ± stderr` combination is evaluated and
/// the max/min taken per x. Otherwise the supremum is `f(value + stderr)`
/// and the infimum `f(value - stderr)`. `None` when any stderr is absent.
pub fn calc_extrema(
    xs: &[f64],
    model: &dyn CurveModel,
    params: &[ParamEstimate],
    brute_force: bool,
) -> Option<(Vec<f64>, Vec<f64>)> {
    let pairs = value_error_pairs(model, params)?;

    if !brute_force {
        let upper: Vec<f64> = pairs.iter().map(|(v, e)| v + e).collect();
        let lower: Vec<f64> = pairs.iter().map(|(v, e)| v - e).collect();
        let sup = xs.iter().map(|x| model.eval(*x, &upper)).collect();
        let inf = xs.iter().map(|x| model.eval(*x, &lower)).collect();
        return Some((sup, inf));
    }

    let k = pairs.len();
    let mut sup = vec![f64::NEG_INFINITY; xs.len()];
    let mut inf = vec![f64::INFINITY; xs.len()];
    let mut p = vec![0.0; k];

    // bit i set → parameter i shifted up
    for mask in 0..(1u32 << k) {
        for (i, (v, e)) in pairs.iter().enumerate() {
            p[i] = if mask & (1 << i) != 0 { v + e } else { v - e };
        }
        for (j, x) in xs.iter().enumerate() {
            let y = model.eval(*x, &p);
            sup[j] = sup[j].max(y);
            inf[j] = inf[j].min(y);
        }
    }
    Some((sup, inf))
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub trend: f64,
    pub trend_sup: Option<f64>,
    pub trend_inf: Option<f64>,
}

/// `days` points past the last observation, the first one dated the day
/// after it.
pub fn predict_trend(fit: &RegionFit, days: usize) -> Vec<TrendPoint> {
    let Some(last) = fit.dates.last().copied() else {
        return Vec::new();
    };
    let model = super::model::model_for(fit.model);
    let n = fit.dates.len();
    let xs: Vec<f64> = (n..n + days).map(|i| i as f64).collect();
    let values = fit.values();

    let band = match model.extrema_strategy() {
        ExtremaStrategy::BruteForce => calc_extrema(&xs, model, &fit.params, true),
        ExtremaStrategy::Shifted { inverted } => {
            calc_extrema(&xs, model, &params_to_table(&fit.params, inverted), false)
        }
    };

    xs.iter()
        .enumerate()
        .map(|(i, x)| TrendPoint {
            date: last + Duration::days(i as i64 + 1),
            trend: model.eval(*x, &values),
            trend_sup: band.as_ref().map(|(sup, _)| sup[i]),
            trend_inf: band.as_ref().map(|(_, inf)| inf[i]),
        })
        .collect()
}

/// One line of `<model>_model_fit_trend_data.csv`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    pub date: NaiveDate,
    pub parent_region: String,
    pub region: String,
    pub subset: Subset,
    pub trend: f64,
    #[serde(default)]
    pub trend_sup: Option<f64>,
    #[serde(default)]
    pub trend_inf: Option<f64>,
}

impl TrendRow {
    pub fn from_point(fit: &RegionFit, p: &TrendPoint) -> Self {
        Self {
            date: p.date,
            parent_region: fit.key.parent_region.clone(),
            region: fit.key.region.clone(),
            subset: fit.subset,
            trend: p.trend,
            trend_sup: p.trend_sup,
            trend_inf: p.trend_inf,
        }
    }
}
