// src/analysis/params.rs
//
// Fitted parameters as flat result rows:
//   region, parent_region, subset, "<p> value", "<p> stderr", ...
// with parameters ordered by name.

use std::collections::BTreeSet;

use crate::csv::cell_at;
use crate::data::{RegionKey, Subset};
use crate::error::{Error, Result};

pub const VALUE_SUFFIX: &str = " value";
pub const STDERR_SUFFIX: &str = " stderr";

#[derive(Clone, Debug, PartialEq)]
pub struct ParamEstimate {
    pub name: String,
    pub value: f64,
    /// `None` when the covariance could not be estimated.
    pub stderr: Option<f64>,
}

impl ParamEstimate {
    pub fn new(name: impl Into<String>, value: f64, stderr: Option<f64>) -> Self {
        Self { name: name.into(), value, stderr }
    }
}

/// Copy of `params` where every parameter named in `inverted` has its
/// stderr negated.
pub fn params_to_table(params: &[ParamEstimate], inverted: &[&str]) -> Vec<ParamEstimate> {
    params
        .iter()
        .map(|p| {
            let mut p = p.clone();
            if inverted.contains(&p.name.as_str()) {
                p.stderr = p.stderr.map(|e| -e);
            }
            p
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct FitParamRow {
    pub region: String,
    pub parent_region: String,
    pub subset: Subset,
    /// Sorted by name.
    pub params: Vec<ParamEstimate>,
}

impl FitParamRow {
    pub fn key(&self) -> RegionKey {
        RegionKey::new(self.parent_region.clone(), self.region.clone())
    }

    pub fn get(&self, name: &str) -> Option<&ParamEstimate> {
        self.params.iter().find(|p| p.name == name)
    }
}

pub fn get_fit_param_results_row(
    region: &str,
    parent_region: &str,
    subset: Subset,
    params: &[ParamEstimate],
) -> FitParamRow {
    let mut params = params.to_vec();
    params.sort_by(|a, b| a.name.cmp(&b.name));
    FitParamRow { region: s!(region), parent_region: s!(parent_region), subset, params }
}

fn format_float(v: f64) -> String {
    format!("{v}")
}

/// Headers + stringified rows. The parameter columns are the sorted union of
/// all parameter names; a row without a parameter leaves its cells empty.
pub fn params_table(rows: &[FitParamRow]) -> (Vec<String>, Vec<Vec<String>>) {
    let names: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.params.iter().map(|p| p.name.as_str()))
        .collect();

    let mut headers = headers!["region", "parent_region", "subset"];
    for n in &names {
        headers.push(join!(*n, VALUE_SUFFIX));
        headers.push(join!(*n, STDERR_SUFFIX));
    }

    let body = rows
        .iter()
        .map(|r| {
            let mut out = vec![r.region.clone(), r.parent_region.clone(), s!(r.subset.name())];
            for n in &names {
                match r.get(n) {
                    Some(p) => {
                        out.push(format_float(p.value));
                        out.push(p.stderr.map(format_float).unwrap_or_default());
                    }
                    None => {
                        out.push(s!());
                        out.push(s!());
                    }
                }
            }
            out
        })
        .collect();

    (headers, body)
}

fn parse_float(cell: &str, what: &'static str) -> Result<Option<f64>> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| Error::Malformed { what, detail: format!("'{cell}' is not a number") })
}

/// Inverse of `params_table`.
pub fn parse_params_table(headers: &[String], rows: &[Vec<String>]) -> Result<Vec<FitParamRow>> {
    let fixed = ["region", "parent_region", "subset"];
    if headers.len() < fixed.len() || headers.iter().zip(fixed).any(|(h, f)| h != f) {
        return Err(Error::Malformed {
            what: "fit params header",
            detail: format!("expected it to start with {}", fixed.join(",")),
        });
    }

    // (name, value column, stderr column)
    let mut columns: Vec<(String, usize, Option<usize>)> = Vec::new();
    for (i, h) in headers.iter().enumerate().skip(fixed.len()) {
        if let Some(name) = h.strip_suffix(VALUE_SUFFIX) {
            let stderr_col = headers.iter().position(|x| *x == join!(name, STDERR_SUFFIX));
            columns.push((s!(name), i, stderr_col));
        }
    }

    rows.iter()
        .map(|row| -> Result<FitParamRow> {
            let subset: Subset = cell_at(row, 2).parse()?;
            let mut params = Vec::with_capacity(columns.len());
            for (name, vcol, scol) in &columns {
                let Some(value) = parse_float(cell_at(row, *vcol), "parameter value")? else { continue };
                let stderr = match scol {
                    Some(c) => parse_float(cell_at(row, *c), "parameter stderr")?,
                    None => None,
                };
                params.push(ParamEstimate::new(name.clone(), value, stderr));
            }
            Ok(get_fit_param_results_row(cell_at(row, 0), cell_at(row, 1), subset, &params))
        })
        .collect()
}
