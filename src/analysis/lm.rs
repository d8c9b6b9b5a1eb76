// src/analysis/lm.rs
//
// Levenberg–Marquardt least squares on a `CurveModel` (MINPACK port from the
// `levenberg-marquardt` crate), plus the parameter standard errors from the
// scaled covariance (JᵀJ)⁻¹ · χ²/(n - k).

use levenberg_marquardt::{LeastSquaresProblem, LevenbergMarquardt};
use nalgebra::{storage::Owned, DMatrix, DVector, Dyn};

use super::model::CurveModel;
use crate::error::FitError;

#[derive(Clone, Copy, Debug)]
pub struct LmConfig {
    pub max_iterations: usize,
    /// Relative tolerance on the cost decrease and on the step size.
    pub tolerance: f64,
}

#[derive(Clone, Debug)]
pub struct LmReport {
    pub params: Vec<f64>,
    /// `None` when the covariance could not be estimated.
    pub stderr: Vec<Option<f64>>,
    pub chisqr: f64,
    pub redchi: f64,
    /// Residual evaluations spent by the solver.
    pub iterations: usize,
    pub converged: bool,
}

/// One series against one model; residuals are `f(x; p) - y`.
struct CurveProblem<'a> {
    model: &'a dyn CurveModel,
    x: &'a [f64],
    y: &'a [f64],
    p: DVector<f64>,
}

impl LeastSquaresProblem<f64, Dyn, Dyn> for CurveProblem<'_> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, Dyn>;
    type ParameterStorage = Owned<f64, Dyn>;

    fn set_params(&mut self, p: &DVector<f64>) {
        self.p.copy_from(p);
    }

    fn params(&self) -> DVector<f64> {
        self.p.clone()
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        residuals(self.model, self.x, self.y, self.p.as_slice())
    }

    fn jacobian(&self) -> Option<DMatrix<f64>> {
        jacobian(self.model, self.x, self.p.as_slice())
    }
}

fn residuals(model: &dyn CurveModel, x: &[f64], y: &[f64], p: &[f64]) -> Option<DVector<f64>> {
    let r = DVector::from_iterator(x.len(), x.iter().zip(y).map(|(xi, yi)| model.eval(*xi, p) - yi));
    r.iter().all(|v| v.is_finite()).then_some(r)
}

fn jacobian(model: &dyn CurveModel, x: &[f64], p: &[f64]) -> Option<DMatrix<f64>> {
    let k = model.n_params();
    let mut data = vec![0.0; x.len() * k];
    for (row, xi) in data.chunks_exact_mut(k).zip(x) {
        model.gradient(*xi, p, row);
    }
    data.iter().all(|v| v.is_finite()).then(|| DMatrix::from_row_slice(x.len(), k, &data))
}

pub fn minimize(
    model: &dyn CurveModel,
    x: &[f64],
    y: &[f64],
    init: Vec<f64>,
    cfg: &LmConfig,
) -> Result<LmReport, FitError> {
    let n = x.len();
    let k = model.n_params();
    if n <= k {
        return Err(FitError::TooFewPoints { points: n, params: k });
    }
    residuals(model, x, y, &init).ok_or(FitError::NonFinite)?;

    let problem = CurveProblem { model, x, y, p: DVector::from_vec(init) };
    let solver = LevenbergMarquardt::new()
        .with_ftol(cfg.tolerance)
        .with_xtol(cfg.tolerance)
        // patience counts evaluations per (k + 1)
        .with_patience((cfg.max_iterations / (k + 1)).max(1));
    let (problem, report) = solver.minimize(problem);

    let params: Vec<f64> = problem.p.iter().copied().collect();
    let r = residuals(model, x, y, &params).ok_or(FitError::NonFinite)?;
    let cost = r.norm_squared();
    let redchi = cost / (n - k) as f64;
    let stderr = standard_errors(model, x, &params, redchi);

    Ok(LmReport {
        params,
        stderr,
        chisqr: cost,
        redchi,
        iterations: report.number_of_evaluations,
        converged: report.termination.was_successful(),
    })
}

fn standard_errors(model: &dyn CurveModel, x: &[f64], p: &[f64], redchi: f64) -> Vec<Option<f64>> {
    let k = model.n_params();
    let covar = jacobian(model, x, p).and_then(|j| (j.transpose() * &j).try_inverse());
    match covar {
        Some(c) => (0..k)
            .map(|i| {
                let var = c[(i, i)] * redchi;
                (var.is_finite() && var >= 0.0).then(|| var.sqrt())
            })
            .collect(),
        None => vec![None; k],
    }
}
