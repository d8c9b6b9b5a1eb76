// src/analysis/model.rs
use crate::config::options::{AnalysisOptions, ModelKind};
use crate::error::FitError;

/// How the trend band is built from the parameter errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtremaStrategy {
    /// f(value + stderr) / f(value - stderr); the listed parameters get their
    /// stderr negated first.
    Shifted { inverted: &'static [&'static str] },
    /// Max/min over all 2^k sign combinations. Needed when shifting every
    /// parameter the same way makes the band cross the best fit (logistic).
    BruteForce,
}

/// A closed-form model `f(x; p)` with an analytic gradient in `p`.
pub trait CurveModel: Send + Sync + 'static {
    fn kind(&self) -> ModelKind;

    /// Parameter names, in the order `eval`/`gradient` expect them.
    fn param_names(&self) -> &'static [&'static str];

    fn eval(&self, x: f64, p: &[f64]) -> f64;

    /// ∂f/∂p_i at x, written into `out` (len = number of params).
    fn gradient(&self, x: f64, p: &[f64], out: &mut [f64]);

    /// Starting point for the fit, derived from the observed values.
    fn initial_params(&self, y: &[f64], opts: &AnalysisOptions) -> Result<Vec<f64>, FitError>;

    fn extrema_strategy(&self) -> ExtremaStrategy;

    fn n_params(&self) -> usize {
        self.param_names().len()
    }
}

fn max_of(y: &[f64]) -> f64 {
    y.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/* ---------------- Logistic step curve ---------------- */

/// `A * (1 - 1 / (1 + exp((x - center) / sigma)))`
pub struct LogisticCurve;
pub static LOGISTIC: LogisticCurve = LogisticCurve;

#[inline]
fn sigmoid(t: f64) -> f64 {
    // Same value as 1 - 1/(1 + e^t), without overflowing for large |t|.
    if t >= 0.0 {
        1.0 / (1.0 + (-t).exp())
    } else {
        let e = t.exp();
        e / (1.0 + e)
    }
}

impl CurveModel for LogisticCurve {
    fn kind(&self) -> ModelKind { ModelKind::LogisticCurve }

    fn param_names(&self) -> &'static [&'static str] {
        &["amplitude", "center", "sigma"]
    }

    fn eval(&self, x: f64, p: &[f64]) -> f64 {
        let (a, c, s) = (p[0], p[1], p[2]);
        a * sigmoid((x - c) / s)
    }

    fn gradient(&self, x: f64, p: &[f64], out: &mut [f64]) {
        let (a, c, s) = (p[0], p[1], p[2]);
        let sg = sigmoid((x - c) / s);
        let slope = a * sg * (1.0 - sg);
        out[0] = sg;
        out[1] = -slope / s;
        out[2] = -slope * (x - c) / (s * s);
    }

    fn initial_params(&self, y: &[f64], opts: &AnalysisOptions) -> Result<Vec<f64>, FitError> {
        let amplitude = max_of(y);
        if !amplitude.is_finite() || amplitude <= 0.0 {
            return Err(FitError::Degenerate("maximum is not positive"));
        }
        // First index above half the maximum.
        let center = y
            .iter()
            .position(|v| *v > amplitude / 2.0)
            .ok_or(FitError::Degenerate("no value above half maximum"))?;
        Ok(vec![amplitude, center as f64, opts.logistic_sigma])
    }

    fn extrema_strategy(&self) -> ExtremaStrategy { ExtremaStrategy::BruteForce }
}

/* ---------------- Exponential curve ---------------- */

/// `A * exp(-x / decay)`; a growing series has a negative decay.
pub struct ExponentialCurve;
pub static EXPONENTIAL: ExponentialCurve = ExponentialCurve;

impl CurveModel for ExponentialCurve {
    fn kind(&self) -> ModelKind { ModelKind::ExponentialCurve }

    fn param_names(&self) -> &'static [&'static str] {
        &["amplitude", "decay"]
    }

    fn eval(&self, x: f64, p: &[f64]) -> f64 {
        p[0] * (-x / p[1]).exp()
    }

    fn gradient(&self, x: f64, p: &[f64], out: &mut [f64]) {
        let (a, d) = (p[0], p[1]);
        let e = (-x / d).exp();
        out[0] = e;
        out[1] = a * e * x / (d * d);
    }

    fn initial_params(&self, y: &[f64], _opts: &AnalysisOptions) -> Result<Vec<f64>, FitError> {
        // An all-zero series starts (and stays) at amplitude 0; the fit is
        // still reported, without standard errors.
        let current_max = max_of(y);
        if !current_max.is_finite() {
            return Err(FitError::Degenerate("maximum is not finite"));
        }
        Ok(vec![current_max * 1e-3, -(y.len() as f64) / 7.0])
    }

    fn extrema_strategy(&self) -> ExtremaStrategy {
        ExtremaStrategy::Shifted { inverted: &[] }
    }
}

pub fn model_for(kind: ModelKind) -> &'static dyn CurveModel {
    match kind {
        ModelKind::LogisticCurve => &LOGISTIC,
        ModelKind::ExponentialCurve => &EXPONENTIAL,
    }
}
