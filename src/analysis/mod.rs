// src/analysis/mod.rs
//! # Curve fitting and trend prediction
//!
//! Pipeline for one series: pick the model's initial parameters from the
//! data, run a Levenberg–Marquardt least-squares fit, flatten the parameters
//! (value + standard error) into a result row, and extrapolate a trend with a
//! supremum/infimum band built from the parameter errors.
//!
//! ```text
//! batch::fit_regions ─┬─ fit::fit_data_model ── model::CurveModel (+ lm)
//!                     ├─ params::get_fit_param_results_row
//!                     └─ trend::predict_trend ── trend::calc_extrema
//! ```
//!
//! A failing fit is a `FitError`; the batch logs it and moves on to the next
//! subset/region.
pub mod batch;
pub mod fit;
pub mod lm;
pub mod model;
pub mod params;
pub mod translate;
pub mod trend;

pub use batch::{batch_fit_model, fit_regions, get_fit_data, BatchOutput, BatchSummary, FitData, FitFailure};
pub use fit::{fit_data_model, RegionFit};
pub use model::{model_for, CurveModel};
pub use params::{FitParamRow, ParamEstimate};
pub use trend::{calc_extrema, predict_trend, TrendPoint, TrendRow};
