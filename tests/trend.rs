// tests/trend.rs
//
// Extrapolation and the sup/inf band around it.

use chrono::{Duration, NaiveDate};
use covid19_analyzer::analysis::model::{CurveModel, EXPONENTIAL, LOGISTIC};
use covid19_analyzer::analysis::params::params_to_table;
use covid19_analyzer::analysis::{calc_extrema, predict_trend, ParamEstimate, RegionFit, TrendRow};
use covid19_analyzer::config::options::ModelKind;
use covid19_analyzer::data::{RegionKey, Subset};

fn fit_with(model: ModelKind, params: Vec<ParamEstimate>, n: usize) -> RegionFit {
    let first = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
    RegionFit {
        key: RegionKey::new("#Global", "Testland"),
        subset: Subset::Confirmed,
        model,
        dates: (0..n).map(|i| first + Duration::days(i as i64)).collect(),
        observed: vec![0.0; n],
        best_fit: vec![0.0; n],
        params,
        chisqr: 0.0,
        redchi: 0.0,
        iterations: 1,
        converged: true,
    }
}

fn logistic_params() -> Vec<ParamEstimate> {
    vec![
        ParamEstimate::new("amplitude", 1000.0, Some(50.0)),
        ParamEstimate::new("center", 20.0, Some(1.0)),
        ParamEstimate::new("sigma", 4.0, Some(0.5)),
    ]
}

#[test]
fn trend_starts_the_day_after_the_last_observation() {
    let fit = fit_with(ModelKind::LogisticCurve, logistic_params(), 10);
    let trend = predict_trend(&fit, 5);

    assert_eq!(trend.len(), 5);
    let last = *fit.dates.last().unwrap();
    for (i, p) in trend.iter().enumerate() {
        assert_eq!(p.date, last + Duration::days(i as i64 + 1));
    }
    // x continues at n
    let expected = LOGISTIC.eval(10.0, &[1000.0, 20.0, 4.0]);
    assert!((trend[0].trend - expected).abs() < 1e-9);
}

#[test]
fn brute_force_band_encloses_the_trend() {
    let fit = fit_with(ModelKind::LogisticCurve, logistic_params(), 15);
    for p in predict_trend(&fit, 20) {
        let (sup, inf) = (p.trend_sup.unwrap(), p.trend_inf.unwrap());
        assert!(inf <= p.trend && p.trend <= sup, "{inf} <= {} <= {sup}", p.trend);
    }
}

#[test]
fn brute_force_takes_extremes_over_all_combinations() {
    let params = logistic_params();
    let xs = [5.0, 20.0, 35.0];
    let (sup, inf) = calc_extrema(&xs, &LOGISTIC, &params, true).unwrap();

    for (j, x) in xs.iter().enumerate() {
        let mut all = Vec::new();
        for a in [950.0, 1050.0] {
            for c in [19.0, 21.0] {
                for s in [3.5, 4.5] {
                    all.push(LOGISTIC.eval(*x, &[a, c, s]));
                }
            }
        }
        let max = all.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = all.iter().copied().fold(f64::INFINITY, f64::min);
        assert!((sup[j] - max).abs() < 1e-9);
        assert!((inf[j] - min).abs() < 1e-9);
    }
}

#[test]
fn shifted_extrema_move_every_parameter_the_same_way() {
    let params = vec![
        ParamEstimate::new("amplitude", 2.0, Some(0.5)),
        ParamEstimate::new("decay", -10.0, Some(1.0)),
    ];
    let (sup, inf) = calc_extrema(&[3.0], &EXPONENTIAL, &params, false).unwrap();
    assert!((sup[0] - EXPONENTIAL.eval(3.0, &[2.5, -9.0])).abs() < 1e-12);
    assert!((inf[0] - EXPONENTIAL.eval(3.0, &[1.5, -11.0])).abs() < 1e-12);

    // inverting decay swaps its direction
    let inverted = params_to_table(&params, &["decay"]);
    assert_eq!(inverted[1].stderr, Some(-1.0));
    assert_eq!(inverted[0].stderr, Some(0.5));
    let (sup, _) = calc_extrema(&[3.0], &EXPONENTIAL, &inverted, false).unwrap();
    assert!((sup[0] - EXPONENTIAL.eval(3.0, &[2.5, -11.0])).abs() < 1e-12);
}

#[test]
fn missing_stderr_means_no_band() {
    let mut params = logistic_params();
    params[1].stderr = None;
    assert!(calc_extrema(&[1.0], &LOGISTIC, &params, true).is_none());

    let fit = fit_with(ModelKind::LogisticCurve, params, 10);
    let trend = predict_trend(&fit, 3);
    assert_eq!(trend.len(), 3);
    assert!(trend.iter().all(|p| p.trend_sup.is_none() && p.trend_inf.is_none()));
}

#[test]
fn trend_row_carries_region_and_subset() {
    let fit = fit_with(ModelKind::ExponentialCurve, vec![
        ParamEstimate::new("amplitude", 1.0, Some(0.1)),
        ParamEstimate::new("decay", -7.0, Some(0.2)),
    ], 4);
    let trend = predict_trend(&fit, 1);
    let row = TrendRow::from_point(&fit, &trend[0]);
    assert_eq!(row.region, "Testland");
    assert_eq!(row.parent_region, "#Global");
    assert_eq!(row.subset, Subset::Confirmed);
    assert_eq!(row.date, NaiveDate::from_ymd_opt(2020, 3, 5).unwrap());
    assert!(row.trend_sup.unwrap() > row.trend_inf.unwrap());
}
