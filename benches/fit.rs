// benches/fit.rs
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use covid19_analyzer::{
    analysis::{fit_regions, model::{CurveModel, LOGISTIC}},
    config::options::{AnalysisOptions, ModelKind},
    data::{Dataset, Record},
    growth::get_growth_rate,
    progress::NullProgress,
};

/// 20 regions x 90 days of logistic-shaped counts with a small wiggle.
fn synthetic() -> Dataset {
    let start = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap_or_default();
    let mut rows = Vec::new();
    for k in 0..20 {
        let amp = 1_000.0 * (k + 1) as f64;
        let center = 30.0 + k as f64;
        for i in 0..90 {
            let x = i as f64;
            let mut r = Record::new(start + Duration::days(i), "#Global", format!("Region {k:02}"));
            r.confirmed = Some(LOGISTIC.eval(x, &[amp, center, 6.0]) + (x * 0.7).sin());
            r.deaths = Some(LOGISTIC.eval(x, &[amp * 0.05, center + 3.0, 5.0]));
            r.recovered = Some(LOGISTIC.eval(x, &[amp * 0.6, center + 12.0, 7.0]));
            rows.push(r);
        }
    }
    let mut ds = Dataset::new(rows);
    ds.sort();
    ds
}

fn bench_fit(c: &mut Criterion) {
    let data = synthetic();

    for model in ModelKind::ALL {
        let opts = AnalysisOptions { model, days_to_predict: 30, ..AnalysisOptions::default() };
        c.bench_function(&format!("fit_regions_{model}"), |b| {
            b.iter(|| {
                let out = fit_regions(black_box(&data), &opts, &mut NullProgress);
                black_box(out.params.len())
            })
        });
    }

    c.bench_function("growth_rate", |b| {
        b.iter(|| black_box(get_growth_rate(black_box(&data)).len()))
    });
}

criterion_group!(benches, bench_fit);
criterion_main!(benches);
