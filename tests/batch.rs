// tests/batch.rs
//
// Batch fitting over a whole source table, with artifacts in a temp store.

use chrono::{Duration, NaiveDate};
use covid19_analyzer::analysis::model::{CurveModel, EXPONENTIAL, LOGISTIC};
use covid19_analyzer::analysis::{batch_fit_model, fit_regions, get_fit_data, FitData};
use covid19_analyzer::config::options::{AnalysisOptions, FitDataKind, ModelKind, Source};
use covid19_analyzer::data::{Dataset, Record, Subset};
use covid19_analyzer::progress::{NullProgress, Progress};
use covid19_analyzer::specs::funke::TranslationEntry;
use covid19_analyzer::store::Store;
use covid19_analyzer::FitError;

const DAYS: usize = 40;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()
}

/// `region` follows logistic curves; `short` has only three days.
fn sample(parent: &str, region: &str, short: &str) -> Dataset {
    let mut rows = Vec::new();
    for i in 0..DAYS {
        let x = i as f64;
        let mut r = Record::new(start() + Duration::days(i as i64), parent, region);
        r.confirmed = Some(LOGISTIC.eval(x, &[1000.0, 20.0, 4.0]));
        r.deaths = Some(LOGISTIC.eval(x, &[50.0, 22.0, 3.0]));
        r.recovered = Some(LOGISTIC.eval(x, &[600.0, 25.0, 5.0]));
        rows.push(r);
    }
    for i in 0..3 {
        let mut r = Record::new(start() + Duration::days(i), parent, short);
        r.confirmed = Some(1.0 + i as f64);
        r.deaths = Some(1.0);
        r.recovered = Some(1.0);
        rows.push(r);
    }
    let mut ds = Dataset::new(rows);
    ds.sort();
    ds
}

fn opts(days: usize) -> AnalysisOptions {
    AnalysisOptions { model: ModelKind::LogisticCurve, days_to_predict: days, ..AnalysisOptions::default() }
}

#[derive(Default)]
struct Counting {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for Counting {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, _label: &str) { self.done += 1; }
    fn item_failed(&mut self, _label: &str, _reason: &str) { self.failed += 1; }
}

#[test]
fn failing_series_are_skipped() {
    let data = sample("#Global", "Testland", "Tiny");
    let mut progress = Counting::default();
    let out = fit_regions(&data, &opts(10), &mut progress);

    assert_eq!(out.params.len(), 3);
    assert!(out.params.iter().all(|p| p.region == "Testland"));
    assert_eq!(out.failures.len(), 3);
    assert!(out.failures.iter().all(|f| f.key.region == "Tiny"
        && f.error == FitError::TooFewPoints { points: 3, params: 3 }));

    assert_eq!((progress.total, progress.done, progress.failed), (2, 2, 3));
}

#[test]
fn zero_subsets_keep_their_exponential_rows() {
    let rows = (0..30)
        .map(|i| {
            let mut r = Record::new(start() + Duration::days(i), "#Global", "Quietland");
            r.confirmed = Some(EXPONENTIAL.eval(i as f64, &[5.0, -8.0]));
            r.deaths = Some(0.0);
            r.recovered = Some(0.0);
            r
        })
        .collect();
    let data = Dataset::new(rows);
    let opts = AnalysisOptions { model: ModelKind::ExponentialCurve, days_to_predict: 5, ..AnalysisOptions::default() };
    let out = fit_regions(&data, &opts, &mut NullProgress);

    assert!(out.failures.is_empty(), "{:?}", out.failures);
    let subsets: Vec<Subset> = out.params.iter().map(|p| p.subset).collect();
    assert_eq!(subsets.len(), 3);
    for s in Subset::FITTABLE {
        assert!(subsets.contains(&s));
    }
    assert!(out.plot.rows.iter().all(|r| r.deaths == Some(0.0) && r.recovered == Some(0.0)));

    // no stderr on the flat fits, so no band
    let deaths: Vec<_> = out.trend.iter().filter(|t| t.subset == Subset::Deaths).collect();
    assert_eq!(deaths.len(), 5);
    assert!(deaths.iter().all(|t| t.trend == 0.0 && t.trend_sup.is_none() && t.trend_inf.is_none()));
}

#[test]
fn plot_and_trend_tables_cover_fitted_series() {
    let data = sample("#Global", "Testland", "Tiny");
    let out = fit_regions(&data, &opts(10), &mut NullProgress);

    assert_eq!(out.plot.len(), DAYS);
    let first = &out.plot.rows[0];
    assert!((first.confirmed.unwrap() - data.rows[0].confirmed.unwrap()).abs() < 1.0);
    let si = first.confirmed.unwrap() - first.deaths.unwrap() - first.recovered.unwrap();
    assert!((first.still_infectious.unwrap() - si).abs() < 1e-9);

    assert_eq!(out.trend.len(), 3 * 10);
    let last = start() + Duration::days(DAYS as i64 - 1);
    assert!(out.trend.iter().all(|t| t.date > last));
    for subset in Subset::FITTABLE {
        assert_eq!(out.trend.iter().filter(|t| t.subset == subset).count(), 10);
    }

    // params are sorted by name inside a row
    let names: Vec<&str> = out.params[0].params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["amplitude", "center", "sigma"]);
}

#[test]
fn batch_writes_and_reads_back_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    store.save_dataset(Source::Jhu, &sample("#Global", "Testland", "Tiny")).unwrap();

    let summaries = batch_fit_model(&store, &[Source::Jhu], &opts(7), &mut NullProgress).unwrap();
    assert_eq!(summaries.len(), 1);
    let s = &summaries[0];
    assert_eq!((s.source, s.fitted, s.failed, s.translated), (Source::Jhu, 3, 3, false));
    assert_eq!(s.paths.len(), 3);
    assert!(s.paths.iter().all(|p| p.is_file()));

    let model = ModelKind::LogisticCurve;
    assert_eq!(get_fit_data(&store, Source::Jhu, model, FitDataKind::Plot).unwrap().len(), DAYS);
    assert_eq!(get_fit_data(&store, Source::Jhu, model, FitDataKind::Trend).unwrap().len(), 21);

    match get_fit_data(&store, Source::Jhu, model, FitDataKind::Params).unwrap() {
        FitData::Params(rows) => {
            assert_eq!(rows.len(), 3);
            let amp = rows.iter().find(|r| r.subset == Subset::Confirmed).unwrap().get("amplitude").unwrap();
            assert!((amp.value - 1000.0).abs() < 1.0);
        }
        other => panic!("expected params, got {other:?}"),
    }

    let (headers, rows) = get_fit_data(&store, Source::Jhu, model, FitDataKind::Params).unwrap().to_table();
    assert_eq!(&headers[..4], ["region", "parent_region", "subset", "amplitude value"]);
    assert_eq!(rows.len(), 3);
}

#[test]
fn missing_artifacts_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    assert!(get_fit_data(&store, Source::Jhu, ModelKind::ExponentialCurve, FitDataKind::Plot).is_err());
}

#[test]
fn english_funke_artifacts_are_translated_from_german() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    store
        .save_dataset(Source::FunkeinteraktivDe, &sample("Deutschland", "Bayern", "Bremen"))
        .unwrap();
    store
        .save_translation_table(&[
            TranslationEntry {
                label_parent: "Deutschland".into(),
                label: "Bayern".into(),
                label_parent_en: "Germany".into(),
                label_en: "Bavaria".into(),
            },
        ])
        .unwrap();

    let summaries = batch_fit_model(
        &store,
        &[Source::FunkeinteraktivEn, Source::FunkeinteraktivDe],
        &opts(5),
        &mut NullProgress,
    )
    .unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].source, Source::FunkeinteraktivDe);
    assert!(!summaries[0].translated);
    assert_eq!(summaries[1].source, Source::FunkeinteraktivEn);
    assert!(summaries[1].translated);

    let model = ModelKind::LogisticCurve;
    let en = store.load_fit_params(Source::FunkeinteraktivEn, model).unwrap();
    assert_eq!(en.len(), 3);
    assert!(en.iter().all(|r| r.region == "Bavaria" && r.parent_region == "Germany"));

    let de = store.load_fit_params(Source::FunkeinteraktivDe, model).unwrap();
    assert_eq!(de[0].params, en[0].params);

    let trend = store.load_fit_trend(Source::FunkeinteraktivEn, model).unwrap();
    assert_eq!(trend.len(), 15);
    assert!(trend.iter().all(|t| t.region == "Bavaria"));
}
