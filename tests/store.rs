// tests/store.rs
//
// On-disk layout of the data dir.

use chrono::NaiveDate;
use covid19_analyzer::config::options::{FitDataKind, ModelKind, Source};
use covid19_analyzer::data::{Dataset, Record};
use covid19_analyzer::store::Store;
use covid19_analyzer::Error;

fn dataset() -> Dataset {
    let d = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
    let mut a = Record::new(d, "#Global", "Italy");
    a.confirmed = Some(105792.0);
    a.deaths = Some(12428.0);
    let mut b = Record::new(d, "Italy", "Lombardia");
    b.confirmed = Some(0.5);
    Dataset::new(vec![a, b])
}

#[test]
fn paths_follow_source_and_model() {
    let store = Store::new("data");
    assert!(store.infections_path(Source::Jhu).ends_with("JHU/covid19_infections.csv"));
    assert!(store
        .fit_artifact_path(Source::FunkeinteraktivEn, ModelKind::LogisticCurve, FitDataKind::Trend)
        .ends_with("funkeinteraktiv_en/logistic_curve_model_fit_trend_data.csv"));
    assert!(store
        .fit_artifact_path(Source::Jhu, ModelKind::ExponentialCurve, FitDataKind::Plot)
        .ends_with("JHU/exponential_curve_model_fit_plot_data.csv"));
    assert!(store.translation_table_path().ends_with("funkeinteraktiv_de/translation_table.csv"));
}

#[test]
fn dataset_is_saved_as_plain_csv() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    assert!(!store.has_data(Source::Jhu));

    let path = store.save_dataset(Source::Jhu, &dataset()).unwrap();
    assert!(store.has_data(Source::Jhu));

    let text = std::fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("date,parent_region,region,confirmed,deaths,recovered,still_infectious"));
    assert_eq!(lines.next(), Some("2020-04-01,#Global,Italy,105792,12428,,"));
    assert_eq!(lines.next(), Some("2020-04-01,Italy,Lombardia,0.5,,,"));

    assert_eq!(store.load_dataset(Source::Jhu).unwrap(), dataset());
}

#[test]
fn loading_without_data_is_missing_data() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path());
    match store.load_dataset(Source::FunkeinteraktivDe) {
        Err(Error::MissingData(p)) => assert!(p.ends_with("covid19_infections.csv")),
        other => panic!("expected MissingData, got {other:?}"),
    }
    assert!(matches!(store.load_translation_table(), Err(Error::MissingData(_))));
}
