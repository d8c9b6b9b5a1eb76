// tests/selection_view.rs
//
// Dashboard selection and chart traces, without UI.
//
use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use covid19_analyzer::analysis::TrendRow;
use covid19_analyzer::config::state::PlotSettings;
use covid19_analyzer::data::{Dataset, Record, Selection, Subset};
use covid19_analyzer::growth::Transform;
use covid19_analyzer::gui::plot_model::{color_cycler, generate_figure, FigureSpec, TraceStyle};

fn day(i: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, 1).unwrap() + Duration::days(i)
}

fn rows(parent: &str, region: &str, values: &[f64]) -> Vec<Record> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let mut r = Record::new(day(i as i64), parent, region);
            r.confirmed = Some(*v);
            r.deaths = Some(v / 10.0);
            r
        })
        .collect()
}

fn data() -> Dataset {
    let mut all = rows("#Global", "Italy", &[10.0, 20.0, 40.0]);
    all.extend(rows("#Global", "Spain", &[5.0, 6.0, 7.0]));
    all.extend(rows("Italy", "Lombardia", &[4.0, 8.0, 16.0]));
    let mut ds = Dataset::new(all);
    ds.sort();
    ds
}

fn parents(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn selection_none_all_partial() {
    let ds = data();

    let empty = BTreeSet::new();
    let none = Selection { parents: &empty, regions: &[] };
    assert!(none.is_none());
    assert!(ds.select(&none).is_empty());

    let global = parents(&["#Global"]);
    let regions = ds.regions_in(&global);
    assert_eq!(regions, ["Italy", "Spain"]);
    let all = Selection { parents: &global, regions: &regions };
    assert_eq!(ds.select(&all).len(), 6);

    let italy = vec!["Italy".to_string()];
    let partial = Selection { parents: &global, regions: &italy };
    let picked = ds.select(&partial);
    assert_eq!(picked.len(), 3);
    assert!(picked.rows.iter().all(|r| r.region == "Italy" && r.parent_region == "#Global"));

    // region names only count below a selected parent
    let lombardia = vec!["Lombardia".to_string()];
    assert!(ds.select(&Selection { parents: &global, regions: &lombardia }).is_empty());
}

#[test]
fn figure_pairs_raw_fit_and_trend() {
    let ds = data();
    let fit = data();
    let trend = vec![
        TrendRow {
            date: day(3),
            parent_region: "#Global".into(),
            region: "Italy".into(),
            subset: Subset::Confirmed,
            trend: 60.0,
            trend_sup: Some(70.0),
            trend_inf: Some(50.0),
        },
        TrendRow {
            date: day(4),
            parent_region: "#Global".into(),
            region: "Italy".into(),
            subset: Subset::Confirmed,
            trend: 80.0,
            trend_sup: None,
            trend_inf: None,
        },
    ];

    let global = parents(&["#Global"]);
    let italy = vec!["Italy".to_string()];
    let sel = Selection { parents: &global, regions: &italy };
    let settings = PlotSettings::default();
    let subsets = [Subset::Confirmed, Subset::Deaths];
    let spec = FigureSpec {
        title: "data",
        y_title: "count (people)",
        transform: Transform::Totals,
        subsets: &subsets,
        settings: &settings,
    };

    let fig = generate_figure(&ds, Some(&fit), Some(&trend), &sel, &spec);
    let styles: Vec<(TraceStyle, &str)> = fig.traces.iter().map(|t| (t.style, t.name.as_str())).collect();
    assert_eq!(
        styles,
        [
            (TraceStyle::Markers, "Italy confirmed"),
            (TraceStyle::Line, "fit Italy confirmed"),
            (TraceStyle::Trend, "trend Italy confirmed"),
            (TraceStyle::Markers, "Italy deaths"),
            (TraceStyle::Line, "fit Italy deaths"),
        ]
    );

    // raw data and its fit share a color, the next series moves on
    assert_eq!(fig.traces[0].color, fig.traces[1].color);
    assert_eq!(fig.traces[0].color, color_cycler(0));
    assert_eq!(fig.traces[3].color, color_cycler(1));

    let trend_trace = &fig.traces[2];
    assert_eq!(trend_trace.points.len(), 2);
    assert_eq!(trend_trace.band, vec![(day(3), 70.0, 50.0)]);
    assert_eq!(fig.x_range(), Some((day(0), day(4))));
}

#[test]
fn growth_charts_skip_trend_and_can_hide_raw_data() {
    let ds = data();
    let global = parents(&["#Global"]);
    let regions = vec!["Italy".to_string(), "Spain".to_string()];
    let sel = Selection { parents: &global, regions: &regions };
    let settings = PlotSettings { hide_raw_data: true, ..PlotSettings::default() };
    let subsets = [Subset::Confirmed];
    let spec = FigureSpec {
        title: "daily growth",
        y_title: "growth (people/day)",
        transform: Transform::DailyGrowth,
        subsets: &subsets,
        settings: &settings,
    };
    let trend: Vec<TrendRow> = Vec::new();

    let fig = generate_figure(&ds, Some(&ds), Some(&trend), &sel, &spec);
    assert_eq!(fig.traces.len(), 2);
    assert!(fig.traces.iter().all(|t| t.style == TraceStyle::Line));
    // Italy daily growth: 10, 20
    assert_eq!(fig.traces[0].points, vec![(day(1), 10.0), (day(2), 20.0)]);
}

#[test]
fn log_axis_ignores_non_positive_values() {
    let ds = Dataset::new(rows("#Global", "Zeroland", &[0.0, 10.0, 1000.0]));
    let global = parents(&["#Global"]);
    let regions = vec!["Zeroland".to_string()];
    let sel = Selection { parents: &global, regions: &regions };
    let settings = PlotSettings { log_plot: true, ..PlotSettings::default() };
    let subsets = [Subset::Confirmed];
    let spec = FigureSpec {
        title: "data",
        y_title: "count (people)",
        transform: Transform::Totals,
        subsets: &subsets,
        settings: &settings,
    };

    let fig = generate_figure(&ds, None, None, &sel, &spec);
    assert!(fig.log_y);
    assert_eq!(fig.y_range(), Some((10.0, 1000.0)));
}
