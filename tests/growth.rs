// tests/growth.rs
//
// Daily growth and growth rate on small hand-made tables.

use chrono::NaiveDate;
use covid19_analyzer::data::{Dataset, Record, Subset};
use covid19_analyzer::growth::{get_daily_growth, get_growth_rate, get_shifted, Transform};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, d).unwrap()
}

fn rec(d: u32, region: &str, confirmed: Option<f64>, deaths: Option<f64>) -> Record {
    let mut r = Record::new(day(d), "#Global", region);
    r.confirmed = confirmed;
    r.deaths = deaths;
    r
}

fn sample() -> Dataset {
    Dataset::new(vec![
        rec(1, "A", Some(10.0), Some(1.0)),
        rec(2, "A", Some(15.0), Some(1.0)),
        rec(3, "A", Some(25.0), Some(3.0)),
        rec(1, "B", Some(100.0), None),
        rec(2, "B", Some(130.0), None),
    ])
}

#[test]
fn shifted_pairs_skip_first_day() {
    let data = sample();
    let pairs = get_shifted(&data, 1);
    assert_eq!(pairs.len(), 3);
    for (cur, prev) in pairs {
        assert_eq!(cur.region, prev.region);
        assert_eq!(cur.date.pred_opt().unwrap(), prev.date);
    }
}

#[test]
fn daily_growth_is_difference_to_previous_day() {
    let g = get_daily_growth(&sample());

    // first day of every series has no predecessor
    assert!(g.rows.iter().all(|r| r.date != day(1)));
    assert_eq!(g.len(), 2);

    let a3 = g.rows.iter().find(|r| r.region == "A" && r.date == day(3)).unwrap();
    assert_eq!(a3.confirmed, Some(10.0));
    assert_eq!(a3.deaths, Some(2.0));

    // B has no deaths while A does: its growth rows are incomplete
    assert!(g.rows.iter().all(|r| r.region != "B"));
}

#[test]
fn growth_rate_divides_by_previous_growth_plus_one() {
    let r = get_growth_rate(&sample());

    // needs two days of growth → only A on day 3
    assert_eq!(r.len(), 1);
    let a3 = &r.rows[0];
    assert_eq!(a3.region, "A");
    assert_eq!(a3.date, day(3));
    assert!((a3.confirmed.unwrap() - 10.0 / 6.0).abs() < 1e-12);
    // deaths growth: 0 then 2 → 2 / (0 + 1)
    assert_eq!(a3.deaths, Some(2.0));
}

#[test]
fn a_hole_in_one_column_drops_the_row() {
    let mut d1 = Record::new(day(1), "#Global", "X");
    d1.confirmed = Some(10.0);
    d1.recovered = Some(1.0);
    let mut d2 = Record::new(day(2), "#Global", "X");
    d2.confirmed = Some(15.0);
    let data = Dataset::new(vec![d1, d2]);

    assert!(get_daily_growth(&data).is_empty());
}

#[test]
fn columns_empty_in_the_whole_table_are_ignored() {
    // deaths never has a value, so it does not count as a hole
    let data = Dataset::new(vec![
        rec(1, "D", Some(4.0), None),
        rec(2, "D", Some(9.0), None),
    ]);
    let g = get_daily_growth(&data);
    assert_eq!(g.len(), 1);
    assert_eq!(g.rows[0].confirmed, Some(5.0));
    assert_eq!(g.rows[0].deaths, None);
}

#[test]
fn rows_without_any_value_are_dropped() {
    let data = Dataset::new(vec![
        rec(1, "C", None, None),
        rec(2, "C", Some(5.0), None),
    ]);
    assert!(get_daily_growth(&data).is_empty());
}

#[test]
fn totals_transform_is_identity() {
    let data = sample();
    assert_eq!(Transform::Totals.apply(&data), data);
    assert_eq!(Transform::DailyGrowth.apply(&data), get_daily_growth(&data));
    assert!(Transform::GrowthRate.apply(&data).rows.iter().all(|r| r.get(Subset::Recovered).is_none()));
}
