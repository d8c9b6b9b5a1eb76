// src/aggregate.rs
//
// Derived rows and columns shared by every source: still-infectious counts,
// per-country totals and the worldwide total.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::consts::{GLOBAL, TOTAL_SUFFIX, WORLDWIDE};
use crate::data::{Record, Subset};

/// `still_infectious = confirmed - recovered - deaths`, missing
/// recovered/deaths counted as 0. No confirmed value → no result.
pub fn get_infectious(rows: &mut [Record]) {
    for r in rows {
        r.still_infectious = r
            .confirmed
            .map(|c| c - r.recovered.unwrap_or(0.0) - r.deaths.unwrap_or(0.0));
    }
}

fn add(acc: Option<f64>, v: Option<f64>) -> Option<f64> {
    match (acc, v) {
        (Some(a), Some(b)) => Some(a + b),
        (None, Some(b)) => Some(b),
        (a, None) => a,
    }
}

fn accumulate(into: &mut Record, from: &Record) {
    for s in Subset::FITTABLE {
        into.set(s, add(into.get(s), from.get(s)));
    }
}

/// One `"<parent> (total)"` row per (parent, date) for every parent other
/// than `#Global`. Output is ordered by (parent, date).
pub fn calc_country_total(rows: &[Record]) -> Vec<Record> {
    let mut groups: BTreeMap<(&str, NaiveDate), Record> = BTreeMap::new();
    for r in rows.iter().filter(|r| r.parent_region != GLOBAL) {
        let total = groups
            .entry((r.parent_region.as_str(), r.date))
            .or_insert_with(|| Record::new(r.date, GLOBAL, join!(&r.parent_region, TOTAL_SUFFIX)));
        accumulate(total, r);
    }
    groups.into_values().collect()
}

/// Sum of all `#Global` rows per date, as region `#Worldwide`.
pub fn calc_worldwide_total(rows: &[Record]) -> Vec<Record> {
    let mut by_date: BTreeMap<NaiveDate, Record> = BTreeMap::new();
    for r in rows.iter().filter(|r| r.parent_region == GLOBAL && r.region != WORLDWIDE) {
        let total = by_date
            .entry(r.date)
            .or_insert_with(|| Record::new(r.date, GLOBAL, WORLDWIDE));
        accumulate(total, r);
    }
    by_date.into_values().collect()
}
