// src/growth.rs
//
// Date-shift growth math. Every row is paired with the row of the same
// series one day earlier; rows without a predecessor, or with a hole in any
// column after the subtraction, are dropped.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::data::{Dataset, Record, Subset};

type Key<'a> = (NaiveDate, &'a str, &'a str);

/// Pairs of (row, row one `shift_days` earlier) for every row that has one.
pub fn get_shifted(data: &Dataset, shift_days: i64) -> Vec<(&Record, &Record)> {
    let index: HashMap<Key<'_>, &Record> = data
        .rows
        .iter()
        .map(|r| ((r.date, r.parent_region.as_str(), r.region.as_str()), r))
        .collect();

    data.rows
        .iter()
        .filter_map(|r| {
            let prev_date = r.date.checked_sub_signed(Duration::days(shift_days))?;
            index
                .get(&(prev_date, r.parent_region.as_str(), r.region.as_str()))
                .map(|prev| (r, *prev))
        })
        .collect()
}

/// Subsets with a value anywhere in `data` are the table's columns; a row
/// missing any of them after the shift is dropped.
fn combine<F>(data: &Dataset, op: F) -> Dataset
where
    F: Fn(f64, f64) -> f64,
{
    let columns = data.available_subsets();
    let mut rows: Vec<Record> = get_shifted(data, 1)
        .into_iter()
        .map(|(cur, prev)| {
            let mut out = Record::new(cur.date, cur.parent_region.clone(), cur.region.clone());
            for s in Subset::ALL {
                let v = match (cur.get(s), prev.get(s)) {
                    (Some(a), Some(b)) => Some(op(a, b)).filter(|x| x.is_finite()),
                    _ => None,
                };
                out.set(s, v);
            }
            out
        })
        .filter(|r| columns.iter().all(|s| r.get(*s).is_some()))
        .collect();
    rows.sort_by(|a, b| {
        (a.date, &a.parent_region, &a.region).cmp(&(b.date, &b.parent_region, &b.region))
    });
    Dataset::new(rows)
}

/// Daily growth: `value(d) - value(d-1)`.
pub fn get_daily_growth(data: &Dataset) -> Dataset {
    combine(data, |cur, prev| cur - prev)
}

/// Growth rate on the daily growth: `growth(d) / (growth(d-1) + 1)`.
/// The `+ 1` keeps a zero previous growth from dividing by zero.
pub fn get_growth_rate(data: &Dataset) -> Dataset {
    let daily = get_daily_growth(data);
    combine(&daily, |cur, prev| cur / (prev + 1.0))
}

/// Named transform the dashboard tabs and the CLI pick from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transform {
    Totals,
    DailyGrowth,
    GrowthRate,
}

impl Transform {
    pub fn apply(&self, data: &Dataset) -> Dataset {
        match self {
            Transform::Totals => data.clone(),
            Transform::DailyGrowth => get_daily_growth(data),
            Transform::GrowthRate => get_growth_rate(data),
        }
    }
}
