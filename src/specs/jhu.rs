// src/specs/jhu.rs
//! Spec for the Johns Hopkins University CSSE time series.
//!
//! Three wide files (`confirmed`, `deaths`, `recovered`), one row per
//! (Province/State, Country/Region) and one column per `m/d/yy` date.
//!
//! - A row without a province is a country: `{region: country,
//!   parent_region: "#Global"}`; otherwise the country is the parent.
//! - Subsets are inner-joined on (date, parent_region, region).
//! - Country totals and the worldwide total are appended, then
//!   `still_infectious` is derived and the table sorted.

use std::collections::HashMap;
use std::io::Read;

use chrono::NaiveDate;

use super::{parse_count, parse_date};
use crate::aggregate::{calc_country_total, calc_worldwide_total, get_infectious};
use crate::config::consts::GLOBAL;
use crate::csv::{cell_at, read_table};
use crate::data::{Dataset, Record, Subset};
use crate::error::{Error, Result};

const PROVINCE: &str = "Province/State";
const COUNTRY: &str = "Country/Region";
const COORDS: [&str; 2] = ["Lat", "Long"];

/// One value of one subset, long format.
#[derive(Clone, Debug, PartialEq)]
pub struct SubsetValue {
    pub date: NaiveDate,
    pub parent_region: String,
    pub region: String,
    pub value: Option<f64>,
}

fn column(headers: &[String], name: &str) -> Result<usize> {
    headers.iter().position(|h| h.trim() == name).ok_or_else(|| Error::Malformed {
        what: "JHU header",
        detail: format!("missing column '{name}'"),
    })
}

/// Melt one wide subset file into long rows.
pub fn parse_subset<R: Read>(rdr: R) -> Result<Vec<SubsetValue>> {
    let (headers, rows) = read_table(rdr, b',')?;
    let province = column(&headers, PROVINCE)?;
    let country = column(&headers, COUNTRY)?;

    let date_cols: Vec<(usize, NaiveDate)> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != province && *i != country && !COORDS.contains(&h.trim()))
        .map(|(i, h)| parse_date(h).map(|d| (i, d)))
        .collect::<Result<_>>()?;

    let mut out = Vec::with_capacity(rows.len() * date_cols.len());
    for row in &rows {
        let country_name = cell_at(row, country).trim();
        let (parent_region, region) = match cell_at(row, province).trim() {
            "" => (s!(GLOBAL), s!(country_name)),
            p => (s!(country_name), s!(p)),
        };
        for (i, date) in &date_cols {
            out.push(SubsetValue {
                date: *date,
                parent_region: parent_region.clone(),
                region: region.clone(),
                value: parse_count(cell_at(row, *i))?,
            });
        }
    }
    Ok(out)
}

type JoinKey = (NaiveDate, String, String);

fn index(values: Vec<SubsetValue>) -> HashMap<JoinKey, Option<f64>> {
    values
        .into_iter()
        .map(|v| ((v.date, v.parent_region, v.region), v.value))
        .collect()
}

/// Inner join of the three subsets, in the order of `confirmed`.
pub fn merge_subsets(
    confirmed: Vec<SubsetValue>,
    deaths: Vec<SubsetValue>,
    recovered: Vec<SubsetValue>,
) -> Vec<Record> {
    let deaths = index(deaths);
    let recovered = index(recovered);

    confirmed
        .into_iter()
        .filter_map(|c| {
            let key = (c.date, c.parent_region, c.region);
            let d = deaths.get(&key)?;
            let r = recovered.get(&key)?;
            let (date, parent_region, region) = key;
            let mut rec = Record::new(date, parent_region, region);
            rec.set(Subset::Confirmed, c.value);
            rec.set(Subset::Deaths, *d);
            rec.set(Subset::Recovered, *r);
            Some(rec)
        })
        .collect()
}

/// Joined rows → normalized dataset with country and worldwide totals.
pub fn build_dataset(mut rows: Vec<Record>) -> Dataset {
    let totals = calc_country_total(&rows);
    rows.extend(totals);
    let worldwide = calc_worldwide_total(&rows);
    rows.extend(worldwide);
    get_infectious(&mut rows);
    let mut ds = Dataset::new(rows);
    ds.sort();
    ds
}
