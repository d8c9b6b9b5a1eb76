// src/data.rs
//
// The uniform case table every source is normalized into, plus the
// selection/view helpers the dashboard and the batch fit read it through.
//
// - Record:    one (date, parent_region, region) row with optional counts.
// - Dataset:   ordered rows; canonical order is (date, parent_region, region).
// - Selection: parent regions + regions picked in the dashboard.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subset {
    Confirmed,
    Deaths,
    Recovered,
    StillInfectious,
}

impl Subset {
    pub const ALL: [Subset; 4] = [Subset::Confirmed, Subset::Deaths, Subset::Recovered, Subset::StillInfectious];

    /// Subsets the batch fit runs on; `still_infectious` is derived from them.
    pub const FITTABLE: [Subset; 3] = [Subset::Confirmed, Subset::Deaths, Subset::Recovered];

    pub fn name(&self) -> &'static str {
        match self {
            Subset::Confirmed => "confirmed",
            Subset::Deaths => "deaths",
            Subset::Recovered => "recovered",
            Subset::StillInfectious => "still_infectious",
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|sub| sub.name() == s.trim())
            .ok_or_else(|| Error::UnknownSubset(s!(s)))
    }
}

/// Identity of one time series.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionKey {
    pub parent_region: String,
    pub region: String,
}

impl RegionKey {
    pub fn new(parent_region: impl Into<String>, region: impl Into<String>) -> Self {
        Self { parent_region: parent_region.into(), region: region.into() }
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.parent_region, self.region)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub parent_region: String,
    pub region: String,
    #[serde(default)]
    pub confirmed: Option<f64>,
    #[serde(default)]
    pub deaths: Option<f64>,
    #[serde(default)]
    pub recovered: Option<f64>,
    #[serde(default)]
    pub still_infectious: Option<f64>,
}

impl Record {
    pub fn new(date: NaiveDate, parent_region: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            date,
            parent_region: parent_region.into(),
            region: region.into(),
            confirmed: None,
            deaths: None,
            recovered: None,
            still_infectious: None,
        }
    }

    pub fn key(&self) -> RegionKey {
        RegionKey::new(self.parent_region.clone(), self.region.clone())
    }

    pub fn get(&self, subset: Subset) -> Option<f64> {
        match subset {
            Subset::Confirmed => self.confirmed,
            Subset::Deaths => self.deaths,
            Subset::Recovered => self.recovered,
            Subset::StillInfectious => self.still_infectious,
        }
    }

    pub fn set(&mut self, subset: Subset, value: Option<f64>) {
        match subset {
            Subset::Confirmed => self.confirmed = value,
            Subset::Deaths => self.deaths = value,
            Subset::Recovered => self.recovered = value,
            Subset::StillInfectious => self.still_infectious = value,
        }
    }

    fn sort_key(&self) -> (NaiveDate, &str, &str) {
        (self.date, self.parent_region.as_str(), self.region.as_str())
    }
}

/// Render a count the way it was read: integers without a trailing `.0`.
pub fn format_value(v: Option<f64>) -> String {
    match v {
        None => s!(),
        Some(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 => format!("{}", x as i64),
        Some(x) => format!("{x}"),
    }
}

pub const TABLE_HEADERS: [&str; 7] =
    ["date", "parent_region", "region", "confirmed", "deaths", "recovered", "still_infectious"];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Record>,
}

impl Dataset {
    pub fn new(rows: Vec<Record>) -> Self { Self { rows } }

    #[inline] pub fn len(&self) -> usize { self.rows.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Canonical order: (date, parent_region, region).
    pub fn sort(&mut self) {
        self.rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.rows.iter().map(|r| r.date).max()
    }

    /// Sorted, unique parent regions.
    pub fn parent_regions(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.parent_region.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Sorted, unique regions whose parent is one of `parents`.
    pub fn regions_in(&self, parents: &BTreeSet<String>) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .rows
            .iter()
            .filter(|r| parents.contains(&r.parent_region))
            .map(|r| r.region.as_str())
            .collect();
        set.into_iter().map(String::from).collect()
    }

    /// Unique series keys in order of first appearance.
    pub fn region_keys(&self) -> Vec<RegionKey> {
        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut out = Vec::new();
        for r in &self.rows {
            if seen.insert((r.parent_region.as_str(), r.region.as_str())) {
                out.push(r.key());
            }
        }
        out
    }

    /// All rows of one series, ordered by date.
    pub fn region_rows(&self, key: &RegionKey) -> Vec<&Record> {
        let mut rows: Vec<&Record> = self
            .rows
            .iter()
            .filter(|r| r.parent_region == key.parent_region && r.region == key.region)
            .collect();
        rows.sort_by_key(|r| r.date);
        rows
    }

    /// Subsets with at least one value, in `Subset::ALL` order.
    pub fn available_subsets(&self) -> Vec<Subset> {
        Subset::ALL
            .iter()
            .copied()
            .filter(|s| self.rows.iter().any(|r| r.get(*s).is_some()))
            .collect()
    }

    pub fn select(&self, sel: &Selection<'_>) -> Dataset {
        Dataset::new(self.rows.iter().filter(|r| sel.matches(r)).cloned().collect())
    }

    /// Headers + stringified rows for copy/export.
    pub fn to_table(&self) -> (Vec<String>, Vec<Vec<String>>) {
        let headers = TABLE_HEADERS.iter().map(|h| s!(*h)).collect();
        let rows = self
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.date.format("%Y-%m-%d").to_string(),
                    r.parent_region.clone(),
                    r.region.clone(),
                    format_value(r.confirmed),
                    format_value(r.deaths),
                    format_value(r.recovered),
                    format_value(r.still_infectious),
                ]
            })
            .collect();
        (headers, rows)
    }
}

/// Dashboard selection: a row is shown when both its parent region and its
/// region are picked.
#[derive(Clone, Copy, Debug)]
pub struct Selection<'a> {
    pub parents: &'a BTreeSet<String>,
    pub regions: &'a [String],
}

impl<'a> Selection<'a> {
    #[inline] pub fn is_none(&self) -> bool { self.parents.is_empty() || self.regions.is_empty() }

    pub fn matches(&self, r: &Record) -> bool {
        !self.is_none()
            && self.parents.contains(&r.parent_region)
            && self.regions.iter().any(|x| *x == r.region)
    }
}
