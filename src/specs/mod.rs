// src/specs/mod.rs
//! # Source “specs” module
//!
//! One spec per upstream data source. Each spec knows the **file layout** the
//! source publishes and how to turn it into the uniform case table
//! (`data::Dataset`).
//!
//! ## What lives here
//! - **Pure CSV parsing** of the upstream files (`history.v4.csv` for
//!   Funke Interaktiv, the three wide `time_series_covid19_*_global.csv`
//!   files for JHU).
//! - **Light shaping**: label fallbacks, `#Global` for top-level regions,
//!   melting wide date columns, joining subsets, derived totals.
//!
//! ## What does **not** live here
//! - **Networking and caching** (`scrape::get_data`, `store::Store`).
//! - **Fitting and growth transforms** (`analysis`, `growth`).
//!
//! ## Typical call chain
//! ```text
//! GUI / CLI → scrape::get_data → core::net::http_get
//!                             ↘ specs::<source>::parse_* → Dataset
//!                    store::Store::save_dataset (outside of specs)
//! ```
//!
//! ## Testing notes
//! Every parser takes a `Read`, so specs are tested offline against small
//! inline fixtures.
pub mod funke;
pub mod jhu;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Date formats seen in the upstream files.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y%m%d", "%m/%d/%y", "%m/%d/%Y"];

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    // "2020-03-01 00:00:00" style timestamps: keep the date part
    let day = s.split([' ', 'T']).next().unwrap_or(s);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
        .ok_or_else(|| Error::Date(s!(s)))
}

/// Empty cell → `None`; otherwise a number.
pub fn parse_count(s: &str) -> Result<Option<f64>> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    s.parse::<f64>()
        .map(Some)
        .map_err(|_| Error::Malformed { what: "count", detail: format!("'{s}' is not a number") })
}
