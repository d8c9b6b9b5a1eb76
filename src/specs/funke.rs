// src/specs/funke.rs
//! Spec for the Funke Interaktiv (Berliner Morgenpost) history file.
//!
//! `history.v4.csv` is one long table with German and English labels:
//! `label, label_en, label_parent, label_parent_en, date, confirmed,
//! recovered, deaths, ...`. Extra columns are ignored.
//!
//! Output:
//! - the German and the English `Dataset` (same rows, different labels),
//!   `still_infectious` derived, sorted;
//! - the translation table `label_parent, label, label_parent_en, label_en`.

use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

use super::{parse_count, parse_date};
use crate::aggregate::get_infectious;
use crate::config::consts::GLOBAL;
use crate::data::{Dataset, Record};
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct HistoryRow {
    label: String,
    #[serde(default)]
    label_en: String,
    #[serde(default)]
    label_parent: String,
    #[serde(default)]
    label_parent_en: String,
    date: String,
    #[serde(default)]
    confirmed: String,
    #[serde(default)]
    recovered: String,
    #[serde(default)]
    deaths: String,
}

/// One line of `translation_table.csv`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub label_parent: String,
    pub label: String,
    pub label_parent_en: String,
    pub label_en: String,
}

pub struct FunkeData {
    pub de: Dataset,
    pub en: Dataset,
    pub translation: Vec<TranslationEntry>,
}

fn or_global(s: &str) -> String {
    let s = s.trim();
    if s.is_empty() { s!(GLOBAL) } else { s!(s) }
}

pub fn parse_history<R: Read>(rdr: R) -> Result<FunkeData> {
    let mut rdr = ::csv::ReaderBuilder::new().flexible(true).from_reader(rdr);

    let mut de = Vec::new();
    let mut en = Vec::new();
    let mut translation = Vec::new();
    let mut seen: HashSet<TranslationEntry> = HashSet::new();

    for row in rdr.deserialize::<HistoryRow>() {
        let row = row?;
        let date = parse_date(&row.date)?;

        let label_parent = or_global(&row.label_parent);
        let label_parent_en = or_global(&row.label_parent_en);
        let label_en = if row.label_en.trim().is_empty() { row.label.clone() } else { row.label_en.clone() };

        let mut rec = Record::new(date, label_parent.clone(), row.label.clone());
        rec.confirmed = parse_count(&row.confirmed)?;
        rec.recovered = parse_count(&row.recovered)?;
        rec.deaths = parse_count(&row.deaths)?;

        let mut rec_en = rec.clone();
        rec_en.parent_region = label_parent_en.clone();
        rec_en.region = label_en.clone();

        let entry = TranslationEntry { label_parent, label: row.label, label_parent_en, label_en };
        if seen.insert(entry.clone()) {
            translation.push(entry);
        }

        de.push(rec);
        en.push(rec_en);
    }

    let finish = |mut rows: Vec<Record>| {
        get_infectious(&mut rows);
        let mut ds = Dataset::new(rows);
        ds.sort();
        ds
    };

    Ok(FunkeData { de: finish(de), en: finish(en), translation })
}
