// src/analysis/translate.rs
//
// The English Funke fit artifacts are the German ones with translated
// region names; the same series is never fitted twice.

use std::collections::HashMap;

use super::params::FitParamRow;
use super::trend::TrendRow;
use crate::config::options::{ModelKind, Source};
use crate::data::Dataset;
use crate::error::Result;
use crate::specs::funke::TranslationEntry;
use crate::store::Store;

#[derive(Clone, Debug, Default)]
pub struct Translator {
    parents: HashMap<String, String>,
    regions: HashMap<String, String>,
}

impl Translator {
    pub fn new(entries: &[TranslationEntry]) -> Self {
        let mut t = Self::default();
        for e in entries {
            t.parents.entry(e.label_parent.clone()).or_insert_with(|| e.label_parent_en.clone());
            t.regions.entry(e.label.clone()).or_insert_with(|| e.label_en.clone());
        }
        t
    }

    /// Unknown names pass through unchanged.
    pub fn parent<'a>(&'a self, de: &'a str) -> &'a str {
        self.parents.get(de).map(String::as_str).unwrap_or(de)
    }

    pub fn region<'a>(&'a self, de: &'a str) -> &'a str {
        self.regions.get(de).map(String::as_str).unwrap_or(de)
    }

    pub fn dataset(&self, data: &Dataset) -> Dataset {
        let mut out = data.clone();
        for r in &mut out.rows {
            r.parent_region = s!(self.parent(&r.parent_region));
            r.region = s!(self.region(&r.region));
        }
        out.sort();
        out
    }

    pub fn params(&self, rows: &[FitParamRow]) -> Vec<FitParamRow> {
        rows.iter()
            .map(|r| FitParamRow {
                region: s!(self.region(&r.region)),
                parent_region: s!(self.parent(&r.parent_region)),
                ..r.clone()
            })
            .collect()
    }

    pub fn trend(&self, rows: &[TrendRow]) -> Vec<TrendRow> {
        rows.iter()
            .map(|r| TrendRow {
                region: s!(self.region(&r.region)),
                parent_region: s!(self.parent(&r.parent_region)),
                ..r.clone()
            })
            .collect()
    }
}

/// Write the `funkeinteraktiv_en` artifacts of `model` from the
/// `funkeinteraktiv_de` ones.
pub fn translate_fit_artifacts(store: &Store, model: ModelKind) -> Result<()> {
    let (de, en) = (Source::FunkeinteraktivDe, Source::FunkeinteraktivEn);
    let t = Translator::new(&store.load_translation_table()?);

    store.save_fit_plot(en, model, &t.dataset(&store.load_fit_plot(de, model)?))?;
    store.save_fit_params(en, model, &t.params(&store.load_fit_params(de, model)?))?;
    store.save_fit_trend(en, model, &t.trend(&store.load_fit_trend(de, model)?))?;

    logf!("translated {model} fit artifacts {de} → {en}");
    Ok(())
}
