// src/scrape.rs
//
// Source refresh: fetch → parse (specs) → normalize → save (store).
// `get_data` is the single entry point the batch fit, the CLI and the GUI
// read case tables through.

use crate::config::consts::{FUNKE_URL, JHU_URL_PREFIX, JHU_URL_SUFFIX};
use crate::config::options::Source;
use crate::core::net::http_get;
use crate::data::{Dataset, Subset};
use crate::error::Result;
use crate::progress::Progress;
use crate::specs::{funke, jhu};
use crate::store::Store;

/// Local table of `source`; fetched (and saved) when missing or when
/// `update` is set.
pub fn get_data(store: &Store, source: Source, update: bool, progress: &mut dyn Progress) -> Result<Dataset> {
    if store.has_data(source) && !update {
        return store.load_dataset(source);
    }
    logf!("Fetching updated data: {source}");
    progress.log(&format!("Fetching {}…", source.label()));

    match source {
        Source::FunkeinteraktivDe | Source::FunkeinteraktivEn => {
            let data = fetch_funke(progress)?;
            save_funke(store, &data)?;
            Ok(if source == Source::FunkeinteraktivDe { data.de } else { data.en })
        }
        Source::Jhu => {
            let data = fetch_jhu(progress)?;
            store.save_dataset(Source::Jhu, &data)?;
            Ok(data)
        }
    }
}

/// Both Funke language variants come from one download.
pub fn fetch_funke(progress: &mut dyn Progress) -> Result<funke::FunkeData> {
    progress.begin(1);
    let body = http_get(FUNKE_URL)?;
    let data = funke::parse_history(body.as_bytes())?;
    progress.item_done("history.v4.csv");
    progress.finish();
    Ok(data)
}

pub fn save_funke(store: &Store, data: &funke::FunkeData) -> Result<()> {
    store.save_dataset(Source::FunkeinteraktivDe, &data.de)?;
    store.save_dataset(Source::FunkeinteraktivEn, &data.en)?;
    store.save_translation_table(&data.translation)?;
    Ok(())
}

pub fn jhu_url(subset: Subset) -> String {
    join!(JHU_URL_PREFIX, subset.name(), JHU_URL_SUFFIX)
}

pub fn fetch_jhu(progress: &mut dyn Progress) -> Result<Dataset> {
    progress.begin(Subset::FITTABLE.len());
    let mut parts = Vec::with_capacity(Subset::FITTABLE.len());
    for subset in Subset::FITTABLE {
        let body = http_get(&jhu_url(subset))?;
        parts.push(jhu::parse_subset(body.as_bytes())?);
        progress.item_done(subset.name());
    }
    progress.finish();

    let recovered = parts.pop().unwrap_or_default();
    let deaths = parts.pop().unwrap_or_default();
    let confirmed = parts.pop().unwrap_or_default();
    Ok(jhu::build_dataset(jhu::merge_subsets(confirmed, deaths, recovered)))
}
