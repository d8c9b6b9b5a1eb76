// src/analysis/batch.rs
//
// Fit every region of a source, collect plot/params/trend tables and write
// them as CSV artifacts. A failing fit is logged and skipped.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;

use super::fit::fit_data_model;
use super::model::model_for;
use super::params::{get_fit_param_results_row, params_table, FitParamRow};
use super::translate::translate_fit_artifacts;
use super::trend::{predict_trend, TrendRow};
use crate::aggregate::get_infectious;
use crate::config::options::{AnalysisOptions, FitDataKind, ModelKind, Source};
use crate::data::{Dataset, Record, RegionKey, Subset};
use crate::error::{FitError, Result};
use crate::progress::Progress;
use crate::scrape::get_data;
use crate::store::Store;

#[derive(Clone, Debug, PartialEq)]
pub struct FitFailure {
    pub key: RegionKey,
    pub subset: Subset,
    pub error: FitError,
}

#[derive(Clone, Debug, Default)]
pub struct BatchOutput {
    /// Fitted values per (date, region); `still_infectious` recomputed.
    pub plot: Dataset,
    /// Sorted by (parent_region, region).
    pub params: Vec<FitParamRow>,
    pub trend: Vec<TrendRow>,
    pub failures: Vec<FitFailure>,
}

/// Fit `opts.model` to every fittable subset of every region in `data`.
pub fn fit_regions(data: &Dataset, opts: &AnalysisOptions, progress: &mut dyn Progress) -> BatchOutput {
    let model = model_for(opts.model);
    let subsets: Vec<Subset> = data
        .available_subsets()
        .into_iter()
        .filter(|s| Subset::FITTABLE.contains(s))
        .collect();
    let keys = data.region_keys();

    let mut out = BatchOutput::default();
    progress.begin(keys.len());

    for key in &keys {
        logd!("Fitting data for: {key}");
        let rows = data.region_rows(key);
        let mut fitted: BTreeMap<NaiveDate, Record> = BTreeMap::new();

        for subset in &subsets {
            match fit_data_model(&rows, key, *subset, model, opts) {
                Ok(fit) => {
                    for (date, v) in fit.dates.iter().zip(&fit.best_fit) {
                        fitted
                            .entry(*date)
                            .or_insert_with(|| Record::new(*date, key.parent_region.clone(), key.region.clone()))
                            .set(*subset, Some(*v));
                    }
                    out.params.push(get_fit_param_results_row(
                        &key.region,
                        &key.parent_region,
                        *subset,
                        &fit.params,
                    ));
                    out.trend.extend(
                        predict_trend(&fit, opts.days_to_predict)
                            .iter()
                            .map(|p| TrendRow::from_point(&fit, p)),
                    );
                }
                Err(e) => {
                    loge!("Error fitting data for: {key} {subset}: {e}");
                    progress.item_failed(&join!(&key.to_string(), " ", subset.name()), &e.to_string());
                    out.failures.push(FitFailure { key: key.clone(), subset: *subset, error: e });
                }
            }
        }

        out.plot.rows.extend(fitted.into_values());
        progress.item_done(&key.to_string());
    }

    get_infectious(&mut out.plot.rows);
    out.plot.sort();
    out.params.sort_by(|a, b| (&a.parent_region, &a.region).cmp(&(&b.parent_region, &b.region)));
    progress.finish();
    out
}

/// What one source produced in `batch_fit_model`.
#[derive(Clone, Debug)]
pub struct BatchSummary {
    pub source: Source,
    pub fitted: usize,
    pub failed: usize,
    /// `true` when the artifacts were translated instead of fitted.
    pub translated: bool,
    pub paths: Vec<PathBuf>,
}

fn artifact_paths(store: &Store, source: Source, model: ModelKind) -> Vec<PathBuf> {
    FitDataKind::ALL.iter().map(|k| store.fit_artifact_path(source, model, *k)).collect()
}

/// Fit `opts.model` on every source in `sources` and write the three
/// artifacts per source. `funkeinteraktiv_en` is translated from the German
/// artifacts whenever those and the translation table exist.
pub fn batch_fit_model(
    store: &Store,
    sources: &[Source],
    opts: &AnalysisOptions,
    progress: &mut dyn Progress,
) -> Result<Vec<BatchSummary>> {
    let model = opts.model;
    let mut sources = sources.to_vec();
    sources.sort();
    sources.dedup();

    let mut summaries = Vec::with_capacity(sources.len());
    for source in sources {
        let _span = tracing::info_span!("batch_fit", source = %source, model = %model).entered();

        if source == Source::FunkeinteraktivEn
            && store.translation_table_path().is_file()
            && store.fit_artifact_path(Source::FunkeinteraktivDe, model, FitDataKind::Plot).is_file()
        {
            translate_fit_artifacts(store, model)?;
            let fitted = store.load_fit_params(source, model)?.len();
            summaries.push(BatchSummary {
                source,
                fitted,
                failed: 0,
                translated: true,
                paths: artifact_paths(store, source, model),
            });
            continue;
        }

        progress.log(&format!("Fitting {model} on {source}"));
        let data = get_data(store, source, false, progress)?;
        let output = fit_regions(&data, opts, progress);

        store.save_fit_plot(source, model, &output.plot)?;
        store.save_fit_params(source, model, &output.params)?;
        store.save_fit_trend(source, model, &output.trend)?;
        logf!(
            "{source}: {} fits, {} skipped, {} trend rows",
            output.params.len(),
            output.failures.len(),
            output.trend.len()
        );

        summaries.push(BatchSummary {
            source,
            fitted: output.params.len(),
            failed: output.failures.len(),
            translated: false,
            paths: artifact_paths(store, source, model),
        });
    }
    Ok(summaries)
}

/// A fit artifact read back from the store.
#[derive(Clone, Debug)]
pub enum FitData {
    Plot(Dataset),
    Params(Vec<FitParamRow>),
    Trend(Vec<TrendRow>),
}

impl FitData {
    pub fn len(&self) -> usize {
        match self {
            FitData::Plot(d) => d.len(),
            FitData::Params(p) => p.len(),
            FitData::Trend(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Headers + stringified rows, for printing and export.
    pub fn to_table(&self) -> (Vec<String>, Vec<Vec<String>>) {
        match self {
            FitData::Plot(d) => d.to_table(),
            FitData::Params(p) => params_table(p),
            FitData::Trend(t) => trend_table(t),
        }
    }
}

fn trend_table(rows: &[TrendRow]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = headers!["date", "parent_region", "region", "subset", "trend", "trend_sup", "trend_inf"];
    let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    let body = rows
        .iter()
        .map(|r| {
            vec![
                r.date.format("%Y-%m-%d").to_string(),
                r.parent_region.clone(),
                r.region.clone(),
                s!(r.subset.name()),
                r.trend.to_string(),
                opt(r.trend_sup),
                opt(r.trend_inf),
            ]
        })
        .collect();
    (headers, body)
}

/// Read one fit artifact of `source`/`model`.
pub fn get_fit_data(store: &Store, source: Source, model: ModelKind, kind: FitDataKind) -> Result<FitData> {
    Ok(match kind {
        FitDataKind::Plot => FitData::Plot(store.load_fit_plot(source, model)?),
        FitDataKind::Params => FitData::Params(store.load_fit_params(source, model)?),
        FitDataKind::Trend => FitData::Trend(store.load_fit_trend(source, model)?),
    })
}
