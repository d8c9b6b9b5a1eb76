// src/gui/actions/fit.rs
use std::{sync::mpsc, thread};

use super::JobOutcome;
use crate::{
    analysis::{batch_fit_model, BatchSummary},
    config::options::{AnalysisOptions, ModelKind, Source},
    error::Result,
    gui::{app::App, progress::GuiProgress},
};

/// Batch-fit the selected model (or the default one) on the current source.
pub fn fit(app: &mut App) {
    if app.running {
        return;
    }
    let source = app.source();
    let model = app.state.gui.fit_model.unwrap_or(app.state.options.analysis.model);
    let opts = AnalysisOptions { model, ..app.state.options.analysis.clone() };
    let store = app.store.clone();
    let status = app.status.clone();
    let (tx, rx) = mpsc::channel();

    logf!("Fit: Begin {model} on {source}");
    app.status(format!("Fitting {} on {}…", model.label(), source.label()));

    thread::spawn(move || {
        let mut prog = GuiProgress::new(status, "Fit");
        let result = batch_fit_model(&store, &[source], &opts, &mut prog);
        let _ = tx.send(JobOutcome::Fitted { source, model, result });
    });

    app.job = Some(rx);
    app.running = true;
}

pub(super) fn finish(app: &mut App, source: Source, model: ModelKind, result: Result<Vec<BatchSummary>>) {
    match result {
        Ok(summaries) => {
            let fitted: usize = summaries.iter().map(|s| s.fitted).sum();
            let failed: usize = summaries.iter().map(|s| s.failed).sum();
            logf!("Fit: OK {model} on {source}, fitted={fitted}, skipped={failed}");

            if source == app.source() {
                app.state.gui.fit_model = Some(model);
                app.load_fit();
            }
            app.status(format!("Fitted {fitted} series ({failed} skipped)"));
        }
        Err(e) => {
            loge!("Fit: Error {model} on {source}: {e}");
            app.status(format!("Fit error: {e}"));
        }
    }
}
