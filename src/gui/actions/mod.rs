// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy, export, refresh, fit, poll}.

mod copy;    // src/gui/actions/copy.rs
mod export;  // src/gui/actions/export.rs
mod fit;     // src/gui/actions/fit.rs
mod refresh; // src/gui/actions/refresh.rs

pub use copy::copy;
pub use export::export;
pub use fit::fit;
pub use refresh::refresh;

use std::sync::mpsc::TryRecvError;

use crate::{
    analysis::BatchSummary,
    config::options::{ModelKind, Source},
    data::Dataset,
    download::{make_download, DownloadBuffer},
    error::Result,
    gui::{app::App, pages::PageKind},
};

/// Result a background job sends back to the UI thread.
pub enum JobOutcome {
    Fetched { source: Source, result: Result<Dataset> },
    Fitted { source: Source, model: ModelKind, result: Result<Vec<BatchSummary>> },
}

/// Current page's table for Copy/Export, or a status message why there is none.
pub(super) fn current_table(app: &App) -> std::result::Result<(Vec<String>, Vec<Vec<String>>), &'static str> {
    let page = app.current_page();
    match page.export_table(app) {
        Some((h, r)) if !r.is_empty() => Ok((h, r)),
        Some(_) => Err("Nothing to export"),
        None => Err("Nothing to export (no data loaded)"),
    }
}

/// On the Data tab, the selected rows of the current source as a download
/// buffer (`covid19_data_<source>.<ext>`). `None` on other tabs or when
/// nothing is selected.
pub(super) fn data_download(app: &App) -> Option<Result<DownloadBuffer>> {
    if app.current_page().kind() != PageKind::Data {
        return None;
    }
    let selected = app.current_data()?.select(&app.selection());
    if selected.is_empty() {
        return None;
    }
    let export = &app.state.options.export;
    Some(make_download(app.source(), &selected, export.format, export.include_headers))
}

/// Pick up a finished background job, if any.
pub fn poll(app: &mut App) {
    let Some(rx) = app.job.as_ref() else {
        app.running = false;
        return;
    };
    let outcome = match rx.try_recv() {
        Ok(o) => o,
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Disconnected) => {
            loge!("Job: worker exited without a result");
            app.status("Error: background job stopped");
            app.job = None;
            app.running = false;
            return;
        }
    };
    app.job = None;
    app.running = false;

    match outcome {
        JobOutcome::Fetched { source, result } => refresh::finish(app, source, result),
        JobOutcome::Fitted { source, model, result } => fit::finish(app, source, model, result),
    }
}
