// src/gui/actions/refresh.rs
use std::{sync::mpsc, thread};

use super::JobOutcome;
use crate::{
    config::options::Source,
    data::Dataset,
    error::Result,
    gui::{app::App, progress::GuiProgress},
    scrape::get_data,
};

/// Re-fetch the current source on a worker thread.
pub fn refresh(app: &mut App) {
    if app.running {
        return;
    }
    let source = app.source();
    let store = app.store.clone();
    let status = app.status.clone();
    let (tx, rx) = mpsc::channel();

    logf!("Fetch: Begin {source}");
    app.status(format!("Fetching {}…", source.label()));

    thread::spawn(move || {
        let mut prog = GuiProgress::new(status, "Fetch");
        let result = get_data(&store, source, true, &mut prog);
        // receiver gone → app closed; nothing to report to
        let _ = tx.send(JobOutcome::Fetched { source, result });
    });

    app.job = Some(rx);
    app.running = true;
}

pub(super) fn finish(app: &mut App, source: Source, result: Result<Dataset>) {
    match result {
        Ok(ds) => {
            logf!("Fetch: OK {source}, rows={}", ds.len());
            app.datasets.insert(source, ds);

            // One Funke download rewrites both language variants.
            let sibling = match source {
                Source::FunkeinteraktivDe => Some(Source::FunkeinteraktivEn),
                Source::FunkeinteraktivEn => Some(Source::FunkeinteraktivDe),
                Source::Jhu => None,
            };
            if let Some(s) = sibling {
                app.load_source(s);
            }

            if source == app.source() {
                if app.state.gui.selected_regions.is_empty() {
                    app.reset_selection();
                } else {
                    app.prune_regions();
                }
            }
            app.status("Ready");
        }
        Err(e) => {
            loge!("Fetch: Error {source}: {e}");
            app.status(format!("Error: {e}"));
        }
    }
}
