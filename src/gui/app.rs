// src/gui/app.rs
use std::{
    collections::{BTreeSet, HashMap},
    error::Error,
    sync::{mpsc::Receiver, Arc, Mutex},
};

use eframe::egui;

use crate::{
    analysis::{FitParamRow, TrendRow},
    config::{
        consts::GLOBAL,
        options::{ModelKind, Source},
        state::AppState,
    },
    data::{Dataset, Selection, Subset},
    store::Store,
};

use super::{actions::JobOutcome, pages::Page, router};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    let mut state = AppState::default();
    state.options = crate::config::options::AppOptions::from_env();
    eframe::run_native(
        "COVID-19 Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(state)))),
    )?;
    Ok(())
}

/// Fit artifacts of one (source, model), read back from the store.
#[derive(Clone, Debug, Default)]
pub struct FitCache {
    pub plot: Dataset,
    pub params: Vec<FitParamRow>,
    pub trend: Vec<TrendRow>,
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,
    pub store: Store,

    // region panel anchor for shift-click ranges
    pub last_clicked: Option<usize>,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // status/progress (workers write here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    pub job: Option<Receiver<JobOutcome>>,

    // canonical data per source + fit artifacts per (source, model)
    pub datasets: HashMap<Source, Dataset>,
    pub fits: HashMap<(Source, ModelKind), FitCache>,
}

impl App {
    pub fn new(mut state: AppState) -> Self {
        let store = Store::from_options(&state.options);
        let source = state.options.source;
        state.options.export.set_default_stem_for(source);
        let out_path_text = state.options.export.out_path().to_string_lossy().into();

        let mut app = Self {
            state,
            store,
            last_clicked: None,
            out_path_text,
            out_path_dirty: false,
            status: Arc::new(Mutex::new(s!("Idle"))),
            running: false,
            job: None,
            datasets: HashMap::new(),
            fits: HashMap::new(),
        };

        // Load local data for every source that has some.
        for source in Source::ALL {
            app.load_source(source);
        }
        app.reset_selection();
        logf!("Init: sources loaded={}, data dir={}", app.datasets.len(), app.store.root().display());
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn current_index(&self) -> usize { self.state.gui.current_page_index }

    #[inline]
    pub fn set_current_index(&mut self, idx: usize) { self.state.gui.current_page_index = idx; }

    #[inline]
    pub fn current_page(&self) -> &'static dyn Page { router::all_pages()[self.current_index()] }

    #[inline]
    pub fn source(&self) -> Source { self.state.options.source }

    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn current_data(&self) -> Option<&Dataset> {
        self.datasets.get(&self.source())
    }

    pub fn selection(&self) -> Selection<'_> {
        Selection { parents: &self.state.gui.selected_parents, regions: &self.state.gui.selected_regions }
    }

    /// Regions below the selected parents, for the region panel.
    pub fn region_choices(&self) -> Vec<String> {
        self.current_data()
            .map(|d| d.regions_in(&self.state.gui.selected_parents))
            .unwrap_or_default()
    }

    pub fn current_fit(&self) -> Option<&FitCache> {
        let model = self.state.gui.fit_model?;
        self.fits.get(&(self.source(), model))
    }

    /* ---------- loading ---------- */

    /// Read the local table of `source` into memory (no network).
    pub fn load_source(&mut self, source: Source) {
        if !self.store.has_data(source) {
            logd!("Cache: no local data for {source}");
            return;
        }
        match self.store.load_dataset(source) {
            Ok(ds) => {
                logf!("Cache: Loaded {source} (rows={})", ds.len());
                self.datasets.insert(source, ds);
                self.status("Loaded local data");
            }
            Err(e) => loge!("Cache: Failed to load {source}: {e}"),
        }
    }

    /// Read the fit artifacts of (current source, selected model), if present.
    pub fn load_fit(&mut self) {
        let Some(model) = self.state.gui.fit_model else { return };
        let source = self.source();
        let store = &self.store;
        let loaded = store
            .load_fit_plot(source, model)
            .and_then(|plot| Ok((plot, store.load_fit_params(source, model)?)))
            .map(|(plot, params)| FitCache {
                plot,
                params,
                trend: store.load_fit_trend(source, model).unwrap_or_default(),
            });
        match loaded {
            Ok(cache) => {
                logf!("Fit: Loaded {model} for {source} ({} param rows)", cache.params.len());
                self.fits.insert((source, model), cache);
            }
            Err(e) => {
                logd!("Fit: No {model} artifacts for {source}: {e}");
                self.fits.remove(&(source, model));
                self.status(format!("No {} fit for {source} yet, run the fit first", model.label()));
            }
        }
    }

    /// Default selection for the current source: `#Global` (or the first
    /// parent) with its first region; subsets narrowed to available ones.
    pub fn reset_selection(&mut self) {
        let gui = &mut self.state.gui;
        gui.selected_parents.clear();
        gui.selected_regions.clear();
        self.last_clicked = None;

        let Some(data) = self.datasets.get(&self.state.options.source) else { return };
        let parents = data.parent_regions();
        let parent = parents.iter().find(|p| *p == GLOBAL).or(parents.first()).cloned();
        if let Some(p) = parent {
            gui.selected_parents = BTreeSet::from([p]);
            if let Some(first) = data.regions_in(&gui.selected_parents).into_iter().next() {
                gui.selected_regions.push(first);
            }
        }

        let available = data.available_subsets();
        gui.subsets.retain(|s| available.contains(s));
        if gui.subsets.is_empty() {
            gui.subsets.push(available.first().copied().unwrap_or(Subset::Confirmed));
        }
    }

    /// Drop selected regions no longer below a selected parent.
    pub fn prune_regions(&mut self) {
        let choices = self.region_choices();
        self.state.gui.selected_regions.retain(|r| choices.contains(r));
        self.last_clicked = None;
    }

    pub fn set_source(&mut self, source: Source) {
        if source == self.source() {
            return;
        }
        let previous = self.source();
        logf!("UI: Source {previous} → {source}");
        self.state.options.source = source;
        if !self.datasets.contains_key(&source) {
            self.load_source(source);
        }
        self.reset_selection();
        self.load_fit();

        // a stem the user picked survives the switch
        let export = &mut self.state.options.export;
        if !self.out_path_dirty && export.is_default_stem_for(previous) {
            export.set_default_stem_for(source);
            self.out_path_text = export.out_path().to_string_lossy().into_owned();
        }
        if !self.datasets.contains_key(&source) {
            self.status(format!("No local data for {source}, press Refresh data"));
        }
    }

    pub fn set_selection_message(&self) {
        let n = self.state.gui.selected_regions.len();
        self.status(format!("Selection: {n} region(s)"));
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.running {
            super::actions::poll(self);
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("selection_bar").show(ctx, |ui| {
            super::components::selection_bar::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("export_bar").show(ctx, |ui| {
            super::components::export_bar::draw(ui, self);
        });

        egui::SidePanel::left("regions")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                super::components::region_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            super::components::tabs::draw(ui, self);
            ui.separator();
            let page = self.current_page();
            page.draw(ui, self);
        });
    }
}
