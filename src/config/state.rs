// src/config/state.rs
use std::collections::BTreeSet;

use super::options::{AppOptions, ModelKind};
use crate::data::Subset;

/// Checkbox row above the plots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlotSettings {
    pub log_plot: bool,
    pub hide_raw_data: bool,
    pub show_params: bool,
}

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Parent regions ticked in the left panel
    pub selected_parents: BTreeSet<String>,

    /// Regions picked in the left panel (names; keys are resolved against parents)
    pub selected_regions: Vec<String>,

    pub subsets: Vec<Subset>,

    /// `None` → no fit overlay
    pub fit_model: Option<ModelKind>,

    pub plot: PlotSettings,

    /// Active tab index into router::PAGES
    pub current_page_index: usize,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            selected_parents: BTreeSet::new(),
            selected_regions: Vec::new(),
            subsets: vec![Subset::Confirmed],
            fit_model: None,
            plot: PlotSettings::default(),
            current_page_index: 0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
