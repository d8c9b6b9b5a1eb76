// src/gui/pages/fit_params.rs
use eframe::egui;

use super::{Page, PageKind};
use crate::{
    analysis::{params::params_table, FitParamRow},
    gui::{app::App, components::params_table as table},
};

pub struct FitParamsPage;

pub static PAGE: FitParamsPage = FitParamsPage;

/// Param rows of the current fit restricted to the selected regions and subsets.
pub fn selected_params(app: &App) -> Vec<FitParamRow> {
    let Some(fit) = app.current_fit() else { return Vec::new() };
    let gui = &app.state.gui;
    fit.params
        .iter()
        .filter(|p| {
            gui.selected_parents.contains(&p.parent_region)
                && gui.selected_regions.contains(&p.region)
                && gui.subsets.contains(&p.subset)
        })
        .cloned()
        .collect()
}

pub fn selected_params_table(app: &App) -> (Vec<String>, Vec<Vec<String>>) {
    params_table(&selected_params(app))
}

impl Page for FitParamsPage {
    fn label(&self) -> &'static str { "Fit parameters" }
    fn kind(&self) -> PageKind { PageKind::FitParams }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        let Some(model) = app.state.gui.fit_model else {
            ui.label("Select a fit model to see its parameters.");
            return;
        };
        if app.current_fit().is_none() {
            ui.label(format!("No {} fit for {} yet. Press \"Run fit\".", model.label(), app.source()));
            return;
        }
        let (headers, rows) = selected_params_table(app);
        if rows.is_empty() {
            ui.label("No fitted series in the current selection.");
            return;
        }
        table::draw(ui, self.label(), &headers, &rows);
    }

    fn export_table(&self, app: &App) -> Option<(Vec<String>, Vec<Vec<String>>)> {
        app.current_fit()?;
        Some(selected_params_table(app))
    }
}
