// src/gui/pages/plot.rs
//
// The three chart tabs. They differ only in the growth transform applied
// to the selected rows before plotting.

use eframe::egui;

use super::{fit_params, Page, PageKind};
use crate::{
    growth::Transform,
    gui::{
        app::App,
        components::{chart, params_table},
        plot_model::{generate_figure, FigureSpec},
    },
};

pub struct PlotPage {
    kind: PageKind,
    label: &'static str,
    title: &'static str,
    y_title: &'static str,
    transform: Transform,
}

pub static DATA: PlotPage = PlotPage {
    kind: PageKind::Data,
    label: "Data",
    title: "data",
    y_title: "count (people)",
    transform: Transform::Totals,
};

pub static DAILY_GROWTH: PlotPage = PlotPage {
    kind: PageKind::DailyGrowth,
    label: "Daily growth",
    title: "daily growth",
    y_title: "growth (people/day)",
    transform: Transform::DailyGrowth,
};

pub static GROWTH_RATE: PlotPage = PlotPage {
    kind: PageKind::GrowthRate,
    label: "Growth rate",
    title: "growth rate",
    y_title: "growth rate",
    transform: Transform::GrowthRate,
};

impl Page for PlotPage {
    fn label(&self) -> &'static str { self.label }
    fn kind(&self) -> PageKind { self.kind }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        let Some(data) = app.current_data() else {
            ui.label(format!("No local data for {}. Press \"Refresh data\".", app.source()));
            return;
        };

        let fit = app.current_fit();
        let gui = &app.state.gui;
        let spec = FigureSpec {
            title: self.title,
            y_title: self.y_title,
            transform: self.transform,
            subsets: &gui.subsets,
            settings: &gui.plot,
        };
        let fig = generate_figure(
            data,
            fit.map(|f| &f.plot),
            fit.map(|f| f.trend.as_slice()),
            &app.selection(),
            &spec,
        );

        let show_params = gui.plot.show_params && fit.is_some();
        let chart_h = if show_params { ui.available_height() * 0.65 } else { ui.available_height() };
        chart::draw(ui, &fig, chart_h);

        if show_params {
            ui.separator();
            let (headers, rows) = fit_params::selected_params_table(app);
            params_table::draw(ui, self.label, &headers, &rows);
        }
    }

    fn export_table(&self, app: &App) -> Option<(Vec<String>, Vec<Vec<String>>)> {
        let data = app.current_data()?;
        let selected = data.select(&app.selection());
        Some(self.transform.apply(&selected).to_table())
    }
}
