// src/gui/components/selection_bar.rs
//
// Top bar: source, subsets, fit model and plot settings, plus the two
// background jobs (refresh data, run fit).

use eframe::egui::{self, Spinner};

use crate::{
    config::options::{ModelKind, Source},
    data::Subset,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        // --- Source ---
        ui.label("Source:");
        let mut source = app.source();
        egui::ComboBox::from_id_salt("source_combo")
            .selected_text(source.label())
            .show_ui(ui, |ui| {
                for s in Source::ALL {
                    ui.selectable_value(&mut source, s, s.label());
                }
            });
        if source != app.source() && !app.running {
            app.set_source(source);
        }

        ui.separator();

        // --- Subsets ---
        let available = app.current_data().map(|d| d.available_subsets()).unwrap_or_default();
        for subset in Subset::ALL {
            let mut on = app.state.gui.subsets.contains(&subset);
            let enabled = available.contains(&subset);
            if ui.add_enabled(enabled, egui::Checkbox::new(&mut on, subset.name())).changed() {
                let subsets = &mut app.state.gui.subsets;
                if on {
                    subsets.push(subset);
                    subsets.sort();
                } else {
                    subsets.retain(|s| *s != subset);
                }
                logf!("UI: Subsets → {:?}", subsets);
            }
        }

        ui.separator();

        // --- Fit model ---
        ui.label("Fit:");
        let mut model = app.state.gui.fit_model;
        egui::ComboBox::from_id_salt("fit_model_combo")
            .selected_text(model.map(|m| m.label()).unwrap_or("None"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut model, None, "None");
                for m in ModelKind::ALL {
                    ui.selectable_value(&mut model, Some(m), m.label());
                }
            });
        if model != app.state.gui.fit_model {
            logf!("UI: Fit model → {:?}", model);
            app.state.gui.fit_model = model;
            app.load_fit();
        }

        ui.separator();

        // --- Plot settings ---
        let plot = &mut app.state.gui.plot;
        ui.checkbox(&mut plot.log_plot, "Log scale");
        ui.checkbox(&mut plot.hide_raw_data, "Hide raw data");
        ui.checkbox(&mut plot.show_params, "Show fit params");

        ui.separator();

        // --- Jobs ---
        if ui.add_enabled(!app.running, egui::Button::new("Refresh data")).clicked() {
            actions::refresh(app);
        }
        let can_fit = !app.running && app.current_data().is_some();
        if ui.add_enabled(can_fit, egui::Button::new("Run fit")).clicked() {
            actions::fit(app);
        }
        if app.running {
            ui.add(Spinner::new().size(16.0));
        }
    });
}
