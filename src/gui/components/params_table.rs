// src/gui/components/params_table.rs
//
// Read-only table of fit parameters (value / stderr columns per parameter).

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

pub fn draw(ui: &mut egui::Ui, id: &str, headers: &[String], rows: &[Vec<String>]) {
    // Same scroll bar look as the region panel
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    // region, parent_region, subset are text; the rest are numbers
    const TEXT_COLS: usize = 3;

    let mut table = TableBuilder::new(ui)
        .id_salt(("params_table", id))
        .striped(true)
        .min_scrolled_height(0.0);
    for ci in 0..headers.len() {
        let w = if ci < TEXT_COLS { 140.0 } else { 110.0 };
        table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
    }

    table
        .header(24.0, |mut header| {
            for h in headers {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    ui.add(egui::Label::new(RichText::new(h).strong()).selectable(false));
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let Some(cells) = rows.get(row.index()) else { return };
                for (ci, cell) in cells.iter().enumerate() {
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        if ci < TEXT_COLS {
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(cell); });
                        } else {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| { ui.label(cell); });
                        }
                    });
                }
            });
        });
}
