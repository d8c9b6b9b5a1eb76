// src/gui/actions/copy.rs
use eframe::egui;

use crate::{csv::to_export_string, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let text = match super::data_download(app) {
        Some(buf) => buf.map(|b| {
            logf!("Copy: {} (rows={})", b.file_name, b.rows);
            b.as_str().to_owned()
        }),
        None => {
            let (headers, rows) = match super::current_table(app) {
                Ok(t) => t,
                Err(msg) => {
                    app.status(msg);
                    logd!("Copy: Clicked, but {msg}");
                    return;
                }
            };
            let export = &app.state.options.export;
            logf!("Copy: page={}, rows={}, headers={}", app.current_page().label(), rows.len(), headers.len());
            to_export_string(&headers, &rows, export.include_headers, export.format.delim())
        }
    };

    match text {
        Ok(txt) => {
            ui_ctx.copy_text(txt);
            app.status("Copied to clipboard");
        }
        Err(e) => {
            loge!("Copy: Error: {e}");
            app.status(format!("Copy error: {e}"));
        }
    }
}
