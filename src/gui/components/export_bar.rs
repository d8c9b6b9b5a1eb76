// src/gui/components/export_bar.rs

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::{
    config::options::ExportFormat,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let mut open_folder_clicked = false;

    ui.horizontal(|ui| {
        let export = &mut app.state.options.export;

        // --- Format + Include headers ---
        let prev_fmt = export.format;
        ui.label("Format:");
        ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
        ui.selectable_value(&mut export.format, ExportFormat::Tsv, "TSV");
        if export.format != prev_fmt {
            logf!("UI: Export format → {:?}", export.format);
            if !app.out_path_dirty {
                app.out_path_text = export.out_path().to_string_lossy().into_owned();
            }
        }

        if ui.checkbox(&mut export.include_headers, "Include headers").changed() {
            logf!("UI: Include_headers → {}", export.include_headers);
        }

        ui.separator();

        // --- Output field ---
        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text)
                .font(egui::TextStyle::Monospace)
                .desired_width(360.0))
            .changed()
        {
            app.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.out_path_text);
        }

        if ui.button("📁").on_hover_text("Open output folder").clicked() {
            open_folder_clicked = true;
        }
    });

    // Handle open folder after the borrow ends
    if open_folder_clicked {
        open_output_folder(app);
    }

    ui.horizontal(|ui| {
        if ui.button("Copy").clicked() {
            actions::copy(app, ui.ctx());
        }
        if ui.button("Export").clicked() {
            actions::export(app);
        }
        ui.label(app.status_text());
    });
}

/// Open the folder of the output file in the system file explorer.
fn open_output_folder(app: &App) {
    let typed = PathBuf::from(app.out_path_text.trim());
    let folder = if app.out_path_dirty {
        typed.parent().unwrap_or(Path::new("."))
    } else {
        app.state.options.export.current_dir()
    };
    let folder_to_open = find_nearest_existing_parent(folder);

    let absolute_folder = match std::fs::canonicalize(&folder_to_open) {
        Ok(abs_path) => abs_path,
        Err(e) => {
            let msg = format!("Cannot resolve folder path: {e}");
            loge!("{msg}");
            app.status(msg);
            return;
        }
    };

    if let Err(e) = open_folder_in_explorer(&absolute_folder) {
        loge!("Failed to open folder: {e}");
        app.status(format!("Failed to open folder: {e}"));
    } else {
        logf!("Opened folder: {}", absolute_folder.display());
    }
}

/// Walk up until an existing directory is found; `.` as the last resort.
fn find_nearest_existing_parent(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    loop {
        if current.is_dir() {
            return current;
        }
        match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => current = parent.to_path_buf(),
            _ => return PathBuf::from("."),
        }
    }
}

fn open_folder_in_explorer(path: &Path) -> Result<(), String> {
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(target_os = "linux")]
    let program = "xdg-open";

    #[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
    {
        std::process::Command::new(program)
            .arg(path)
            .spawn()
            .map_err(|e| format!("Failed to spawn {program}: {e}"))?;
        Ok(())
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let _ = path;
        Err(s!("Opening folders not supported on this platform"))
    }
}
