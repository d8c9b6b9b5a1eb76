// src/gui/actions/export.rs
use crate::{file, gui::app::App};

pub fn export(app: &mut App) {
    // normalize out_path first (mutates app) before any &app borrows
    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        logf!("Export: Out path set → {}", app.state.options.export.out_path().display());
        app.out_path_dirty = false;
    }

    let written = match super::data_download(app) {
        Some(Ok(buf)) => {
            logf!("Export: Begin {} (rows={}, {})", buf.file_name, buf.rows, buf.mimetype);
            file::write_download(&app.state.options.export, &buf).map(|p| (p, buf.rows))
        }
        Some(Err(e)) => Err(e),
        None => {
            let (headers, rows) = match super::current_table(app) {
                Ok(t) => t,
                Err(msg) => {
                    logd!("Export: Clicked, but {msg}");
                    app.status(msg);
                    return;
                }
            };
            logf!(
                "Export: Begin page={}, rows={}, format={:?}",
                app.current_page().label(),
                rows.len(),
                app.state.options.export.format
            );
            file::write_export_single(&app.state.options.export, &headers, &rows).map(|p| (p, rows.len()))
        }
    };

    let msg = match written {
        Ok((path, n)) => {
            logf!("Export: OK {}", path.display());
            app.out_path_text = path.to_string_lossy().into_owned();
            format!("Exported {n} rows to {}", path.display())
        }
        Err(e) => {
            loge!("Export: Error: {e}");
            format!("Export error: {e}")
        }
    };
    app.status(msg);
}
