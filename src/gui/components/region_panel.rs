// src/gui/components/region_panel.rs
//
// Renders the left panel: parent-region checkboxes on top, the region list
// below them. Applies selection changes directly to `app` with ctrl/shift
// range behavior.

use eframe::egui;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(data) = app.current_data() else {
        ui.heading("Regions");
        ui.label("No data loaded");
        return;
    };
    let parents = data.parent_regions();

    ui.heading("Parent regions");
    let mut parents_changed = false;
    egui::ScrollArea::vertical()
        .id_salt("parents_panel_scroll")
        .max_height(160.0)
        .show(ui, |ui| {
            for p in &parents {
                let mut on = app.state.gui.selected_parents.contains(p);
                if ui.add_enabled(!app.running, egui::Checkbox::new(&mut on, p.as_str())).changed() {
                    if on {
                        app.state.gui.selected_parents.insert(p.clone());
                    } else {
                        app.state.gui.selected_parents.remove(p);
                    }
                    parents_changed = true;
                }
            }
        });
    if parents_changed {
        app.prune_regions();
        logf!("UI: Parent regions → {:?}", app.state.gui.selected_parents);
        if !app.running {
            app.set_selection_message();
        }
    }

    ui.separator();
    ui.heading("Regions");

    let choices = app.region_choices();
    ui.horizontal(|ui| {
        if ui.button("All").clicked() {
            app.state.gui.selected_regions = choices.clone();
            app.set_selection_message();
        }
        if ui.button("None").clicked() {
            app.state.gui.selected_regions.clear();
            app.set_selection_message();
        }
    });

    // Scroll bar hugs the panel edge, same look as the tables
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
        let visuals = &mut ui.style_mut().visuals;
        visuals.extreme_bg_color = visuals.panel_fill;
    }

    egui::ScrollArea::vertical()
        .id_salt("regions_panel_scroll")
        .show(ui, |ui| {
            let w = ui.available_width();
            ui.set_min_width(w);
            let mut changed = false;

            for (idx, name) in choices.iter().enumerate() {
                let is_selected = app.state.gui.selected_regions.contains(name);
                let resp = ui.selectable_label(is_selected, name);

                if resp.clicked() && !app.running {
                    let (ctrl, shift) = ui.input(|i| (i.modifiers.ctrl, i.modifiers.shift));
                    let sel = &mut app.state.gui.selected_regions;

                    match (ctrl, shift, app.last_clicked) {
                        (true, true, Some(last)) => {
                            let (lo, hi) = if last <= idx { (last, idx) } else { (idx, last) };
                            for r in &choices[lo..=hi] {
                                if !sel.contains(r) { sel.push(r.clone()); }
                            }
                        }
                        (false, true, Some(last)) => {
                            let (lo, hi) = if last <= idx { (last, idx) } else { (idx, last) };
                            *sel = choices[lo..=hi].to_vec();
                        }
                        (true, _, _) => {
                            // ctrl, or ctrl+shift without an anchor: toggle
                            if is_selected { sel.retain(|x| x != name); } else { sel.push(name.clone()); }
                        }
                        _ => {
                            sel.clear();
                            sel.push(name.clone());
                        }
                    }
                    app.last_clicked = Some(idx);
                    changed = true;
                }
            }

            if changed {
                logf!(
                    "UI: Selection changed ({} regions) {:?}",
                    app.state.gui.selected_regions.len(),
                    &app.state.gui.selected_regions
                );
                app.set_selection_message();
            }
        });
}
