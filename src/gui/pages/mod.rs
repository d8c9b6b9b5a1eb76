// src/gui/pages/mod.rs
use eframe::egui;

use crate::gui::app::App;

pub mod fit_params;
pub mod plot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    Data,
    DailyGrowth,
    GrowthRate,
    FitParams,
}

/// One tab of the dashboard. Pages are stateless statics; everything they
/// show is derived from `App` on every frame.
pub trait Page: Send + Sync + 'static {
    fn label(&self) -> &'static str;
    fn kind(&self) -> PageKind;

    /// Draw the page body below the tabs.
    fn draw(&self, ui: &mut egui::Ui, app: &mut App);

    /// The table Copy/Export write for this page. `None` when nothing is loaded.
    fn export_table(&self, app: &App) -> Option<(Vec<String>, Vec<Vec<String>>)>;
}
