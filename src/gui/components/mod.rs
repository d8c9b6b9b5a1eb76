// src/gui/components/mod.rs
pub mod chart;
pub mod export_bar;
pub mod params_table;
pub mod region_panel;
pub mod selection_bar;
pub mod tabs;
