// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod error;
pub mod config;
pub mod core;
pub mod specs;

pub mod aggregate;
pub mod analysis;
pub mod csv;
pub mod data;
pub mod download;
pub mod file;
pub mod growth;
pub mod progress;
pub mod scrape;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;
pub mod gui;

pub use error::{Error, FitError, Result};
