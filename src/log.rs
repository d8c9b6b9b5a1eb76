// src/log.rs
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::consts::{LOG_FILE, STORE_DIR};

/// Where log lines go. The dashboard has no console on some platforms,
/// so it appends to a file under the store dir; the CLI writes to stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    File,
    Stderr,
}

fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Safe to call more than once (tests);
/// later calls are ignored.
pub fn init(target: LogTarget, verbose: bool) {
    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter(verbose))
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
        LogTarget::File => {
            let _ = fs::create_dir_all(STORE_DIR);
            let path = Path::new(STORE_DIR).join(LOG_FILE);
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => {
                    let _ = tracing_subscriber::fmt()
                        .with_env_filter(filter(verbose))
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false)
                        .try_init();
                }
                Err(e) => {
                    eprintln!("Could not open log file {}: {e}", path.display());
                    init(LogTarget::Stderr, verbose);
                }
            }
        }
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
