// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

/// Mirrors progress into the status line; safe to move into a worker thread.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    what: &'static str,
    done: usize,
    failed: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>, what: &'static str) -> Self {
        Self { status, what, done: 0, failed: 0, total: 0 }
    }

    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.failed = 0;
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        self.set_status(format!("{} {label} ({}/{})", self.what, self.done, self.total));
    }
    fn item_failed(&mut self, _label: &str, _reason: &str) {
        self.failed += 1;
    }
    fn finish(&mut self) {
        if self.total == 0 {
            self.set_status(format!("{} complete", self.what));
        } else if self.failed > 0 {
            self.set_status(format!("{} complete ({}/{}, {} skipped)", self.what, self.done, self.total, self.failed));
        } else {
            self.set_status(format!("{} complete ({}/{})", self.what, self.done, self.total));
        }
    }
}
