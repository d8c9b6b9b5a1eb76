// src/progress.rs
/// Progress reporting for the long-running operations (fetch, batch fit).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One logical unit completed (a region fitted, a subset downloaded).
    fn item_done(&mut self, _label: &str) {}

    /// One unit failed and was skipped.
    fn item_failed(&mut self, _label: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints to stderr; used by the CLI.
#[derive(Default)]
pub struct StderrProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.failed = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, label: &str) {
        self.done += 1;
        if self.total > 0 {
            eprintln!("[{}/{}] {label}", self.done, self.total);
        }
    }

    fn item_failed(&mut self, label: &str, reason: &str) {
        self.failed += 1;
        eprintln!("  skipped {label}: {reason}");
    }

    fn finish(&mut self) {
        if self.failed > 0 {
            eprintln!("done ({} skipped)", self.failed);
        }
    }
}
