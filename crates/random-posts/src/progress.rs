//! Progress reporting for long-running loops.

/// Receives progress of a counted loop.
pub trait Progress {
    /// Starts a loop of `total` steps, e.g. `("Inserting", 3, "terms")`.
    fn start(&mut self, action: &str, total: usize, object: &str);

    /// Advances by one step.
    fn tick(&mut self);

    /// Ends the current loop.
    fn finish(&mut self);
}

/// Reports progress through `log`.
#[derive(Debug, Default)]
pub struct LogProgress {
    label: String,
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn start(&mut self, action: &str, total: usize, object: &str) {
        self.label = format!("{action} {object}");
        self.total = total;
        self.done = 0;
        log::info!("{action} {total} {object}.");
    }

    fn tick(&mut self) {
        self.done += 1;
        log::debug!("{}: {}/{}", self.label, self.done, self.total);
    }

    fn finish(&mut self) {
        log::info!("{}: done ({}/{})", self.label, self.done, self.total);
    }
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn start(&mut self, _action: &str, _total: usize, _object: &str) {}

    fn tick(&mut self) {}

    fn finish(&mut self) {}
}
