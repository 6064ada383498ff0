//! Import progress reporting.

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called when a stage starts (e.g., "Inserting symbols").
    fn on_phase(&self, message: &str);

    /// Called after a stage finishes with the number of rows it wrote.
    fn on_stage(&self, stage: &str, count: usize);

    /// Called when the import is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_stage(&self, _stage: &str, _count: usize) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn on_stage(&self, stage: &str, count: usize) {
        log::info!("  {:<24} {:>8}", stage, count);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
