//! Spinner shown while an import runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use sfsymbols_import::ImportProgress;

/// A single spinner line reporting import stages.
///
/// Finished stages are logged above the spinner so they stay on screen.
pub(crate) struct ImportSpinner {
    pb: ProgressBar,
}

impl ImportSpinner {
    /// When `quiet` is true the spinner is hidden.
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        if quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// Stop ticking and remove the spinner line.
    fn clear(&self) {
        self.pb.disable_steady_tick();
        self.pb.finish_and_clear();
    }
}

impl ImportProgress for ImportSpinner {
    fn on_phase(&self, message: &str) {
        log::debug!("{}", message);
        self.pb.set_message(message.to_string());
    }

    fn on_stage(&self, stage: &str, count: usize) {
        self.pb.suspend(|| {
            log::info!(
                "  {} {:<24} {:>8}",
                "\u{2714}".if_supports_color(Stderr, |t| t.green()),
                stage,
                count,
            );
        });
    }

    fn on_complete(&self, message: &str) {
        self.clear();
        log::debug!("{}", message);
    }
}

impl Drop for ImportSpinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
