use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

// No bar for small runs; the output would flicker for nothing.
const PROGRESS_THRESHOLD: u64 = 10;

pub struct ProgressReporter(Option<ProgressBar>);

impl ProgressReporter {
    pub fn new(total: u64, enabled: bool) -> Self {
        if !enabled || total < PROGRESS_THRESHOLD {
            return Self(None);
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {pos}/{len} [{bar:32.cyan/blue}] {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Self(Some(bar))
    }

    /// Show the file currently being processed and advance the bar.
    pub fn tick(&self, path: &Path) {
        if let Some(bar) = &self.0 {
            if let Some(name) = path.file_name() {
                bar.set_message(name.to_string_lossy().to_string());
            }
            bar.inc(1);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.0 {
            bar.finish_and_clear();
        }
    }
}
