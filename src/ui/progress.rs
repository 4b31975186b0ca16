//! Progress indicators for long-running operations
//!
//! Uses `linya`, which draws to stderr.

use linya::{Bar, Progress};

/// Progress bar for files written into the release archive
pub struct ArchiveProgress {
  progress: Progress,
  bar: Bar,
}

impl ArchiveProgress {
  /// Create a new progress bar over `total` archive entries
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self { progress, bar }
  }

  /// Increment progress by 1
  pub fn inc(&mut self) {
    self.progress.inc_and_draw(&self.bar, 1);
  }
}
