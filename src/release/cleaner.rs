//! Removal of derived artifacts before a release
//!
//! Best effort: a missing target is not an error, and a target that cannot be
//! removed is recorded while the remaining targets are still attempted.

use crate::core::exclusion::ExclusionSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What a clean run did
#[derive(Debug, Default)]
pub struct CleanReport {
  /// Directories and files that were removed
  pub removed: Vec<PathBuf>,
  /// Targets that could not be removed (or directories that could not be read)
  pub failures: Vec<(PathBuf, io::Error)>,
}

impl CleanReport {
  pub fn is_clean(&self) -> bool {
    self.failures.is_empty()
  }
}

/// Remove every directory named in `directories` anywhere under `root`, then
/// each of `stale_files` at the root
pub fn clean(root: &Path, directories: &ExclusionSet, stale_files: &[String]) -> CleanReport {
  let mut report = CleanReport::default();

  if !directories.is_empty() {
    remove_matching_dirs(root, directories, &mut report);
  }

  for name in stale_files {
    let path = root.join(name);
    match fs::remove_file(&path) {
      Ok(()) => {
        tracing::debug!(path = %path.display(), "removed stale file");
        report.removed.push(path);
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => {
        tracing::debug!(path = %path.display(), error = %e, "failed to remove stale file");
        report.failures.push((path, e));
      }
    }
  }

  report
}

fn remove_matching_dirs(dir: &Path, names: &ExclusionSet, report: &mut CleanReport) {
  let entries = match fs::read_dir(dir) {
    Ok(entries) => entries,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return,
    Err(e) => {
      tracing::debug!(path = %dir.display(), error = %e, "cannot read directory while cleaning");
      report.failures.push((dir.to_path_buf(), e));
      return;
    }
  };

  let mut children: Vec<_> = entries.filter_map(Result::ok).collect();
  children.sort_by_key(|entry| entry.file_name());

  for entry in children {
    // file_type() does not follow symlinks
    let Ok(file_type) = entry.file_type() else {
      continue;
    };
    if !file_type.is_dir() {
      continue;
    }

    let path = entry.path();
    if names.contains_os(&entry.file_name()) {
      match fs::remove_dir_all(&path) {
        Ok(()) => {
          tracing::debug!(path = %path.display(), "removed directory");
          report.removed.push(path);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
          tracing::debug!(path = %path.display(), error = %e, "failed to remove directory");
          report.failures.push((path, e));
        }
      }
    } else {
      remove_matching_dirs(&path, names, report);
    }
  }
}
