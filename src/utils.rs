//! Utility functions for cross-platform path handling

use std::path::{Component, Path};

/// Convert a root-relative path to an archive entry name (always forward slashes)
///
/// Zip readers expect `/` separators regardless of the platform that wrote the
/// archive. Returns `None` for paths that are not plain relative paths.
pub fn archive_entry_name(relative: &Path) -> Option<String> {
  let mut parts = Vec::new();
  for component in relative.components() {
    match component {
      Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
      Component::CurDir => {}
      _ => return None,
    }
  }

  if parts.is_empty() { None } else { Some(parts.join("/")) }
}

/// Path of `path` relative to `root`, for display
pub fn display_relative(root: &Path, path: &Path) -> String {
  path.strip_prefix(root).unwrap_or(path).display().to_string()
}
