//! Literal-name exclusion sets shared by the archive and publish steps
//!
//! Names are matched against a single path component (a directory or file
//! name), never against a path or a glob. The [`ExclusionPolicy`] is the one
//! value both consumers read from, so the large assets that must stay out of
//! the archive are the same ones kept out of the release commit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ffi::OsStr;

/// Name of the large demo asset kept out of both git and the archive
pub const LARGE_TEST_ASSET: &str = "big_buck_bunny_1080p_h264.mov";

/// A set of literal file/directory names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet {
  names: BTreeSet<String>,
}

impl ExclusionSet {
  pub fn new<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      names: names.into_iter().map(Into::into).collect(),
    }
  }

  /// Check whether a single path component is excluded
  pub fn contains(&self, name: &str) -> bool {
    self.names.contains(name)
  }

  /// Same as [`contains`](Self::contains) for OS file names; non-UTF-8 names never match
  pub fn contains_os(&self, name: &OsStr) -> bool {
    name.to_str().is_some_and(|n| self.contains(n))
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.names.iter().map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }

  /// Union of two sets
  pub fn union(&self, other: &ExclusionSet) -> ExclusionSet {
    Self {
      names: self.names.union(&other.names).cloned().collect(),
    }
  }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self::new(iter)
  }
}

/// Exclusions for one release run
///
/// `shared` applies to both the archive and the commit; `archive_only` is
/// build output and VCS metadata that git already ignores but a zip would not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionPolicy {
  #[serde(default = "default_shared")]
  pub shared: ExclusionSet,

  #[serde(default = "default_archive_only")]
  pub archive_only: ExclusionSet,
}

fn default_shared() -> ExclusionSet {
  ExclusionSet::new([LARGE_TEST_ASSET])
}

fn default_archive_only() -> ExclusionSet {
  ExclusionSet::new([
    "node_modules",
    "target",
    ".git",
    ".idea",
    ".vscode",
    "release.zip",
    "__pycache__",
    ".DS_Store",
  ])
}

impl Default for ExclusionPolicy {
  fn default() -> Self {
    Self {
      shared: default_shared(),
      archive_only: default_archive_only(),
    }
  }
}

impl ExclusionPolicy {
  /// Names the archive builder prunes/skips
  pub fn for_archive(&self) -> ExclusionSet {
    self.shared.union(&self.archive_only)
  }

  /// Names the publish step unstages before committing
  pub fn for_commit(&self) -> ExclusionSet {
    self.shared.clone()
  }
}

/// Check that a configured name is a single literal path component
pub fn validate_name(name: &str) -> Result<(), String> {
  if name.trim().is_empty() {
    return Err("name is empty".to_string());
  }
  if name == "." || name == ".." {
    return Err(format!("'{}' is not a file or directory name", name));
  }
  if name.contains('/') || name.contains('\\') {
    return Err(format!("'{}' contains a path separator", name));
  }
  Ok(())
}
