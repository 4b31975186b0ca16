//! Release orchestration
//!
//! One run walks a fixed sequence of steps:
//!
//! 1. collect the version (the only step that can abort the run)
//! 2. optionally clean derived artifacts
//! 3. write the version into every configured manifest
//! 4. optionally commit and push, keeping large assets out of the commit
//! 5. optionally bundle the tree into `<slug>-v<version>.zip`
//!
//! Steps after the first never abort: a failure is logged, recorded in the
//! [`ReleaseSummary`](pipeline::ReleaseSummary) and the next step runs. There
//! is no rollback.

pub mod archive;
pub mod cleaner;
pub mod manifest;
pub mod pipeline;
pub mod prompt;
pub mod publish;

use crate::core::error::ConfigError;
use std::fmt;

/// Operator-supplied release version
///
/// Opaque: any non-empty string is accepted and copied verbatim into
/// manifests, the commit message and the archive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version(String);

impl Version {
  /// Trim and validate operator input
  pub fn parse(input: &str) -> Result<Self, ConfigError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Err(ConfigError::EmptyVersion);
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
