pub mod system_git;

pub use system_git::SystemGit;

/// Outcome of one external command
///
/// Failures are data, not errors: the caller decides whether to log and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
  /// Rendered command line, for diagnostics
  pub command: String,
  pub success: bool,
  pub stdout: String,
  pub stderr: String,
}

impl CommandResult {
  /// First non-empty diagnostic line (stderr preferred)
  pub fn diagnostic(&self) -> &str {
    let text = if self.stderr.is_empty() { &self.stdout } else { &self.stderr };
    text.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim()
  }
}
