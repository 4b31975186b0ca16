//! Commit and push of a version bump
//!
//! Everything is staged, the commit exclusion set is unstaged again, then the
//! result is committed and pushed. Sub-step failures are recorded and the
//! remaining sub-steps still run.

use super::Version;
use crate::core::config::PublishConfig;
use crate::core::error::PublishError;
use crate::core::exclusion::ExclusionSet;
use crate::core::vcs::{CommandResult, SystemGit};
use std::path::Path;

/// Every git invocation of one publish, in order
#[derive(Debug, Default)]
pub struct PublishReport {
  pub commands: Vec<CommandResult>,
}

impl PublishReport {
  pub fn is_success(&self) -> bool {
    self.commands.iter().all(|c| c.success)
  }

  /// Failed command lines with their first diagnostic line
  pub fn failures(&self) -> Vec<String> {
    self
      .commands
      .iter()
      .filter(|c| !c.success)
      .map(|c| format!("{}: {}", c.command, c.diagnostic()))
      .collect()
  }

  fn record(&mut self, result: CommandResult) {
    if result.success {
      tracing::debug!(command = %result.command, "git command succeeded");
    } else {
      tracing::debug!(command = %result.command, stderr = %result.diagnostic(), "git command failed");
    }
    self.commands.push(result);
  }
}

/// Pathspecs that match `name` as a file or directory at any depth
pub fn exclusion_pathspecs(name: &str) -> [String; 2] {
  [format!(":(glob)**/{}", name), format!(":(glob)**/{}/**", name)]
}

/// Stage, unstage exclusions, commit and push
///
/// Fails only when `root` is not inside a git work tree (or git cannot be run);
/// every other failure ends up in the report.
pub fn publish(
  root: &Path,
  version: &Version,
  exclude_from_commit: &ExclusionSet,
  config: &PublishConfig,
) -> Result<PublishReport, PublishError> {
  let git = SystemGit::open(root)?;
  tracing::info!(work_tree = %git.work_tree().display(), version = %version, "publishing release");

  let mut report = PublishReport::default();
  report.record(git.run(["add", "-A"]));

  for name in exclude_from_commit.iter() {
    let [file_spec, dir_spec] = exclusion_pathspecs(name);
    report.record(git.run(["reset", "-q", "--", file_spec.as_str(), dir_spec.as_str()]));
  }

  let message = config.commit_message(version.as_str());
  report.record(git.run(["commit", "-m", message.as_str()]));
  report.record(git.run(["push", config.remote.as_str(), config.branch.as_str()]));

  Ok(report)
}
