//! System git backend
//!
//! Every git invocation of a release run goes through [`SystemGit::run`], which
//! never fails: spawn errors and non-zero exits both come back as a failed
//! [`CommandResult`]. Only [`SystemGit::open`] returns an error, so callers can
//! refuse to start a publish outside a repository.

use super::CommandResult;
use crate::core::error::PublishError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variables forwarded to git (everything else is cleared)
const FORWARDED_ENV: &[&str] = &["PATH", "HOME", "SSH_AUTH_SOCK", "GIT_SSH_COMMAND"];

/// Git backend using the system git binary
pub struct SystemGit {
  /// Directory git commands run in
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> Result<Self, PublishError> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .map_err(|e| PublishError::Spawn {
        command: "git rev-parse --show-toplevel".to_string(),
        reason: e.to_string(),
      })?;

    if !output.status.success() {
      return Err(PublishError::RepoNotFound {
        path: path.to_path_buf(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Working tree root reported by git
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Run one git command and capture its outcome
  ///
  /// Blocks until git exits; there is no timeout.
  pub fn run<I, S>(&self, args: I) -> CommandResult
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    let command = format!("git {}", args.join(" "));
    tracing::debug!(command = %command, repo = %self.repo_path.display(), "running git");

    match self.git_cmd().args(&args).output() {
      Ok(output) => CommandResult {
        command,
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      },
      Err(e) => CommandResult {
        command,
        success: false,
        stdout: String::new(),
        stderr: format!("failed to execute git: {}", e),
      },
    }
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH, HOME and the SSH agent/command used by push
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust ambient GIT_* variables)
    cmd.env_clear();
    for key in FORWARDED_ENV {
      if let Ok(value) = std::env::var(key) {
        cmd.env(key, value);
      }
    }

    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("advice.detachedHead=false");

    cmd
  }
}
