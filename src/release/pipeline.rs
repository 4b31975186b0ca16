//! Sequential release state machine
//!
//! `CollectVersion → Clean? → UpdateManifests → Publish? → Archive? → Done`

use super::archive::{archive_file_name, build_archive};
use super::cleaner::clean;
use super::manifest::set_version;
use super::publish::publish;
use super::Version;
use crate::core::config::ReleaseConfig;
use crate::core::error::ConfigError;
use crate::utils::display_relative;
use std::fmt;
use std::path::Path;

/// Optional steps that need operator confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  Clean,
  Publish,
  Archive,
}

impl Step {
  /// Question shown before the step runs
  pub fn question(self) -> &'static str {
    match self {
      Step::Clean => "Clean artifacts first?",
      Step::Publish => "Commit and Push changes?",
      Step::Archive => "Create Release Zip?",
    }
  }
}

/// Source of the version and of step confirmations
pub trait Decisions {
  /// Raw version input; blank input aborts the run
  fn version(&mut self) -> String;

  /// Whether `step` should run
  fn confirm(&mut self, step: Step) -> bool;
}

/// A recorded pipeline stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
  Clean,
  /// One manifest update, by root-relative path
  Manifest(String),
  Publish,
  Archive,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stage::Clean => write!(f, "clean"),
      Stage::Manifest(path) => write!(f, "update {}", path),
      Stage::Publish => write!(f, "commit and push"),
      Stage::Archive => write!(f, "archive"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
  Completed(String),
  Skipped,
  Failed(String),
}

impl StepOutcome {
  pub fn is_failed(&self) -> bool {
    matches!(self, StepOutcome::Failed(_))
  }
}

/// Everything a run did, in order
#[derive(Debug)]
pub struct ReleaseSummary {
  pub version: Version,
  pub stages: Vec<(Stage, StepOutcome)>,
}

impl ReleaseSummary {
  fn new(version: Version) -> Self {
    Self {
      version,
      stages: Vec::new(),
    }
  }

  fn record<F>(&mut self, stage: Stage, outcome: StepOutcome, observer: &mut F)
  where
    F: FnMut(&Stage, &StepOutcome),
  {
    observer(&stage, &outcome);
    self.stages.push((stage, outcome));
  }

  pub fn outcome(&self, stage: &Stage) -> Option<&StepOutcome> {
    self.stages.iter().find(|(s, _)| s == stage).map(|(_, o)| o)
  }

  /// Stages that failed, with their diagnostics
  pub fn failures(&self) -> Vec<(&Stage, &str)> {
    self
      .stages
      .iter()
      .filter_map(|(stage, outcome)| match outcome {
        StepOutcome::Failed(reason) => Some((stage, reason.as_str())),
        _ => None,
      })
      .collect()
  }

  pub fn is_success(&self) -> bool {
    !self.stages.iter().any(|(_, outcome)| outcome.is_failed())
  }
}

/// Drives the release components for one project root
pub struct ReleasePipeline<'a> {
  root: &'a Path,
  config: &'a ReleaseConfig,
}

impl<'a> ReleasePipeline<'a> {
  pub fn new(root: &'a Path, config: &'a ReleaseConfig) -> Self {
    Self { root, config }
  }

  /// Run every stage; only an empty version aborts
  ///
  /// `observer` sees each stage as soon as it is recorded.
  pub fn run<D, F>(&self, decisions: &mut D, mut observer: F) -> Result<ReleaseSummary, ConfigError>
  where
    D: Decisions + ?Sized,
    F: FnMut(&Stage, &StepOutcome),
  {
    let version = Version::parse(&decisions.version())?;
    tracing::info!(version = %version, root = %self.root.display(), "starting release");
    let mut summary = ReleaseSummary::new(version.clone());

    let outcome = if decisions.confirm(Step::Clean) {
      self.clean()
    } else {
      StepOutcome::Skipped
    };
    summary.record(Stage::Clean, outcome, &mut observer);

    for target in &self.config.manifests {
      let resolved = target.resolve(self.root);
      let label = display_relative(self.root, &resolved.path);
      let outcome = match set_version(&resolved, &version) {
        Ok(()) => StepOutcome::Completed(format!("{} set to {}", label, version)),
        Err(e) => {
          tracing::debug!(path = %resolved.path.display(), error = %e, "manifest update failed");
          StepOutcome::Failed(e.to_string())
        }
      };
      summary.record(Stage::Manifest(label), outcome, &mut observer);
    }

    let outcome = if decisions.confirm(Step::Publish) {
      self.publish(&version)
    } else {
      StepOutcome::Skipped
    };
    summary.record(Stage::Publish, outcome, &mut observer);

    let outcome = if decisions.confirm(Step::Archive) {
      self.archive(&version)
    } else {
      StepOutcome::Skipped
    };
    summary.record(Stage::Archive, outcome, &mut observer);

    tracing::info!(version = %version, failures = summary.failures().len(), "release finished");
    Ok(summary)
  }

  fn clean(&self) -> StepOutcome {
    let report = clean(self.root, &self.config.clean.directories, &self.config.clean.stale_files);
    if report.is_clean() {
      StepOutcome::Completed(format!("removed {} item(s)", report.removed.len()))
    } else {
      let reasons: Vec<String> = report
        .failures
        .iter()
        .map(|(path, e)| format!("{}: {}", display_relative(self.root, path), e))
        .collect();
      tracing::debug!(failures = reasons.len(), "clean step failed");
      StepOutcome::Failed(reasons.join("; "))
    }
  }

  fn publish(&self, version: &Version) -> StepOutcome {
    let exclusions = self.config.exclusions.for_commit();
    match publish(self.root, version, &exclusions, &self.config.publish) {
      Ok(report) if report.is_success() => StepOutcome::Completed(format!(
        "pushed to {}/{}",
        self.config.publish.remote, self.config.publish.branch
      )),
      Ok(report) => {
        let failures = report.failures();
        tracing::debug!(failures = failures.len(), "publish step failed");
        StepOutcome::Failed(failures.join("; "))
      }
      Err(e) => {
        tracing::debug!(error = %e, "publish step failed");
        StepOutcome::Failed(e.to_string())
      }
    }
  }

  fn archive(&self, version: &Version) -> StepOutcome {
    let name = archive_file_name(&self.config.project.slug, version.as_str());
    match build_archive(self.root, &name, &self.config.exclusions.for_archive()) {
      Ok(summary) => StepOutcome::Completed(format!("{} ({} files, sha256 {})", name, summary.entries, summary.sha256)),
      Err(e) => {
        tracing::debug!(archive = %name, error = %e, "archive step failed");
        StepOutcome::Failed(e.to_string())
      }
    }
  }
}
