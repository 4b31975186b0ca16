//! Project context: built once in main.rs, passed by reference to every command

use crate::core::config::ReleaseConfig;
use crate::core::error::{ReleaseResult, ResultExt};
use crate::release::manifest::read_version;
use crate::utils::display_relative;
use std::path::{Path, PathBuf};

/// Resolved project root plus its release configuration
#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Project root (absolute path)
  pub root: PathBuf,

  pub config: ReleaseConfig,

  /// Config file the configuration came from, `None` for built-in defaults
  pub config_path: Option<PathBuf>,
}

/// Current version of one configured manifest
#[derive(Debug)]
pub struct ManifestVersion {
  /// Root-relative manifest path
  pub label: String,
  /// `Ok(None)` when the field is absent, `Err` with a message when unreadable
  pub version: Result<Option<String>, String>,
}

impl ReleaseContext {
  /// Resolve `root` and load configuration for it
  ///
  /// Fails when the root does not exist or the configuration is invalid.
  pub fn build(root: &Path, config_path: Option<&Path>) -> ReleaseResult<Self> {
    let root = root
      .canonicalize()
      .with_context(|| format!("Project root not found: {}", root.display()))?;
    let (config, config_path) = ReleaseConfig::load(&root, config_path)?;

    Ok(Self {
      root,
      config,
      config_path,
    })
  }

  /// Read the version of every configured manifest, in config order
  pub fn current_versions(&self) -> Vec<ManifestVersion> {
    self
      .config
      .manifests
      .iter()
      .map(|target| {
        let resolved = target.resolve(&self.root);
        ManifestVersion {
          label: display_relative(&self.root, &resolved.path),
          version: read_version(&resolved).map_err(|e| e.to_string()),
        }
      })
      .collect()
  }
}
