use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use crate::core::exclusion::{ExclusionPolicy, ExclusionSet, validate_name};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for release-manager
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every section is optional; a project without a config file gets the
/// built-in layout (`backend/Cargo.toml` + `frontend/package.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub project: ProjectConfig,
  #[serde(default = "default_manifests")]
  pub manifests: Vec<ManifestTarget>,
  #[serde(default)]
  pub exclusions: ExclusionPolicy,
  #[serde(default)]
  pub clean: CleanConfig,
  #[serde(default)]
  pub publish: PublishConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
  /// Archive name prefix: `<slug>-v<version>.zip`
  #[serde(default = "default_slug")]
  pub slug: String,
}

fn default_slug() -> String {
  "onepa-playout".to_string()
}

impl Default for ProjectConfig {
  fn default() -> Self {
    Self { slug: default_slug() }
  }
}

/// How a manifest stores its version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestFormat {
  /// Line-oriented `key = "value"` text (Cargo.toml, pyproject.toml)
  KeyValue,
  /// JSON object (package.json)
  Json,
}

impl ManifestFormat {
  pub fn as_str(self) -> &'static str {
    match self {
      ManifestFormat::KeyValue => "key-value",
      ManifestFormat::Json => "json",
    }
  }
}

/// One manifest whose version field gets overwritten
///
/// # Example
///
/// ```toml
/// [[manifests]]
/// path = "frontend/package.json"
/// format = "json"
/// field = "version"  # optional
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestTarget {
  /// Path relative to the project root
  pub path: PathBuf,

  pub format: ManifestFormat,

  /// Key holding the version (default: "version")
  #[serde(default = "default_field")]
  pub field: String,
}

fn default_field() -> String {
  "version".to_string()
}

impl ManifestTarget {
  pub fn new(path: impl Into<PathBuf>, format: ManifestFormat) -> Self {
    Self {
      path: path.into(),
      format,
      field: default_field(),
    }
  }

  /// Absolute location of this manifest under `root`
  pub fn resolve(&self, root: &Path) -> ManifestTarget {
    Self {
      path: root.join(&self.path),
      format: self.format,
      field: self.field.clone(),
    }
  }
}

fn default_manifests() -> Vec<ManifestTarget> {
  vec![
    ManifestTarget::new("backend/Cargo.toml", ManifestFormat::KeyValue),
    ManifestTarget::new("frontend/package.json", ManifestFormat::Json),
  ]
}

/// Cleanup targets for the optional clean step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanConfig {
  /// Directory names removed wherever they occur under the root
  #[serde(default = "default_clean_directories")]
  pub directories: ExclusionSet,

  /// File names removed from the project root only
  #[serde(default = "default_stale_files")]
  pub stale_files: Vec<String>,
}

fn default_clean_directories() -> ExclusionSet {
  ExclusionSet::new(["__pycache__"])
}

fn default_stale_files() -> Vec<String> {
  vec!["release.zip".to_string()]
}

impl Default for CleanConfig {
  fn default() -> Self {
    Self {
      directories: default_clean_directories(),
      stale_files: default_stale_files(),
    }
  }
}

/// Remote and commit settings for the publish step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
  #[serde(default = "default_remote")]
  pub remote: String,

  #[serde(default = "default_branch")]
  pub branch: String,

  /// Commit message template; `{version}` is substituted
  #[serde(default = "default_message")]
  pub message: String,
}

fn default_remote() -> String {
  "origin".to_string()
}

fn default_branch() -> String {
  "main".to_string()
}

fn default_message() -> String {
  "chore(release): bump version to {version}".to_string()
}

impl Default for PublishConfig {
  fn default() -> Self {
    Self {
      remote: default_remote(),
      branch: default_branch(),
      message: default_message(),
    }
  }
}

impl PublishConfig {
  pub fn commit_message(&self, version: &str) -> String {
    self.message.replace("{version}", version)
  }
}

impl ReleaseConfig {
  /// Built-in configuration (no file)
  pub fn builtin() -> Self {
    Self {
      project: ProjectConfig::default(),
      manifests: default_manifests(),
      exclusions: ExclusionPolicy::default(),
      clean: CleanConfig::default(),
      publish: PublishConfig::default(),
    }
  }

  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = vec![
      root.join("release.toml"),
      root.join(".release.toml"),
      root.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.is_file())
  }

  /// Load config for a project root
  ///
  /// An explicit path must exist; otherwise the search order is used and the
  /// built-in defaults apply when no file is found.
  pub fn load(root: &Path, explicit: Option<&Path>) -> ReleaseResult<(Self, Option<PathBuf>)> {
    let config_path = match explicit {
      Some(path) => {
        if !path.is_file() {
          return Err(ReleaseError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
          }));
        }
        Some(path.to_path_buf())
      }
      None => Self::find_config_path(root),
    };

    let Some(config_path) = config_path else {
      tracing::debug!(root = %root.display(), "no release.toml found, using built-in configuration");
      let config = Self::builtin();
      config.validate()?;
      return Ok((config, None));
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded release configuration");
    Ok((config, Some(config_path)))
  }

  /// Parse and validate config text
  pub fn parse(content: &str) -> ReleaseResult<Self> {
    let config: ReleaseConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate configuration values
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.project.slug.trim().is_empty() {
      return Err(ConfigError::MissingField {
        field: "project.slug".to_string(),
      });
    }
    if self.manifests.is_empty() {
      return Err(ConfigError::MissingField {
        field: "manifests".to_string(),
      });
    }
    for (idx, manifest) in self.manifests.iter().enumerate() {
      if manifest.field.trim().is_empty() {
        return Err(ConfigError::MissingField {
          field: format!("manifests[{}].field", idx),
        });
      }
      if manifest.path.as_os_str().is_empty() {
        return Err(ConfigError::MissingField {
          field: format!("manifests[{}].path", idx),
        });
      }
    }

    let named_lists = [
      ("exclusions.shared", &self.exclusions.shared),
      ("exclusions.archive_only", &self.exclusions.archive_only),
      ("clean.directories", &self.clean.directories),
    ];
    for (field, set) in named_lists {
      for name in set.iter() {
        validate_name(name).map_err(|reason| ConfigError::InvalidValue {
          field: field.to_string(),
          reason,
        })?;
      }
    }
    for name in &self.clean.stale_files {
      validate_name(name).map_err(|reason| ConfigError::InvalidValue {
        field: "clean.stale_files".to_string(),
        reason,
      })?;
    }

    if self.publish.remote.trim().is_empty() {
      return Err(ConfigError::MissingField {
        field: "publish.remote".to_string(),
      });
    }
    if self.publish.branch.trim().is_empty() {
      return Err(ConfigError::MissingField {
        field: "publish.branch".to_string(),
      });
    }
    if !self.publish.message.contains("{version}") {
      return Err(ConfigError::InvalidValue {
        field: "publish.message".to_string(),
        reason: "template must contain {version}".to_string(),
      });
    }

    Ok(())
  }

  /// Render the resolved configuration as TOML
  pub fn to_toml(&self) -> ReleaseResult<String> {
    Ok(toml_edit::ser::to_string_pretty(self)?)
  }
}
