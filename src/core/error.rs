//! Error types for release-manager with contextual messages and exit codes
//!
//! One crate-wide error type that categorizes failures by the pipeline step that
//! produced them. Manifest, archive and publish errors are recoverable at the
//! step boundary; configuration errors abort the run before anything is mutated.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, empty version, invalid args)
  User = 1,
  /// System error (git, filesystem, archive)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-manager
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration and operator input errors
  Config(ConfigError),

  /// Manifest read/parse/write errors
  Manifest(ManifestError),

  /// Archive creation errors
  Archive(ArchiveError),

  /// Version-control errors
  Publish(PublishError),

  /// I/O errors
  Io(io::Error),

  /// A typed error with the operation that produced it
  Context { context: String, source: Box<ReleaseError> },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      other => ReleaseError::Context {
        context: ctx_str,
        source: Box::new(other),
      },
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Manifest(_) => ExitCode::System,
      ReleaseError::Archive(_) => ExitCode::System,
      ReleaseError::Publish(_) => ExitCode::System,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Context { source, .. } => source.exit_code(),
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Manifest(e) => e.help_message(),
      ReleaseError::Publish(e) => e.help_message(),
      ReleaseError::Context { source, .. } => source.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Manifest(e) => write!(f, "{}", e),
      ReleaseError::Archive(e) => write!(f, "{}", e),
      ReleaseError::Publish(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Context { context, source } => write!(f, "{}\n{}", context, source),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      ReleaseError::Manifest(e) => e.source(),
      ReleaseError::Archive(e) => e.source(),
      ReleaseError::Context { source, .. } => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<ManifestError> for ReleaseError {
  fn from(err: ManifestError) -> Self {
    ReleaseError::Manifest(err)
  }
}

impl From<ArchiveError> for ReleaseError {
  fn from(err: ArchiveError) -> Self {
    ReleaseError::Archive(err)
  }
}

impl From<PublishError> for ReleaseError {
  fn from(err: PublishError) -> Self {
    ReleaseError::Publish(err)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for ReleaseError {
  fn from(err: toml_edit::ser::Error) -> Self {
    ReleaseError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

/// Configuration and operator input errors
#[derive(Debug)]
pub enum ConfigError {
  /// The operator supplied an empty version
  EmptyVersion,

  /// Config file given with --config does not exist
  NotFound { path: PathBuf },

  /// Missing or empty required field
  MissingField { field: String },

  /// A field holds a value that cannot be used
  InvalidValue { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::EmptyVersion => Some("Pass a non-empty version, e.g. 1.8.0".to_string()),
      ConfigError::NotFound { .. } => {
        Some("Omit --config to use release.toml from the project root, or the built-in defaults.".to_string())
      }
      ConfigError::InvalidValue { .. } => {
        Some("Exclusion and clean entries are literal file or directory names, not paths or globs.".to_string())
      }
      ConfigError::MissingField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::EmptyVersion => write!(f, "Version required."),
      ConfigError::NotFound { path } => {
        write!(f, "Configuration file not found: {}", path.display())
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::InvalidValue { field, reason } => {
        write!(f, "Invalid value for '{}': {}", field, reason)
      }
    }
  }
}

/// Manifest read/parse/write errors
#[derive(Debug)]
pub enum ManifestError {
  /// Manifest could not be read
  Read { path: PathBuf, source: io::Error },

  /// Manifest content is not valid JSON
  Parse { path: PathBuf, source: serde_json::Error },

  /// JSON manifest is valid but its top level is not an object
  NotAnObject { path: PathBuf },

  /// Key-value manifest has no `<field> = "..."` line
  FieldNotFound { path: PathBuf, field: String },

  /// Manifest could not be written back
  Write { path: PathBuf, source: io::Error },
}

impl ManifestError {
  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::FieldNotFound { field, .. } => Some(format!(
        "Add a line like `{} = \"0.0.0\"` to the manifest, or fix the `field` entry in release.toml.",
        field
      )),
      ManifestError::Read { .. } => Some("Run release-manager from the project root or pass --root.".to_string()),
      _ => None,
    }
  }

  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ManifestError::Read { source, .. } | ManifestError::Write { source, .. } => Some(source),
      ManifestError::Parse { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::Read { path, source } => {
        write!(f, "Failed to read manifest {}: {}", path.display(), source)
      }
      ManifestError::Parse { path, source } => {
        write!(f, "Failed to parse manifest {}: {}", path.display(), source)
      }
      ManifestError::NotAnObject { path } => {
        write!(f, "Manifest {} does not contain a top-level object", path.display())
      }
      ManifestError::FieldNotFound { path, field } => {
        write!(f, "No `{}` field found in {}", field, path.display())
      }
      ManifestError::Write { path, source } => {
        write!(f, "Failed to write manifest {}: {}", path.display(), source)
      }
    }
  }
}

/// Archive creation errors
#[derive(Debug)]
pub enum ArchiveError {
  /// Output archive could not be created
  Create { path: PathBuf, source: io::Error },

  /// Directory walk failed for a reason other than a vanished entry
  Walk { path: PathBuf, source: io::Error },

  /// A file could not be added
  Entry { path: PathBuf, reason: String },

  /// Central directory could not be written
  Finish { path: PathBuf, reason: String },
}

impl ArchiveError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ArchiveError::Create { source, .. } | ArchiveError::Walk { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl fmt::Display for ArchiveError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArchiveError::Create { path, source } => {
        write!(f, "Failed to create archive {}: {}", path.display(), source)
      }
      ArchiveError::Walk { path, source } => {
        write!(f, "Failed to read directory {}: {}", path.display(), source)
      }
      ArchiveError::Entry { path, reason } => {
        write!(f, "Failed to add {} to archive: {}", path.display(), reason)
      }
      ArchiveError::Finish { path, reason } => {
        write!(f, "Failed to finalize archive {}: {}", path.display(), reason)
      }
    }
  }
}

/// Version-control errors
#[derive(Debug)]
pub enum PublishError {
  /// git binary could not be executed
  Spawn { command: String, reason: String },

  /// Project root is not inside a git work tree
  RepoNotFound { path: PathBuf, stderr: String },

  /// One or more git sub-steps failed (`command: diagnostic` per entry)
  Failed { failures: Vec<String> },
}

impl PublishError {
  fn help_message(&self) -> Option<String> {
    match self {
      PublishError::Spawn { .. } => Some("Install git and make sure it is on PATH.".to_string()),
      PublishError::RepoNotFound { path, .. } => Some(format!(
        "Initialize the repository first or check the path: {}",
        path.display()
      )),
      PublishError::Failed { .. } => {
        Some("Fix the failing git command, then re-run `release-manager publish <VERSION>`.".to_string())
      }
    }
  }
}

impl fmt::Display for PublishError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PublishError::Spawn { command, reason } => {
        write!(f, "Failed to run `{}`: {}", command, reason)
      }
      PublishError::RepoNotFound { path, stderr } => {
        write!(f, "Git repository not found at: {}", path.display())?;
        if !stderr.is_empty() {
          write!(f, "\n{}", stderr.trim())?;
        }
        Ok(())
      }
      PublishError::Failed { failures } => {
        write!(f, "{} git command(s) failed", failures.len())?;
        for failure in failures {
          write!(f, "\n  {}", failure)?;
        }
        Ok(())
      }
    }
  }
}

/// Result type alias for release-manager
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
