//! Release archive construction
//!
//! The tree is walked first into an [`ArchiveManifest`] (what goes in, under
//! which name), then written as a deflate zip. Excluded directories are pruned
//! before descending, so nothing below them is ever visited.

use crate::core::error::ArchiveError;
use crate::core::exclusion::ExclusionSet;
use crate::ui::progress::ArchiveProgress;
use crate::utils::archive_entry_name;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Release archive file name: `<slug>-v<version>.zip`
pub fn archive_file_name(slug: &str, version: &str) -> String {
  format!("{}-v{}.zip", slug, version)
}

/// A file scheduled for the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
  /// Location on disk
  pub source: PathBuf,
  /// Root-relative name inside the archive (`/` separated)
  pub name: String,
}

/// Result of walking the project tree
#[derive(Debug, Default)]
pub struct ArchiveManifest {
  entries: Vec<ArchiveEntry>,
  /// Paths that vanished or could not be resolved during the walk
  skipped: Vec<PathBuf>,
}

impl ArchiveManifest {
  /// Walk `root` depth-first, in name order
  ///
  /// Directories named in `exclusions` are pruned, files named in
  /// `exclusions` or equal to `output_name` are skipped. Directory symlinks
  /// are not followed; file symlinks are archived with their target's content.
  pub fn collect(root: &Path, output_name: &str, exclusions: &ExclusionSet) -> Result<Self, ArchiveError> {
    if !root.is_dir() {
      return Err(ArchiveError::Walk {
        path: root.to_path_buf(),
        source: io::Error::new(io::ErrorKind::NotFound, "project root is not a directory"),
      });
    }

    let mut manifest = Self::default();
    let walk = Walk {
      root,
      output_name,
      exclusions,
    };
    walk.visit(root, &mut manifest)?;
    tracing::debug!(
      entries = manifest.entries.len(),
      skipped = manifest.skipped.len(),
      "collected archive manifest"
    );
    Ok(manifest)
  }

  pub fn entries(&self) -> &[ArchiveEntry] {
    &self.entries
  }

  pub fn skipped(&self) -> &[PathBuf] {
    &self.skipped
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }
}

struct Walk<'a> {
  root: &'a Path,
  output_name: &'a str,
  exclusions: &'a ExclusionSet,
}

impl Walk<'_> {
  fn visit(&self, dir: &Path, manifest: &mut ArchiveManifest) -> Result<(), ArchiveError> {
    let entries = match fs::read_dir(dir) {
      Ok(entries) => entries,
      Err(e) if e.kind() == io::ErrorKind::NotFound && dir != self.root => {
        tracing::warn!(path = %dir.display(), "directory vanished during archive walk, skipping");
        manifest.skipped.push(dir.to_path_buf());
        return Ok(());
      }
      Err(source) => {
        return Err(ArchiveError::Walk {
          path: dir.to_path_buf(),
          source,
        });
      }
    };

    let mut children = Vec::new();
    for entry in entries {
      match entry {
        Ok(entry) => children.push(entry),
        Err(source) => {
          return Err(ArchiveError::Walk {
            path: dir.to_path_buf(),
            source,
          });
        }
      }
    }
    children.sort_by_key(|entry| entry.file_name());

    for entry in children {
      let path = entry.path();
      let name = entry.file_name();

      let Ok(file_type) = entry.file_type() else {
        tracing::warn!(path = %path.display(), "entry vanished during archive walk, skipping");
        manifest.skipped.push(path);
        continue;
      };

      let is_dir = file_type.is_dir();
      let is_file = if file_type.is_symlink() {
        match fs::metadata(&path) {
          Ok(meta) => meta.is_file(),
          Err(_) => {
            tracing::warn!(path = %path.display(), "dangling symlink, skipping");
            manifest.skipped.push(path);
            continue;
          }
        }
      } else {
        file_type.is_file()
      };

      if is_dir {
        if self.exclusions.contains_os(&name) {
          tracing::debug!(path = %path.display(), "pruned excluded directory");
          continue;
        }
        self.visit(&path, manifest)?;
      } else if is_file {
        if self.exclusions.contains_os(&name) || name == self.output_name {
          tracing::debug!(path = %path.display(), "skipped excluded file");
          continue;
        }
        let relative = path.strip_prefix(self.root).unwrap_or(&path);
        let Some(entry_name) = archive_entry_name(relative) else {
          manifest.skipped.push(path);
          continue;
        };
        manifest.entries.push(ArchiveEntry {
          source: path,
          name: entry_name,
        });
      }
    }

    Ok(())
  }
}

/// What was written
#[derive(Debug)]
pub struct ArchiveSummary {
  pub path: PathBuf,
  pub entries: usize,
  /// Files dropped because they disappeared before they could be read
  pub skipped: Vec<PathBuf>,
  /// Archive size in bytes
  pub size: u64,
  /// Lowercase hex SHA-256 of the archive
  pub sha256: String,
}

/// Build `root/output_name` from the filtered project tree
///
/// A failure after the output was created removes the partial archive.
pub fn build_archive(root: &Path, output_name: &str, exclusions: &ExclusionSet) -> Result<ArchiveSummary, ArchiveError> {
  let manifest = ArchiveManifest::collect(root, output_name, exclusions)?;
  let archive_path = root.join(output_name);

  let file = File::create(&archive_path).map_err(|source| ArchiveError::Create {
    path: archive_path.clone(),
    source,
  })?;

  match write_entries(file, &archive_path, &manifest) {
    Ok(vanished) => {
      let mut skipped = manifest.skipped().to_vec();
      let entries = manifest.len() - vanished.len();
      skipped.extend(vanished);

      let size = fs::metadata(&archive_path).map(|m| m.len()).unwrap_or(0);
      let sha256 = compute_sha256(&archive_path).map_err(|e| ArchiveError::Finish {
        path: archive_path.clone(),
        reason: e.to_string(),
      })?;

      tracing::info!(path = %archive_path.display(), entries, size, "archive created");
      Ok(ArchiveSummary {
        path: archive_path,
        entries,
        skipped,
        size,
        sha256,
      })
    }
    Err(e) => {
      if let Err(remove_err) = fs::remove_file(&archive_path) {
        tracing::warn!(path = %archive_path.display(), error = %remove_err, "failed to remove partial archive");
      }
      Err(e)
    }
  }
}

/// Write every manifest entry, returning the ones that vanished
fn write_entries(file: File, archive_path: &Path, manifest: &ArchiveManifest) -> Result<Vec<PathBuf>, ArchiveError> {
  let mut zip = ZipWriter::new(file);
  let mut vanished = Vec::new();
  let mut progress = io::stderr()
    .is_terminal()
    .then(|| ArchiveProgress::new(manifest.len(), "Archiving"));

  for entry in manifest.entries() {
    if !write_entry(&mut zip, entry)? {
      vanished.push(entry.source.clone());
    }
    if let Some(progress) = progress.as_mut() {
      progress.inc();
    }
  }

  zip.finish().map_err(|e| ArchiveError::Finish {
    path: archive_path.to_path_buf(),
    reason: e.to_string(),
  })?;
  Ok(vanished)
}

/// Add one file; `Ok(false)` when it no longer exists
fn write_entry(zip: &mut ZipWriter<File>, entry: &ArchiveEntry) -> Result<bool, ArchiveError> {
  let entry_err = |reason: String| ArchiveError::Entry {
    path: entry.source.clone(),
    reason,
  };

  let mut source = match File::open(&entry.source) {
    Ok(file) => file,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      tracing::warn!(path = %entry.source.display(), "file vanished before it could be archived, skipping");
      return Ok(false);
    }
    Err(e) => return Err(entry_err(e.to_string())),
  };
  let metadata = source.metadata().map_err(|e| entry_err(e.to_string()))?;

  let mut options = SimpleFileOptions::default()
    .compression_method(CompressionMethod::Deflated)
    .large_file(metadata.len() >= u64::from(u32::MAX));
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    options = options.unix_permissions(metadata.permissions().mode());
  }

  zip
    .start_file(entry.name.as_str(), options)
    .map_err(|e| entry_err(e.to_string()))?;
  io::copy(&mut source, zip).map_err(|e| entry_err(e.to_string()))?;
  Ok(true)
}

/// Compute the SHA-256 digest of a file as lowercase hex
pub fn compute_sha256(path: &Path) -> io::Result<String> {
  let mut file = File::open(path)?;
  let mut hasher = Sha256::new();
  let mut buffer = [0u8; 8192];
  loop {
    let bytes_read = file.read(&mut buffer)?;
    if bytes_read == 0 {
      break;
    }
    hasher.update(&buffer[..bytes_read]);
  }
  Ok(format!("{:x}", hasher.finalize()))
}
