//! Version propagation into project manifests
//!
//! Two formats are supported:
//! - key-value text (`version = "1.7.2"`): only the value bytes of the first
//!   matching line change, the rest of the file is untouched
//! - JSON objects (package.json): parsed, updated and re-serialized with the
//!   original key order and two-space indentation

use super::Version;
use crate::core::config::{ManifestFormat, ManifestTarget};
use crate::core::error::ManifestError;
use regex::Regex;
use std::fs;
use std::ops::Range;
use std::path::Path;

/// Set the version field of `target` to `version`
///
/// `target.path` must already be resolved against the project root.
pub fn set_version(target: &ManifestTarget, version: &Version) -> Result<(), ManifestError> {
  let content = read(&target.path)?;

  let updated = match target.format {
    ManifestFormat::KeyValue => replace_key_value(&content, &target.field, version.as_str()).ok_or_else(|| {
      ManifestError::FieldNotFound {
        path: target.path.clone(),
        field: target.field.clone(),
      }
    })?,
    ManifestFormat::Json => set_json_field(&target.path, &content, &target.field, version.as_str())?,
  };

  fs::write(&target.path, updated).map_err(|source| ManifestError::Write {
    path: target.path.clone(),
    source,
  })?;

  tracing::info!(
    path = %target.path.display(),
    format = target.format.as_str(),
    version = %version,
    "updated manifest version"
  );
  Ok(())
}

/// Read the current version of `target`, `None` when the field is absent
pub fn read_version(target: &ManifestTarget) -> Result<Option<String>, ManifestError> {
  let content = read(&target.path)?;

  match target.format {
    ManifestFormat::KeyValue => {
      Ok(find_key_value(&content, &target.field).map(|range| content[range].to_string()))
    }
    ManifestFormat::Json => {
      let value = parse_object(&target.path, &content)?;
      Ok(
        value
          .get(&target.field)
          .and_then(|v| v.as_str())
          .map(str::to_string),
      )
    }
  }
}

fn read(path: &Path) -> Result<String, ManifestError> {
  fs::read_to_string(path).map_err(|source| ManifestError::Read {
    path: path.to_path_buf(),
    source,
  })
}

/// Byte range of the value in the first `<field> = "<value>"` line
fn find_key_value(content: &str, field: &str) -> Option<Range<usize>> {
  let pattern = format!(r#"(?m)^[ \t]*{}[ \t]*=[ \t]*"([^"\n]*)""#, regex::escape(field));
  let re = Regex::new(&pattern).ok()?;
  re.captures(content)
    .and_then(|caps| caps.get(1))
    .map(|m| m.range())
}

/// Replace the first occurrence's value, `None` if the field is missing
fn replace_key_value(content: &str, field: &str, version: &str) -> Option<String> {
  let range = find_key_value(content, field)?;
  let mut updated = String::with_capacity(content.len() + version.len());
  updated.push_str(&content[..range.start]);
  updated.push_str(version);
  updated.push_str(&content[range.end..]);
  Some(updated)
}

fn parse_object(path: &Path, content: &str) -> Result<serde_json::Map<String, serde_json::Value>, ManifestError> {
  let value: serde_json::Value = serde_json::from_str(content).map_err(|source| ManifestError::Parse {
    path: path.to_path_buf(),
    source,
  })?;

  match value {
    serde_json::Value::Object(map) => Ok(map),
    _ => Err(ManifestError::NotAnObject {
      path: path.to_path_buf(),
    }),
  }
}

fn set_json_field(path: &Path, content: &str, field: &str, version: &str) -> Result<String, ManifestError> {
  let mut object = parse_object(path, content)?;
  object.insert(field.to_string(), serde_json::Value::String(version.to_string()));

  let mut rendered =
    serde_json::to_string_pretty(&serde_json::Value::Object(object)).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
  if content.ends_with('\n') {
    rendered.push('\n');
  }
  Ok(rendered)
}
