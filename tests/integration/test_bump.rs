//! Integration tests for `release-manager bump`

use crate::helpers::{CARGO_TOML, PACKAGE_JSON, TestProject, run_release_manager, stderr, stdout};
use anyhow::Result;

#[test]
fn test_bump_updates_both_manifests() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_release_manager(&project.path, &["bump", "1.8.0"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("Updated backend/Cargo.toml to 1.8.0"));
  assert_eq!(
    project.read_file("backend/Cargo.toml")?,
    CARGO_TOML.replacen("1.7.2", "1.8.0", 1)
  );
  assert!(project.read_file("backend/Cargo.toml")?.contains("rust-version = \"1.75\""));
  assert_eq!(project.read_file("frontend/package.json")?, PACKAGE_JSON.replace("1.7.2", "1.8.0"));
  Ok(())
}

#[test]
fn test_bump_with_root_flag() -> Result<()> {
  let project = TestProject::new()?;
  let elsewhere = tempfile::TempDir::new()?;
  let root = project.path.to_string_lossy().to_string();

  let output = run_release_manager(elsewhere.path(), &["bump", "3.1.4", "--root", &root])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
  assert!(project.read_file("frontend/package.json")?.contains("\"version\": \"3.1.4\""));
  Ok(())
}

#[test]
fn test_bump_missing_field_fails_and_keeps_going() -> Result<()> {
  let project = TestProject::new()?;
  let without_version = "[package]\nname = \"onepa-playout\"\n";
  project.write_file("backend/Cargo.toml", without_version)?;

  let output = run_release_manager(&project.path, &["bump", "1.8.0"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("No `version` field found"));
  assert_eq!(project.read_file("backend/Cargo.toml")?, without_version);
  assert!(project.read_file("frontend/package.json")?.contains("\"version\": \"1.8.0\""));
  Ok(())
}

#[test]
fn test_bump_blank_version_is_user_error() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_release_manager(&project.path, &["bump", "  "])?;

  assert_eq!(output.status.code(), Some(1));
  assert_eq!(project.read_file("backend/Cargo.toml")?, CARGO_TOML);
  Ok(())
}

#[test]
fn test_bump_uses_configured_manifests() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("tools/pyproject.toml", "[project]\nname = \"tools\"\nversion = \"0.1.0\"\n")?;
  project.write_file(
    "release.toml",
    r#"
[[manifests]]
path = "tools/pyproject.toml"
format = "key-value"
"#,
  )?;

  let output = run_release_manager(&project.path, &["bump", "0.2.0"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
  assert_eq!(
    project.read_file("tools/pyproject.toml")?,
    "[project]\nname = \"tools\"\nversion = \"0.2.0\"\n"
  );
  assert_eq!(project.read_file("backend/Cargo.toml")?, CARGO_TOML);
  Ok(())
}

#[test]
fn test_invalid_config_is_user_error() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("release.toml", "[exclusions]\nshared = [\"media/big.mov\"]\n")?;

  let output = run_release_manager(&project.path, &["bump", "1.8.0"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("exclusions.shared"));
  assert_eq!(project.read_file("backend/Cargo.toml")?, CARGO_TOML);
  Ok(())
}
