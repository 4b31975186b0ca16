//! Integration tests for `release-manager clean` and `release-manager show`

use crate::helpers::{TestProject, run_release_manager, stderr, stdout};
use anyhow::Result;

#[test]
fn test_clean_removes_caches_and_stale_archive() -> Result<()> {
  let project = TestProject::new()?;
  project.add_artifacts()?;
  project.write_file("backend/scripts/__pycache__/gen.pyc", "\0")?;

  let output = run_release_manager(&project.path, &["clean"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
  assert!(!project.file_exists("scripts/__pycache__"));
  assert!(!project.file_exists("backend/scripts/__pycache__"));
  assert!(!project.file_exists("release.zip"));
  // Build output is left alone
  assert!(project.file_exists("frontend/node_modules/react/index.js"));
  assert!(project.file_exists("backend/target/debug/onepa-playout"));
  assert!(stdout(&output).contains("Cleanup complete (3 removed)"));
  Ok(())
}

#[test]
fn test_clean_twice_is_a_no_op() -> Result<()> {
  let project = TestProject::new()?;
  project.add_artifacts()?;

  let first = run_release_manager(&project.path, &["clean"])?;
  assert_eq!(first.status.code(), Some(0));
  let second = run_release_manager(&project.path, &["clean"])?;
  assert_eq!(second.status.code(), Some(0));
  assert!(stdout(&second).contains("Nothing to clean"));
  Ok(())
}

#[test]
fn test_clean_failure_exits_two_after_removing_the_rest() -> Result<()> {
  let project = TestProject::new()?;
  project.add_artifacts()?;
  project.write_file("blocked/keep.txt", "x")?;
  project.write_file("release.toml", "[clean]\nstale_files = [\"blocked\", \"release.zip\"]\n")?;

  let output = run_release_manager(&project.path, &["clean"])?;

  assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr(&output));
  assert!(stderr(&output).contains("blocked"));
  assert!(project.file_exists("blocked/keep.txt"));
  assert!(!project.file_exists("release.zip"));
  assert!(!project.file_exists("scripts/__pycache__"));
  Ok(())
}

#[test]
fn test_show_lists_versions_and_exclusions() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_release_manager(&project.path, &["show"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
  let out = stdout(&output);
  assert!(out.contains("Config: built-in defaults"));
  assert!(out.contains("backend/Cargo.toml [key-value] 1.7.2"));
  assert!(out.contains("frontend/package.json [json] 1.7.2"));
  assert!(out.contains("big_buck_bunny_1080p_h264.mov"));
  assert!(out.contains("onepa-playout-v<version>.zip"));
  Ok(())
}

#[test]
fn test_show_toml_round_trips_through_config() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_release_manager(&project.path, &["show", "--toml"])?;
  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

  // The rendered configuration is itself a valid config file
  project.write_file("release.toml", &stdout(&output))?;
  let reloaded = run_release_manager(&project.path, &["show"])?;
  assert_eq!(reloaded.status.code(), Some(0), "stderr: {}", stderr(&reloaded));
  assert!(stdout(&reloaded).contains("release.toml"));
  Ok(())
}

#[test]
fn test_missing_explicit_config_is_user_error() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_release_manager(&project.path, &["show", "--config", "nope.toml"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Configuration file not found"));
  Ok(())
}
