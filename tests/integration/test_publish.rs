//! Integration tests for `release-manager publish`

use crate::helpers::{ASSET, TestProject, run_release_manager, stderr, stdout};
use anyhow::Result;

#[test]
fn test_publish_commits_and_pushes_without_asset() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("CHANGELOG.md", "## 1.8.0\n")?;
  project.write_file(ASSET, "moov")?;
  project.write_file(&format!("media/{}", ASSET), "moov")?;

  let output = run_release_manager(&project.path, &["publish", "1.8.0"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("✓ git add -A"));
  assert_eq!(project.git_log()?[0], "chore(release): bump version to 1.8.0");

  let tracked = project.tracked_files()?;
  assert!(tracked.iter().any(|f| f == "CHANGELOG.md"));
  assert!(!tracked.iter().any(|f| f.ends_with(ASSET)));
  assert!(project.file_exists(ASSET));
  assert_eq!(project.remote_head(), Some(project.local_head()?));
  Ok(())
}

#[test]
fn test_publish_keeps_modified_tracked_asset_out_of_commit() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file(ASSET, "v1")?;
  project.commit("Add demo asset")?;

  project.write_file(ASSET, "v2 re-encoded")?;
  project.write_file("frontend/package.json", "{\n  \"version\": \"1.8.0\"\n}\n")?;

  let output = run_release_manager(&project.path, &["publish", "1.8.0"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
  let shown = crate::helpers::git(&project.path, &["show", "--name-only", "--format=", "HEAD"])?;
  let changed = String::from_utf8_lossy(&shown.stdout).to_string();
  assert!(changed.contains("frontend/package.json"));
  assert!(!changed.contains(ASSET));
  assert_eq!(project.read_file(ASSET)?, "v2 re-encoded");
  Ok(())
}

#[test]
fn test_publish_outside_repository() -> Result<()> {
  let project = TestProject::without_git()?;

  let output = run_release_manager(&project.path, &["publish", "1.8.0"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("Git repository not found"));
  Ok(())
}

#[test]
fn test_publish_push_failure_exits_with_system_error() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("CHANGELOG.md", "## 1.8.0\n")?;
  project.write_file("release.toml", "[publish]\nremote = \"upstream\"\n")?;

  let output = run_release_manager(&project.path, &["publish", "1.8.0"])?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("git push upstream main"));
  // The commit itself still happened
  assert_eq!(project.git_log()?[0], "chore(release): bump version to 1.8.0");
  assert_eq!(project.remote_head(), None);
  Ok(())
}

#[test]
fn test_publish_custom_commit_message() -> Result<()> {
  let project = TestProject::new()?;
  project.write_file("CHANGELOG.md", "## 2.0.0\n")?;
  project.write_file("release.toml", "[publish]\nmessage = \"release: v{version}\"\n")?;

  let output = run_release_manager(&project.path, &["publish", "2.0.0"])?;

  assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
  assert_eq!(project.git_log()?[0], "release: v2.0.0");
  Ok(())
}
