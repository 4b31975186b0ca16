//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

pub const CARGO_TOML: &str = r#"[package]
name = "onepa-playout"
version = "1.7.2"
edition = "2021"
rust-version = "1.75"

[dependencies]
serde = { version = "1.0", features = ["derive"] }
"#;

pub const PACKAGE_JSON: &str = r#"{
  "name": "onepa-playout-frontend",
  "private": true,
  "version": "1.7.2",
  "type": "module",
  "scripts": {
    "dev": "vite",
    "build": "vite build"
  }
}
"#;

pub const ASSET: &str = "big_buck_bunny_1080p_h264.mov";

/// A backend/frontend project under git, with a bare `origin` next to it
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
  pub remote: PathBuf,
}

impl TestProject {
  /// Create the project with one commit on `main`
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("project");
    let remote = root.path().join("origin.git");
    std::fs::create_dir_all(&path)?;
    std::fs::create_dir_all(&remote)?;

    git(&remote, &["init", "--bare", "-q"])?;
    git(&path, &["init", "-q"])?;
    git(&path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;
    git(&path, &["remote", "add", "origin", &remote.to_string_lossy()])?;

    let project = Self {
      _root: root,
      path,
      remote,
    };
    project.write_file("backend/Cargo.toml", CARGO_TOML)?;
    project.write_file("backend/src/main.rs", "fn main() {}\n")?;
    project.write_file("frontend/package.json", PACKAGE_JSON)?;
    project.write_file("frontend/src/App.jsx", "export default function App() {}\n")?;
    project.write_file(".gitignore", "node_modules/\ntarget/\n__pycache__/\n*.zip\n")?;
    project.commit("Initial project setup")?;

    Ok(project)
  }

  /// Same project without any git repository
  pub fn without_git() -> Result<Self> {
    let project = Self::new()?;
    std::fs::remove_dir_all(project.path.join(".git"))?;
    Ok(project)
  }

  /// Add build output, caches and the large asset
  pub fn add_artifacts(&self) -> Result<()> {
    self.write_file("frontend/node_modules/react/index.js", "module.exports = {};\n")?;
    self.write_file("backend/target/debug/onepa-playout", "ELF")?;
    self.write_file("scripts/__pycache__/release_manager.cpython-311.pyc", "\0")?;
    self.write_file("scripts/release_manager.py", "print('release')\n")?;
    self.write_file(ASSET, "moov")?;
    self.write_file("release.zip", "PK")?;
    Ok(())
  }

  pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
    let path = self.path.join(rel);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
  }

  pub fn read_file(&self, rel: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(rel))?)
  }

  pub fn file_exists(&self, rel: &str) -> bool {
    self.path.join(rel).exists()
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-q", "-m", message])?;
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Subject lines, newest first
  pub fn git_log(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["log", "--format=%s"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Files tracked at HEAD
  pub fn tracked_files(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["ls-tree", "-r", "--name-only", "HEAD"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Commit `main` points to on the bare remote, if any
  pub fn remote_head(&self) -> Option<String> {
    let output = git(&self.remote, &["rev-parse", "--verify", "-q", "refs/heads/main"]).ok()?;
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  pub fn local_head(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Sorted entry names of a zip under the project root
  pub fn zip_entries(&self, rel: &str) -> Result<Vec<String>> {
    let file = File::open(self.path.join(rel)).with_context(|| format!("Failed to open {}", rel))?;
    let archive = zip::ZipArchive::new(file)?;
    let mut names: Vec<String> = archive.file_names().map(String::from).collect();
    names.sort();
    Ok(names)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run release-manager in `cwd`, feeding `input` on stdin
///
/// Does not check the exit status; tests assert on it.
pub fn run_release_manager_with_input(cwd: &Path, args: &[&str], input: &str) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_release-manager");

  let mut child = Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RELEASE_MANAGER_LOG")
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .context("Failed to run release-manager")?;

  if let Some(mut stdin) = child.stdin.take() {
    stdin.write_all(input.as_bytes())?;
  }

  child.wait_with_output().context("Failed to wait for release-manager")
}

/// Run release-manager with empty stdin
pub fn run_release_manager(cwd: &Path, args: &[&str]) -> Result<Output> {
  run_release_manager_with_input(cwd, args, "")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
