//! `clean`: remove cache directories and stale release files

use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::release::cleaner::clean;
use crate::utils::display_relative;
use std::io;

pub fn run_clean(ctx: &ReleaseContext) -> ReleaseResult<()> {
  println!("🧹 Cleaning artifacts...");
  let report = clean(&ctx.root, &ctx.config.clean.directories, &ctx.config.clean.stale_files);

  for path in &report.removed {
    println!("   🗑️  {}", display_relative(&ctx.root, path));
  }
  for (path, e) in &report.failures {
    eprintln!("   ❌ {}: {}", display_relative(&ctx.root, path), e);
  }

  if let Some((path, e)) = report.failures.first() {
    return Err(ReleaseError::Io(io::Error::new(
      e.kind(),
      format!(
        "could not remove {} ({} failure(s) in total): {}",
        display_relative(&ctx.root, path),
        report.failures.len(),
        e
      ),
    )));
  }

  if report.removed.is_empty() {
    println!("✅ Nothing to clean");
  } else {
    println!("✅ Cleanup complete ({} removed)", report.removed.len());
  }
  Ok(())
}
