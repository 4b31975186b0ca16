//! `archive`: bundle the project tree into `<slug>-v<version>.zip`

use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::release::Version;
use crate::release::archive::{archive_file_name, build_archive};
use crate::utils::display_relative;

pub fn run_archive(ctx: &ReleaseContext, version: &str) -> ReleaseResult<()> {
  let version = Version::parse(version)?;
  let name = archive_file_name(&ctx.config.project.slug, version.as_str());
  println!("📦 Creating release archive: {}...", name);

  let summary = build_archive(&ctx.root, &name, &ctx.config.exclusions.for_archive())?;

  for path in &summary.skipped {
    eprintln!("   ⚠️  Skipped {}", display_relative(&ctx.root, path));
  }
  println!("✅ Archive created: {}", display_relative(&ctx.root, &summary.path));
  println!("   Files:   {}", summary.entries);
  println!("   Size:    {} bytes", summary.size);
  println!("   SHA-256: {}", summary.sha256);
  Ok(())
}
