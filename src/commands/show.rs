//! `show`: resolved configuration and current manifest versions

use crate::core::context::ReleaseContext;
use crate::core::error::ReleaseResult;
use crate::release::archive::archive_file_name;

pub fn run_show(ctx: &ReleaseContext, toml: bool) -> ReleaseResult<()> {
  if toml {
    print!("{}", ctx.config.to_toml()?);
    return Ok(());
  }

  let config = &ctx.config;
  println!("📁 Project root: {}", ctx.root.display());
  match &ctx.config_path {
    Some(path) => println!("⚙️  Config: {}", path.display()),
    None => println!("⚙️  Config: built-in defaults"),
  }
  println!();

  println!("📄 Manifests:");
  for (target, current) in config.manifests.iter().zip(ctx.current_versions()) {
    let version = match current.version {
      Ok(Some(v)) => v,
      Ok(None) => format!("no `{}` field", target.field),
      Err(e) => format!("unreadable ({})", e),
    };
    println!("   {} [{}] {}", current.label, target.format.as_str(), version);
  }
  println!();

  let join = |names: Vec<&str>| names.join(", ");
  println!("🚫 Excluded from archive and commit: {}", join(config.exclusions.shared.iter().collect()));
  println!("🚫 Excluded from archive only:       {}", join(config.exclusions.archive_only.iter().collect()));
  println!(
    "🧹 Clean: directories [{}], root files [{}]",
    join(config.clean.directories.iter().collect()),
    config.clean.stale_files.join(", ")
  );
  println!(
    "🚀 Publish: {}/{} \"{}\"",
    config.publish.remote, config.publish.branch, config.publish.message
  );
  println!("📦 Archive: {}", archive_file_name(&config.project.slug, "<version>"));
  Ok(())
}
