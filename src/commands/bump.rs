//! `bump`: write a version into every configured manifest

use crate::core::context::ReleaseContext;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::release::Version;
use crate::release::manifest::set_version;
use crate::utils::display_relative;

/// Update all manifests; the first failure is returned after every manifest was tried
pub fn run_bump(ctx: &ReleaseContext, version: &str) -> ReleaseResult<()> {
  let version = Version::parse(version)?;
  println!("🔖 Updating version to {}...", version);

  let mut first_error: Option<ReleaseError> = None;
  for target in &ctx.config.manifests {
    let resolved = target.resolve(&ctx.root);
    let label = display_relative(&ctx.root, &resolved.path);
    match set_version(&resolved, &version) {
      Ok(()) => println!("   ✅ Updated {} to {}", label, version),
      Err(e) => {
        eprintln!("   ❌ {}", e);
        first_error.get_or_insert(e.into());
      }
    }
  }

  match first_error {
    Some(err) => Err(err),
    None => Ok(()),
  }
}
