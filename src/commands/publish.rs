//! `publish`: commit the working tree (minus shared exclusions) and push

use crate::core::context::ReleaseContext;
use crate::core::error::{PublishError, ReleaseResult};
use crate::release::Version;
use crate::release::publish::publish;

pub fn run_publish(ctx: &ReleaseContext, version: &str) -> ReleaseResult<()> {
  let version = Version::parse(version)?;
  let publish_config = &ctx.config.publish;
  println!(
    "🚀 Committing and pushing {} to {}/{}...",
    version, publish_config.remote, publish_config.branch
  );

  let report = publish(&ctx.root, &version, &ctx.config.exclusions.for_commit(), publish_config)?;
  for result in &report.commands {
    if result.success {
      println!("   ✓ {}", result.command);
    } else {
      eprintln!("   ✗ {}: {}", result.command, result.diagnostic());
    }
  }

  if !report.is_success() {
    return Err(
      PublishError::Failed {
        failures: report.failures(),
      }
      .into(),
    );
  }

  println!("✅ Published {}", publish_config.commit_message(version.as_str()));
  Ok(())
}
